//! Frost command-line driver.
//!
//! Reads class declarations from a JSON document, runs the immutability
//! transform over every class, and prints the synthesized members and any
//! diagnostics. `construct` additionally runs a synthesized constructor on
//! caller-supplied arguments.

pub mod commands;
pub mod input;
pub mod options;

use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times. Enable with `RUST_LOG=frost_transform=debug`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            tracing_subscriber::registry()
                .with(fmt::layer().with_writer(std::io::stderr).with_target(true))
                .with(filter)
                .init();
        }
    });
}
