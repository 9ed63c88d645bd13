//! Frost Eval - runtime for synthesized immutable classes.
//!
//! Runs the constructor and getter bodies produced by `frost_transform`:
//! - `Value`: runtime values, with `Arc`-shared heap storage
//! - `guard`: the immutability and property-name checks bodies call, and
//!   the declared-type check on value-like field stores
//! - `ClassRuntime` / `Instance`: construction, getters and rendering
//! - `EvalError`: E6xxx runtime construction errors
//!
//! ```text
//! let runtime = ClassRuntime::new(&pool, class);
//! let point = runtime.construct_keyed(Some(Value::map([("x", Value::Int(1))])))?;
//! ```

pub mod errors;
pub mod guard;
mod interpreter;
mod value;

pub use errors::{EvalError, EvalErrorKind, EvalResult};
pub use guard::{check_declared_type, check_immutable, check_prop_names, DeclaredType};
pub use interpreter::{type_default, ClassRuntime, Instance};
pub use value::{Heap, MapStorage, ObjectValue, Shared, Value};
