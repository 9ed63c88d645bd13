//! Error codes for every diagnostic the transform and runtime can raise.
//!
//! The first digit names the phase: E6xxx for failures raised while
//! constructing an instance through a synthesized constructor, E7xxx for
//! rejections made while synthesizing the class.

use std::fmt;

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    // Runtime construction errors (E6xxx)
    /// Value for an unresolved field could not be proven immutable
    E6001,
    /// Unknown property key passed to the keyed constructor
    E6002,
    /// Read-only property overridden by a constructor argument
    E6003,
    /// Positional constructor called with the wrong number of arguments
    E6004,
    /// Constructor not available on the class
    E6005,
    /// Value of the wrong shape reached a synthesized body
    E6006,

    // Synthesis errors (E7xxx)
    /// Field type cannot be proven immutable
    E7001,
    /// Class already declares a constructor
    E7002,
    /// Public field on an immutable class
    E7003,
    /// Marker applied to an interface
    E7004,
    /// Two members share a name
    E7005,
}

impl ErrorCode {
    /// All error code variants, for exhaustive testing.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E6001,
        ErrorCode::E6002,
        ErrorCode::E6003,
        ErrorCode::E6004,
        ErrorCode::E6005,
        ErrorCode::E6006,
        ErrorCode::E7001,
        ErrorCode::E7002,
        ErrorCode::E7003,
        ErrorCode::E7004,
        ErrorCode::E7005,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E6001 => "E6001",
            ErrorCode::E6002 => "E6002",
            ErrorCode::E6003 => "E6003",
            ErrorCode::E6004 => "E6004",
            ErrorCode::E6005 => "E6005",
            ErrorCode::E6006 => "E6006",
            ErrorCode::E7001 => "E7001",
            ErrorCode::E7002 => "E7002",
            ErrorCode::E7003 => "E7003",
            ErrorCode::E7004 => "E7004",
            ErrorCode::E7005 => "E7005",
        }
    }

    /// Raised while running a synthesized constructor.
    pub fn is_runtime_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E6001
                | ErrorCode::E6002
                | ErrorCode::E6003
                | ErrorCode::E6004
                | ErrorCode::E6005
                | ErrorCode::E6006
        )
    }

    /// Raised while synthesizing the class.
    pub fn is_synthesis_error(&self) -> bool {
        matches!(
            self,
            ErrorCode::E7001
                | ErrorCode::E7002
                | ErrorCode::E7003
                | ErrorCode::E7004
                | ErrorCode::E7005
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse an error code string like `"E7001"`. Case-insensitive.
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let upper = s.to_uppercase();
        Self::ALL
            .iter()
            .find(|code| code.as_str() == upper)
            .copied()
            .ok_or(())
    }
}
