//! Embedded error documentation for `--explain` support.
//!
//! Each error code has a markdown file in this directory, embedded at
//! compile time.

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for `code`, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    // Runtime construction errors (E6xxx)
    (ErrorCode::E6001, include_str!("E6001.md")),
    (ErrorCode::E6002, include_str!("E6002.md")),
    (ErrorCode::E6003, include_str!("E6003.md")),
    (ErrorCode::E6004, include_str!("E6004.md")),
    (ErrorCode::E6005, include_str!("E6005.md")),
    (ErrorCode::E6006, include_str!("E6006.md")),
    // Synthesis errors (E7xxx)
    (ErrorCode::E7001, include_str!("E7001.md")),
    (ErrorCode::E7002, include_str!("E7002.md")),
    (ErrorCode::E7003, include_str!("E7003.md")),
    (ErrorCode::E7004, include_str!("E7004.md")),
    (ErrorCode::E7005, include_str!("E7005.md")),
];

#[cfg(test)]
mod tests;
