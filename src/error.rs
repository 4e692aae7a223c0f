//! Builder contract violations.

use thiserror::Error;

/// Errors raised when a builder contract is violated.
///
/// All variants are programmer errors surfaced fail-fast at the offending
/// call; nothing is retried or recovered internally, and there is no
/// partial-output mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A path-based assignment was attempted with an empty path.
    #[error("cannot assign a value at an empty path")]
    EmptyPath,

    /// `raw` requires a non-empty dotted path alongside its value.
    #[error("raw parameters require a non-empty path and a value")]
    InvalidRawParameter,

    /// A dis_max build requires a `queries` array in its options.
    #[error("expected a `queries` array in the dis_max options")]
    NotAnArray,

    /// A multi_match build requires both a `query` and a `fields` array.
    #[error("multi_match requires a `query` value and a `fields` array")]
    MissingRequiredField,
}

pub type Result<T> = std::result::Result<T, Error>;
