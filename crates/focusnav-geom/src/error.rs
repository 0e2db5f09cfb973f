use std::{error::Error as StdError, fmt, result::Result as StdResult};

/// Geometry error type.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A rectangle had a negative or non-finite component.
    InvalidRect(String),
    /// A direction name could not be parsed.
    UnknownDirection(String),
    /// A distance method name could not be parsed.
    UnknownDistanceMethod(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidRect(s) => write!(f, "invalid rect: {s}"),
            Self::UnknownDirection(s) => write!(f, "unknown direction: {s}"),
            Self::UnknownDistanceMethod(s) => write!(f, "unknown distance method: {s}"),
        }
    }
}

impl StdError for Error {}

/// Result type for geometry operations.
pub type Result<T> = StdResult<T, Error>;
