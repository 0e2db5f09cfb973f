use std::{io, result::Result as StdResult};

use thiserror::Error;

use crate::{geom, key::FocusKey};

/// Result type for focusnav operations.
pub type Result<T> = StdResult<T, Error>;

/// Engine error type.
///
/// A failed operation never leaves a partial change behind: the tree and the
/// focus state are exactly as they were before the call.
#[derive(PartialEq, Error, Debug, Clone)]
pub enum Error {
    /// A node with this key is already registered.
    #[error("duplicate focus key: {0}")]
    DuplicateKey(FocusKey),

    /// No node with this key is registered.
    #[error("focus key not found: {0}")]
    NotFound(String),

    /// The key does not name a registered, focusable node.
    #[error("invalid focus target: {0}")]
    InvalidTarget(String),

    /// A node named a parent that is not registered.
    #[error("parent {parent} of {key} not found")]
    ParentNotFound {
        /// Key of the node being added.
        key: FocusKey,
        /// Missing parent key.
        parent: String,
    },

    /// A focus key failed validation.
    #[error("invalid focus key: {0:?}")]
    InvalidKey(String),

    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(#[from] geom::Error),

    /// Configuration could not be parsed.
    #[error("config: {0}")]
    Config(String),

    /// Internal failure, such as a diagnostics writer error.
    #[error("internal: {0}")]
    Internal(String),
}

impl From<io::Error> for Error {
    fn from(e: io::Error) -> Self {
        Self::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}
