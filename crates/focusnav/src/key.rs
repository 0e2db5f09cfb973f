use std::{borrow::Borrow, fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

use crate::error::{Error, Result};

new_key_type! {
    /// Opaque identifier for a node stored in the registry arena.
    pub struct NodeId;
}

/// Prefix for keys the engine generates for anonymous nodes.
pub const GENERATED_KEY_PREFIX: &str = "sn:focusable-item-";

/// The caller-visible identity of a focusable node. Keys are unique across
/// the whole tree and must be non-empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct FocusKey {
    /// Stored key string.
    key: String,
}

impl FocusKey {
    /// Create a new key, returning an error if it is empty or padded with
    /// whitespace.
    pub fn new(key: impl Into<String>) -> Result<Self> {
        let key = key.into();
        if key.is_empty() || key.trim() != key {
            return Err(Error::InvalidKey(key));
        }
        Ok(Self { key })
    }

    /// Construct the `n`th generated key.
    pub(crate) fn generated(n: u64) -> Self {
        Self {
            key: format!("{GENERATED_KEY_PREFIX}{n}"),
        }
    }

    /// The key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Was this key generated by the engine?
    pub fn is_generated(&self) -> bool {
        self.key.starts_with(GENERATED_KEY_PREFIX)
    }
}

impl FromStr for FocusKey {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for FocusKey {
    type Error = Error;
    fn try_from(s: String) -> Result<Self> {
        Self::new(s)
    }
}

impl From<FocusKey> for String {
    fn from(k: FocusKey) -> Self {
        k.key
    }
}

impl Borrow<str> for FocusKey {
    fn borrow(&self) -> &str {
        &self.key
    }
}

impl AsRef<str> for FocusKey {
    fn as_ref(&self) -> &str {
        &self.key
    }
}

impl PartialEq<str> for FocusKey {
    fn eq(&self, other: &str) -> bool {
        self.key == other
    }
}

impl PartialEq<&str> for FocusKey {
    fn eq(&self, other: &&str) -> bool {
        self.key == *other
    }
}

impl fmt::Display for FocusKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}
