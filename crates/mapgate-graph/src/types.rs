//! Identifier types for maps and tokens.

use std::borrow::Borrow;
use std::collections::HashSet;
use std::collections::hash_set;
use std::fmt;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// Identifier of a playable map.
///
/// Newtype over `String` so a map can't be passed where a token is
/// expected. `Borrow<str>` lets graph lookups take a plain `&str`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MapId(String);

impl MapId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for MapId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MapId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for MapId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Identifier of a credential a player can hold.
///
/// The empty token is special: a map that requires it requires nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenId(String);

impl TokenId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The "no token required" token.
    pub fn none() -> Self {
        Self(String::new())
    }

    /// Returns `true` for the "no token required" token.
    pub fn is_none(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TokenId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_none() {
            f.write_str("<none>")
        } else {
            f.write_str(&self.0)
        }
    }
}

impl Borrow<str> for TokenId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TokenId {
    fn from(id: &str) -> Self {
        Self(id.to_owned())
    }
}

impl From<String> for TokenId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

// ---------------------------------------------------------------------------
// HeldTokens
// ---------------------------------------------------------------------------

/// The tokens a caller currently holds.
///
/// Supplied per call by whoever owns the player record; the graph never
/// stores or caches it. Only membership matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HeldTokens(HashSet<TokenId>);

impl HeldTokens {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a token. Returns `false` if it was already held.
    pub fn insert(&mut self, token: impl Into<TokenId>) -> bool {
        self.0.insert(token.into())
    }

    pub fn contains(&self, token: &str) -> bool {
        self.0.contains(token)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, TokenId> {
        self.0.iter()
    }
}

impl<T: Into<TokenId>> FromIterator<T> for HeldTokens {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<TokenId>> Extend<T> for HeldTokens {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter.into_iter().map(Into::into));
    }
}
