//! Entity identifier.
//!
//! Tracked entities are keyed by an opaque, caller-supplied string (a tourist
//! id, a device serial, a wallet address).  `EntityId` wraps it so it cannot
//! be confused with zone names or anomaly labels, and rejects blank
//! strings at construction.

use std::borrow::Borrow;
use std::fmt;
use std::sync::Arc;

/// Identifier of one tracked entity.
///
/// Backed by `Arc<str>`: ids are cloned into every track record and event, so
/// cloning is a reference-count bump rather than a string copy.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "String", into = "String"))]
pub struct EntityId(Arc<str>);

impl EntityId {
    /// Wrap `id` as given, returning `None` if it is empty or only
    /// whitespace.  Non-blank ids are not trimmed.
    pub fn new(id: impl AsRef<str>) -> Option<Self> {
        let id = id.as_ref();
        if id.trim().is_empty() {
            None
        } else {
            Some(Self(Arc::from(id)))
        }
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for EntityId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for EntityId {
    type Error = crate::CoreError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        EntityId::new(&s).ok_or_else(|| crate::CoreError::Parse("empty entity id".into()))
    }
}

impl From<EntityId> for String {
    fn from(id: EntityId) -> String {
        id.0.to_string()
    }
}
