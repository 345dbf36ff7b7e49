//! Record identifier - opaque UUID shared by every persisted collection

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Opaque, globally unique record identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(Uuid);

impl RecordId {
    /// Generate a fresh random identifier
    #[inline]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    #[inline]
    pub const fn from_uuid(id: Uuid) -> Self {
        Self(id)
    }

    #[inline]
    pub const fn into_inner(self) -> Uuid {
        self.0
    }

    /// Parse from its hyphenated string form
    pub fn parse(s: &str) -> Result<Self, RecordIdParseError> {
        Uuid::parse_str(s.trim())
            .map(Self)
            .map_err(|_| RecordIdParseError(s.to_string()))
    }
}

impl Default for RecordId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Uuid> for RecordId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl From<RecordId> for Uuid {
    fn from(id: RecordId) -> Self {
        id.0
    }
}

impl std::str::FromStr for RecordId {
    type Err = RecordIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Error returned when a string is not a well-formed record id
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Malformed record id: {0}")]
pub struct RecordIdParseError(pub String);
