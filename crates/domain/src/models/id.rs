//! Identifier types.
//!
//! Two distinct kinds of identifier exist in this system and must never be
//! confused: generated submission ids, and the fixed key of the singleton
//! admin credential row. `GeneratedId` is a parse-validated newtype;
//! credential lookups use the [`CREDENTIAL_ID`] literal and never accept a
//! caller-supplied id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use uuid::Uuid;

/// Fixed primary key of the singleton admin credential row.
pub const CREDENTIAL_ID: &str = "admin";

/// Error type for identifier parsing.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdError {
    #[error("Malformed identifier: {0}")]
    Malformed(String),
}

/// An opaque, persistence-assigned submission identifier.
///
/// Serializes as its canonical hyphenated string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GeneratedId(Uuid);

impl GeneratedId {
    /// Generates a fresh identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_uuid(&self) -> Uuid {
        self.0
    }
}

impl Default for GeneratedId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for GeneratedId {
    fn from(uuid: Uuid) -> Self {
        Self(uuid)
    }
}

impl FromStr for GeneratedId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|_| IdError::Malformed(s.to_string()))
    }
}

impl fmt::Display for GeneratedId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        let id = GeneratedId::new();
        let parsed: GeneratedId = id.to_string().parse().unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn test_malformed_id_is_typed_error() {
        let result: Result<GeneratedId, _> = "not-a-uuid".parse();
        assert!(matches!(result, Err(IdError::Malformed(_))));
    }

    #[test]
    fn test_credential_id_never_parses_as_generated() {
        // The fixed literal must not be mistakable for a submission id.
        let result: Result<GeneratedId, _> = CREDENTIAL_ID.parse();
        assert!(result.is_err());
    }

    #[test]
    fn test_serde_as_string() {
        let id = GeneratedId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id));
        let back: GeneratedId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, back);
    }
}
