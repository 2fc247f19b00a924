use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use thiserror::Error;

use crate::identity::normalize;

/// A normalized, comparable identity key.
///
/// Always a non-empty run of lowercase ASCII letters and digits. The only
/// constructors go through the normalizer, so an empty key cannot exist.
/// Deserialization rejects strings that are not already canonical.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CanonicalIdentity(String);

#[derive(Debug, Error, PartialEq, Eq)]
pub enum IdentityError {
    #[error("Identity is empty after normalization")]
    Empty,
    #[error("Not a canonical identity: '{0}'")]
    NotCanonical(String),
}

impl CanonicalIdentity {
    /// Normalize a raw identity. `None` means the record must be discarded.
    pub fn parse<'a>(raw: impl Into<Option<&'a str>>) -> Option<Self> {
        let key = normalize(raw);
        if key.is_empty() {
            None
        } else {
            Some(CanonicalIdentity(key))
        }
    }

    /// Like [`CanonicalIdentity::parse`], for manual entry where an empty key is an error.
    pub fn try_from_raw(raw: &str) -> Result<Self, IdentityError> {
        Self::parse(raw).ok_or(IdentityError::Empty)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for CanonicalIdentity {
    type Error = IdentityError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if value.is_empty() {
            Err(IdentityError::Empty)
        } else if normalize(value.as_str()) != value {
            Err(IdentityError::NotCanonical(value))
        } else {
            Ok(CanonicalIdentity(value))
        }
    }
}

impl From<CanonicalIdentity> for String {
    fn from(id: CanonicalIdentity) -> Self {
        id.0
    }
}

impl fmt::Display for CanonicalIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Scope tag for rosters. Distinct platforms are never cross-matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Instagram,
    X,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlatformError {
    #[error("Unknown platform '{0}': expected instagram or x")]
    Unknown(String),
}

impl Platform {
    pub const ALL: [Platform; 2] = [Platform::Instagram, Platform::X];

    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Instagram => "instagram",
            Platform::X => "x",
        }
    }
}

impl FromStr for Platform {
    type Err = PlatformError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instagram" => Ok(Platform::Instagram),
            "x" => Ok(Platform::X),
            _ => Err(PlatformError::Unknown(s.to_string())),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PostId(String);

impl PostId {
    pub fn new(id: impl Into<String>) -> Self {
        PostId(id.into())
    }

    pub fn generate() -> Self {
        PostId(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PostId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Content hash of a store snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotVersion(String);

impl SnapshotVersion {
    pub fn from_content(content: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(content);

        let hash = hasher.finalize();
        let hex = hex::encode(hash);

        SnapshotVersion(format!("sha256:{hex}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
