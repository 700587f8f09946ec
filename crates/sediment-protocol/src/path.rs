use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// Why a candidate string failed object-path validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("object path is empty")]
    Empty,
    #[error("object path `{0}` does not begin with `/`")]
    MissingLeadingSlash(String),
    #[error("object path `{0}` contains an empty segment")]
    EmptySegment(String),
    #[error("object path `{0}` has a trailing `/`")]
    TrailingSlash(String),
    #[error("object path `{0}` contains illegal character `{1}`")]
    IllegalCharacter(String, char),
}

/// Hierarchical address of an object served on the bus, e.g.
/// `/org/sediment/Manager`.
///
/// Only constructible through validation: non-empty, leading `/`, segments
/// of `[A-Za-z0-9_]+`, no empty segments, no trailing slash except the root
/// path `/` itself. The same check runs on deserialization, so a malformed
/// path cannot enter through the wire either.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectPath(String);

impl ObjectPath {
    /// Validate `candidate` and wrap it. Purely syntactic, no I/O.
    pub fn new(candidate: impl Into<String>) -> Result<Self, PathError> {
        let candidate = candidate.into();
        if candidate.is_empty() {
            return Err(PathError::Empty);
        }
        if !candidate.starts_with('/') {
            return Err(PathError::MissingLeadingSlash(candidate));
        }
        if candidate == "/" {
            return Ok(ObjectPath(candidate));
        }
        if candidate.ends_with('/') {
            return Err(PathError::TrailingSlash(candidate));
        }
        if candidate[1..].split('/').any(|segment| segment.is_empty()) {
            return Err(PathError::EmptySegment(candidate));
        }
        if let Some(c) = candidate
            .chars()
            .find(|c| !c.is_ascii_alphanumeric() && *c != '_' && *c != '/')
        {
            return Err(PathError::IllegalCharacter(candidate, c));
        }
        Ok(ObjectPath(candidate))
    }

    /// The root path `/`.
    pub fn root() -> Self {
        ObjectPath(String::from("/"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }

    /// Path segments in order; empty for the root path.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Append one segment, validating the result.
    pub fn child(&self, segment: &str) -> Result<Self, PathError> {
        if self.is_root() {
            Self::new(format!("/{segment}"))
        } else {
            Self::new(format!("{}/{segment}", self.0))
        }
    }
}

impl fmt::Display for ObjectPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for ObjectPath {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl FromStr for ObjectPath {
    type Err = PathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<&str> for ObjectPath {
    type Error = PathError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl Serialize for ObjectPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for ObjectPath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        ObjectPath::new(raw).map_err(serde::de::Error::custom)
    }
}
