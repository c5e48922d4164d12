//! Paths into nested state maps.
//!
//! A path names a field in a (possibly nested) state map using dot notation,
//! e.g. `"crew.0.status"`. Segments are plain map keys: sequences are
//! compared and replaced wholesale by the diff layer, so a numeric-looking
//! segment is an ordinary key, never an array index.

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};
use std::fmt;

/// Separator between path segments in the rendered form.
pub const SEPARATOR: char = '.';

/// An ordered sequence of field-name segments identifying a location in a
/// state map. Serialized on the wire as the joined dot-notation string.
///
/// Segments must not contain the separator character.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChangePath(Vec<String>);

impl ChangePath {
    /// Create a path from segments.
    pub fn new(segments: Vec<String>) -> Self {
        Self(segments)
    }

    /// Create a single-segment path.
    pub fn key(segment: impl Into<String>) -> Self {
        Self(vec![segment.into()])
    }

    /// Parse a path from dot notation (e.g. `"crew.0.status"`).
    pub fn parse(path: &str) -> Self {
        if path.is_empty() {
            return Self(Vec::new());
        }
        Self(path.split(SEPARATOR).map(str::to_string).collect())
    }

    /// Get the segments.
    pub fn segments(&self) -> &[String] {
        &self.0
    }

    /// Number of segments.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// An empty path names nothing and is invalid in a [`DeltaChange`].
    ///
    /// [`DeltaChange`]: crate::change::DeltaChange
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Get the last segment.
    pub fn last(&self) -> Option<&str> {
        self.0.last().map(String::as_str)
    }

    /// Create a child path with one more segment appended.
    pub fn child(&self, segment: impl Into<String>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Self(segments)
    }
}

impl fmt::Display for ChangePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.join(&SEPARATOR.to_string()))
    }
}

impl From<&str> for ChangePath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl Serialize for ChangePath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for ChangePath {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Ok(ChangePath::parse(&s))
    }
}
