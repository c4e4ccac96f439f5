//! Key paths into nested stores
//!
//! A key path is a `.`-separated list of keys: `user.address.city`. Each
//! segment is a single lookup step into a nested [`Store`](crate::Store).

use std::fmt;

use smallvec::SmallVec;

/// Separator between key path segments
pub const SEPARATOR: char = '.';

/// A parsed key path
///
/// Empty segments are dropped while parsing, so `"a..b"` and `"a.b"` address
/// the same value. A path without segments never resolves.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    raw: String,
    segments: SmallVec<[String; 4]>,
}

impl KeyPath {
    /// Parse a dotted key path
    pub fn parse(path: &str) -> Self {
        let segments = path
            .split(SEPARATOR)
            .filter(|segment| !segment.is_empty())
            .map(str::to_owned)
            .collect();

        Self {
            raw: path.to_owned(),
            segments,
        }
    }

    /// The key path as it was written
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// All segments, outermost first
    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Number of lookup steps
    pub fn depth(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Whether this is a single-segment (direct key) path
    pub fn is_direct(&self) -> bool {
        self.segments.len() == 1
    }

    /// Split into the intermediate segments and the terminal key
    pub fn split_last(&self) -> Option<(&[String], &str)> {
        self.segments
            .split_last()
            .map(|(last, parents)| (parents, last.as_str()))
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for KeyPath {
    fn from(path: &str) -> Self {
        Self::parse(path)
    }
}

impl From<String> for KeyPath {
    fn from(path: String) -> Self {
        Self::parse(&path)
    }
}

impl From<&String> for KeyPath {
    fn from(path: &String) -> Self {
        Self::parse(path)
    }
}

impl From<&KeyPath> for KeyPath {
    fn from(path: &KeyPath) -> Self {
        path.clone()
    }
}
