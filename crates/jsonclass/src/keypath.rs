//! Structural paths into a validated object and the messages addressed by them.
//!
//! A [`Keypath`] renders its segments joined by [`Keypath::SEPARATOR`], for
//! both object keys and list indices:
//!
//! ```
//! use jsonclass::keypath::Keypath;
//!
//! let path = Keypath::root().key("items").index(2).key("price");
//! assert_eq!(path.to_string(), "items.2.price");
//! ```

use std::fmt;

use indexmap::IndexMap;
use serde::Serialize;

// ============================================================================
// KEYPATH
// ============================================================================

/// One step of a [`Keypath`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Segment {
    /// An object key (a field's storage name or a dict key).
    Key(String),
    /// A position inside a list.
    Index(usize),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Key(key) => f.write_str(key),
            Self::Index(index) => write!(f, "{index}"),
        }
    }
}

/// Path from the root of a validation session down to one value.
///
/// Keypaths are immutable; [`key`](Self::key) and [`index`](Self::index)
/// return a narrowed copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Keypath {
    segments: Vec<Segment>,
}

impl Keypath {
    /// Separator placed between rendered segments.
    pub const SEPARATOR: char = '.';

    /// The empty path addressing the session root.
    #[must_use]
    pub const fn root() -> Self {
        Self {
            segments: Vec::new(),
        }
    }

    /// Parses a rendered keypath. All-digit segments become indices.
    #[must_use]
    pub fn parse(rendered: &str) -> Self {
        if rendered.is_empty() {
            return Self::root();
        }
        let segments = rendered
            .split(Self::SEPARATOR)
            .map(|part| match part.parse::<usize>() {
                Ok(index) => Segment::Index(index),
                Err(_) => Segment::Key(part.to_owned()),
            })
            .collect();
        Self { segments }
    }

    /// Returns this path extended by an object key.
    #[must_use]
    pub fn key(&self, key: impl Into<String>) -> Self {
        self.child(Segment::Key(key.into()))
    }

    /// Returns this path extended by a list index.
    #[must_use]
    pub fn index(&self, index: usize) -> Self {
        self.child(Segment::Index(index))
    }

    fn child(&self, segment: Segment) -> Self {
        let mut segments = Vec::with_capacity(self.segments.len() + 1);
        segments.extend_from_slice(&self.segments);
        segments.push(segment);
        Self { segments }
    }

    /// All segments from the root outward.
    #[must_use]
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// The innermost segment, if any.
    #[must_use]
    pub fn last(&self) -> Option<&Segment> {
        self.segments.last()
    }

    /// Whether this is the root path.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for Keypath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, segment) in self.segments.iter().enumerate() {
            if i > 0 {
                write!(f, "{}", Self::SEPARATOR)?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl From<&str> for Keypath {
    fn from(rendered: &str) -> Self {
        Self::parse(rendered)
    }
}

// ============================================================================
// KEYPATH MESSAGES
// ============================================================================

/// Violation messages addressed by rendered keypath.
///
/// One message per keypath; inserting at an existing keypath replaces the
/// earlier message. Iteration follows first-insertion order, which for a
/// session is field declaration order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct KeypathMessages {
    entries: IndexMap<String, String>,
}

impl KeypathMessages {
    /// Creates an empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a map holding a single message.
    #[must_use]
    pub fn single(keypath: impl Into<String>, message: impl Into<String>) -> Self {
        let mut messages = Self::new();
        messages.insert(keypath, message);
        messages
    }

    /// Records `message` at `keypath`, replacing any earlier message there.
    pub fn insert(&mut self, keypath: impl Into<String>, message: impl Into<String>) {
        self.entries.insert(keypath.into(), message.into());
    }

    /// Moves every message of `other` into this map.
    pub fn merge(&mut self, other: Self) {
        self.entries.extend(other.entries);
    }

    /// The message recorded at `keypath`.
    #[must_use]
    pub fn get(&self, keypath: &str) -> Option<&str> {
        self.entries.get(keypath).map(String::as_str)
    }

    /// Whether a message is recorded at `keypath`.
    #[must_use]
    pub fn contains(&self, keypath: &str) -> bool {
        self.entries.contains_key(keypath)
    }

    /// Number of addressed messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no message was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rendered keypaths in insertion order.
    pub fn keypaths(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// `(keypath, message)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl FromIterator<(String, String)> for KeypathMessages {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for KeypathMessages {
    type Item = (String, String);
    type IntoIter = indexmap::map::IntoIter<String, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
