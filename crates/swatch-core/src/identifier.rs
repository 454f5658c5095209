//! Key identifiers and dotted key paths.
//!
//! This module provides the [`Id`] type, an interned identifier used for each
//! segment of a key, and [`KeyPath`], the ordered sequence of segments that
//! names a value in a style (`mainView.header.backgroundColor`).

use std::{
    fmt,
    str::FromStr,
    sync::{Mutex, OnceLock},
};

use string_interner::{DefaultStringInterner, DefaultSymbol};
use thiserror::Error;

/// Global string interner for key segments.
///
/// # Thread Safety
///
/// This uses `Mutex` for thread-safe access to the string interner.
static INTERNER: OnceLock<Mutex<DefaultStringInterner>> = OnceLock::new();

fn with_interner<R>(f: impl FnOnce(&mut DefaultStringInterner) -> R) -> R {
    let mut interner = INTERNER
        .get_or_init(|| Mutex::new(DefaultStringInterner::new()))
        .lock()
        .expect("Failed to acquire interner lock");
    f(&mut interner)
}

/// Returns `true` if `name` is a valid key segment.
///
/// A segment starts with an ASCII letter or underscore and continues with
/// ASCII letters, digits or underscores.
///
/// # Examples
///
/// ```
/// use swatch_core::identifier::is_identifier;
///
/// assert!(is_identifier("backgroundColor"));
/// assert!(is_identifier("_private2"));
/// assert!(!is_identifier("2columns"));
/// assert!(!is_identifier("view.width"));
/// ```
pub fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Interned identifier for a single key segment.
///
/// # Examples
///
/// ```
/// use swatch_core::identifier::Id;
///
/// let width = Id::new("width");
/// assert_eq!(width, "width");
/// assert_eq!(width, Id::new("width"));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Id(DefaultSymbol);

impl Id {
    /// Creates an `Id` from &str.
    ///
    /// No validation happens here; use [`is_identifier`] or
    /// [`KeyPath::parse`] when the text comes from user input.
    pub fn new(name: &str) -> Self {
        Self(with_interner(|interner| interner.get_or_intern(name)))
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = with_interner(|interner| {
            interner
                .resolve(self.0)
                .expect("Symbol should exist in interner")
                .to_owned()
        });
        f.write_str(&name)
    }
}

impl From<&str> for Id {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl PartialEq<str> for Id {
    /// Allows direct comparison with string slices: `id == "width"`
    fn eq(&self, other: &str) -> bool {
        with_interner(|interner| interner.resolve(self.0) == Some(other))
    }
}

impl PartialEq<&str> for Id {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

/// Error returned when text cannot be read as a [`KeyPath`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyPathError {
    #[error("key path is empty")]
    Empty,

    #[error("invalid segment `{segment}` in key path `{path}`")]
    InvalidSegment { segment: String, path: String },
}

/// The full, dotted path of a value in a style.
///
/// A path is a non-empty sequence of segments: the names of the enclosing
/// groups followed by the value's own key. Two paths are equal only if all
/// their segments are equal.
///
/// # Examples
///
/// ```
/// use swatch_core::identifier::{Id, KeyPath};
///
/// let header = KeyPath::new(Id::new("mainView")).join(Id::new("header"));
/// let color = header.join(Id::new("backgroundColor"));
/// assert_eq!(color.to_string(), "mainView.header.backgroundColor");
///
/// let parsed: KeyPath = "mainView.header.backgroundColor".parse().unwrap();
/// assert_eq!(parsed, color);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyPath {
    segments: Vec<Id>,
}

impl KeyPath {
    /// Creates a single-segment path.
    pub fn new(key: Id) -> Self {
        Self { segments: vec![key] }
    }

    /// Builds a path from segments, returning `None` when there are none.
    pub fn from_segments(segments: impl IntoIterator<Item = Id>) -> Option<Self> {
        let segments: Vec<Id> = segments.into_iter().collect();
        (!segments.is_empty()).then_some(Self { segments })
    }

    /// Parses dot-separated text, validating every segment.
    ///
    /// # Errors
    ///
    /// Returns [`KeyPathError::Empty`] for empty text and
    /// [`KeyPathError::InvalidSegment`] when a segment is not an identifier
    /// (this includes empty segments such as in `view..width`).
    pub fn parse(text: &str) -> Result<Self, KeyPathError> {
        if text.is_empty() {
            return Err(KeyPathError::Empty);
        }

        let segments = text
            .split('.')
            .map(|segment| {
                if is_identifier(segment) {
                    Ok(Id::new(segment))
                } else {
                    Err(KeyPathError::InvalidSegment {
                        segment: segment.to_string(),
                        path: text.to_string(),
                    })
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }

    /// Returns a new path with `child` appended.
    pub fn join(&self, child: Id) -> Self {
        let mut segments = self.segments.clone();
        segments.push(child);
        Self { segments }
    }

    /// All segments, outermost group first.
    pub fn segments(&self) -> &[Id] {
        &self.segments
    }

    /// The value's own key (the last segment).
    pub fn key(&self) -> Id {
        *self
            .segments
            .last()
            .expect("key path always has at least one segment")
    }

    /// The path of the enclosing group, or `None` for a top-level key.
    pub fn parent(&self) -> Option<Self> {
        let (_, groups) = self.segments.split_last()?;
        Self::from_segments(groups.iter().copied())
    }

    /// Number of segments.
    pub fn depth(&self) -> usize {
        self.segments.len()
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, segment) in self.segments.iter().enumerate() {
            if idx > 0 {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}

impl FromStr for KeyPath {
    type Err = KeyPathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<Id> for KeyPath {
    fn from(key: Id) -> Self {
        Self::new(key)
    }
}

impl PartialEq<str> for KeyPath {
    fn eq(&self, other: &str) -> bool {
        let mut parts = other.split('.');
        self.segments
            .iter()
            .all(|segment| parts.next().is_some_and(|part| segment == part))
            && parts.next().is_none()
    }
}

impl PartialEq<&str> for KeyPath {
    fn eq(&self, other: &&str) -> bool {
        self == *other
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_new() {
        let id1 = Id::new("width");
        let id2 = Id::new("width");
        let id3 = Id::new("height");

        assert_eq!(id1, id2);
        assert_ne!(id1, id3);
        assert_eq!(id1, "width");
    }

    #[test]
    fn test_id_display() {
        let id = Id::new("display_test");
        assert_eq!(format!("{}", id), "display_test");
    }

    #[test]
    fn test_is_identifier() {
        assert!(is_identifier("a"));
        assert!(is_identifier("_"));
        assert!(is_identifier("Caption1"));
        assert!(is_identifier("text_margin"));

        assert!(!is_identifier(""));
        assert!(!is_identifier("1a"));
        assert!(!is_identifier("with-dash"));
        assert!(!is_identifier("with space"));
        assert!(!is_identifier("café"));
    }

    #[test]
    fn test_key_path_parse_and_display() {
        let path = KeyPath::parse("mainView.header.backgroundColor").unwrap();

        assert_eq!(path.depth(), 3);
        assert_eq!(path.key(), "backgroundColor");
        assert_eq!(path.to_string(), "mainView.header.backgroundColor");
    }

    #[test]
    fn test_key_path_parse_errors() {
        assert_eq!(KeyPath::parse(""), Err(KeyPathError::Empty));
        assert!(matches!(
            KeyPath::parse("view..width"),
            Err(KeyPathError::InvalidSegment { segment, .. }) if segment.is_empty()
        ));
        assert!(matches!(
            KeyPath::parse("view.2x"),
            Err(KeyPathError::InvalidSegment { segment, .. }) if segment == "2x"
        ));
        assert!(KeyPath::parse(".view").is_err());
        assert!(KeyPath::parse("view.").is_err());
    }

    #[test]
    fn test_join_and_parent() {
        let screen = KeyPath::new(Id::new("screen"));
        let width = screen.join(Id::new("width"));

        assert_eq!(width, "screen.width");
        assert_eq!(width.parent(), Some(screen.clone()));
        assert_eq!(screen.parent(), None);
    }

    #[test]
    fn test_distinct_paths_with_same_key() {
        let view_width = KeyPath::parse("view.width").unwrap();
        let screen_width = KeyPath::parse("screen.width").unwrap();

        assert_ne!(view_width, screen_width);
        assert_eq!(view_width.key(), screen_width.key());
    }

    #[test]
    fn test_from_segments() {
        assert_eq!(KeyPath::from_segments(Vec::new()), None);

        let path = KeyPath::from_segments([Id::new("a"), Id::new("b")]).unwrap();
        assert_eq!(path, "a.b");
    }

    #[test]
    fn test_partial_eq_str() {
        let path = KeyPath::parse("view.width").unwrap();

        assert!(path == "view.width");
        assert!(path != "view");
        assert!(path != "view.width.extra");
        assert!(path != "screen.width");
    }

    #[test]
    fn test_hash_and_eq() {
        use std::collections::HashMap;

        let mut map = HashMap::new();
        map.insert(KeyPath::parse("view.width").unwrap(), 320.0);
        map.insert(KeyPath::parse("screen.width").unwrap(), 768.0);

        assert_eq!(map.get(&KeyPath::parse("view.width").unwrap()), Some(&320.0));
        assert_eq!(map.len(), 2);
    }
}
