//! Locations within schemas and instances, modelled as JSON Pointers.
//!
//! Two representations are used. [`Location`] owns its segments and is what
//! ends up on validation output nodes. [`LazyLocation`] is a linked list of
//! borrowed segments living on the call stack of the evaluator, so that
//! descending into an instance does not allocate until a location is
//! actually recorded.
use std::{fmt, fmt::Write, slice::Iter};

use crate::error::SchemaError;

/// A single step in a JSON Pointer.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Segment {
    /// Property name within a JSON object.
    Property(Box<str>),
    /// Index within a JSON array.
    Index(usize),
    /// A schema keyword.
    Keyword(&'static str),
}

/// An owned JSON Pointer.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Location(Vec<Segment>);

impl Location {
    /// The empty pointer, addressing the whole document.
    #[must_use]
    pub const fn new() -> Self {
        Location(Vec::new())
    }

    /// Return a new pointer extended by one segment.
    #[must_use]
    pub fn join(&self, segment: impl Into<Segment>) -> Self {
        let mut segments = self.0.clone();
        segments.push(segment.into());
        Location(segments)
    }

    /// Iterate over the segments.
    pub fn iter(&self) -> Iter<'_, Segment> {
        self.0.iter()
    }

    /// Whether this is the root pointer.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Clone this pointer and append `other`'s segments starting at `from`.
    pub(crate) fn extend_from(&self, other: &Location, from: usize) -> Location {
        let mut segments = self.0.clone();
        segments.extend_from_slice(&other.0[from.min(other.0.len())..]);
        Location(segments)
    }

    /// Parse an RFC 6901 pointer. Digit-only segments without leading zeros
    /// become indices, everything else a property name; `~0` and `~1`
    /// unescape to `~` and `/`.
    ///
    /// # Errors
    ///
    /// [`SchemaError::Pointer`] when the input neither is empty nor starts
    /// with `/`, or contains a dangling `~` escape.
    pub fn parse(input: &str) -> Result<Self, SchemaError> {
        if input.is_empty() {
            return Ok(Location::new());
        }
        let Some(rest) = input.strip_prefix('/') else {
            return Err(SchemaError::pointer(input, "must start with '/'"));
        };
        let mut segments = Vec::new();
        for raw in rest.split('/') {
            segments.push(parse_segment(input, raw)?);
        }
        Ok(Location(segments))
    }
}

fn parse_segment(pointer: &str, raw: &str) -> Result<Segment, SchemaError> {
    let mut unescaped = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch == '~' {
            match chars.next() {
                Some('0') => unescaped.push('~'),
                Some('1') => unescaped.push('/'),
                _ => return Err(SchemaError::pointer(pointer, "incomplete '~' escape")),
            }
        } else {
            unescaped.push(ch);
        }
    }
    if is_index_segment(&unescaped) {
        // Digits fitting `usize`; anything larger is treated as a name
        if let Ok(idx) = unescaped.parse::<usize>() {
            return Ok(Segment::Index(idx));
        }
    }
    Ok(Segment::Property(unescaped.into_boxed_str()))
}

fn is_index_segment(segment: &str) -> bool {
    !segment.is_empty()
        && segment.bytes().all(|b| b.is_ascii_digit())
        && (segment.len() == 1 || !segment.starts_with('0'))
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.0 {
            f.write_char('/')?;
            match segment {
                Segment::Property(name) => write_escaped(f, name)?,
                Segment::Keyword(keyword) => write_escaped(f, keyword)?,
                Segment::Index(idx) => f.write_str(itoa::Buffer::new().format(*idx))?,
            }
        }
        Ok(())
    }
}

fn write_escaped(f: &mut fmt::Formatter<'_>, value: &str) -> fmt::Result {
    for ch in value.chars() {
        match ch {
            '~' => f.write_str("~0")?,
            '/' => f.write_str("~1")?,
            _ => f.write_char(ch)?,
        }
    }
    Ok(())
}

impl serde::Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl From<String> for Segment {
    #[inline]
    fn from(value: String) -> Self {
        Segment::Property(value.into_boxed_str())
    }
}

impl From<&'static str> for Segment {
    #[inline]
    fn from(value: &'static str) -> Self {
        Segment::Keyword(value)
    }
}

impl From<usize> for Segment {
    #[inline]
    fn from(value: usize) -> Self {
        Segment::Index(value)
    }
}

/// A borrowed step of a [`LazyLocation`].
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub(crate) enum SegmentRef<'a> {
    Property(&'a str),
    Index(usize),
}

impl<'a> From<&'a str> for SegmentRef<'a> {
    #[inline]
    fn from(value: &'a str) -> Self {
        SegmentRef::Property(value)
    }
}

impl From<usize> for SegmentRef<'_> {
    #[inline]
    fn from(value: usize) -> Self {
        SegmentRef::Index(value)
    }
}

impl From<SegmentRef<'_>> for Segment {
    #[inline]
    fn from(value: SegmentRef<'_>) -> Self {
        match value {
            SegmentRef::Property(name) => Segment::Property(name.into()),
            SegmentRef::Index(idx) => Segment::Index(idx),
        }
    }
}

/// Stack-allocated instance location: each evaluator frame pushes one node
/// and hands a reference to its children.
#[derive(Debug, Clone)]
pub(crate) struct LazyLocation<'a, 'b> {
    segment: SegmentRef<'a>,
    parent: Option<&'b LazyLocation<'b, 'a>>,
}

impl Default for LazyLocation<'_, '_> {
    fn default() -> Self {
        LazyLocation::new()
    }
}

impl<'a, 'b> LazyLocation<'a, 'b> {
    /// Root location.
    pub(crate) const fn new() -> Self {
        LazyLocation {
            // Never read: the root node is skipped when materializing
            segment: SegmentRef::Index(0),
            parent: None,
        }
    }

    #[inline]
    pub(crate) fn push(&'a self, segment: impl Into<SegmentRef<'a>>) -> Self {
        LazyLocation {
            segment: segment.into(),
            parent: Some(self),
        }
    }
}

impl From<&LazyLocation<'_, '_>> for Location {
    fn from(path: &LazyLocation<'_, '_>) -> Self {
        let mut segments = Vec::new();
        let mut head = path;
        while let Some(parent) = head.parent {
            segments.push(head.segment.into());
            head = parent;
        }
        segments.reverse();
        Location(segments)
    }
}

#[cfg(test)]
mod tests {
    use super::{LazyLocation, Location, Segment};
    use test_case::test_case;

    #[test]
    fn display_escapes_pointer_characters() {
        let location = Location::new().join("a/b".to_string()).join("~".to_string());
        assert_eq!(location.to_string(), "/a~1b/~0");
    }

    #[test]
    fn display_formats_indices_without_leading_zeros() {
        let location = Location::new().join("items").join(10);
        assert_eq!(location.to_string(), "/items/10");
    }

    #[test_case("", &[]; "empty pointer")]
    #[test_case("/foo/0", &[Segment::Property("foo".into()), Segment::Index(0)]; "name then index")]
    #[test_case("/00", &[Segment::Property("00".into())]; "leading zero is a name")]
    #[test_case("/~01", &[Segment::Property("~1".into())]; "escape order")]
    fn parses(input: &str, expected: &[Segment]) {
        let location = Location::parse(input).unwrap();
        assert_eq!(location.iter().cloned().collect::<Vec<_>>(), expected);
    }

    #[test_case("foo"; "missing slash")]
    #[test_case("/a~2b"; "bad escape")]
    #[test_case("/a~"; "dangling escape")]
    fn rejects(input: &str) {
        assert!(Location::parse(input).is_err());
    }

    #[test]
    fn parse_round_trips_through_display() {
        let location = Location::parse("/a~1b/3/~0").unwrap();
        assert_eq!(Location::parse(&location.to_string()).unwrap(), location);
    }

    #[test]
    fn lazy_location_materializes_in_order() {
        let root = LazyLocation::new();
        let a = root.push("a");
        let b = a.push(2);
        assert_eq!(Location::from(&b).to_string(), "/a/2");
        assert_eq!(Location::from(&root).to_string(), "");
    }
}
