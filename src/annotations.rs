//! Annotations: values a keyword publishes for later keywords in the same
//! context and for consolidation into parent contexts.
//!
//! This is the coupling mechanism between keywords: `prefixItems` reports
//! how far it got so `items` knows where to start, `properties` and
//! `patternProperties` report which member names they covered so
//! `additionalProperties` knows what is left, and the `unevaluated*`
//! keywords read the fully consolidated picture at the end.
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

/// A single annotation value. The variant determines how two annotations
/// for the same keyword merge during consolidation.
#[derive(Debug, Clone, PartialEq)]
pub enum Annotation {
    /// Boolean; `true` absorbs any other annotation of the same keyword.
    Flag(bool),
    /// Count or upper bound; merged by maximum, absorbed by `Flag(true)`.
    Index(usize),
    /// Set of property names; merged by union.
    Names(BTreeSet<String>),
    /// Set of array indices; merged by union.
    Indices(BTreeSet<usize>),
    /// Opaque JSON published by custom keywords; last writer wins.
    Json(Value),
}

impl Annotation {
    #[cfg(test)]
    pub(crate) fn names<I, S>(names: I) -> Annotation
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Annotation::Names(names.into_iter().map(Into::into).collect())
    }

    /// Render as JSON for output trees. Sets serialize in ascending order,
    /// keeping output deterministic.
    #[must_use]
    pub fn to_json(&self) -> Value {
        match self {
            Annotation::Flag(flag) => Value::Bool(*flag),
            Annotation::Index(idx) => Value::from(*idx),
            Annotation::Names(names) => Value::from(names.iter().cloned().collect::<Vec<_>>()),
            Annotation::Indices(indices) => {
                Value::from(indices.iter().copied().collect::<Vec<_>>())
            }
            Annotation::Json(value) => value.clone(),
        }
    }

    fn merge(&mut self, other: &Annotation) {
        let merged = match (&*self, other) {
            (Annotation::Flag(left), Annotation::Flag(right)) => Annotation::Flag(*left || *right),
            // `true` absorbs integers; `false` does not displace a bound
            (Annotation::Flag(true), _) | (_, Annotation::Flag(false)) => return,
            (_, Annotation::Flag(true)) => Annotation::Flag(true),
            (Annotation::Index(left), Annotation::Index(right)) => {
                Annotation::Index((*left).max(*right))
            }
            (Annotation::Names(left), Annotation::Names(right)) => {
                let mut union = left.clone();
                union.extend(right.iter().cloned());
                Annotation::Names(union)
            }
            (Annotation::Indices(left), Annotation::Indices(right)) => {
                let mut union = left.clone();
                union.extend(right.iter().copied());
                Annotation::Indices(union)
            }
            (_, other) => other.clone(),
        };
        *self = merged;
    }
}

/// Annotations accumulated at one validation context, keyed by keyword
/// name. Insertion order is evaluation order, which keeps serialized
/// output stable across runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnnotationMap(IndexMap<String, Annotation>);

impl AnnotationMap {
    /// An empty map.
    #[must_use]
    pub fn new() -> Self {
        AnnotationMap(IndexMap::new())
    }

    /// Whether any annotation was recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The annotation a keyword recorded here, if any.
    #[must_use]
    pub fn get(&self, keyword: &str) -> Option<&Annotation> {
        self.0.get(keyword)
    }

    /// Iterate over (keyword, annotation) pairs in evaluation order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Annotation)> {
        self.0.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Record an annotation, merging with any previous value for the same
    /// keyword.
    pub fn record(&mut self, keyword: impl Into<String>, annotation: Annotation) {
        match self.0.entry(keyword.into()) {
            indexmap::map::Entry::Occupied(mut entry) => entry.get_mut().merge(&annotation),
            indexmap::map::Entry::Vacant(entry) => {
                entry.insert(annotation);
            }
        }
    }

    /// Merge every annotation of `other` into this map.
    pub fn absorb(&mut self, other: &AnnotationMap) {
        for (keyword, annotation) in &other.0 {
            self.record(keyword.clone(), annotation.clone());
        }
    }

    /// JSON object rendering, used by the output formats.
    #[must_use]
    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.0.len());
        for (keyword, annotation) in &self.0 {
            map.insert(keyword.clone(), annotation.to_json());
        }
        Value::Object(map)
    }
}
