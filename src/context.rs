//! The validation context tree: one node per schema or keyword evaluated,
//! mirroring the nesting of sub-schema applications.
use url::Url;

use crate::{
    annotations::{Annotation, AnnotationMap},
    paths::Location,
};

/// A node of the result tree produced by evaluating a schema against an
/// instance.
///
/// The root context corresponds to the schema document itself; each
/// executed keyword contributes a child whose `schema_location` extends the
/// parent's by the keyword name, and applicator keywords nest one further
/// context per sub-schema application.
#[derive(Debug, Clone)]
pub struct ValidationContext {
    instance_location: Location,
    schema_location: Location,
    absolute_location: Option<Url>,
    valid: bool,
    message: Option<String>,
    annotations: AnnotationMap,
    nested: Vec<ValidationContext>,
}

impl ValidationContext {
    pub(crate) fn passing(
        instance_location: Location,
        schema_location: Location,
        absolute_location: Option<Url>,
    ) -> ValidationContext {
        ValidationContext {
            instance_location,
            schema_location,
            absolute_location,
            valid: true,
            message: None,
            annotations: AnnotationMap::new(),
            nested: Vec::new(),
        }
    }

    pub(crate) fn failing(
        instance_location: Location,
        schema_location: Location,
        absolute_location: Option<Url>,
        message: impl Into<String>,
    ) -> ValidationContext {
        ValidationContext {
            instance_location,
            schema_location,
            absolute_location,
            valid: false,
            message: Some(message.into()),
            annotations: AnnotationMap::new(),
            nested: Vec::new(),
        }
    }

    pub(crate) fn invalidate(&mut self, message: impl Into<String>) {
        self.valid = false;
        self.message = Some(message.into());
    }

    pub(crate) fn mark_invalid(&mut self) {
        self.valid = false;
    }

    pub(crate) fn annotate(&mut self, keyword: impl Into<String>, annotation: Annotation) {
        self.annotations.record(keyword, annotation);
    }

    /// Split borrow for consolidation: the children read-only, the
    /// annotation map writable.
    pub(crate) fn parts_mut(&mut self) -> (&[ValidationContext], &mut AnnotationMap) {
        (&self.nested, &mut self.annotations)
    }

    pub(crate) fn set_annotations(&mut self, annotations: AnnotationMap) {
        self.annotations = annotations;
    }

    pub(crate) fn push(&mut self, child: ValidationContext) {
        self.nested.push(child);
    }

    /// Whether the instance satisfied the schema at this node.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.valid
    }

    /// Error message, present on failing nodes that assert something
    /// themselves rather than merely aggregating sub-results.
    #[must_use]
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// JSON Pointer to the instance node this context evaluated.
    #[must_use]
    pub fn instance_location(&self) -> &Location {
        &self.instance_location
    }

    /// JSON Pointer to the schema keyword, following `$ref` crossings.
    #[must_use]
    pub fn schema_location(&self) -> &Location {
        &self.schema_location
    }

    /// Absolute URI of the keyword, when the enclosing resource has a
    /// non-synthetic identifier.
    #[must_use]
    pub fn absolute_location(&self) -> Option<&Url> {
        self.absolute_location.as_ref()
    }

    /// Annotations this node produced or consolidated from its children.
    #[must_use]
    pub fn annotations(&self) -> &AnnotationMap {
        &self.annotations
    }

    /// Child contexts, one per keyword or sub-schema application.
    #[must_use]
    pub fn nested(&self) -> &[ValidationContext] {
        &self.nested
    }

    /// Depth-first iterator over this node and every descendant.
    pub fn walk(&self) -> impl Iterator<Item = &ValidationContext> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.nested.iter().rev());
            Some(node)
        })
    }
}
