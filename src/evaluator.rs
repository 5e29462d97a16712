//! The validation driver: owns the recursion over (schema, instance)
//! pairs, the keyword ordering, the base-URI scope, and the cycle guard
//! for recursive references.
use ahash::AHashSet;
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, trace};
use url::Url;

use crate::{
    annotations::{Annotation, AnnotationMap},
    context::ValidationContext,
    options::ValidationOptions,
    paths::{LazyLocation, Location},
    schema::{ObjectSchema, Schema, SchemaKey, SchemaNode},
    store::SchemaStore,
    Draft,
};

pub(crate) const FALSE_SCHEMA_MESSAGE: &str = "All values fail against the false schema";

/// Where the evaluator currently is in URI space: the document being
/// walked, the base URI for resolving `$ref`, and enough bookkeeping to
/// reconstruct absolute keyword locations.
#[derive(Debug, Clone)]
pub(crate) struct Scope {
    pub(crate) doc: Arc<Schema>,
    pub(crate) base: Url,
    /// Whether `base` comes from a real identifier rather than the
    /// synthetic default; absolute locations are only reported when it does.
    pub(crate) named: bool,
    /// Pointer of the current resource-entry node within its resource.
    pub(crate) anchor_pointer: Location,
    /// Length of the schema location when the resource was entered.
    pub(crate) anchor_depth: usize,
}

impl Scope {
    pub(crate) fn absolute(&self, keyword_location: &Location) -> Option<Url> {
        if !self.named {
            return None;
        }
        let pointer = self
            .anchor_pointer
            .extend_from(keyword_location, self.anchor_depth);
        let mut uri = self.base.clone();
        if pointer.is_empty() {
            uri.set_fragment(None);
        } else {
            uri.set_fragment(Some(&pointer.to_string()));
        }
        Some(uri)
    }
}

/// Per-schema-object state handed to each keyword: the instance node, both
/// locations, and the annotations accumulated by the keywords that already
/// ran in this context.
pub(crate) struct Frame<'f> {
    pub(crate) scope: &'f Scope,
    pub(crate) object: &'f ObjectSchema,
    pub(crate) instance: &'f Value,
    pub(crate) location: &'f LazyLocation<'f, 'f>,
    pub(crate) schema_location: &'f Location,
    pub(crate) annotations: &'f AnnotationMap,
}

impl Frame<'_> {
    pub(crate) fn instance_location(&self) -> Location {
        self.location.into()
    }

    pub(crate) fn keyword_location(&self, keyword: &'static str) -> Location {
        self.schema_location.join(keyword)
    }

    pub(crate) fn pass(&self, keyword: &'static str) -> ValidationContext {
        self.pass_at(self.keyword_location(keyword))
    }

    pub(crate) fn fail(&self, keyword: &'static str, message: impl Into<String>) -> ValidationContext {
        self.fail_at(self.keyword_location(keyword), message)
    }

    pub(crate) fn pass_at(&self, keyword_location: Location) -> ValidationContext {
        let absolute = self.scope.absolute(&keyword_location);
        ValidationContext::passing(self.instance_location(), keyword_location, absolute)
    }

    pub(crate) fn fail_at(
        &self,
        keyword_location: Location,
        message: impl Into<String>,
    ) -> ValidationContext {
        let absolute = self.scope.absolute(&keyword_location);
        ValidationContext::failing(self.instance_location(), keyword_location, absolute, message)
    }
}

pub(crate) struct Evaluator<'a> {
    pub(crate) options: &'a ValidationOptions,
    pub(crate) store: &'a SchemaStore,
    pub(crate) draft: Draft,
    /// (document identity, node, instance location) triples currently on
    /// the evaluation stack; re-entry short-circuits to valid.
    seen: AHashSet<(usize, SchemaKey, String)>,
    depth: usize,
}

impl<'a> Evaluator<'a> {
    pub(crate) fn new(
        options: &'a ValidationOptions,
        store: &'a SchemaStore,
        draft: Draft,
    ) -> Evaluator<'a> {
        let depth = options.log_indent_level;
        Evaluator {
            options,
            store,
            draft,
            seen: AHashSet::new(),
            depth,
        }
    }

    pub(crate) fn shortcircuit(&self) -> bool {
        self.options.apply_optimizations
    }

    /// Evaluate one (schema node, instance node) pair into a context.
    pub(crate) fn evaluate(
        &mut self,
        scope: &Scope,
        key: SchemaKey,
        instance: &Value,
        location: &LazyLocation<'_, '_>,
        schema_location: Location,
    ) -> ValidationContext {
        match scope.doc.node(key) {
            SchemaNode::Boolean(true) => {
                let absolute = scope.absolute(&schema_location);
                ValidationContext::passing(location.into(), schema_location, absolute)
            }
            SchemaNode::Boolean(false) => {
                let absolute = scope.absolute(&schema_location);
                ValidationContext::failing(
                    location.into(),
                    schema_location,
                    absolute,
                    FALSE_SCHEMA_MESSAGE,
                )
            }
            SchemaNode::Object(object) => {
                self.evaluate_object(scope, key, object, instance, location, schema_location)
            }
        }
    }

    #[allow(clippy::too_many_lines)]
    fn evaluate_object(
        &mut self,
        scope: &Scope,
        key: SchemaKey,
        object: &ObjectSchema,
        instance: &Value,
        location: &LazyLocation<'_, '_>,
        schema_location: Location,
    ) -> ValidationContext {
        // An embedded `$id` starts a new resource: rebase and re-anchor.
        let rebased;
        let scope = if let Some(id) = object.id() {
            match scope.base.join(id) {
                Ok(base) => {
                    rebased = Scope {
                        doc: Arc::clone(&scope.doc),
                        base,
                        named: true,
                        anchor_pointer: Location::new(),
                        anchor_depth: schema_location.len(),
                    };
                    &rebased
                }
                Err(error) => {
                    debug!(id, %error, "ignoring unresolvable $id");
                    scope
                }
            }
        } else {
            scope
        };

        let identity = (
            Arc::as_ptr(&scope.doc) as usize,
            key,
            Location::from(location).to_string(),
        );
        if self.seen.contains(&identity) {
            // Recursive re-entry with no progress is vacuously valid.
            trace!(depth = self.depth, schema = %schema_location, "recursion guard hit");
            let absolute = scope.absolute(&schema_location);
            return ValidationContext::passing(location.into(), schema_location, absolute);
        }
        self.seen.insert(identity.clone());
        self.depth += 1;
        trace!(depth = self.depth, schema = %schema_location, "enter schema");

        let only_ref = self.draft.ref_replaces_siblings() && object.has_ref();
        let mut annotations = AnnotationMap::new();
        // Unrecognized members surface as annotations, verbatim
        for (name, value) in object.extras() {
            annotations.record(name.clone(), Annotation::Json(value.clone()));
        }
        let mut children: Vec<ValidationContext> = Vec::new();
        for parsed in object.in_order() {
            if only_ref && !matches!(parsed.keyword, crate::keywords::Keyword::Ref(_)) {
                continue;
            }
            if !parsed.drafts.contains(self.draft) {
                continue;
            }
            let outcome = {
                let frame = Frame {
                    scope,
                    object,
                    instance,
                    location,
                    schema_location: &schema_location,
                    annotations: &annotations,
                };
                parsed.keyword.validate(self, &frame)
            };
            if let Some(child) = outcome {
                annotations.absorb(child.annotations());
                children.push(child);
            }
        }

        trace!(
            depth = self.depth,
            schema = %schema_location,
            valid = children.iter().all(ValidationContext::is_valid),
            "exit schema"
        );
        self.depth -= 1;
        self.seen.remove(&identity);

        let absolute = scope.absolute(&schema_location);
        let mut ctx =
            ValidationContext::passing(location.into(), schema_location, absolute);
        ctx.set_annotations(annotations);
        if children.iter().any(|child| !child.is_valid()) {
            ctx.mark_invalid();
            // Only the failing sub-results stay on an invalid context
            for child in children.into_iter().filter(|child| !child.is_valid()) {
                ctx.push(child);
            }
        } else {
            for child in children {
                ctx.push(child);
            }
        }
        ctx
    }
}
