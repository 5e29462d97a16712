//! Configuration for building a [`Validator`].
use std::{fmt, sync::Arc};

use serde_json::Value;
use url::Url;

use crate::{
    draft::Draft,
    error::SchemaError,
    registry::{self, KeywordDescriptor, KeywordRegistry},
    schema::Schema,
    store::{SchemaStore, DEFAULT_BASE_URI},
    validator::Validator,
};

/// Which rendering [`crate::Output::render`] produces.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Just the validity boolean.
    Flag,
    /// Flat list of failing nodes (or annotation carriers when valid).
    #[default]
    Basic,
    /// Tree pruned to the failing branches.
    Detailed,
    /// The full retained context tree.
    Verbose,
}

/// Options for building a validator.
///
/// # Example
///
/// ```rust
/// use serde_json::json;
///
/// let validator = jschema::options()
///     .with_draft(jschema::Draft::Draft7)
///     .build(&json!({"minimum": 0}))
///     .expect("a valid schema");
/// assert!(validator.is_valid(&json!(1)));
/// ```
#[derive(Clone, Default)]
pub struct ValidationOptions {
    pub(crate) draft: Option<Draft>,
    pub(crate) apply_optimizations: bool,
    pub(crate) output_format: OutputFormat,
    pub(crate) log_indent_level: usize,
    registry: Option<KeywordRegistry>,
    extra_keywords: Vec<KeywordDescriptor>,
    resources: Vec<(String, Value)>,
}

impl ValidationOptions {
    /// Set the draft to validate as. Without this, the document's
    /// `$schema` decides, falling back to Draft 2020-12.
    pub fn with_draft(&mut self, draft: Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// Allow short-circuiting in `allOf` / `anyOf` / `oneOf` / `items`.
    /// Validity is unchanged; output trees may be pruned.
    pub fn with_optimizations(&mut self, apply: bool) -> &mut Self {
        self.apply_optimizations = apply;
        self
    }

    /// Select the rendering produced by [`crate::Output::render`].
    pub fn with_output_format(&mut self, format: OutputFormat) -> &mut Self {
        self.output_format = format;
        self
    }

    /// Initial depth for the evaluator's diagnostic trace events.
    pub fn with_log_indent_level(&mut self, level: usize) -> &mut Self {
        self.log_indent_level = level;
        self
    }

    /// Build against an explicit keyword registry instead of the
    /// process-wide default.
    pub fn with_registry(&mut self, registry: KeywordRegistry) -> &mut Self {
        self.registry = Some(registry);
        self
    }

    /// Add one keyword on top of whichever registry is in effect.
    pub fn with_keyword(&mut self, descriptor: KeywordDescriptor) -> &mut Self {
        self.extra_keywords.push(descriptor);
        self
    }

    /// Make a schema document addressable under `uri` during validation,
    /// for `$ref` targets outside the root document.
    pub fn with_resource(&mut self, uri: impl Into<String>, contents: Value) -> &mut Self {
        self.resources.push((uri.into(), contents));
        self
    }

    /// Build a [`Validator`] for a schema using these options.
    ///
    /// # Errors
    ///
    /// [`SchemaError`] when the schema (or a registered resource) does not
    /// parse, or a URI is malformed.
    pub fn build(&self, schema: &Value) -> Result<Validator, SchemaError> {
        let mut registry = self
            .registry
            .clone()
            .unwrap_or_else(registry::global_snapshot);
        for descriptor in &self.extra_keywords {
            registry.register(descriptor.clone());
        }
        let draft = match self.draft {
            Some(draft) => draft,
            None => Draft::detect(schema)?.unwrap_or_default(),
        };
        let document = Arc::new(Schema::parse(schema, &registry)?);
        let synthetic =
            Url::parse(DEFAULT_BASE_URI).expect("the default base URI always parses");
        let (base, named) = match root_id(&document) {
            Some(id) => {
                let resolved = synthetic
                    .join(id)
                    .map_err(|error| SchemaError::invalid_uri(id, error))?;
                (resolved, true)
            }
            None => (synthetic, false),
        };
        let mut store = SchemaStore::new();
        store.register_document(&base, &document)?;
        for (uri, contents) in &self.resources {
            store.register(uri, Schema::parse(contents, &registry)?)?;
        }
        Ok(Validator::assemble(document, base, named, store, draft, self.clone()))
    }
}

fn root_id(document: &Schema) -> Option<&str> {
    match document.node(document.root()) {
        crate::schema::SchemaNode::Object(object) => object.id(),
        crate::schema::SchemaNode::Boolean(_) => None,
    }
}

impl fmt::Debug for ValidationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValidationOptions")
            .field("draft", &self.draft)
            .field("apply_optimizations", &self.apply_optimizations)
            .field("output_format", &self.output_format)
            .field("log_indent_level", &self.log_indent_level)
            .field("resources", &self.resources.len())
            .finish_non_exhaustive()
    }
}
