//! The schema registry: absolute URI → schema node.
//!
//! Registration walks a document once, resolving every embedded `$id`
//! against the inherited base and recording every `$anchor` under
//! `base#name`. Pointer fragments are resolved lazily, stepping through
//! keyword interiors via [`Keyword::resolve_segment`].
//!
//! Fetching remote documents is deliberately not this crate's business:
//! callers populate the store up front and anything absent is an
//! unresolved reference.
use std::{borrow::Cow, sync::Arc};

use ahash::AHashMap;
use percent_encoding::percent_decode_str;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::{
    error::SchemaError,
    paths::{Location, Segment},
    schema::{Schema, SchemaKey, SchemaNode},
};

/// Base URI assigned to documents that carry no `$id` of their own.
pub(crate) const DEFAULT_BASE_URI: &str = "https://jschema.rs/anonymous";

/// A resolved registry entry: the owning document and the node within it.
#[derive(Debug, Clone)]
pub(crate) struct Resolved {
    pub(crate) doc: Arc<Schema>,
    pub(crate) key: SchemaKey,
}

/// Maps absolute URIs to schema nodes. Append-only within a program's
/// lifetime, though re-registering a URI rebinds it.
#[derive(Debug, Default)]
pub struct SchemaStore {
    entries: AHashMap<String, Resolved>,
}

impl SchemaStore {
    /// An empty store.
    #[must_use]
    pub fn new() -> SchemaStore {
        SchemaStore {
            entries: AHashMap::new(),
        }
    }

    /// Register a parsed document under `uri`, along with every `$id` and
    /// `$anchor` found in its interior.
    ///
    /// # Errors
    ///
    /// [`SchemaError::InvalidUri`] when `uri` or an embedded `$id` does not
    /// resolve.
    pub fn register(&mut self, uri: &str, schema: Schema) -> Result<(), SchemaError> {
        let base = Url::parse(uri).map_err(|error| SchemaError::invalid_uri(uri, error))?;
        self.register_document(&base, &Arc::new(schema))
    }

    /// Whether `uri` is bound to a schema.
    #[must_use]
    pub fn contains(&self, uri: &str) -> bool {
        self.entries.contains_key(uri)
    }

    /// The schema bound to `uri`, rendered back to JSON. `None` when the
    /// URI is unknown.
    #[must_use]
    pub fn lookup(&self, uri: &str) -> Option<Value> {
        self.entries
            .get(uri)
            .map(|resolved| resolved.doc.node_to_value(resolved.key))
    }

    pub(crate) fn register_document(
        &mut self,
        base: &Url,
        doc: &Arc<Schema>,
    ) -> Result<(), SchemaError> {
        self.walk(base.clone(), doc, doc.root(), true)
    }

    fn walk(
        &mut self,
        inherited: Url,
        doc: &Arc<Schema>,
        key: SchemaKey,
        is_root: bool,
    ) -> Result<(), SchemaError> {
        let SchemaNode::Object(object) = doc.node(key) else {
            if is_root {
                self.bind(&inherited, doc, key);
            }
            return Ok(());
        };
        let base = match object.id() {
            Some(id) => {
                let resolved = inherited
                    .join(id)
                    .map_err(|error| SchemaError::invalid_uri(id, error))?;
                self.bind(&resolved, doc, key);
                resolved
            }
            None => {
                if is_root {
                    self.bind(&inherited, doc, key);
                }
                inherited
            }
        };
        if let Some(anchor) = object.anchor() {
            let mut anchored = base.clone();
            anchored.set_fragment(Some(anchor));
            debug!(uri = %anchored, "registering anchor");
            self.entries.insert(
                anchored.to_string(),
                Resolved {
                    doc: Arc::clone(doc),
                    key,
                },
            );
        }
        for parsed in object.keywords() {
            for subschema in parsed.keyword.subschemas() {
                self.walk(base.clone(), doc, subschema, false)?;
            }
        }
        Ok(())
    }

    fn bind(&mut self, uri: &Url, doc: &Arc<Schema>, key: SchemaKey) {
        let mut uri = uri.clone();
        uri.set_fragment(None);
        debug!(uri = %uri, "registering schema");
        self.entries.insert(
            uri.to_string(),
            Resolved {
                doc: Arc::clone(doc),
                key,
            },
        );
    }

    pub(crate) fn resolve(&self, uri: &str) -> Option<&Resolved> {
        self.entries.get(uri)
    }

    /// Walk a JSON Pointer through keyword interiors starting at `from`.
    /// Returns the target node and its pointer as a location; `base` and
    /// `named` are updated for any `$id` crossed along the way.
    pub(crate) fn resolve_pointer(
        doc: &Schema,
        from: SchemaKey,
        pointer: &str,
        base: &mut Url,
        named: &mut bool,
    ) -> Result<(SchemaKey, Location), SchemaError> {
        let location = Location::parse(pointer)?;
        let segments: Vec<Cow<'_, str>> = location
            .iter()
            .map(|segment| match segment {
                Segment::Property(name) => Cow::Borrowed(name.as_ref()),
                Segment::Keyword(keyword) => Cow::Borrowed(*keyword),
                Segment::Index(idx) => Cow::Owned(idx.to_string()),
            })
            .collect();
        let mut cursor = from;
        let mut position = 0;
        while position < segments.len() {
            let SchemaNode::Object(object) = doc.node(cursor) else {
                return Err(SchemaError::unresolved_ref(pointer));
            };
            let Some(keyword) = object.find(segments[position].as_ref()) else {
                return Err(SchemaError::unresolved_ref(pointer));
            };
            if let Some(next) = keyword.resolve_segment(None) {
                cursor = next;
                position += 1;
            } else if let Some(next) = segments
                .get(position + 1)
                .and_then(|segment| keyword.resolve_segment(Some(segment.as_ref())))
            {
                cursor = next;
                position += 2;
            } else {
                return Err(SchemaError::unresolved_ref(pointer));
            }
            if let SchemaNode::Object(object) = doc.node(cursor) {
                if let Some(id) = object.id() {
                    *base = base
                        .join(id)
                        .map_err(|error| SchemaError::invalid_uri(id, error))?;
                    *named = true;
                }
            }
        }
        Ok((cursor, location))
    }
}

/// Decode the percent-encoding of a URI fragment before treating it as a
/// JSON Pointer.
pub(crate) fn decode_fragment(fragment: &str) -> Result<String, SchemaError> {
    percent_decode_str(fragment)
        .decode_utf8()
        .map(Cow::into_owned)
        .map_err(|_| SchemaError::pointer(fragment, "fragment is not valid UTF-8"))
}
