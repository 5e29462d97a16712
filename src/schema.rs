//! The in-memory schema model.
//!
//! A parsed document is an arena of nodes indexed by [`SchemaKey`]; keyword
//! payloads hold arena keys rather than owning pointers, so the same
//! sub-schema can be referenced from several places (and recursively)
//! without cycles in the ownership graph.
use indexmap::IndexMap;
use serde_json::Value;
use slotmap::SlotMap;

use crate::{
    draft::DraftSet,
    error::SchemaError,
    keywords::Keyword,
    registry::KeywordRegistry,
};

slotmap::new_key_type! {
    /// Arena index of a schema node within its document.
    pub struct SchemaKey;
}

/// A parsed schema document: an arena of nodes plus the root key.
#[derive(Debug)]
pub struct Schema {
    nodes: SlotMap<SchemaKey, SchemaNode>,
    root: SchemaKey,
}

/// One node of the schema tree: a boolean schema, or a collection of
/// keyword instances plus unrecognized pass-through members.
#[derive(Debug)]
pub(crate) enum SchemaNode {
    Boolean(bool),
    Object(ObjectSchema),
}

/// A keyword instance together with the registry metadata snapshotted at
/// parse time.
#[derive(Debug)]
pub(crate) struct ParsedKeyword {
    pub(crate) keyword: Keyword,
    pub(crate) priority: u32,
    pub(crate) drafts: DraftSet,
}

/// Source position of an object member, used to serialize the schema back
/// in its original member order.
#[derive(Debug, Clone, Copy)]
enum Member {
    Keyword(usize),
    Extra(usize),
}

#[derive(Debug)]
pub(crate) struct ObjectSchema {
    keywords: Vec<ParsedKeyword>,
    extras: IndexMap<String, Value>,
    layout: Vec<Member>,
    /// Indices into `keywords`, ascending by (priority, name).
    order: Vec<usize>,
}

impl ObjectSchema {
    /// Keywords in evaluation order.
    pub(crate) fn in_order(&self) -> impl Iterator<Item = &ParsedKeyword> {
        self.order.iter().map(move |&idx| &self.keywords[idx])
    }

    pub(crate) fn keywords(&self) -> impl Iterator<Item = &ParsedKeyword> {
        self.keywords.iter()
    }

    pub(crate) fn find(&self, name: &str) -> Option<&Keyword> {
        self.keywords
            .iter()
            .map(|parsed| &parsed.keyword)
            .find(|keyword| keyword.name() == name)
    }

    pub(crate) fn id(&self) -> Option<&str> {
        self.keywords.iter().find_map(|parsed| match &parsed.keyword {
            Keyword::Id(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub(crate) fn anchor(&self) -> Option<&str> {
        self.keywords.iter().find_map(|parsed| match &parsed.keyword {
            Keyword::Anchor(name) => Some(name.as_str()),
            _ => None,
        })
    }

    pub(crate) fn has_ref(&self) -> bool {
        self.keywords
            .iter()
            .any(|parsed| matches!(parsed.keyword, Keyword::Ref(_)))
    }

    pub(crate) fn extras(&self) -> &IndexMap<String, Value> {
        &self.extras
    }
}

impl Schema {
    /// Parse a schema document with an explicit keyword registry.
    ///
    /// # Errors
    ///
    /// [`SchemaError`] when a value in schema position is neither boolean
    /// nor object, or a recognized keyword rejects its payload.
    pub fn parse(contents: &Value, registry: &KeywordRegistry) -> Result<Schema, SchemaError> {
        let mut nodes = SlotMap::with_key();
        let root = SchemaParser {
            nodes: &mut nodes,
            registry,
        }
        .subschema(contents)?;
        Ok(Schema { nodes, root })
    }

    pub(crate) fn root(&self) -> SchemaKey {
        self.root
    }

    pub(crate) fn node(&self, key: SchemaKey) -> &SchemaNode {
        self.nodes
            .get(key)
            .expect("arena key missing from its own document")
    }

    /// Serialize the model back to JSON. Unrecognized members come back
    /// verbatim in their source positions.
    #[must_use]
    pub fn to_value(&self) -> Value {
        self.node_to_value(self.root)
    }

    pub(crate) fn node_to_value(&self, key: SchemaKey) -> Value {
        match self.node(key) {
            SchemaNode::Boolean(value) => Value::Bool(*value),
            SchemaNode::Object(object) => {
                let mut map = serde_json::Map::with_capacity(object.layout.len());
                for member in &object.layout {
                    match member {
                        Member::Keyword(idx) => {
                            let keyword = &object.keywords[*idx].keyword;
                            map.insert(keyword.name().to_string(), keyword.to_value(self));
                        }
                        Member::Extra(idx) => {
                            let (name, value) = object
                                .extras
                                .get_index(*idx)
                                .expect("layout index missing from extras");
                            map.insert(name.clone(), value.clone());
                        }
                    }
                }
                Value::Object(map)
            }
        }
    }

    /// Structural node equality: boolean schemas compare by value;
    /// structured schemas compare as a multiset of keyword instances plus
    /// their unrecognized members. Keyword order is irrelevant.
    pub(crate) fn node_eq(&self, key: SchemaKey, other: &Schema, other_key: SchemaKey) -> bool {
        match (self.node(key), other.node(other_key)) {
            (SchemaNode::Boolean(left), SchemaNode::Boolean(right)) => left == right,
            (SchemaNode::Object(left), SchemaNode::Object(right)) => {
                if left.keywords.len() != right.keywords.len() || left.extras != right.extras {
                    return false;
                }
                let mut used = vec![false; right.keywords.len()];
                'outer: for mine in &left.keywords {
                    for (idx, theirs) in right.keywords.iter().enumerate() {
                        if !used[idx] && mine.keyword.eq_with(self, &theirs.keyword, other) {
                            used[idx] = true;
                            continue 'outer;
                        }
                    }
                    return false;
                }
                true
            }
            (_, _) => false,
        }
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.node_eq(self.root, other, other.root)
    }
}

/// Cursor over the arena handed to keyword parsers so applicator payloads
/// can parse their sub-schemas into the same document.
pub(crate) struct SchemaParser<'a> {
    nodes: &'a mut SlotMap<SchemaKey, SchemaNode>,
    registry: &'a KeywordRegistry,
}

impl SchemaParser<'_> {
    /// Parse a value in schema position into the arena.
    pub(crate) fn subschema(&mut self, contents: &Value) -> Result<SchemaKey, SchemaError> {
        match contents {
            Value::Bool(value) => Ok(self.nodes.insert(SchemaNode::Boolean(*value))),
            Value::Object(members) => {
                let mut keywords = Vec::new();
                let mut extras = IndexMap::new();
                let mut layout = Vec::with_capacity(members.len());
                let registry = self.registry;
                for (name, value) in members {
                    if let Some(descriptor) = registry.lookup(name) {
                        let keyword = descriptor.parse(self, value)?;
                        layout.push(Member::Keyword(keywords.len()));
                        keywords.push(ParsedKeyword {
                            keyword,
                            priority: descriptor.priority(),
                            drafts: descriptor.drafts(),
                        });
                    } else {
                        layout.push(Member::Extra(extras.len()));
                        extras.insert(name.clone(), value.clone());
                    }
                }
                let mut order: Vec<usize> = (0..keywords.len()).collect();
                order.sort_by(|&a, &b| {
                    keywords[a]
                        .priority
                        .cmp(&keywords[b].priority)
                        .then_with(|| keywords[a].keyword.name().cmp(keywords[b].keyword.name()))
                });
                Ok(self.nodes.insert(SchemaNode::Object(ObjectSchema {
                    keywords,
                    extras,
                    layout,
                    order,
                })))
            }
            other => Err(SchemaError::not_a_schema(other)),
        }
    }

    /// Payload helper: an object whose every member value is a schema.
    pub(crate) fn named_subschemas(
        &mut self,
        keyword: &str,
        contents: &Value,
    ) -> Result<IndexMap<String, SchemaKey>, SchemaError> {
        let Value::Object(members) = contents else {
            return Err(SchemaError::parse(keyword, "expected an object of schemas"));
        };
        let mut schemas = IndexMap::with_capacity(members.len());
        for (name, value) in members {
            schemas.insert(name.clone(), self.subschema(value)?);
        }
        Ok(schemas)
    }

    /// Payload helper: a non-empty array of schemas.
    pub(crate) fn subschema_sequence(
        &mut self,
        keyword: &str,
        contents: &Value,
    ) -> Result<Vec<SchemaKey>, SchemaError> {
        let Value::Array(items) = contents else {
            return Err(SchemaError::parse(keyword, "expected an array of schemas"));
        };
        if items.is_empty() {
            return Err(SchemaError::parse(keyword, "array of schemas may not be empty"));
        }
        items.iter().map(|item| self.subschema(item)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::Schema;
    use crate::registry::KeywordRegistry;
    use serde_json::json;
    use test_case::test_case;

    fn parse(contents: &serde_json::Value) -> Schema {
        Schema::parse(contents, &KeywordRegistry::with_defaults()).expect("valid schema")
    }

    #[test_case(&json!(true))]
    #[test_case(&json!(false))]
    #[test_case(&json!({}))]
    #[test_case(&json!({"type": ["string", "integer"], "minLength": 2}))]
    #[test_case(&json!({"properties": {"a": {"const": null}}, "x-vendor": [1, {"deep": true}]}))]
    #[test_case(&json!({"items": [{"type": "string"}, true], "additionalItems": false}))]
    #[test_case(&json!({"$defs": {"node": {"$ref": "#/$defs/node"}}}))]
    fn parse_serialize_round_trip(contents: &serde_json::Value) {
        let schema = parse(contents);
        let serialized = schema.to_value();
        assert_eq!(parse(&serialized), schema);
    }

    #[test]
    fn unrecognized_members_are_preserved_verbatim() {
        let contents = json!({"title": "x", "minimum": 3, "x-note": {"a": [1, 2]}});
        let schema = parse(&contents);
        assert_eq!(schema.to_value(), contents);
    }

    #[test]
    fn keyword_order_is_irrelevant_for_equality() {
        let a = parse(&json!({"minLength": 1, "maxLength": 3}));
        let b = parse(&json!({"maxLength": 3, "minLength": 1}));
        assert_eq!(a, b);
    }

    #[test]
    fn unrecognized_members_participate_in_equality() {
        let a = parse(&json!({"minLength": 1, "x-a": 1}));
        let b = parse(&json!({"minLength": 1, "x-a": 2}));
        let c = parse(&json!({"minLength": 1}));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn payload_differences_break_equality() {
        let a = parse(&json!({"items": {"type": "string"}}));
        let b = parse(&json!({"items": {"type": "number"}}));
        let c = parse(&json!({"items": [{"type": "string"}]}));
        assert_ne!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn booleans_and_empty_objects_are_distinct_models() {
        // `true` and `{}` accept the same instances but are different values
        assert_ne!(parse(&json!(true)), parse(&json!({})));
        assert_ne!(parse(&json!(true)), parse(&json!(false)));
    }

    #[test]
    fn numbers_are_rejected_in_schema_position() {
        let error = Schema::parse(&json!(3), &KeywordRegistry::with_defaults()).unwrap_err();
        assert!(error.to_string().contains("not a schema"));
    }

    #[test]
    fn malformed_keyword_payload_is_a_parse_error() {
        let error =
            Schema::parse(&json!({"minimum": "3"}), &KeywordRegistry::with_defaults()).unwrap_err();
        assert_eq!(
            error.to_string(),
            "invalid value for \"minimum\": expected a number"
        );
    }

    #[test]
    fn null_payload_requires_an_opt_in() {
        assert!(Schema::parse(&json!({"const": null}), &KeywordRegistry::with_defaults()).is_ok());
        let error =
            Schema::parse(&json!({"enum": null}), &KeywordRegistry::with_defaults()).unwrap_err();
        assert_eq!(error.to_string(), "invalid value for \"enum\": may not be null");
    }
}
