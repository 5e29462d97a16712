//! The keyword registry: maps keyword names to descriptors carrying the
//! parser, evaluation priority, supported drafts, and vocabulary.
//!
//! A process-wide default registry is initialized lazily behind a lock and
//! serves most callers; validators can also be built against an explicit
//! registry handle, so nothing forces global state on embedders.
use std::{borrow::Cow, fmt, sync::Arc};

use ahash::AHashMap;
use once_cell::sync::Lazy;
use parking_lot::RwLock;
use serde_json::Value;

use crate::{
    draft::DraftSet,
    error::SchemaError,
    keywords::{self, custom::CustomKeyword, Keyword},
    schema::SchemaParser,
};

/// A named group of keywords enabled together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Vocabulary {
    /// Identifiers and referencing: `$id`, `$anchor`, `$ref`, `$defs`.
    Core,
    /// Keywords whose payloads are sub-schemas.
    Applicator,
    /// Assertion keywords.
    Validation,
    /// `unevaluatedItems` / `unevaluatedProperties`.
    Unevaluated,
    /// Caller-registered keywords.
    Extension,
}

pub(crate) type BuiltinParser =
    fn(&mut SchemaParser<'_>, &Value) -> Result<Keyword, SchemaError>;

type FactoryFn = dyn Fn(&Value) -> Result<Arc<dyn CustomKeyword>, String> + Send + Sync;

#[derive(Clone)]
enum Parser {
    Builtin(BuiltinParser),
    Factory(Arc<FactoryFn>),
}

/// Everything the engine needs to know about one keyword: how to parse its
/// payload, when it runs, and which drafts define it.
#[derive(Clone)]
pub struct KeywordDescriptor {
    name: Cow<'static, str>,
    priority: u32,
    drafts: DraftSet,
    vocabulary: Vocabulary,
    accepts_null: bool,
    parser: Parser,
}

impl KeywordDescriptor {
    pub(crate) fn builtin(
        name: &'static str,
        priority: u32,
        drafts: DraftSet,
        vocabulary: Vocabulary,
        parser: BuiltinParser,
    ) -> KeywordDescriptor {
        KeywordDescriptor {
            name: Cow::Borrowed(name),
            priority,
            drafts,
            vocabulary,
            accepts_null: false,
            parser: Parser::Builtin(parser),
        }
    }

    /// Describe a custom keyword. The factory receives the keyword's raw
    /// JSON payload and returns the implementation to run against each
    /// instance. Defaults: priority 60, all drafts, [`Vocabulary::Extension`].
    pub fn custom<F>(name: impl Into<String>, factory: F) -> KeywordDescriptor
    where
        F: Fn(&Value) -> Result<Arc<dyn CustomKeyword>, String> + Send + Sync + 'static,
    {
        KeywordDescriptor {
            name: Cow::Owned(name.into()),
            priority: 60,
            drafts: DraftSet::ALL,
            vocabulary: Vocabulary::Extension,
            accepts_null: false,
            parser: Parser::Factory(Arc::new(factory)),
        }
    }

    /// Override the evaluation priority; lower runs first.
    #[must_use]
    pub fn with_priority(mut self, priority: u32) -> Self {
        self.priority = priority;
        self
    }

    /// Restrict the keyword to a set of drafts.
    #[must_use]
    pub fn with_drafts(mut self, drafts: DraftSet) -> Self {
        self.drafts = drafts;
        self
    }

    /// Assign the keyword to a vocabulary.
    #[must_use]
    pub fn with_vocabulary(mut self, vocabulary: Vocabulary) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// Allow `null` as the keyword's payload (e.g. `const`).
    #[must_use]
    pub(crate) fn allowing_null(mut self) -> Self {
        self.accepts_null = true;
        self
    }

    /// The keyword name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Evaluation priority; lower runs first.
    #[must_use]
    pub fn priority(&self) -> u32 {
        self.priority
    }

    /// Drafts that define this keyword.
    #[must_use]
    pub fn drafts(&self) -> DraftSet {
        self.drafts
    }

    /// The vocabulary the keyword belongs to.
    #[must_use]
    pub fn vocabulary(&self) -> Vocabulary {
        self.vocabulary
    }

    /// Whether `null` is a legal payload.
    #[must_use]
    pub fn accepts_null(&self) -> bool {
        self.accepts_null
    }

    pub(crate) fn parse(
        &self,
        parser: &mut SchemaParser<'_>,
        value: &Value,
    ) -> Result<Keyword, SchemaError> {
        if value.is_null() && !self.accepts_null {
            return Err(SchemaError::parse(self.name.as_ref(), "may not be null"));
        }
        match &self.parser {
            Parser::Builtin(parse) => parse(parser, value),
            Parser::Factory(factory) => {
                let implementation = factory(value)
                    .map_err(|detail| SchemaError::parse(self.name.as_ref(), detail))?;
                Ok(Keyword::Custom(keywords::custom::Custom::new(
                    self.name.as_ref(),
                    value.clone(),
                    implementation,
                )))
            }
        }
    }
}

impl fmt::Debug for KeywordDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeywordDescriptor")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("vocabulary", &self.vocabulary)
            .finish()
    }
}

/// Registry of keyword descriptors. Lookup of an unknown name returns
/// `None`; such members become pass-through data on the schema.
#[derive(Debug, Clone)]
pub struct KeywordRegistry {
    entries: AHashMap<String, KeywordDescriptor>,
}

impl KeywordRegistry {
    /// A registry with no keywords at all; every member parses as opaque
    /// data.
    #[must_use]
    pub fn empty() -> KeywordRegistry {
        KeywordRegistry {
            entries: AHashMap::new(),
        }
    }

    /// A registry populated with every built-in keyword.
    #[must_use]
    pub fn with_defaults() -> KeywordRegistry {
        let mut registry = KeywordRegistry::empty();
        for descriptor in builtin_descriptors() {
            registry.register(descriptor);
        }
        registry
    }

    /// Register a descriptor, replacing any previous binding for the same
    /// name. Registration is idempotent.
    pub fn register(&mut self, descriptor: KeywordDescriptor) {
        self.entries
            .insert(descriptor.name().to_string(), descriptor);
    }

    /// Look up the descriptor for a keyword name.
    #[must_use]
    pub fn lookup(&self, name: &str) -> Option<&KeywordDescriptor> {
        self.entries.get(name)
    }
}

impl Default for KeywordRegistry {
    fn default() -> Self {
        KeywordRegistry::with_defaults()
    }
}

static GLOBAL: Lazy<RwLock<KeywordRegistry>> =
    Lazy::new(|| RwLock::new(KeywordRegistry::with_defaults()));

/// Register a keyword on the process-wide default registry used when a
/// validator is built without an explicit registry.
pub fn register_keyword(descriptor: KeywordDescriptor) {
    GLOBAL.write().register(descriptor);
}

pub(crate) fn global_snapshot() -> KeywordRegistry {
    GLOBAL.read().clone()
}

fn builtin_descriptors() -> Vec<KeywordDescriptor> {
    use KeywordDescriptor as D;
    vec![
        // Identifiers run first; they assert nothing.
        D::builtin("$schema", 0, DraftSet::ALL, Vocabulary::Core, keywords::core::parse_schema_uri),
        D::builtin("$id", 0, DraftSet::ALL, Vocabulary::Core, keywords::core::parse_id),
        D::builtin("$anchor", 0, DraftSet::MODERN, Vocabulary::Core, keywords::core::parse_anchor),
        D::builtin("$comment", 0, DraftSet::ALL, Vocabulary::Core, keywords::core::parse_comment),
        D::builtin("$defs", 0, DraftSet::MODERN, Vocabulary::Core, keywords::core::parse_defs),
        D::builtin("definitions", 0, DraftSet::LEGACY, Vocabulary::Core, keywords::core::parse_definitions),
        D::builtin("$ref", 5, DraftSet::ALL, Vocabulary::Core, keywords::ref_::parse),
        // Assertions.
        D::builtin("type", 10, DraftSet::ALL, Vocabulary::Validation, keywords::type_::parse),
        D::builtin("const", 10, DraftSet::ALL, Vocabulary::Validation, keywords::literal::parse_const).allowing_null(),
        D::builtin("enum", 10, DraftSet::ALL, Vocabulary::Validation, keywords::literal::parse_enum),
        D::builtin("minimum", 10, DraftSet::ALL, Vocabulary::Validation, keywords::numeric::parse_minimum),
        D::builtin("maximum", 10, DraftSet::ALL, Vocabulary::Validation, keywords::numeric::parse_maximum),
        D::builtin("exclusiveMinimum", 10, DraftSet::ALL, Vocabulary::Validation, keywords::numeric::parse_exclusive_minimum),
        D::builtin("exclusiveMaximum", 10, DraftSet::ALL, Vocabulary::Validation, keywords::numeric::parse_exclusive_maximum),
        D::builtin("multipleOf", 10, DraftSet::ALL, Vocabulary::Validation, keywords::numeric::parse_multiple_of),
        D::builtin("minLength", 10, DraftSet::ALL, Vocabulary::Validation, keywords::string::parse_min_length),
        D::builtin("maxLength", 10, DraftSet::ALL, Vocabulary::Validation, keywords::string::parse_max_length),
        D::builtin("pattern", 10, DraftSet::ALL, Vocabulary::Validation, keywords::string::parse_pattern),
        D::builtin("minItems", 10, DraftSet::ALL, Vocabulary::Validation, keywords::array::parse_min_items),
        D::builtin("maxItems", 10, DraftSet::ALL, Vocabulary::Validation, keywords::array::parse_max_items),
        D::builtin("uniqueItems", 10, DraftSet::ALL, Vocabulary::Validation, keywords::array::parse_unique_items),
        D::builtin("minProperties", 10, DraftSet::ALL, Vocabulary::Validation, keywords::object::parse_min_properties),
        D::builtin("maxProperties", 10, DraftSet::ALL, Vocabulary::Validation, keywords::object::parse_max_properties),
        D::builtin("required", 10, DraftSet::ALL, Vocabulary::Validation, keywords::object::parse_required),
        D::builtin("dependentRequired", 10, DraftSet::MODERN, Vocabulary::Validation, keywords::object::parse_dependent_required),
        // Applicators producing annotations later keywords consume.
        D::builtin("properties", 20, DraftSet::ALL, Vocabulary::Applicator, keywords::properties::parse_properties),
        D::builtin("patternProperties", 20, DraftSet::ALL, Vocabulary::Applicator, keywords::properties::parse_pattern_properties),
        D::builtin("propertyNames", 20, DraftSet::ALL, Vocabulary::Applicator, keywords::properties::parse_property_names),
        D::builtin("prefixItems", 20, DraftSet::LATEST, Vocabulary::Applicator, keywords::items::parse_prefix_items),
        D::builtin("contains", 20, DraftSet::ALL, Vocabulary::Applicator, keywords::contains::parse_contains),
        D::builtin("additionalProperties", 30, DraftSet::ALL, Vocabulary::Applicator, keywords::properties::parse_additional_properties),
        D::builtin("items", 30, DraftSet::ALL, Vocabulary::Applicator, keywords::items::parse_items),
        D::builtin("additionalItems", 31, DraftSet::BEFORE_LATEST, Vocabulary::Applicator, keywords::items::parse_additional_items),
        D::builtin("minContains", 35, DraftSet::MODERN, Vocabulary::Validation, keywords::contains::parse_min_contains),
        D::builtin("maxContains", 35, DraftSet::MODERN, Vocabulary::Validation, keywords::contains::parse_max_contains),
        D::builtin("if", 40, DraftSet::SINCE_7, Vocabulary::Applicator, keywords::conditional::parse_if),
        D::builtin("then", 41, DraftSet::SINCE_7, Vocabulary::Applicator, keywords::conditional::parse_then),
        D::builtin("else", 41, DraftSet::SINCE_7, Vocabulary::Applicator, keywords::conditional::parse_else),
        D::builtin("dependencies", 45, DraftSet::LEGACY, Vocabulary::Applicator, keywords::dependent::parse_dependencies),
        D::builtin("dependentSchemas", 45, DraftSet::MODERN, Vocabulary::Applicator, keywords::dependent::parse_dependent_schemas),
        D::builtin("allOf", 50, DraftSet::ALL, Vocabulary::Applicator, keywords::logic::parse_all_of),
        D::builtin("anyOf", 50, DraftSet::ALL, Vocabulary::Applicator, keywords::logic::parse_any_of),
        D::builtin("oneOf", 50, DraftSet::ALL, Vocabulary::Applicator, keywords::logic::parse_one_of),
        D::builtin("not", 50, DraftSet::ALL, Vocabulary::Applicator, keywords::logic::parse_not),
        // Readers of the consolidated annotation picture run last.
        D::builtin("unevaluatedItems", 100, DraftSet::MODERN, Vocabulary::Unevaluated, keywords::unevaluated::parse_unevaluated_items),
        D::builtin("unevaluatedProperties", 100, DraftSet::MODERN, Vocabulary::Unevaluated, keywords::unevaluated::parse_unevaluated_properties),
    ]
}
