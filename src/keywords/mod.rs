//! Keyword implementations.
//!
//! [`Keyword`] is a closed set of variants, one per recognized keyword,
//! each carrying its parsed payload. Per-keyword metadata (priority,
//! drafts, vocabulary) lives in the registry's descriptor table; the
//! methods here cover the behavior that varies by payload: validation,
//! annotation consolidation, sub-schema enumeration, and JSON Pointer
//! traversal through keyword interiors.
pub(crate) mod array;
pub(crate) mod conditional;
pub(crate) mod contains;
pub(crate) mod core;
pub(crate) mod custom;
pub(crate) mod dependent;
pub(crate) mod items;
pub(crate) mod literal;
pub(crate) mod logic;
pub(crate) mod numeric;
pub(crate) mod object;
pub(crate) mod properties;
pub(crate) mod ref_;
pub(crate) mod string;
pub(crate) mod type_;
pub(crate) mod unevaluated;

use indexmap::IndexMap;
use serde_json::{Number, Value};

use crate::{
    annotations::AnnotationMap,
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    schema::{Schema, SchemaKey},
};

/// A parsed keyword instance. Payloads are immutable after construction;
/// sub-schemas are arena keys into the owning document.
#[derive(Debug)]
pub(crate) enum Keyword {
    // Identifiers: inert at validation time, consumed by the schema store.
    SchemaUri(String),
    Id(String),
    Anchor(String),
    Comment(String),
    Defs(IndexMap<String, SchemaKey>),
    Definitions(IndexMap<String, SchemaKey>),
    Ref(String),
    // Assertions.
    Type(type_::Types),
    Const(Value),
    Enum(Vec<Value>),
    Minimum(Number),
    Maximum(Number),
    ExclusiveMinimum(Number),
    ExclusiveMaximum(Number),
    MultipleOf(Number),
    MinLength(u64),
    MaxLength(u64),
    Pattern(string::Pattern),
    MinItems(u64),
    MaxItems(u64),
    UniqueItems(bool),
    MinProperties(u64),
    MaxProperties(u64),
    Required(Vec<String>),
    DependentRequired(IndexMap<String, Vec<String>>),
    MinContains(u64),
    MaxContains(u64),
    // Applicators.
    Properties(IndexMap<String, SchemaKey>),
    PatternProperties(Vec<(string::Pattern, SchemaKey)>),
    AdditionalProperties(SchemaKey),
    PropertyNames(SchemaKey),
    PrefixItems(Vec<SchemaKey>),
    Items(items::Items),
    AdditionalItems(SchemaKey),
    Contains(SchemaKey),
    AllOf(Vec<SchemaKey>),
    AnyOf(Vec<SchemaKey>),
    OneOf(Vec<SchemaKey>),
    Not(SchemaKey),
    If(SchemaKey),
    Then(SchemaKey),
    Else(SchemaKey),
    DependentSchemas(IndexMap<String, SchemaKey>),
    Dependencies(IndexMap<String, dependent::Dependency>),
    UnevaluatedItems(SchemaKey),
    UnevaluatedProperties(SchemaKey),
    // Extension point for caller-registered vocabularies.
    Custom(custom::Custom),
}

impl Keyword {
    pub(crate) fn name(&self) -> &str {
        match self {
            Keyword::SchemaUri(_) => "$schema",
            Keyword::Id(_) => "$id",
            Keyword::Anchor(_) => "$anchor",
            Keyword::Comment(_) => "$comment",
            Keyword::Defs(_) => "$defs",
            Keyword::Definitions(_) => "definitions",
            Keyword::Ref(_) => "$ref",
            Keyword::Type(_) => "type",
            Keyword::Const(_) => "const",
            Keyword::Enum(_) => "enum",
            Keyword::Minimum(_) => "minimum",
            Keyword::Maximum(_) => "maximum",
            Keyword::ExclusiveMinimum(_) => "exclusiveMinimum",
            Keyword::ExclusiveMaximum(_) => "exclusiveMaximum",
            Keyword::MultipleOf(_) => "multipleOf",
            Keyword::MinLength(_) => "minLength",
            Keyword::MaxLength(_) => "maxLength",
            Keyword::Pattern(_) => "pattern",
            Keyword::MinItems(_) => "minItems",
            Keyword::MaxItems(_) => "maxItems",
            Keyword::UniqueItems(_) => "uniqueItems",
            Keyword::MinProperties(_) => "minProperties",
            Keyword::MaxProperties(_) => "maxProperties",
            Keyword::Required(_) => "required",
            Keyword::DependentRequired(_) => "dependentRequired",
            Keyword::MinContains(_) => "minContains",
            Keyword::MaxContains(_) => "maxContains",
            Keyword::Properties(_) => "properties",
            Keyword::PatternProperties(_) => "patternProperties",
            Keyword::AdditionalProperties(_) => "additionalProperties",
            Keyword::PropertyNames(_) => "propertyNames",
            Keyword::PrefixItems(_) => "prefixItems",
            Keyword::Items(_) => "items",
            Keyword::AdditionalItems(_) => "additionalItems",
            Keyword::Contains(_) => "contains",
            Keyword::AllOf(_) => "allOf",
            Keyword::AnyOf(_) => "anyOf",
            Keyword::OneOf(_) => "oneOf",
            Keyword::Not(_) => "not",
            Keyword::If(_) => "if",
            Keyword::Then(_) => "then",
            Keyword::Else(_) => "else",
            Keyword::DependentSchemas(_) => "dependentSchemas",
            Keyword::Dependencies(_) => "dependencies",
            Keyword::UnevaluatedItems(_) => "unevaluatedItems",
            Keyword::UnevaluatedProperties(_) => "unevaluatedProperties",
            Keyword::Custom(custom) => custom.name(),
        }
    }

    /// Run this keyword against the frame's instance. `None` means the
    /// keyword contributed nothing here: identifiers, assertions applied to
    /// an instance of the wrong kind, and conditional branches that were
    /// not selected.
    pub(crate) fn validate(
        &self,
        ev: &mut Evaluator<'_>,
        frame: &Frame<'_>,
    ) -> Option<ValidationContext> {
        let mut ctx = match self {
            Keyword::SchemaUri(_)
            | Keyword::Id(_)
            | Keyword::Anchor(_)
            | Keyword::Comment(_)
            | Keyword::Defs(_)
            | Keyword::Definitions(_) => return None,
            Keyword::Ref(reference) => ref_::validate(reference, ev, frame),
            Keyword::Type(types) => return type_::validate(types, frame),
            Keyword::Const(expected) => return literal::validate_const(expected, frame),
            Keyword::Enum(options) => return literal::validate_enum(options, frame),
            Keyword::Minimum(limit) => return numeric::validate_minimum(limit, frame),
            Keyword::Maximum(limit) => return numeric::validate_maximum(limit, frame),
            Keyword::ExclusiveMinimum(limit) => {
                return numeric::validate_exclusive_minimum(limit, frame)
            }
            Keyword::ExclusiveMaximum(limit) => {
                return numeric::validate_exclusive_maximum(limit, frame)
            }
            Keyword::MultipleOf(divisor) => return numeric::validate_multiple_of(divisor, frame),
            Keyword::MinLength(limit) => return string::validate_min_length(*limit, frame),
            Keyword::MaxLength(limit) => return string::validate_max_length(*limit, frame),
            Keyword::Pattern(pattern) => return string::validate_pattern(pattern, frame),
            Keyword::MinItems(limit) => return array::validate_min_items(*limit, frame),
            Keyword::MaxItems(limit) => return array::validate_max_items(*limit, frame),
            Keyword::UniqueItems(unique) => return array::validate_unique_items(*unique, frame),
            Keyword::MinProperties(limit) => return object::validate_min_properties(*limit, frame),
            Keyword::MaxProperties(limit) => return object::validate_max_properties(*limit, frame),
            Keyword::Required(names) => return object::validate_required(names, frame),
            Keyword::DependentRequired(dependencies) => {
                return object::validate_dependent_required(dependencies, frame)
            }
            Keyword::MinContains(limit) => return contains::validate_min_contains(*limit, frame),
            Keyword::MaxContains(limit) => return contains::validate_max_contains(*limit, frame),
            Keyword::Properties(schemas) => properties::validate_properties(schemas, ev, frame)?,
            Keyword::PatternProperties(schemas) => {
                properties::validate_pattern_properties(schemas, ev, frame)?
            }
            Keyword::AdditionalProperties(schema) => {
                properties::validate_additional_properties(*schema, ev, frame)?
            }
            Keyword::PropertyNames(schema) => {
                properties::validate_property_names(*schema, ev, frame)?
            }
            Keyword::PrefixItems(schemas) => items::validate_prefix_items(schemas, ev, frame)?,
            Keyword::Items(payload) => items::validate_items(payload, ev, frame)?,
            Keyword::AdditionalItems(schema) => {
                items::validate_additional_items(*schema, ev, frame)?
            }
            Keyword::Contains(schema) => contains::validate_contains(*schema, ev, frame)?,
            Keyword::AllOf(schemas) => logic::validate_all_of(schemas, ev, frame),
            Keyword::AnyOf(schemas) => logic::validate_any_of(schemas, ev, frame),
            Keyword::OneOf(schemas) => logic::validate_one_of(schemas, ev, frame),
            Keyword::Not(schema) => logic::validate_not(*schema, ev, frame),
            Keyword::If(schema) => conditional::validate_if(*schema, ev, frame),
            Keyword::Then(schema) => conditional::validate_then(*schema, ev, frame)?,
            Keyword::Else(schema) => conditional::validate_else(*schema, ev, frame)?,
            Keyword::DependentSchemas(schemas) => {
                dependent::validate_dependent_schemas(schemas, ev, frame)?
            }
            Keyword::Dependencies(dependencies) => {
                dependent::validate_dependencies(dependencies, ev, frame)?
            }
            Keyword::UnevaluatedItems(schema) => {
                unevaluated::validate_unevaluated_items(*schema, ev, frame)?
            }
            Keyword::UnevaluatedProperties(schema) => {
                unevaluated::validate_unevaluated_properties(*schema, ev, frame)?
            }
            Keyword::Custom(custom) => return custom::validate(custom, frame),
        };
        if ctx.is_valid() {
            let (children, annotations) = ctx.parts_mut();
            self.consolidate(children, annotations);
        }
        Some(ctx)
    }

    /// Merge annotations from child contexts onto the parent. Only the
    /// in-place applicators forward anything: their sub-schemas evaluated
    /// the same instance node, so annotations from valid children remain
    /// meaningful one level up. A no-op for every other variant.
    pub(crate) fn consolidate(
        &self,
        children: &[ValidationContext],
        parent: &mut AnnotationMap,
    ) {
        match self {
            Keyword::Ref(_)
            | Keyword::AllOf(_)
            | Keyword::AnyOf(_)
            | Keyword::OneOf(_)
            | Keyword::If(_)
            | Keyword::Then(_)
            | Keyword::Else(_)
            | Keyword::DependentSchemas(_)
            | Keyword::Dependencies(_) => {
                for child in children.iter().filter(|child| child.is_valid()) {
                    parent.absorb(child.annotations());
                }
            }
            _ => {}
        }
    }

    /// Sub-schema arena keys held by this keyword's payload, in source
    /// order. Used to walk documents when registering identifiers.
    pub(crate) fn subschemas(&self) -> Vec<SchemaKey> {
        match self {
            Keyword::Defs(schemas)
            | Keyword::Definitions(schemas)
            | Keyword::Properties(schemas)
            | Keyword::DependentSchemas(schemas) => schemas.values().copied().collect(),
            Keyword::PatternProperties(schemas) => {
                schemas.iter().map(|(_, schema)| *schema).collect()
            }
            Keyword::PrefixItems(schemas)
            | Keyword::AllOf(schemas)
            | Keyword::AnyOf(schemas)
            | Keyword::OneOf(schemas) => schemas.clone(),
            Keyword::Items(items::Items::Single(schema))
            | Keyword::AdditionalProperties(schema)
            | Keyword::PropertyNames(schema)
            | Keyword::AdditionalItems(schema)
            | Keyword::Contains(schema)
            | Keyword::Not(schema)
            | Keyword::If(schema)
            | Keyword::Then(schema)
            | Keyword::Else(schema)
            | Keyword::UnevaluatedItems(schema)
            | Keyword::UnevaluatedProperties(schema) => vec![*schema],
            Keyword::Items(items::Items::Tuple(schemas)) => schemas.clone(),
            Keyword::Dependencies(dependencies) => dependencies
                .values()
                .filter_map(|dependency| match dependency {
                    dependent::Dependency::Schema(schema) => Some(*schema),
                    dependent::Dependency::Keys(_) => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Resolve one JSON Pointer step through this keyword's payload.
    ///
    /// `None` as the segment asks whether the keyword itself denotes a
    /// single sub-schema (`/items`, `/not`, ...); a named segment steps
    /// into map- or array-valued payloads (`/properties/foo`, `/allOf/0`).
    pub(crate) fn resolve_segment(&self, segment: Option<&str>) -> Option<SchemaKey> {
        match (self, segment) {
            (
                Keyword::Items(items::Items::Single(schema))
                | Keyword::AdditionalProperties(schema)
                | Keyword::PropertyNames(schema)
                | Keyword::AdditionalItems(schema)
                | Keyword::Contains(schema)
                | Keyword::Not(schema)
                | Keyword::If(schema)
                | Keyword::Then(schema)
                | Keyword::Else(schema)
                | Keyword::UnevaluatedItems(schema)
                | Keyword::UnevaluatedProperties(schema),
                None,
            ) => Some(*schema),
            (
                Keyword::Defs(schemas)
                | Keyword::Definitions(schemas)
                | Keyword::Properties(schemas)
                | Keyword::DependentSchemas(schemas),
                Some(name),
            ) => schemas.get(name).copied(),
            (Keyword::PatternProperties(schemas), Some(source)) => schemas
                .iter()
                .find(|(pattern, _)| pattern.source() == source)
                .map(|(_, schema)| *schema),
            (Keyword::Dependencies(dependencies), Some(name)) => {
                match dependencies.get(name)? {
                    dependent::Dependency::Schema(schema) => Some(*schema),
                    dependent::Dependency::Keys(_) => None,
                }
            }
            (
                Keyword::PrefixItems(schemas)
                | Keyword::AllOf(schemas)
                | Keyword::AnyOf(schemas)
                | Keyword::OneOf(schemas),
                Some(index),
            ) => schemas.get(parse_index(index)?).copied(),
            (Keyword::Items(items::Items::Tuple(schemas)), Some(index)) => {
                schemas.get(parse_index(index)?).copied()
            }
            (_, _) => None,
        }
    }

    /// Serialize the payload back to JSON.
    pub(crate) fn to_value(&self, document: &Schema) -> Value {
        match self {
            Keyword::SchemaUri(text)
            | Keyword::Id(text)
            | Keyword::Anchor(text)
            | Keyword::Comment(text)
            | Keyword::Ref(text) => Value::String(text.clone()),
            Keyword::Type(types) => types.to_json(),
            Keyword::Const(value) => value.clone(),
            Keyword::Enum(options) => Value::Array(options.clone()),
            Keyword::Minimum(number)
            | Keyword::Maximum(number)
            | Keyword::ExclusiveMinimum(number)
            | Keyword::ExclusiveMaximum(number)
            | Keyword::MultipleOf(number) => Value::Number(number.clone()),
            Keyword::MinLength(limit)
            | Keyword::MaxLength(limit)
            | Keyword::MinItems(limit)
            | Keyword::MaxItems(limit)
            | Keyword::MinProperties(limit)
            | Keyword::MaxProperties(limit)
            | Keyword::MinContains(limit)
            | Keyword::MaxContains(limit) => Value::from(*limit),
            Keyword::Pattern(pattern) => Value::String(pattern.source().to_string()),
            Keyword::UniqueItems(unique) => Value::Bool(*unique),
            Keyword::Required(names) => Value::from(names.clone()),
            Keyword::DependentRequired(dependencies) => Value::Object(
                dependencies
                    .iter()
                    .map(|(name, keys)| (name.clone(), Value::from(keys.clone())))
                    .collect(),
            ),
            Keyword::Defs(schemas)
            | Keyword::Definitions(schemas)
            | Keyword::Properties(schemas)
            | Keyword::DependentSchemas(schemas) => Value::Object(
                schemas
                    .iter()
                    .map(|(name, schema)| (name.clone(), document.node_to_value(*schema)))
                    .collect(),
            ),
            Keyword::PatternProperties(schemas) => Value::Object(
                schemas
                    .iter()
                    .map(|(pattern, schema)| {
                        (
                            pattern.source().to_string(),
                            document.node_to_value(*schema),
                        )
                    })
                    .collect(),
            ),
            Keyword::PrefixItems(schemas)
            | Keyword::AllOf(schemas)
            | Keyword::AnyOf(schemas)
            | Keyword::OneOf(schemas) => Value::Array(
                schemas
                    .iter()
                    .map(|schema| document.node_to_value(*schema))
                    .collect(),
            ),
            Keyword::Items(items::Items::Single(schema))
            | Keyword::AdditionalProperties(schema)
            | Keyword::PropertyNames(schema)
            | Keyword::AdditionalItems(schema)
            | Keyword::Contains(schema)
            | Keyword::Not(schema)
            | Keyword::If(schema)
            | Keyword::Then(schema)
            | Keyword::Else(schema)
            | Keyword::UnevaluatedItems(schema)
            | Keyword::UnevaluatedProperties(schema) => document.node_to_value(*schema),
            Keyword::Items(items::Items::Tuple(schemas)) => Value::Array(
                schemas
                    .iter()
                    .map(|schema| document.node_to_value(*schema))
                    .collect(),
            ),
            Keyword::Dependencies(dependencies) => Value::Object(
                dependencies
                    .iter()
                    .map(|(name, dependency)| {
                        let value = match dependency {
                            dependent::Dependency::Keys(keys) => Value::from(keys.clone()),
                            dependent::Dependency::Schema(schema) => {
                                document.node_to_value(*schema)
                            }
                        };
                        (name.clone(), value)
                    })
                    .collect(),
            ),
            Keyword::Custom(custom) => custom.raw().clone(),
        }
    }

    /// Payload equality across documents; sub-schema keys compare by the
    /// structural equality of the nodes they address.
    pub(crate) fn eq_with(&self, document: &Schema, other: &Keyword, other_document: &Schema) -> bool {
        let schema_eq = |a: &SchemaKey, b: &SchemaKey| document.node_eq(*a, other_document, *b);
        let map_eq = |a: &IndexMap<String, SchemaKey>, b: &IndexMap<String, SchemaKey>| {
            a.len() == b.len()
                && a.iter().all(|(name, schema)| {
                    b.get(name).map_or(false, |other| schema_eq(schema, other))
                })
        };
        let seq_eq = |a: &Vec<SchemaKey>, b: &Vec<SchemaKey>| {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| schema_eq(x, y))
        };
        match (self, other) {
            (Keyword::SchemaUri(a), Keyword::SchemaUri(b))
            | (Keyword::Id(a), Keyword::Id(b))
            | (Keyword::Anchor(a), Keyword::Anchor(b))
            | (Keyword::Comment(a), Keyword::Comment(b))
            | (Keyword::Ref(a), Keyword::Ref(b)) => a == b,
            (Keyword::Type(a), Keyword::Type(b)) => a == b,
            (Keyword::Const(a), Keyword::Const(b)) => a == b,
            (Keyword::Enum(a), Keyword::Enum(b)) => a == b,
            (Keyword::Minimum(a), Keyword::Minimum(b))
            | (Keyword::Maximum(a), Keyword::Maximum(b))
            | (Keyword::ExclusiveMinimum(a), Keyword::ExclusiveMinimum(b))
            | (Keyword::ExclusiveMaximum(a), Keyword::ExclusiveMaximum(b))
            | (Keyword::MultipleOf(a), Keyword::MultipleOf(b)) => a == b,
            (Keyword::MinLength(a), Keyword::MinLength(b))
            | (Keyword::MaxLength(a), Keyword::MaxLength(b))
            | (Keyword::MinItems(a), Keyword::MinItems(b))
            | (Keyword::MaxItems(a), Keyword::MaxItems(b))
            | (Keyword::MinProperties(a), Keyword::MinProperties(b))
            | (Keyword::MaxProperties(a), Keyword::MaxProperties(b))
            | (Keyword::MinContains(a), Keyword::MinContains(b))
            | (Keyword::MaxContains(a), Keyword::MaxContains(b)) => a == b,
            (Keyword::Pattern(a), Keyword::Pattern(b)) => a == b,
            (Keyword::UniqueItems(a), Keyword::UniqueItems(b)) => a == b,
            (Keyword::Required(a), Keyword::Required(b)) => a == b,
            (Keyword::DependentRequired(a), Keyword::DependentRequired(b)) => a == b,
            (Keyword::Defs(a), Keyword::Defs(b))
            | (Keyword::Definitions(a), Keyword::Definitions(b))
            | (Keyword::Properties(a), Keyword::Properties(b))
            | (Keyword::DependentSchemas(a), Keyword::DependentSchemas(b)) => map_eq(a, b),
            (Keyword::PatternProperties(a), Keyword::PatternProperties(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|((pattern_a, schema_a), (pattern_b, schema_b))| {
                        pattern_a == pattern_b && schema_eq(schema_a, schema_b)
                    })
            }
            (Keyword::PrefixItems(a), Keyword::PrefixItems(b))
            | (Keyword::AllOf(a), Keyword::AllOf(b))
            | (Keyword::AnyOf(a), Keyword::AnyOf(b))
            | (Keyword::OneOf(a), Keyword::OneOf(b)) => seq_eq(a, b),
            (Keyword::Items(a), Keyword::Items(b)) => match (a, b) {
                (items::Items::Single(a), items::Items::Single(b)) => schema_eq(a, b),
                (items::Items::Tuple(a), items::Items::Tuple(b)) => seq_eq(a, b),
                (_, _) => false,
            },
            (Keyword::AdditionalProperties(a), Keyword::AdditionalProperties(b))
            | (Keyword::PropertyNames(a), Keyword::PropertyNames(b))
            | (Keyword::AdditionalItems(a), Keyword::AdditionalItems(b))
            | (Keyword::Contains(a), Keyword::Contains(b))
            | (Keyword::Not(a), Keyword::Not(b))
            | (Keyword::If(a), Keyword::If(b))
            | (Keyword::Then(a), Keyword::Then(b))
            | (Keyword::Else(a), Keyword::Else(b))
            | (Keyword::UnevaluatedItems(a), Keyword::UnevaluatedItems(b))
            | (Keyword::UnevaluatedProperties(a), Keyword::UnevaluatedProperties(b)) => {
                schema_eq(a, b)
            }
            (Keyword::Dependencies(a), Keyword::Dependencies(b)) => {
                a.len() == b.len()
                    && a.iter().all(|(name, dependency)| match (dependency, b.get(name)) {
                        (
                            dependent::Dependency::Keys(keys_a),
                            Some(dependent::Dependency::Keys(keys_b)),
                        ) => keys_a == keys_b,
                        (
                            dependent::Dependency::Schema(schema_a),
                            Some(dependent::Dependency::Schema(schema_b)),
                        ) => schema_eq(schema_a, schema_b),
                        (_, _) => false,
                    })
            }
            (Keyword::Custom(a), Keyword::Custom(b)) => a.name() == b.name() && a.raw() == b.raw(),
            (_, _) => false,
        }
    }
}

/// Array-index segment of a JSON Pointer: digits only, no leading zeros.
fn parse_index(segment: &str) -> Option<usize> {
    if segment.len() > 1 && segment.starts_with('0') {
        return None;
    }
    segment.parse().ok()
}

// Shared payload-parsing helpers. Limits are non-negative integers but
// may be written with a redundant fraction (`2.0`).

pub(crate) fn expect_u64(keyword: &str, value: &Value) -> Result<u64, SchemaError> {
    if let Some(limit) = value.as_u64() {
        return Ok(limit);
    }
    if let Some(float) = value.as_f64() {
        if float.fract() == 0.0 && float >= 0.0 {
            #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
            return Ok(float as u64);
        }
    }
    Err(SchemaError::parse(keyword, "expected a non-negative integer"))
}

pub(crate) fn expect_number(keyword: &str, value: &Value) -> Result<Number, SchemaError> {
    match value {
        Value::Number(number) => Ok(number.clone()),
        _ => Err(SchemaError::parse(keyword, "expected a number")),
    }
}

pub(crate) fn expect_string(keyword: &str, value: &Value) -> Result<String, SchemaError> {
    match value {
        Value::String(text) => Ok(text.clone()),
        _ => Err(SchemaError::parse(keyword, "expected a string")),
    }
}

pub(crate) fn expect_string_array(keyword: &str, value: &Value) -> Result<Vec<String>, SchemaError> {
    let Value::Array(items) = value else {
        return Err(SchemaError::parse(keyword, "expected an array of strings"));
    };
    items
        .iter()
        .map(|item| match item {
            Value::String(text) => Ok(text.clone()),
            _ => Err(SchemaError::parse(keyword, "expected an array of strings")),
        })
        .collect()
}

