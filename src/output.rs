//! Rendering of validation results: flag, basic, detailed, and verbose
//! forms, mirroring the draft output formats.
use serde::ser::SerializeMap;
use serde_json::Value;
use url::Url;

use crate::{
    context::ValidationContext, options::OutputFormat, paths::Location, validator::Validator,
};

/// The outcome of applying a schema to an instance. Rendering is deferred:
/// each accessor evaluates on demand.
#[derive(Debug, Clone)]
pub struct Output<'v, 'i> {
    validator: &'v Validator,
    instance: &'i Value,
}

impl<'v, 'i> Output<'v, 'i> {
    pub(crate) const fn new(validator: &'v Validator, instance: &'i Value) -> Output<'v, 'i> {
        Output {
            validator,
            instance,
        }
    }

    /// The validity boolean alone.
    #[must_use]
    pub fn flag(&self) -> bool {
        self.validator.is_valid(self.instance)
    }

    /// Flat list of failing nodes, or of annotation carriers when valid.
    #[must_use]
    pub fn basic(&self) -> BasicOutput {
        let ctx = self.validator.evaluate(self.instance);
        if ctx.is_valid() {
            BasicOutput::Valid(
                ctx.walk()
                    .filter(|node| !node.annotations().is_empty())
                    .map(|node| OutputUnit::of(node, node.annotations().to_json()))
                    .collect(),
            )
        } else {
            BasicOutput::Invalid(
                ctx.walk()
                    .filter(|node| !node.is_valid())
                    .filter_map(|node| {
                        node.message()
                            .map(|message| OutputUnit::of(node, message.to_string()))
                    })
                    .collect(),
            )
        }
    }

    /// Tree rendering pruned to the failing branches (or, when valid, to
    /// the annotation-bearing spine).
    #[must_use]
    pub fn detailed(&self) -> Value {
        detailed_node(&self.validator.evaluate(self.instance))
    }

    /// The full retained context tree.
    #[must_use]
    pub fn verbose(&self) -> Value {
        verbose_node(&self.validator.evaluate(self.instance))
    }

    /// Render in the format selected by
    /// [`ValidationOptions::with_output_format`](crate::ValidationOptions::with_output_format).
    #[must_use]
    pub fn render(&self) -> Value {
        match self.validator.config().output_format {
            OutputFormat::Flag => serde_json::json!({"valid": self.flag()}),
            OutputFormat::Basic => {
                serde_json::to_value(self.basic()).expect("output units always serialize")
            }
            OutputFormat::Detailed => self.detailed(),
            OutputFormat::Verbose => self.verbose(),
        }
    }
}

/// The "basic" rendering: one flat list of output units.
#[derive(Debug, PartialEq)]
pub enum BasicOutput {
    /// The instance was valid; the units carry annotations.
    Valid(Vec<OutputUnit<Value>>),
    /// The instance failed; the units carry error messages.
    Invalid(Vec<OutputUnit<String>>),
}

impl BasicOutput {
    /// Whether the instance satisfied the schema.
    #[must_use]
    pub const fn is_valid(&self) -> bool {
        matches!(self, BasicOutput::Valid(_))
    }
}

/// A place in the schema, a place in the instance, and the value produced
/// there: an annotation map for valid units, an error string for failing
/// ones.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputUnit<T> {
    keyword_location: Location,
    instance_location: Location,
    absolute_keyword_location: Option<Url>,
    value: T,
}

impl<T> OutputUnit<T> {
    fn of(node: &ValidationContext, value: T) -> OutputUnit<T> {
        OutputUnit {
            keyword_location: node.schema_location().clone(),
            instance_location: node.instance_location().clone(),
            absolute_keyword_location: node.absolute_location().cloned(),
            value,
        }
    }

    /// JSON Pointer to the keyword, through any `$ref` crossings.
    #[must_use]
    pub const fn keyword_location(&self) -> &Location {
        &self.keyword_location
    }

    /// JSON Pointer into the instance.
    #[must_use]
    pub const fn instance_location(&self) -> &Location {
        &self.instance_location
    }

    /// Absolute URI of the keyword, when the resource has an identifier.
    #[must_use]
    pub fn absolute_keyword_location(&self) -> Option<&Url> {
        self.absolute_keyword_location.as_ref()
    }

    /// The annotation map or error message at this unit.
    #[must_use]
    pub const fn value(&self) -> &T {
        &self.value
    }
}

impl serde::Serialize for BasicOutput {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(2))?;
        match self {
            BasicOutput::Valid(units) => {
                map.serialize_entry("valid", &true)?;
                map.serialize_entry("annotations", units)?;
            }
            BasicOutput::Invalid(units) => {
                map.serialize_entry("valid", &false)?;
                map.serialize_entry("errors", units)?;
            }
        }
        map.end()
    }
}

impl serde::Serialize for OutputUnit<Value> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        serialize_locations(&mut map, self)?;
        map.serialize_entry("annotations", &self.value)?;
        map.end()
    }
}

impl serde::Serialize for OutputUnit<String> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(4))?;
        serialize_locations(&mut map, self)?;
        map.serialize_entry("error", &self.value)?;
        map.end()
    }
}

fn serialize_locations<S, T>(map: &mut S, unit: &OutputUnit<T>) -> Result<(), S::Error>
where
    S: SerializeMap,
{
    map.serialize_entry("keywordLocation", &unit.keyword_location)?;
    map.serialize_entry("instanceLocation", &unit.instance_location)?;
    if let Some(absolute) = &unit.absolute_keyword_location {
        map.serialize_entry("absoluteKeywordLocation", absolute.as_str())?;
    }
    Ok(())
}

fn header(node: &ValidationContext) -> serde_json::Map<String, Value> {
    let mut map = serde_json::Map::new();
    map.insert("valid".into(), Value::Bool(node.is_valid()));
    map.insert(
        "keywordLocation".into(),
        Value::String(node.schema_location().to_string()),
    );
    map.insert(
        "instanceLocation".into(),
        Value::String(node.instance_location().to_string()),
    );
    if let Some(absolute) = node.absolute_location() {
        map.insert(
            "absoluteKeywordLocation".into(),
            Value::String(absolute.to_string()),
        );
    }
    map
}

fn detailed_node(node: &ValidationContext) -> Value {
    let mut map = header(node);
    if node.is_valid() {
        if !node.annotations().is_empty() {
            map.insert("annotations".into(), node.annotations().to_json());
        }
    } else {
        if let Some(message) = node.message() {
            map.insert("error".into(), Value::String(message.to_string()));
        }
        let errors: Vec<Value> = node
            .nested()
            .iter()
            .filter(|child| !child.is_valid())
            .map(detailed_node)
            .collect();
        if !errors.is_empty() {
            map.insert("errors".into(), Value::Array(errors));
        }
    }
    Value::Object(map)
}

fn verbose_node(node: &ValidationContext) -> Value {
    let mut map = header(node);
    if let Some(message) = node.message() {
        map.insert("error".into(), Value::String(message.to_string()));
    }
    if !node.annotations().is_empty() {
        map.insert("annotations".into(), node.annotations().to_json());
    }
    let nested: Vec<Value> = node.nested().iter().map(verbose_node).collect();
    if !nested.is_empty() {
        map.insert("nested".into(), Value::Array(nested));
    }
    Value::Object(map)
}
