//! The `type` keyword.
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::Keyword,
    schema::SchemaParser,
    value::{Kind, KindSet},
};

/// Payload of `type`: the tags in source order for serialization, plus a
/// bitmap for membership checks.
#[derive(Debug, PartialEq)]
pub(crate) struct Types {
    tags: Box<[Kind]>,
    set: KindSet,
}

impl Types {
    pub(crate) fn to_json(&self) -> Value {
        match &*self.tags {
            [single] => Value::String(single.as_str().to_string()),
            many => Value::Array(
                many.iter()
                    .map(|kind| Value::String(kind.as_str().to_string()))
                    .collect(),
            ),
        }
    }
}

pub(crate) fn parse(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let tags: Vec<Kind> = match value {
        Value::String(tag) => vec![parse_tag(tag)?],
        Value::Array(tags) if !tags.is_empty() => tags
            .iter()
            .map(|tag| match tag {
                Value::String(tag) => parse_tag(tag),
                _ => Err(SchemaError::parse("type", "expected a string or array of strings")),
            })
            .collect::<Result<_, _>>()?,
        Value::Array(_) => return Err(SchemaError::parse("type", "expected at least one type")),
        _ => {
            return Err(SchemaError::parse(
                "type",
                "expected a string or array of strings",
            ))
        }
    };
    let set = tags
        .iter()
        .fold(KindSet::empty(), |set, &kind| set.with(kind));
    Ok(Keyword::Type(Types {
        tags: tags.into_boxed_slice(),
        set,
    }))
}

fn parse_tag(tag: &str) -> Result<Kind, SchemaError> {
    Kind::try_from(tag)
        .map_err(|()| SchemaError::parse("type", format!("unknown type {tag:?}")))
}

pub(crate) fn validate(types: &Types, frame: &Frame<'_>) -> Option<ValidationContext> {
    if types.set.admits(frame.instance) {
        Some(frame.pass("type"))
    } else {
        let message = match &*types.tags {
            [single] => format!("{} is not of type \"{single}\"", frame.instance),
            many => {
                let expected = many
                    .iter()
                    .map(|kind| format!("\"{kind}\""))
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("{} is not of types {expected}", frame.instance)
            }
        };
        Some(frame.fail("type", message))
    }
}
