//! `const` and `enum`: assertions against literal values, compared with
//! the structural equality of [`crate::value`].
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::Keyword,
    schema::SchemaParser,
    value::equal,
};

pub(crate) fn parse_const(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Const(value.clone()))
}

pub(crate) fn parse_enum(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    match value {
        Value::Array(options) => Ok(Keyword::Enum(options.clone())),
        _ => Err(SchemaError::parse("enum", "expected an array")),
    }
}

pub(crate) fn validate_const(expected: &Value, frame: &Frame<'_>) -> Option<ValidationContext> {
    if equal(frame.instance, expected) {
        Some(frame.pass("const"))
    } else {
        Some(frame.fail("const", format!("{expected} was expected")))
    }
}

pub(crate) fn validate_enum(options: &[Value], frame: &Frame<'_>) -> Option<ValidationContext> {
    if options.iter().any(|option| equal(frame.instance, option)) {
        Some(frame.pass("enum"))
    } else {
        let listed = options
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(",");
        Some(frame.fail(
            "enum",
            format!("{} is not one of [{listed}]", frame.instance),
        ))
    }
}
