//! Array assertions: `minItems`, `maxItems`, and `uniqueItems`.
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::{expect_u64, Keyword},
    schema::SchemaParser,
    value::equal,
};

pub(crate) fn parse_min_items(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MinItems(expect_u64("minItems", value)?))
}

pub(crate) fn parse_max_items(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MaxItems(expect_u64("maxItems", value)?))
}

pub(crate) fn parse_unique_items(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    match value {
        Value::Bool(unique) => Ok(Keyword::UniqueItems(*unique)),
        _ => Err(SchemaError::parse("uniqueItems", "expected a boolean")),
    }
}

pub(crate) fn validate_min_items(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    if items.len() as u64 >= limit {
        Some(frame.pass("minItems"))
    } else {
        Some(frame.fail(
            "minItems",
            format!(
                "{} has less than {limit} item{}",
                frame.instance,
                if limit == 1 { "" } else { "s" }
            ),
        ))
    }
}

pub(crate) fn validate_max_items(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    if items.len() as u64 <= limit {
        Some(frame.pass("maxItems"))
    } else {
        Some(frame.fail(
            "maxItems",
            format!(
                "{} has more than {limit} item{}",
                frame.instance,
                if limit == 1 { "" } else { "s" }
            ),
        ))
    }
}

pub(crate) fn validate_unique_items(unique: bool, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    if !unique || all_unique(items) {
        Some(frame.pass("uniqueItems"))
    } else {
        Some(frame.fail(
            "uniqueItems",
            format!("{} has non-unique elements", frame.instance),
        ))
    }
}

/// Pairwise structural comparison. Quadratic, but arrays asserted unique
/// are short in practice and the structural rules (object member order,
/// numeric equivalence) rule out a plain hash set.
fn all_unique(items: &[Value]) -> bool {
    items
        .iter()
        .enumerate()
        .all(|(idx, item)| !items[..idx].iter().any(|earlier| equal(earlier, item)))
}
