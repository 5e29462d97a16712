//! Object assertions: `minProperties`, `maxProperties`, `required`, and
//! `dependentRequired`.
use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::{expect_string_array, expect_u64, Keyword},
    schema::SchemaParser,
};

pub(crate) fn parse_min_properties(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MinProperties(expect_u64("minProperties", value)?))
}

pub(crate) fn parse_max_properties(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MaxProperties(expect_u64("maxProperties", value)?))
}

pub(crate) fn parse_required(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Required(expect_string_array("required", value)?))
}

pub(crate) fn parse_dependent_required(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let Value::Object(members) = value else {
        return Err(SchemaError::parse(
            "dependentRequired",
            "expected an object of string arrays",
        ));
    };
    let mut dependencies = IndexMap::with_capacity(members.len());
    for (name, keys) in members {
        dependencies.insert(name.clone(), expect_string_array("dependentRequired", keys)?);
    }
    Ok(Keyword::DependentRequired(dependencies))
}

pub(crate) fn validate_min_properties(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    if members.len() as u64 >= limit {
        Some(frame.pass("minProperties"))
    } else {
        Some(frame.fail(
            "minProperties",
            format!(
                "{} has less than {limit} propert{}",
                frame.instance,
                if limit == 1 { "y" } else { "ies" }
            ),
        ))
    }
}

pub(crate) fn validate_max_properties(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    if members.len() as u64 <= limit {
        Some(frame.pass("maxProperties"))
    } else {
        Some(frame.fail(
            "maxProperties",
            format!(
                "{} has more than {limit} propert{}",
                frame.instance,
                if limit == 1 { "y" } else { "ies" }
            ),
        ))
    }
}

pub(crate) fn validate_required(names: &[String], frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let missing: Vec<&String> = names
        .iter()
        .filter(|name| !members.contains_key(*name))
        .collect();
    match missing.as_slice() {
        [] => Some(frame.pass("required")),
        [single] => Some(frame.fail("required", format!("{single:?} is a required property"))),
        many => {
            let listed = many
                .iter()
                .map(|name| format!("{name:?}"))
                .collect::<Vec<_>>()
                .join(", ");
            Some(frame.fail("required", format!("{listed} are required properties")))
        }
    }
}

pub(crate) fn validate_dependent_required(
    dependencies: &IndexMap<String, Vec<String>>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let mut failures = Vec::new();
    for (trigger, keys) in dependencies {
        if !members.contains_key(trigger) {
            continue;
        }
        for key in keys {
            if !members.contains_key(key) {
                failures.push(format!(
                    "{key:?} is a required property (required when {trigger:?} is present)"
                ));
            }
        }
    }
    if failures.is_empty() {
        Some(frame.pass("dependentRequired"))
    } else {
        Some(frame.fail("dependentRequired", failures.join("; ")))
    }
}
