//! Property-triggered dependencies: `dependentSchemas` (2019-09+) and the
//! mixed-form `dependencies` of drafts 6 and 7, where each entry is either
//! a list of required property names or a schema applied in place.
use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::{expect_string_array, Keyword},
    schema::{SchemaKey, SchemaParser},
};

/// One `dependencies` entry.
#[derive(Debug)]
pub(crate) enum Dependency {
    Keys(Vec<String>),
    Schema(SchemaKey),
}

pub(crate) fn parse_dependent_schemas(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::DependentSchemas(
        parser.named_subschemas("dependentSchemas", value)?,
    ))
}

pub(crate) fn parse_dependencies(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let Value::Object(members) = value else {
        return Err(SchemaError::parse("dependencies", "expected an object"));
    };
    let mut dependencies = IndexMap::with_capacity(members.len());
    for (name, entry) in members {
        let dependency = match entry {
            Value::Array(_) => Dependency::Keys(expect_string_array("dependencies", entry)?),
            _ => Dependency::Schema(parser.subschema(entry)?),
        };
        dependencies.insert(name.clone(), dependency);
    }
    Ok(Keyword::Dependencies(dependencies))
}

pub(crate) fn validate_dependent_schemas(
    schemas: &IndexMap<String, SchemaKey>,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("dependentSchemas");
    let mut ctx = frame.pass_at(keyword_location.clone());
    for (trigger, schema) in schemas {
        if !members.contains_key(trigger) {
            continue;
        }
        let child = ev.evaluate(
            frame.scope,
            *schema,
            frame.instance,
            frame.location,
            keyword_location.join(trigger.clone()),
        );
        if !child.is_valid() {
            ctx.mark_invalid();
        }
        ctx.push(child);
    }
    Some(ctx)
}

pub(crate) fn validate_dependencies(
    dependencies: &IndexMap<String, Dependency>,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("dependencies");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut missing = Vec::new();
    for (trigger, dependency) in dependencies {
        if !members.contains_key(trigger) {
            continue;
        }
        match dependency {
            Dependency::Keys(keys) => {
                for key in keys {
                    if !members.contains_key(key) {
                        missing.push(format!(
                            "{key:?} is a required property (required when {trigger:?} is present)"
                        ));
                    }
                }
            }
            Dependency::Schema(schema) => {
                let child = ev.evaluate(
                    frame.scope,
                    *schema,
                    frame.instance,
                    frame.location,
                    keyword_location.join(trigger.clone()),
                );
                if !child.is_valid() {
                    ctx.mark_invalid();
                }
                ctx.push(child);
            }
        }
    }
    if !missing.is_empty() {
        ctx.invalidate(missing.join("; "));
    }
    Some(ctx)
}
