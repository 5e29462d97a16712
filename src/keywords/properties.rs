//! Object applicators: `properties`, `patternProperties`,
//! `additionalProperties`, and `propertyNames`.
//!
//! The first three are coupled through annotations: `properties` and
//! `patternProperties` each report the member names they covered, and
//! `additionalProperties` applies its schema to everything outside that
//! union. The names are reported whether or not the member validated; the
//! annotation answers "what was evaluated", not "what passed".
use std::collections::BTreeSet;

use indexmap::IndexMap;
use serde_json::Value;

use crate::{
    annotations::Annotation,
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::{string::Pattern, Keyword},
    schema::{SchemaKey, SchemaParser},
};

pub(crate) fn parse_properties(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Properties(
        parser.named_subschemas("properties", value)?,
    ))
}

pub(crate) fn parse_pattern_properties(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let Value::Object(members) = value else {
        return Err(SchemaError::parse(
            "patternProperties",
            "expected an object of schemas",
        ));
    };
    let mut schemas = Vec::with_capacity(members.len());
    for (source, subschema) in members {
        schemas.push((
            Pattern::new("patternProperties", source)?,
            parser.subschema(subschema)?,
        ));
    }
    Ok(Keyword::PatternProperties(schemas))
}

pub(crate) fn parse_additional_properties(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::AdditionalProperties(parser.subschema(value)?))
}

pub(crate) fn parse_property_names(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::PropertyNames(parser.subschema(value)?))
}

pub(crate) fn validate_properties(
    schemas: &IndexMap<String, SchemaKey>,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("properties");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut evaluated = BTreeSet::new();
    for (name, schema) in schemas {
        let Some(value) = members.get(name) else {
            continue;
        };
        let location = frame.location.push(name.as_str());
        let child = ev.evaluate(
            frame.scope,
            *schema,
            value,
            &location,
            keyword_location.join(name.clone()),
        );
        if !child.is_valid() {
            ctx.mark_invalid();
        }
        ctx.push(child);
        evaluated.insert(name.clone());
    }
    ctx.annotate("properties", Annotation::Names(evaluated));
    Some(ctx)
}

pub(crate) fn validate_pattern_properties(
    schemas: &[(Pattern, SchemaKey)],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("patternProperties");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut evaluated = BTreeSet::new();
    for (name, value) in members {
        // A member may match several patterns; each applies its schema
        for (pattern, schema) in schemas {
            if !pattern.is_match(name) {
                continue;
            }
            let location = frame.location.push(name.as_str());
            let child = ev.evaluate(
                frame.scope,
                *schema,
                value,
                &location,
                keyword_location.join(pattern.source().to_string()),
            );
            if !child.is_valid() {
                ctx.mark_invalid();
            }
            ctx.push(child);
            evaluated.insert(name.clone());
        }
    }
    ctx.annotate("patternProperties", Annotation::Names(evaluated));
    Some(ctx)
}

pub(crate) fn validate_additional_properties(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("additionalProperties");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut evaluated = BTreeSet::new();
    let mut unexpected = Vec::new();
    for (name, value) in members {
        if covered(frame, name) {
            continue;
        }
        let location = frame.location.push(name.as_str());
        let child = ev.evaluate(
            frame.scope,
            schema,
            value,
            &location,
            keyword_location.clone(),
        );
        if !child.is_valid() {
            unexpected.push(name.clone());
        }
        ctx.push(child);
        evaluated.insert(name.clone());
    }
    ctx.annotate("additionalProperties", Annotation::Names(evaluated));
    if !unexpected.is_empty() {
        let listed = unexpected
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let verb = if unexpected.len() == 1 { "was" } else { "were" };
        ctx.invalidate(format!(
            "Additional properties are not allowed ({listed} {verb} unexpected)"
        ));
    }
    Some(ctx)
}

/// Whether a member name was already evaluated by `properties` or
/// `patternProperties` in this context.
fn covered(frame: &Frame<'_>, name: &str) -> bool {
    ["properties", "patternProperties"].iter().any(|keyword| {
        matches!(
            frame.annotations.get(keyword),
            Some(Annotation::Names(names)) if names.contains(name)
        )
    })
}

pub(crate) fn validate_property_names(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("propertyNames");
    let mut ctx = frame.pass_at(keyword_location.clone());
    for name in members.keys() {
        let as_value = Value::String(name.clone());
        let location = frame.location.push(name.as_str());
        let child = ev.evaluate(
            frame.scope,
            schema,
            &as_value,
            &location,
            keyword_location.clone(),
        );
        if !child.is_valid() {
            ctx.mark_invalid();
        }
        ctx.push(child);
    }
    Some(ctx)
}
