//! Array applicators: `prefixItems`, `items`, and the pre-2020
//! `additionalItems`.
//!
//! `prefixItems` reports how many leading items it covered (or `true` for
//! all of them); single-schema `items` starts where that annotation ends.
//! In drafts before 2020-12 the array form of `items` plays the
//! `prefixItems` role and `additionalItems` the single-schema one; in
//! Draft 2020-12 the array form is gone and using it is a validation
//! error.
use serde_json::Value;

use crate::{
    annotations::Annotation,
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::Keyword,
    schema::{SchemaKey, SchemaParser},
    Draft,
};

/// Payload of `items`: one schema for every element, or one schema per
/// position.
#[derive(Debug)]
pub(crate) enum Items {
    Single(SchemaKey),
    Tuple(Vec<SchemaKey>),
}

pub(crate) fn parse_prefix_items(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::PrefixItems(
        parser.subschema_sequence("prefixItems", value)?,
    ))
}

pub(crate) fn parse_items(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    match value {
        Value::Array(_) => Ok(Keyword::Items(Items::Tuple(
            parser.subschema_sequence("items", value)?,
        ))),
        _ => Ok(Keyword::Items(Items::Single(parser.subschema(value)?))),
    }
}

pub(crate) fn parse_additional_items(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::AdditionalItems(parser.subschema(value)?))
}

pub(crate) fn validate_prefix_items(
    schemas: &[SchemaKey],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    Some(positional(
        "prefixItems",
        schemas,
        items,
        ev,
        frame,
    ))
}

pub(crate) fn validate_items(
    payload: &Items,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    match payload {
        Items::Tuple(schemas) => {
            if ev.draft == Draft::Draft202012 {
                return Some(frame.fail(
                    "items",
                    "Array-valued items is not allowed in Draft 2020-12",
                ));
            }
            Some(positional("items", schemas, items, ev, frame))
        }
        Items::Single(schema) => {
            let start = match frame.annotations.get("prefixItems") {
                Some(Annotation::Flag(true)) => return Some(frame.pass("items")),
                Some(Annotation::Index(count)) => *count,
                _ => 0,
            };
            let keyword_location = frame.keyword_location("items");
            let mut ctx = frame.pass_at(keyword_location.clone());
            for (idx, item) in items.iter().enumerate().skip(start) {
                let location = frame.location.push(idx);
                let child = ev.evaluate(
                    frame.scope,
                    *schema,
                    item,
                    &location,
                    keyword_location.clone(),
                );
                let failed = !child.is_valid();
                if failed {
                    ctx.mark_invalid();
                }
                ctx.push(child);
                if failed && ev.shortcircuit() {
                    break;
                }
            }
            if ctx.is_valid() && items.len() > start {
                ctx.annotate("items", Annotation::Flag(true));
            }
            Some(ctx)
        }
    }
}

pub(crate) fn validate_additional_items(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    // Only meaningful after an array-valued `items`
    let Some(Annotation::Index(start)) = frame.annotations.get("items") else {
        return None;
    };
    let start = *start;
    let keyword_location = frame.keyword_location("additionalItems");
    let mut ctx = frame.pass_at(keyword_location.clone());
    for (idx, item) in items.iter().enumerate().skip(start) {
        let location = frame.location.push(idx);
        let child = ev.evaluate(
            frame.scope,
            schema,
            item,
            &location,
            keyword_location.clone(),
        );
        if !child.is_valid() {
            ctx.mark_invalid();
        }
        ctx.push(child);
    }
    if ctx.is_valid() && items.len() > start {
        ctx.annotate("additionalItems", Annotation::Flag(true));
    }
    Some(ctx)
}

/// Validate the first `min(len, schemas)` elements one schema per
/// position, annotating the covered prefix length.
fn positional(
    keyword: &'static str,
    schemas: &[SchemaKey],
    items: &[Value],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location(keyword);
    let mut ctx = frame.pass_at(keyword_location.clone());
    let count = schemas.len().min(items.len());
    for (idx, (item, schema)) in items.iter().zip(schemas).enumerate() {
        let location = frame.location.push(idx);
        let child = ev.evaluate(
            frame.scope,
            *schema,
            item,
            &location,
            keyword_location.join(idx),
        );
        if !child.is_valid() {
            ctx.mark_invalid();
        }
        ctx.push(child);
    }
    let annotation = if count == items.len() {
        Annotation::Flag(true)
    } else {
        Annotation::Index(count)
    };
    ctx.annotate(keyword, annotation);
    ctx
}
