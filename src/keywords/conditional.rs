//! `if` / `then` / `else`.
//!
//! `if` never fails its parent; it records whether its sub-schema matched
//! as an annotation, and the branch keywords read that annotation to
//! decide whether they apply. Annotations produced inside a matching `if`
//! are forwarded, so the chosen branch (and `unevaluated*`) can see them.
use serde_json::Value;

use crate::{
    annotations::Annotation,
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::Keyword,
    schema::{SchemaKey, SchemaParser},
};

pub(crate) fn parse_if(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::If(parser.subschema(value)?))
}

pub(crate) fn parse_then(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Then(parser.subschema(value)?))
}

pub(crate) fn parse_else(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Else(parser.subschema(value)?))
}

pub(crate) fn validate_if(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("if");
    let child = ev.evaluate(
        frame.scope,
        schema,
        frame.instance,
        frame.location,
        keyword_location.clone(),
    );
    let matched = child.is_valid();
    let mut ctx = frame.pass_at(keyword_location);
    if matched {
        // Keep the branch's results so its annotations consolidate upward
        ctx.push(child);
    }
    ctx.annotate("if", Annotation::Flag(matched));
    ctx
}

pub(crate) fn validate_then(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    branch(schema, ev, frame, "then", true)
}

pub(crate) fn validate_else(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    branch(schema, ev, frame, "else", false)
}

fn branch(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
    keyword: &'static str,
    wanted: bool,
) -> Option<ValidationContext> {
    // Inert without an `if` in the same schema object
    let Some(Annotation::Flag(matched)) = frame.annotations.get("if") else {
        return None;
    };
    if *matched != wanted {
        return None;
    }
    let keyword_location = frame.keyword_location(keyword);
    let child = ev.evaluate(
        frame.scope,
        schema,
        frame.instance,
        frame.location,
        keyword_location.clone(),
    );
    let mut ctx = frame.pass_at(keyword_location);
    if !child.is_valid() {
        ctx.mark_invalid();
    }
    ctx.push(child);
    Some(ctx)
}
