//! `unevaluatedItems` and `unevaluatedProperties`.
//!
//! These run last (highest priority value) and read the consolidated
//! annotation picture of the whole context: what `properties`,
//! `patternProperties`, `additionalProperties`, `prefixItems`, `items`,
//! `additionalItems`, and `contains` covered here, including coverage
//! absorbed from in-place applicators like `allOf` or a matching `if`
//! branch. Whatever is left gets their sub-schema.
use std::collections::BTreeSet;

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

pub(crate) fn parse_unevaluated_items(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::UnevaluatedItems(parser.subschema(value)?))
}

pub(crate) fn parse_unevaluated_properties(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::UnevaluatedProperties(parser.subschema(value)?))
}

pub(crate) fn validate_unevaluated_properties(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Object(members) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("unevaluatedProperties");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut evaluated = BTreeSet::new();
    let mut unexpected = Vec::new();
    for (name, value) in members {
        if property_covered(frame, name) {
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
    ctx.annotate("unevaluatedProperties", Annotation::Names(evaluated));
    if !unexpected.is_empty() {
        let listed = unexpected
            .iter()
            .map(|name| format!("'{name}'"))
            .collect::<Vec<_>>()
            .join(", ");
        let verb = if unexpected.len() == 1 { "was" } else { "were" };
        ctx.invalidate(format!(
            "Unevaluated properties are not allowed ({listed} {verb} unexpected)"
        ));
    }
    Some(ctx)
}

fn property_covered(frame: &Frame<'_>, name: &str) -> bool {
    [
        "properties",
        "patternProperties",
        "additionalProperties",
        "unevaluatedProperties",
    ]
    .iter()
    .any(|keyword| {
        matches!(
            frame.annotations.get(keyword),
            Some(Annotation::Names(names)) if names.contains(name)
        )
    })
}

pub(crate) fn validate_unevaluated_items(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    let start = covered_prefix(frame, items.len());
    // In 2020-12, items matched by `contains` also count as evaluated
    let contained: BTreeSet<usize> = match frame.annotations.get("contains") {
        Some(Annotation::Indices(indices)) if ev.draft == Draft::Draft202012 => indices.clone(),
        _ => BTreeSet::new(),
    };
    let keyword_location = frame.keyword_location("unevaluatedItems");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut unexpected = 0_usize;
    for (idx, item) in items.iter().enumerate().skip(start) {
        if contained.contains(&idx) {
            continue;
        }
        let location = frame.location.push(idx);
        let child = ev.evaluate(
            frame.scope,
            schema,
            item,
            &location,
            keyword_location.clone(),
        );
        if !child.is_valid() {
            unexpected += 1;
        }
        ctx.push(child);
    }
    ctx.annotate("unevaluatedItems", Annotation::Flag(true));
    if unexpected > 0 {
        ctx.invalidate(format!(
            "Unevaluated items are not allowed ({unexpected} item{} unexpected)",
            if unexpected == 1 { " was" } else { "s were" }
        ));
    }
    Some(ctx)
}

/// First index not yet covered by the positional applicators here.
fn covered_prefix(frame: &Frame<'_>, len: usize) -> usize {
    let mut start = 0;
    for keyword in ["prefixItems", "items", "additionalItems", "unevaluatedItems"] {
        match frame.annotations.get(keyword) {
            Some(Annotation::Flag(true)) => return len,
            Some(Annotation::Index(count)) => start = start.max(*count),
            _ => {}
        }
    }
    start
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"properties": {"a": true}, "unevaluatedProperties": false}), &json!({"a": 1}), true)]
    #[test_case(&json!({"properties": {"a": true}, "unevaluatedProperties": false}), &json!({"a": 1, "b": 2}), false)]
    #[test_case(&json!({"unevaluatedProperties": {"type": "number"}}), &json!({"a": 1}), true)]
    #[test_case(&json!({"unevaluatedProperties": {"type": "number"}}), &json!({"a": "x"}), false)]
    #[test_case(&json!({"prefixItems": [true], "unevaluatedItems": false}), &json!([1]), true)]
    #[test_case(&json!({"prefixItems": [true], "unevaluatedItems": false}), &json!([1, 2]), false)]
    #[test_case(&json!({"items": {"type": "number"}, "unevaluatedItems": false}), &json!([1, 2]), true; "items covers the tail")]
    fn unevaluated(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        assert_eq!(crate::is_valid(schema, instance), expected);
    }

    #[test]
    fn coverage_flows_out_of_in_place_applicators() {
        let schema = json!({
            "allOf": [
                {"properties": {"a": {"type": "number"}}},
                {"properties": {"b": {"type": "number"}}}
            ],
            "unevaluatedProperties": false
        });
        let validator = crate::validator_for(&schema).unwrap();
        assert!(validator.is_valid(&json!({"a": 1, "b": 2})));
        assert!(!validator.is_valid(&json!({"a": 1, "c": 3})));
    }

    #[test]
    fn contains_matches_count_as_evaluated_in_2020_12() {
        let schema = json!({
            "contains": {"type": "number"},
            "unevaluatedItems": {"type": "string"}
        });
        let validator = crate::options()
            .with_draft(crate::Draft::Draft202012)
            .build(&schema)
            .unwrap();
        assert!(validator.is_valid(&json!([1, "x"])));
        assert!(!validator.is_valid(&json!([1, true])));
    }
}
