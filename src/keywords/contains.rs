//! `contains` and its 2019-09 companions `minContains` / `maxContains`.
//!
//! `contains` records the indices that matched as an annotation; the
//! bound keywords run later in the same context and count them.
use serde_json::Value;

use crate::{
    annotations::Annotation,
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::{expect_u64, Keyword},
    schema::{SchemaKey, SchemaParser},
};

pub(crate) fn parse_contains(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Contains(parser.subschema(value)?))
}

pub(crate) fn parse_min_contains(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MinContains(expect_u64("minContains", value)?))
}

pub(crate) fn parse_max_contains(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MaxContains(expect_u64("maxContains", value)?))
}

pub(crate) fn validate_contains(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Array(items) = frame.instance else {
        return None;
    };
    let keyword_location = frame.keyword_location("contains");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut matched = std::collections::BTreeSet::new();
    for (idx, item) in items.iter().enumerate() {
        let location = frame.location.push(idx);
        let child = ev.evaluate(
            frame.scope,
            schema,
            item,
            &location,
            keyword_location.clone(),
        );
        if child.is_valid() {
            matched.insert(idx);
            ctx.push(child);
        }
    }
    // `minContains: 0` makes an empty match acceptable
    let zero_is_fine = matches!(frame.object.find("minContains"), Some(Keyword::MinContains(0)));
    if matched.is_empty() && !zero_is_fine {
        ctx.invalidate(format!(
            "None of {} are valid under the given schema",
            frame.instance
        ));
    }
    ctx.annotate("contains", Annotation::Indices(matched));
    Some(ctx)
}

pub(crate) fn validate_min_contains(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let matched = matched_count(frame)?;
    if matched >= limit {
        Some(frame.pass("minContains"))
    } else {
        Some(frame.fail(
            "minContains",
            format!(
                "{} contains fewer than {limit} matching item{}",
                frame.instance,
                if limit == 1 { "" } else { "s" }
            ),
        ))
    }
}

pub(crate) fn validate_max_contains(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let matched = matched_count(frame)?;
    if matched <= limit {
        Some(frame.pass("maxContains"))
    } else {
        Some(frame.fail(
            "maxContains",
            format!(
                "{} contains more than {limit} matching item{}",
                frame.instance,
                if limit == 1 { "" } else { "s" }
            ),
        ))
    }
}

/// Inert unless `contains` ran in this context and left its annotation.
fn matched_count(frame: &Frame<'_>) -> Option<u64> {
    match frame.annotations.get("contains") {
        Some(Annotation::Indices(indices)) => Some(indices.len() as u64),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"contains": {"minimum": 5}}), &json!([2, 7, 3]), true)]
    #[test_case(&json!({"contains": {"minimum": 5}}), &json!([2, 3, 4]), false)]
    #[test_case(&json!({"contains": {"minimum": 5}}), &json!("not an array"), true)]
    #[test_case(&json!({"contains": {"minimum": 5}, "minContains": 0}), &json!([1]), true)]
    #[test_case(&json!({"contains": {"minimum": 5}, "minContains": 2}), &json!([7, 8]), true)]
    #[test_case(&json!({"contains": {"minimum": 5}, "minContains": 2}), &json!([7]), false)]
    #[test_case(&json!({"contains": {"minimum": 5}, "maxContains": 1}), &json!([7]), true)]
    #[test_case(&json!({"contains": {"minimum": 5}, "maxContains": 1}), &json!([7, 8]), false)]
    #[test_case(&json!({"minContains": 2}), &json!([1]), true; "min contains alone is inert")]
    fn contains_family(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        assert_eq!(crate::is_valid(schema, instance), expected);
    }

    #[test]
    fn contains_annotates_matching_indices() {
        let validator = crate::validator_for(&json!({"contains": {"minimum": 5}})).unwrap();
        let ctx = validator.evaluate(&json!([2, 7, 3, 9]));
        assert!(ctx.is_valid());
        assert_eq!(
            ctx.annotations().get("contains").unwrap().to_json(),
            json!([1, 3])
        );
    }

    #[test]
    fn contains_failure_message_shows_the_array() {
        let validator = crate::validator_for(&json!({"contains": {"minimum": 5}})).unwrap();
        let ctx = validator.evaluate(&json!([2, 3, 4]));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(
            failure.message().unwrap(),
            "None of [2,3,4] are valid under the given schema"
        );
    }
}
