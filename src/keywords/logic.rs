//! Combinators: `allOf`, `anyOf`, `oneOf`, `not`.
//!
//! These apply their sub-schemas to the same instance node, so annotations
//! from valid branches are consolidated upward (see
//! [`Keyword::consolidate`](crate::keywords::Keyword::consolidate)).
//! With optimizations enabled they stop as soon as the outcome is decided,
//! at the cost of a pruned output tree.
use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame},
    keywords::Keyword,
    schema::{SchemaKey, SchemaParser},
};

pub(crate) fn parse_all_of(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::AllOf(parser.subschema_sequence("allOf", value)?))
}

pub(crate) fn parse_any_of(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::AnyOf(parser.subschema_sequence("anyOf", value)?))
}

pub(crate) fn parse_one_of(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::OneOf(parser.subschema_sequence("oneOf", value)?))
}

pub(crate) fn parse_not(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Not(parser.subschema(value)?))
}

pub(crate) fn validate_all_of(
    schemas: &[SchemaKey],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("allOf");
    let mut ctx = frame.pass_at(keyword_location.clone());
    for (idx, schema) in schemas.iter().enumerate() {
        let child = ev.evaluate(
            frame.scope,
            *schema,
            frame.instance,
            frame.location,
            keyword_location.join(idx),
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
    ctx
}

pub(crate) fn validate_any_of(
    schemas: &[SchemaKey],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("anyOf");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut succeeded = false;
    for (idx, schema) in schemas.iter().enumerate() {
        let child = ev.evaluate(
            frame.scope,
            *schema,
            frame.instance,
            frame.location,
            keyword_location.join(idx),
        );
        let valid = child.is_valid();
        ctx.push(child);
        if valid {
            succeeded = true;
            if ev.shortcircuit() {
                break;
            }
        }
    }
    if !succeeded {
        ctx.invalidate(format!(
            "{} is not valid under any of the given subschemas",
            frame.instance
        ));
    }
    ctx
}

pub(crate) fn validate_one_of(
    schemas: &[SchemaKey],
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("oneOf");
    let mut ctx = frame.pass_at(keyword_location.clone());
    let mut found = 0_usize;
    for (idx, schema) in schemas.iter().enumerate() {
        let child = ev.evaluate(
            frame.scope,
            *schema,
            frame.instance,
            frame.location,
            keyword_location.join(idx),
        );
        if child.is_valid() {
            found += 1;
        }
        ctx.push(child);
        if found > 1 && ev.shortcircuit() {
            break;
        }
    }
    if found != 1 {
        ctx.invalidate(format!("Expected 1 matching subschema but found {found}"));
    }
    ctx
}

pub(crate) fn validate_not(
    schema: SchemaKey,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("not");
    let child = ev.evaluate(
        frame.scope,
        schema,
        frame.instance,
        frame.location,
        keyword_location.clone(),
    );
    if child.is_valid() {
        let negated = frame.scope.doc.node_to_value(schema);
        frame.fail_at(
            keyword_location,
            format!("{negated} is not allowed for {}", frame.instance),
        )
    } else {
        frame.pass_at(keyword_location)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"allOf": [{"minimum": 0}, {"maximum": 10}]}), &json!(5), true)]
    #[test_case(&json!({"allOf": [{"minimum": 0}, {"maximum": 10}]}), &json!(11), false)]
    #[test_case(&json!({"anyOf": [{"type": "string"}, {"minimum": 2}]}), &json!(3), true)]
    #[test_case(&json!({"anyOf": [{"type": "string"}, {"minimum": 2}]}), &json!(1), false)]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1), true)]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(3), false; "both branches match")]
    #[test_case(&json!({"oneOf": [{"type": "integer"}, {"minimum": 2}]}), &json!(1.5), false; "no branch matches")]
    #[test_case(&json!({"not": {"type": "integer"}}), &json!("x"), true)]
    #[test_case(&json!({"not": {"type": "integer"}}), &json!(1), false)]
    fn combinators(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        assert_eq!(crate::is_valid(schema, instance), expected);
    }

    #[test]
    fn one_of_counts_matching_subschemas_in_its_message() {
        let validator =
            crate::validator_for(&json!({"oneOf": [{"type": "number"}, {"type": "integer"}]}))
                .unwrap();
        let ctx = validator.evaluate(&json!(3));
        assert!(!ctx.is_valid());
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(
            failure.message().unwrap(),
            "Expected 1 matching subschema but found 2"
        );

        assert!(validator.is_valid(&json!(3.5)));

        let ctx = validator.evaluate(&json!("nope"));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(
            failure.message().unwrap(),
            "Expected 1 matching subschema but found 0"
        );
    }

    #[test]
    fn short_circuiting_does_not_change_validity() {
        let schema = json!({
            "anyOf": [{"type": "integer"}, {"minimum": 2}],
            "oneOf": [{"type": "number"}, {"type": "integer"}],
            "allOf": [{"minimum": 0}, {"maximum": 10}]
        });
        for instance in [json!(3), json!(3.5), json!(-1), json!("x")] {
            let plain = crate::validator_for(&schema).unwrap();
            let optimized = crate::options()
                .with_optimizations(true)
                .build(&schema)
                .unwrap();
            assert_eq!(plain.is_valid(&instance), optimized.is_valid(&instance));
        }
    }

    #[test]
    fn branch_failures_keep_their_locations() {
        let validator =
            crate::validator_for(&json!({"allOf": [true, {"type": "string"}]})).unwrap();
        let ctx = validator.evaluate(&json!(1));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(failure.schema_location().to_string(), "/allOf/1/type");
    }
}
