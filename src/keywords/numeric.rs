//! Numeric assertions: `minimum`, `maximum`, `exclusiveMinimum`,
//! `exclusiveMaximum`, and `multipleOf`.
//!
//! Bounds compare across integer and float representations without going
//! through text, so `1`, `1.0`, and `10e-1` are the same number.
//! `multipleOf` means exact divisibility: the fast path works on machine
//! floats, with an exact big-rational fallback when that overflows.
use fraction::{BigFraction, BigUint};
use serde_json::{Number, Value};

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::{expect_number, Keyword},
    schema::SchemaParser,
    value::{num_ge, num_gt, num_le, num_lt},
};

pub(crate) fn parse_minimum(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Minimum(expect_number("minimum", value)?))
}

pub(crate) fn parse_maximum(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Maximum(expect_number("maximum", value)?))
}

pub(crate) fn parse_exclusive_minimum(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::ExclusiveMinimum(expect_number(
        "exclusiveMinimum",
        value,
    )?))
}

pub(crate) fn parse_exclusive_maximum(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::ExclusiveMaximum(expect_number(
        "exclusiveMaximum",
        value,
    )?))
}

pub(crate) fn parse_multiple_of(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let divisor = expect_number("multipleOf", value)?;
    if num_le(&divisor, &Number::from(0)) {
        return Err(SchemaError::parse("multipleOf", "expected a positive number"));
    }
    Ok(Keyword::MultipleOf(divisor))
}

pub(crate) fn validate_minimum(limit: &Number, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Number(instance) = frame.instance else {
        return None;
    };
    if num_ge(instance, limit) {
        Some(frame.pass("minimum"))
    } else {
        Some(frame.fail(
            "minimum",
            format!("{instance} is less than the minimum of {limit}"),
        ))
    }
}

pub(crate) fn validate_maximum(limit: &Number, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::Number(instance) = frame.instance else {
        return None;
    };
    if num_le(instance, limit) {
        Some(frame.pass("maximum"))
    } else {
        Some(frame.fail(
            "maximum",
            format!("{instance} is greater than the maximum of {limit}"),
        ))
    }
}

pub(crate) fn validate_exclusive_minimum(
    limit: &Number,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Number(instance) = frame.instance else {
        return None;
    };
    if num_gt(instance, limit) {
        Some(frame.pass("exclusiveMinimum"))
    } else {
        Some(frame.fail(
            "exclusiveMinimum",
            format!("{instance} is less than or equal to the minimum of {limit}"),
        ))
    }
}

pub(crate) fn validate_exclusive_maximum(
    limit: &Number,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Number(instance) = frame.instance else {
        return None;
    };
    if num_lt(instance, limit) {
        Some(frame.pass("exclusiveMaximum"))
    } else {
        Some(frame.fail(
            "exclusiveMaximum",
            format!("{instance} is greater than or equal to the maximum of {limit}"),
        ))
    }
}

pub(crate) fn validate_multiple_of(
    divisor: &Number,
    frame: &Frame<'_>,
) -> Option<ValidationContext> {
    let Value::Number(instance) = frame.instance else {
        return None;
    };
    if is_multiple(instance, divisor) {
        Some(frame.pass("multipleOf"))
    } else {
        Some(frame.fail(
            "multipleOf",
            format!("{instance} is not a multiple of {divisor}"),
        ))
    }
}

fn is_multiple(instance: &Number, divisor: &Number) -> bool {
    let item = instance.as_f64().expect("always representable");
    let by = divisor.as_f64().expect("always representable");
    if by.fract() == 0.0 {
        // An integral divisor divides nothing with a fractional part
        return item.fract() == 0.0 && (item % by) == 0.0;
    }
    let remainder = (item / by) % 1.0;
    if remainder.is_nan() || remainder.abs() > f64::EPSILON {
        // Exact rational arithmetic settles what floats cannot
        let ratio = BigFraction::from(item) / BigFraction::from(by);
        ratio.denom() == Some(&BigUint::from(1_u8))
    } else {
        true
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"minimum": 3}), &json!(3), true)]
    #[test_case(&json!({"minimum": 3}), &json!(2.5), false)]
    #[test_case(&json!({"minimum": 3.0}), &json!(3), true; "trailing zero limit")]
    #[test_case(&json!({"minimum": 3}), &json!("3"), true; "skips non numbers")]
    #[test_case(&json!({"maximum": 3}), &json!(3.0), true)]
    #[test_case(&json!({"maximum": 3}), &json!(3.5), false)]
    #[test_case(&json!({"exclusiveMinimum": 1}), &json!(1.0), false)]
    #[test_case(&json!({"exclusiveMinimum": 1}), &json!(1.1), true)]
    #[test_case(&json!({"exclusiveMaximum": 3}), &json!(3.0), false)]
    #[test_case(&json!({"exclusiveMaximum": 3}), &json!(2), true)]
    #[test_case(&json!({"multipleOf": 2}), &json!(4), true)]
    #[test_case(&json!({"multipleOf": 2}), &json!(7), false)]
    #[test_case(&json!({"multipleOf": 2}), &json!(2.5), false)]
    #[test_case(&json!({"multipleOf": 1.5}), &json!(4.5), true)]
    #[test_case(&json!({"multipleOf": 1.5}), &json!(4.0), false)]
    #[test_case(&json!({"multipleOf": 0.5}), &json!(2), true; "integer against float divisor")]
    #[test_case(&json!({"multipleOf": 2}), &json!("x"), true; "multiple of skips non numbers")]
    fn numeric_assertions(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        assert_eq!(crate::is_valid(schema, instance), expected);
    }

    #[test]
    fn huge_values_fall_back_to_exact_arithmetic() {
        // 1e308 / 0.5 overflows f64, so the rational path decides
        assert!(crate::is_valid(&json!({"multipleOf": 0.5}), &json!(1e308)));
    }

    #[test_case(&json!({"minimum": "3"}))]
    #[test_case(&json!({"multipleOf": 0}))]
    #[test_case(&json!({"multipleOf": -2}))]
    fn malformed_payloads(schema: &serde_json::Value) {
        assert!(crate::validator_for(schema).is_err());
    }

    #[test]
    fn messages_follow_the_limit_form() {
        let validator = crate::validator_for(&json!({"minimum": 3})).unwrap();
        let ctx = validator.evaluate(&json!(2.5));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(failure.message().unwrap(), "2.5 is less than the minimum of 3");
    }
}
