//! String assertions: `minLength`, `maxLength`, and `pattern`.
//!
//! Lengths are counted in UTF-16 code units, matching the published test
//! suite's expectations for surrogate-pair content. Patterns use the
//! ECMA 262 dialect; `fancy-regex` covers the lookaround and backreference
//! forms the classic regex crate rejects.
use std::fmt;

use serde_json::Value;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::Frame,
    keywords::{expect_string, expect_u64, Keyword},
    schema::SchemaParser,
};

/// A compiled `pattern` payload. Equality is by source text; the compiled
/// program is a cache, not part of the schema's identity.
pub(crate) struct Pattern {
    source: Box<str>,
    regex: fancy_regex::Regex,
}

impl Pattern {
    pub(crate) fn new(keyword: &'static str, source: &str) -> Result<Pattern, SchemaError> {
        let regex = fancy_regex::Regex::new(source)
            .map_err(|error| SchemaError::parse(keyword, error.to_string()))?;
        Ok(Pattern {
            source: source.into(),
            regex,
        })
    }

    pub(crate) fn source(&self) -> &str {
        &self.source
    }

    pub(crate) fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text).unwrap_or(false)
    }
}

impl fmt::Debug for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Pattern").field(&self.source).finish()
    }
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.source == other.source
    }
}

pub(crate) fn parse_min_length(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MinLength(expect_u64("minLength", value)?))
}

pub(crate) fn parse_max_length(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::MaxLength(expect_u64("maxLength", value)?))
}

pub(crate) fn parse_pattern(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Pattern(Pattern::new(
        "pattern",
        &expect_string("pattern", value)?,
    )?))
}

fn utf16_length(text: &str) -> u64 {
    text.encode_utf16().count() as u64
}

pub(crate) fn validate_min_length(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::String(text) = frame.instance else {
        return None;
    };
    if utf16_length(text) >= limit {
        Some(frame.pass("minLength"))
    } else {
        Some(frame.fail(
            "minLength",
            format!("{text:?} is shorter than {limit} character{}", plural(limit)),
        ))
    }
}

pub(crate) fn validate_max_length(limit: u64, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::String(text) = frame.instance else {
        return None;
    };
    if utf16_length(text) <= limit {
        Some(frame.pass("maxLength"))
    } else {
        Some(frame.fail(
            "maxLength",
            format!("{text:?} is longer than {limit} character{}", plural(limit)),
        ))
    }
}

pub(crate) fn validate_pattern(pattern: &Pattern, frame: &Frame<'_>) -> Option<ValidationContext> {
    let Value::String(text) = frame.instance else {
        return None;
    };
    if pattern.is_match(text) {
        Some(frame.pass("pattern"))
    } else {
        Some(frame.fail(
            "pattern",
            format!("{text:?} does not match {:?}", pattern.source()),
        ))
    }
}

fn plural(count: u64) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"minLength": 2}), &json!("ab"), true)]
    #[test_case(&json!({"minLength": 2}), &json!("a"), false)]
    #[test_case(&json!({"minLength": 2}), &json!(42), true; "skips non strings")]
    #[test_case(&json!({"maxLength": 4}), &json!("abcd"), true)]
    #[test_case(&json!({"maxLength": 4}), &json!("abcde"), false)]
    #[test_case(&json!({"maxLength": 2}), &json!("💩"), true; "astral char counts two utf16 units")]
    #[test_case(&json!({"maxLength": 1}), &json!("💩"), false)]
    #[test_case(&json!({"minLength": 2}), &json!("💩"), true)]
    #[test_case(&json!({"pattern": "^a*$"}), &json!("aaa"), true)]
    #[test_case(&json!({"pattern": "^a*$"}), &json!("abc"), false)]
    #[test_case(&json!({"pattern": "a+(?!b)"}), &json!("ac"), true; "lookahead dialect")]
    #[test_case(&json!({"pattern": "b"}), &json!("abc"), true; "unanchored patterns search")]
    fn string_assertions(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        assert_eq!(crate::is_valid(schema, instance), expected);
    }

    #[test_case(&json!({"minLength": -1}))]
    #[test_case(&json!({"minLength": 2.5}))]
    #[test_case(&json!({"pattern": "("}))]
    fn malformed_payloads(schema: &serde_json::Value) {
        assert!(crate::validator_for(schema).is_err());
    }

    #[test]
    fn length_messages_quote_the_string() {
        let validator = crate::validator_for(&json!({"maxLength": 2})).unwrap();
        let ctx = validator.evaluate(&json!("foo"));
        let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
        assert_eq!(failure.message().unwrap(), "\"foo\" is longer than 2 characters");
    }
}
