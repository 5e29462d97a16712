//! Identifier keywords: `$schema`, `$id`, `$anchor`, `$comment`, `$defs`,
//! and the pre-2019 `definitions`. None of them assert anything; they are
//! consumed by the schema store when registering documents and by pointer
//! resolution when a `$ref` fragment walks into them.
use serde_json::Value;

use crate::{
    error::SchemaError,
    keywords::{expect_string, Keyword},
    schema::SchemaParser,
};

pub(crate) fn parse_schema_uri(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::SchemaUri(expect_string("$schema", value)?))
}

pub(crate) fn parse_id(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    let id = expect_string("$id", value)?;
    if let Some(fragment) = id.split_once('#').map(|(_, fragment)| fragment) {
        if !fragment.is_empty() {
            return Err(SchemaError::parse("$id", "must not carry a non-empty fragment"));
        }
    }
    Ok(Keyword::Id(id))
}

pub(crate) fn parse_anchor(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    let anchor = expect_string("$anchor", value)?;
    if anchor.is_empty() || anchor.contains('#') || anchor.contains('/') {
        return Err(SchemaError::parse("$anchor", "expected a plain name"));
    }
    Ok(Keyword::Anchor(anchor))
}

pub(crate) fn parse_comment(
    _: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Comment(expect_string("$comment", value)?))
}

pub(crate) fn parse_defs(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Defs(parser.named_subschemas("$defs", value)?))
}

pub(crate) fn parse_definitions(
    parser: &mut SchemaParser<'_>,
    value: &Value,
) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Definitions(
        parser.named_subschemas("definitions", value)?,
    ))
}

#[cfg(test)]
mod tests {
    use crate::{registry::KeywordRegistry, schema::Schema};
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$id": "https://example.com/x#/foo"}); "id with pointer fragment")]
    #[test_case(&json!({"$anchor": ""}); "empty anchor")]
    #[test_case(&json!({"$anchor": "a#b"}); "anchor with hash")]
    #[test_case(&json!({"$comment": 3}); "non-string comment")]
    #[test_case(&json!({"$defs": [true]}); "defs as array")]
    fn malformed_identifiers_are_rejected(contents: &serde_json::Value) {
        assert!(Schema::parse(contents, &KeywordRegistry::with_defaults()).is_err());
    }

    #[test_case(&json!({"$id": "https://example.com/x"}))]
    #[test_case(&json!({"$id": "https://example.com/x#"}); "empty fragment is tolerated")]
    #[test_case(&json!({"$anchor": "tip"}))]
    #[test_case(&json!({"definitions": {"a": true}}))]
    fn well_formed_identifiers_parse(contents: &serde_json::Value) {
        assert!(Schema::parse(contents, &KeywordRegistry::with_defaults()).is_ok());
    }

    #[test]
    fn identifiers_do_not_affect_validation() {
        let validator = crate::validator_for(&json!({
            "$id": "https://example.com/inert",
            "$comment": "nothing to see",
            "definitions": {"unused": false}
        }))
        .unwrap();
        assert!(validator.is_valid(&json!({"anything": 1})));
    }
}
