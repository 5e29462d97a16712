//! The `$ref` keyword: resolve a URI reference against the current base
//! and apply the schema it addresses, in place.
use serde_json::Value;
use tracing::debug;

use crate::{
    context::ValidationContext,
    error::SchemaError,
    evaluator::{Evaluator, Frame, Scope},
    keywords::{expect_string, Keyword},
    paths::Location,
    schema::{SchemaKey, SchemaParser},
    store::{self, SchemaStore, DEFAULT_BASE_URI},
};

pub(crate) fn parse(_: &mut SchemaParser<'_>, value: &Value) -> Result<Keyword, SchemaError> {
    Ok(Keyword::Ref(expect_string("$ref", value)?))
}

pub(crate) fn validate(
    reference: &str,
    ev: &mut Evaluator<'_>,
    frame: &Frame<'_>,
) -> ValidationContext {
    let keyword_location = frame.keyword_location("$ref");
    match resolve(reference, ev, frame.scope, &keyword_location) {
        Ok((scope, entry)) => {
            let child = ev.evaluate(
                &scope,
                entry,
                frame.instance,
                frame.location,
                keyword_location.clone(),
            );
            let mut ctx = frame.pass_at(keyword_location);
            if !child.is_valid() {
                ctx.mark_invalid();
            }
            ctx.push(child);
            ctx
        }
        Err(error) => {
            debug!(reference, %error, "reference did not resolve");
            frame.fail_at(
                keyword_location,
                format!("Unresolved reference {reference:?}"),
            )
        }
    }
}

fn resolve(
    reference: &str,
    ev: &Evaluator<'_>,
    from: &Scope,
    keyword_location: &Location,
) -> Result<(Scope, SchemaKey), SchemaError> {
    let target = from
        .base
        .join(reference)
        .map_err(|error| SchemaError::invalid_uri(reference, error))?;
    let fragment = target.fragment().map(str::to_string);
    let mut resource = target;
    resource.set_fragment(None);
    let resolved = ev
        .store
        .resolve(resource.as_str())
        .ok_or_else(|| SchemaError::unresolved_ref(reference))?
        .clone();
    let base = resource.clone();
    let named = base.as_str() != DEFAULT_BASE_URI;
    match fragment.as_deref() {
        None | Some("") => Ok((
            Scope {
                doc: resolved.doc,
                base,
                named,
                anchor_pointer: Location::new(),
                anchor_depth: keyword_location.len(),
            },
            resolved.key,
        )),
        Some(fragment) if fragment.starts_with('/') => {
            let (mut base, mut named) = (base, named);
            let pointer = store::decode_fragment(fragment)?;
            let (key, pointer_location) =
                SchemaStore::resolve_pointer(&resolved.doc, resolved.key, &pointer, &mut base, &mut named)?;
            Ok((
                Scope {
                    doc: resolved.doc,
                    base,
                    named,
                    anchor_pointer: pointer_location,
                    anchor_depth: keyword_location.len(),
                },
                key,
            ))
        }
        Some(anchor) => {
            let mut anchored = resource.clone();
            anchored.set_fragment(Some(anchor));
            let resolved = ev
                .store
                .resolve(anchored.as_str())
                .ok_or_else(|| SchemaError::unresolved_ref(reference))?
                .clone();
            Ok((
                Scope {
                    doc: resolved.doc,
                    base,
                    named: true,
                    anchor_pointer: Location::new(),
                    anchor_depth: keyword_location.len(),
                },
                resolved.key,
            ))
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use test_case::test_case;

    #[test_case(&json!({"$defs": {"positive": {"minimum": 0}}, "$ref": "#/$defs/positive"}), &json!(3), true)]
    #[test_case(&json!({"$defs": {"positive": {"minimum": 0}}, "$ref": "#/$defs/positive"}), &json!(-3), false)]
    #[test_case(&json!({"$defs": {"tip": {"$anchor": "tip", "type": "null"}}, "$ref": "#tip"}), &json!(null), true; "anchor fragment")]
    #[test_case(&json!({"$defs": {"tip": {"$anchor": "tip", "type": "null"}}, "$ref": "#tip"}), &json!(0), false; "anchor fragment failing")]
    fn local_references(schema: &serde_json::Value, instance: &serde_json::Value, expected: bool) {
        // Anchors hang off the resource URI, so give the document one.
        let mut schema = schema.clone();
        schema
            .as_object_mut()
            .unwrap()
            .insert("$id".into(), json!("https://example.com/anchored"));
        let validator = crate::validator_for(&schema).unwrap();
        assert_eq!(validator.is_valid(instance), expected);
    }

    #[test]
    fn unresolvable_reference_is_a_validation_failure() {
        let validator = crate::validator_for(&json!({"$ref": "#/$defs/missing"})).unwrap();
        let ctx = validator.evaluate(&json!(1));
        assert!(!ctx.is_valid());
        let failure = ctx
            .walk()
            .find(|node| node.message().is_some())
            .expect("an error node");
        assert_eq!(
            failure.message().unwrap(),
            "Unresolved reference \"#/$defs/missing\""
        );
        assert_eq!(failure.schema_location().to_string(), "/$ref");
    }

    #[test]
    fn self_reference_is_valid_without_progress() {
        let validator = crate::validator_for(&json!({"$ref": "#"})).unwrap();
        assert!(validator.is_valid(&json!({"any": "thing"})));
    }

    #[test]
    fn sibling_keywords_are_ignored_next_to_ref_before_2019() {
        let schema = json!({
            "$defs": {"any": true},
            "$ref": "#/$defs/any",
            "minimum": 10
        });
        let relaxed = crate::options()
            .with_draft(crate::Draft::Draft7)
            .build(&schema)
            .unwrap();
        assert!(relaxed.is_valid(&json!(1)));
        let strict = crate::options()
            .with_draft(crate::Draft::Draft202012)
            .build(&schema)
            .unwrap();
        assert!(!strict.is_valid(&json!(1)));
    }

    #[test]
    fn references_reach_documents_registered_as_resources() {
        let validator = crate::options()
            .with_resource(
                "https://example.com/defs.json",
                json!({"$defs": {"name": {"type": "string", "minLength": 1}}}),
            )
            .build(&json!({"$id": "https://example.com/root.json", "$ref": "defs.json#/$defs/name"}))
            .unwrap();
        assert!(validator.is_valid(&json!("x")));
        assert!(!validator.is_valid(&json!("")));
        assert!(!validator.is_valid(&json!(7)));
    }
}
