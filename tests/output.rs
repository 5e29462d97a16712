//! Output format shapes: flag, basic, detailed, verbose, and the
//! format selected through the options.
use jschema::OutputFormat;
use serde_json::json;
use test_case::test_case;

#[test_case{
    &json!({"maxLength": 4}),
    &json!("some string"),
    &json!({
        "valid": false,
        "errors": [
            {
                "keywordLocation": "/maxLength",
                "instanceLocation": "",
                "error": "\"some string\" is longer than 4 characters"
            }
        ]
    }); "single assertion failure"
}]
#[test_case{
    &json!({"properties": {"a": {"type": "number"}}, "additionalProperties": false}),
    &json!({"a": "x", "b": 1}),
    &json!({
        "valid": false,
        "errors": [
            {
                "keywordLocation": "/properties/a/type",
                "instanceLocation": "/a",
                "error": "\"x\" is not of type \"number\""
            },
            {
                "keywordLocation": "/additionalProperties",
                "instanceLocation": "",
                "error": "Additional properties are not allowed ('b' was unexpected)"
            },
            {
                "keywordLocation": "/additionalProperties",
                "instanceLocation": "/b",
                "error": "All values fail against the false schema"
            }
        ]
    }); "couples properties with additional properties"
}]
#[test_case{
    &json!({"title": "a title", "type": "string"}),
    &json!("some string"),
    &json!({
        "valid": true,
        "annotations": [
            {
                "keywordLocation": "",
                "instanceLocation": "",
                "annotations": {"title": "a title"}
            }
        ]
    }); "unrecognized members annotate the schema node"
}]
fn basic_output(schema: &serde_json::Value, instance: &serde_json::Value, expected: &serde_json::Value) {
    let validator = jschema::validator_for(schema).expect("Invalid schema");
    let output = validator.apply(instance).basic();
    assert_eq!(&serde_json::to_value(output).unwrap(), expected);
}

#[test]
fn flag_output_is_just_the_boolean() {
    let validator = jschema::validator_for(&json!({"type": "integer"})).unwrap();
    assert!(validator.apply(&json!(1)).flag());
    assert!(!validator.apply(&json!(1.5)).flag());
}

#[test]
fn detailed_output_prunes_to_failing_branches() {
    let validator = jschema::validator_for(&json!({
        "properties": {
            "good": {"type": "number"},
            "bad": {"type": "string"}
        }
    }))
    .unwrap();
    let detailed = validator.apply(&json!({"good": 1, "bad": 2})).detailed();
    assert_eq!(detailed["valid"], json!(false));
    let level1 = detailed["errors"].as_array().unwrap();
    assert_eq!(level1.len(), 1);
    assert_eq!(level1[0]["keywordLocation"], json!("/properties"));
    let level2 = level1[0]["errors"].as_array().unwrap();
    assert_eq!(level2.len(), 1);
    assert_eq!(level2[0]["keywordLocation"], json!("/properties/bad"));
    // The passing branch for "good" is nowhere in the tree
    assert!(!detailed.to_string().contains("good"));
}

#[test]
fn verbose_output_keeps_passing_branches() {
    let validator = jschema::validator_for(&json!({
        "properties": {
            "good": {"type": "number"},
            "bad": {"type": "string"}
        }
    }))
    .unwrap();
    let verbose = validator.apply(&json!({"good": 1})).verbose();
    assert_eq!(verbose["valid"], json!(true));
    assert!(verbose.to_string().contains("/properties/good"));

    // On failure the schema-level context retains only failing children,
    // so verbose mirrors the retained tree
    let verbose = validator.apply(&json!({"bad": 2})).verbose();
    assert_eq!(verbose["valid"], json!(false));
    assert!(verbose.to_string().contains("/properties/bad"));
}

#[test]
fn render_honors_the_configured_format() {
    let schema = json!({"type": "integer"});
    let instance = json!(1.5);

    let flagged = jschema::options()
        .with_output_format(OutputFormat::Flag)
        .build(&schema)
        .unwrap();
    assert_eq!(flagged.apply(&instance).render(), json!({"valid": false}));

    let basic = jschema::options()
        .with_output_format(OutputFormat::Basic)
        .build(&schema)
        .unwrap();
    let rendered = basic.apply(&instance).render();
    assert_eq!(rendered["valid"], json!(false));
    assert!(rendered["errors"].is_array());

    let detailed = jschema::options()
        .with_output_format(OutputFormat::Detailed)
        .build(&schema)
        .unwrap();
    assert_eq!(detailed.apply(&instance).render()["valid"], json!(false));
}

#[test]
fn absolute_locations_appear_for_identified_resources() {
    let validator = jschema::validator_for(&json!({
        "$id": "https://example.com/strings.json",
        "minLength": 3
    }))
    .unwrap();
    let output = validator.apply(&json!("ab")).basic();
    let serialized = serde_json::to_value(output).unwrap();
    assert_eq!(
        serialized["errors"][0]["absoluteKeywordLocation"],
        json!("https://example.com/strings.json#/minLength")
    );

    // Anonymous documents get no absolute location
    let validator = jschema::validator_for(&json!({"minLength": 3})).unwrap();
    let serialized = serde_json::to_value(validator.apply(&json!("ab")).basic()).unwrap();
    assert!(serialized["errors"][0].get("absoluteKeywordLocation").is_none());
}
