//! End-to-end behavior: the documented scenarios, the algebraic laws of
//! boolean schemas and annotations, and recursive reference handling.
use jschema::{Draft, Validator};
use serde_json::json;
use test_case::test_case;

fn first_error(validator: &Validator, instance: &serde_json::Value) -> (String, String, String) {
    let ctx = validator.evaluate(instance);
    let node = ctx
        .walk()
        .find(|node| node.message().is_some())
        .expect("a failing node with a message");
    (
        node.message().unwrap().to_string(),
        node.schema_location().to_string(),
        node.instance_location().to_string(),
    )
}

#[test_case(&json!("ab"), true; "within bounds")]
#[test_case(&json!("abcd"), true; "at the upper bound")]
#[test_case(&json!("a"), false; "too short")]
#[test_case(&json!("abcde"), false; "too long")]
#[test_case(&json!(42), true; "non-strings pass by omission")]
fn string_bounds(instance: &serde_json::Value, expected: bool) {
    let schema = json!({"type": "string", "minLength": 2, "maxLength": 4});
    let validator = jschema::validator_for(&schema).unwrap();
    assert_eq!(validator.is_valid(instance), expected);
}

#[test]
fn string_bounds_failures_point_at_the_guilty_keyword() {
    let schema = json!({"type": "string", "minLength": 2, "maxLength": 4});
    let validator = jschema::validator_for(&schema).unwrap();
    let (_, location, _) = first_error(&validator, &json!("a"));
    assert_eq!(location, "/minLength");
    let (_, location, _) = first_error(&validator, &json!("abcde"));
    assert_eq!(location, "/maxLength");
}

#[test]
fn additional_properties_reads_the_properties_annotation() {
    let schema = json!({
        "properties": {"a": {"type": "number"}},
        "additionalProperties": false
    });
    let validator = jschema::validator_for(&schema).unwrap();
    assert!(validator.is_valid(&json!({"a": 1})));

    let ctx = validator.evaluate(&json!({"a": 1, "b": 2}));
    assert!(!ctx.is_valid());
    assert_eq!(
        ctx.annotations().get("properties").unwrap().to_json(),
        json!(["a"])
    );
    let (message, location, _) = first_error(&validator, &json!({"a": 1, "b": 2}));
    assert_eq!(location, "/additionalProperties");
    assert_eq!(
        message,
        "Additional properties are not allowed ('b' was unexpected)"
    );
}

#[test]
fn items_continues_where_prefix_items_stopped() {
    let schema = json!({"prefixItems": [{"type": "number"}], "items": {"type": "string"}});
    let validator = jschema::validator_for(&schema).unwrap();

    let ctx = validator.evaluate(&json!([1, "x", "y"]));
    assert!(ctx.is_valid());
    assert_eq!(ctx.annotations().get("items").unwrap().to_json(), json!(true));

    let (_, location, instance_location) = first_error(&validator, &json!([1, 2]));
    assert_eq!(location, "/items/type");
    assert_eq!(instance_location, "/1");
}

#[test]
fn one_of_requires_exactly_one_match() {
    let schema = json!({"oneOf": [{"type": "number"}, {"type": "integer"}]});
    let validator = jschema::validator_for(&schema).unwrap();
    assert!(validator.is_valid(&json!(3.5)));
    let (message, _, _) = first_error(&validator, &json!(3));
    assert_eq!(message, "Expected 1 matching subschema but found 2");
}

#[test_case(&json!(5), true; "then branch passes")]
#[test_case(&json!(-1), false; "then branch fails")]
#[test_case(&json!("hi"), true; "else branch passes")]
#[test_case(&json!(false), false; "else branch fails")]
fn conditional_schema(instance: &serde_json::Value, expected: bool) {
    let schema = json!({
        "if": {"type": "number"},
        "then": {"minimum": 0},
        "else": {"type": "string"}
    });
    assert_eq!(jschema::is_valid(&schema, instance), expected);
}

#[test]
fn recursive_trees_validate_to_arbitrary_depth() {
    let schema = json!({
        "$defs": {
            "node": {
                "type": "object",
                "properties": {
                    "value": {"type": "integer"},
                    "children": {"type": "array", "items": {"$ref": "#/$defs/node"}}
                },
                "required": ["value"]
            }
        },
        "$ref": "#/$defs/node"
    });
    let validator = jschema::validator_for(&schema).unwrap();

    let deep = json!({
        "value": 1,
        "children": [
            {"value": 2, "children": []},
            {"value": 3, "children": [{"value": 4, "children": [{"value": 5}]}]}
        ]
    });
    assert!(validator.is_valid(&deep));

    let one_bad_leaf = json!({
        "value": 1,
        "children": [
            {"value": 2},
            {"value": 3, "children": [{"value": "oops"}]}
        ]
    });
    let ctx = validator.evaluate(&one_bad_leaf);
    assert!(!ctx.is_valid());
    let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
    assert_eq!(
        failure.instance_location().to_string(),
        "/children/1/children/0/value"
    );
}

#[test]
fn boolean_schemas_are_constant_functions() {
    for instance in [json!(null), json!(1), json!("x"), json!([]), json!({})] {
        assert!(jschema::is_valid(&json!(true), &instance));
        let ctx = jschema::validator_for(&json!(false))
            .unwrap()
            .evaluate(&instance);
        assert!(!ctx.is_valid());
        assert_eq!(ctx.message(), Some("All values fail against the false schema"));
    }
}

#[test]
fn annotations_consolidate_by_union_and_maximum() {
    // Union of name sets across in-place branches
    let schema = json!({
        "allOf": [
            {"properties": {"a": true}},
            {"properties": {"b": true}, "prefixItems": [true, true]},
            {"prefixItems": [true]}
        ]
    });
    let validator = jschema::validator_for(&schema).unwrap();
    let ctx = validator.evaluate(&json!({"a": 1, "b": 2}));
    assert!(ctx.is_valid());
    assert_eq!(
        ctx.annotations().get("properties").unwrap().to_json(),
        json!(["a", "b"])
    );

    // Maximum of integer bounds, and `true` absorbing them
    let ctx = validator.evaluate(&json!([1, 2, 3]));
    assert_eq!(
        ctx.annotations().get("prefixItems").unwrap().to_json(),
        json!(2)
    );
    let ctx = validator.evaluate(&json!([1, 2]));
    assert_eq!(
        ctx.annotations().get("prefixItems").unwrap().to_json(),
        json!(true)
    );
}

#[test]
fn draft_gates_the_array_form_of_items() {
    let schema = json!({"items": [{"type": "integer"}]});
    let lenient = jschema::options()
        .with_draft(Draft::Draft7)
        .build(&schema)
        .unwrap();
    assert!(lenient.is_valid(&json!([1])));

    let strict = jschema::options()
        .with_draft(Draft::Draft202012)
        .build(&schema)
        .unwrap();
    let ctx = strict.evaluate(&json!([1]));
    assert!(!ctx.is_valid());
    let failure = ctx.walk().find(|node| node.message().is_some()).unwrap();
    assert_eq!(failure.schema_location().to_string(), "/items");
}

#[test]
fn reference_through_the_root_matches_direct_validation() {
    let direct = jschema::validator_for(&json!({"type": "integer"})).unwrap();
    let indirect = jschema::validator_for(&json!({
        "$defs": {"indirection": {"$ref": "#"}},
        "type": "integer"
    }))
    .unwrap();
    for instance in [json!(1), json!(1.5), json!("x")] {
        assert_eq!(direct.is_valid(&instance), indirect.is_valid(&instance));
    }
}

#[test]
fn evaluation_output_is_identical_across_runs() {
    let schema = json!({
        "type": "object",
        "properties": {
            "name": {"type": "string", "minLength": 1},
            "tags": {"type": "array", "uniqueItems": true}
        },
        "patternProperties": {"^x-": true},
        "additionalProperties": false,
        "required": ["name"]
    });
    let validator = jschema::validator_for(&schema).unwrap();
    let instance = json!({"name": "", "tags": [1, 1], "x-n": 0, "zz": 1});
    let reference = serde_json::to_value(validator.apply(&instance).basic()).unwrap();
    for _ in 0..8 {
        let rerun = serde_json::to_value(validator.apply(&instance).basic()).unwrap();
        assert_eq!(reference, rerun);
    }
}

#[test]
fn parse_serialize_parse_is_identity() {
    let documents = [
        json!(true),
        json!({"type": ["string", "null"], "minLength": 2}),
        json!({
            "$id": "https://example.com/thing",
            "properties": {"a": {"items": {"$ref": "#"}}},
            "x-extension": {"anything": [1, 2, null]}
        }),
    ];
    let registry = jschema::KeywordRegistry::with_defaults();
    for document in documents {
        let parsed = jschema::Schema::parse(&document, &registry).unwrap();
        let reparsed = jschema::Schema::parse(&parsed.to_value(), &registry).unwrap();
        assert_eq!(parsed, reparsed);
    }
}
