use super::*;
use serde_json::json;

fn pet_schema() -> Schema {
    SchemaBuilder::object()
        .title("Pet")
        .property("name", json!({ "type": "string" }), true)
        .property("age", json!({ "type": "integer" }), false)
        .property(
            "toys",
            json!({ "type": "array", "items": { "type": "string" } }),
            false,
        )
        .build()
}

#[test]
fn test_schema_builder() {
    let schema = SchemaBuilder::object()
        .title("Person")
        .description("A person object")
        .property(
            "name",
            json!({
                "type": "string",
                "description": "The person's name"
            }),
            true,
        )
        .property(
            "age",
            json!({
                "type": "integer",
                "description": "The person's age"
            }),
            true,
        )
        .property("nickname", json!({ "type": "string" }), false)
        .build();

    let schema_json = schema.to_json();

    assert_eq!(schema_json["type"], "object");
    assert_eq!(schema_json["title"], "Person");
    assert_eq!(schema_json["description"], "A person object");
    assert_eq!(schema_json["properties"]["name"]["type"], "string");
    assert_eq!(schema_json["properties"]["age"]["type"], "integer");
    assert_eq!(schema_json["properties"]["nickname"]["type"], "string");

    // required keeps insertion order
    assert_eq!(schema_json["required"], json!(["name", "age"]));
}

#[test]
fn test_array_builder() {
    let schema = SchemaBuilder::array(json!({ "type": "string" })).build();
    assert_eq!(
        schema.to_json(),
        &json!({ "type": "array", "items": { "type": "string" } })
    );
}

#[test]
fn test_validate_accepts_conforming_value() {
    let schema = pet_schema();
    assert!(schema.validate(&json!({ "name": "Nabi" })).is_ok());
    assert!(
        schema
            .validate(&json!({ "name": "Nabi", "age": 3, "toys": ["mouse"], "extra": 1 }))
            .is_ok()
    );
}

#[test]
fn test_validate_null_optional_is_absent() {
    let schema = pet_schema();
    assert!(schema.validate(&json!({ "name": "Nabi", "age": null })).is_ok());
}

#[test]
fn test_validate_reports_every_violation() {
    let schema = pet_schema();
    let violations = schema
        .validate(&json!({ "age": "3", "toys": ["ball", 7] }))
        .unwrap_err();

    assert_eq!(violations.len(), 3);
    assert!(violations.iter().any(|v| v.contains("missing required field `name`")));
    assert!(violations.iter().any(|v| v == "$.age: expected integer, found string"));
    assert!(violations.iter().any(|v| v == "$.toys[1]: expected string, found integer"));
}

#[test]
fn test_validate_rejects_non_object_root() {
    let violations = pet_schema().validate(&json!([1, 2])).unwrap_err();
    assert_eq!(violations, vec!["$: expected object, found array".to_string()]);
}

#[test]
fn test_validate_required_null() {
    let violations = pet_schema().validate(&json!({ "name": null })).unwrap_err();
    assert_eq!(violations, vec!["$.name: required field is null".to_string()]);
}

#[test]
fn test_validate_float_is_not_integer() {
    let violations = pet_schema()
        .validate(&json!({ "name": "Nabi", "age": 2.5 }))
        .unwrap_err();
    assert_eq!(violations, vec!["$.age: expected integer, found number".to_string()]);
}
