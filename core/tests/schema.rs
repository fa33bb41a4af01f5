//! User payloads checked against a JSON schema.

mod common;

use jsonschema::JSONSchema;
use serde_json::{json, Value};

use common::api_client;

fn user_schema() -> Value {
    json!({
        "type": "object",
        "required": ["id", "name", "email"],
        "properties": {
            "id": {"type": "integer"},
            "name": {"type": "string"},
            "email": {"type": "string", "format": "email"}
        }
    })
}

/// Validation error messages for `instance`, empty when it conforms.
fn violations(schema: &Value, instance: &Value) -> Vec<String> {
    let compiled = JSONSchema::compile(schema).expect("schema should compile");
    let result = compiled.validate(instance);
    match result {
        Ok(()) => Vec::new(),
        Err(errors) => errors.map(|e| e.to_string()).collect(),
    }
}

#[test]
fn user_matches_schema() {
    let client = api_client();
    let schema = user_schema();
    for user_id in [1, 2, 3] {
        let resp = client
            .fetch(&format!("/users/{user_id}"), None)
            .unwrap()
            .unwrap();
        assert_eq!(resp.status, 200);
        let data = resp.json_value().unwrap();
        let errors = violations(&schema, &data);
        assert!(errors.is_empty(), "user {user_id}: schema validation failed: {errors:?}");
    }
}

#[test]
fn user_list_matches_array_schema() {
    let client = api_client();
    let schema = json!({"type": "array", "items": user_schema()});
    let data = client.fetch("/users", None).unwrap().unwrap().json_value().unwrap();
    assert!(violations(&schema, &data).is_empty());
}

#[test]
fn schema_rejects_missing_and_mistyped_fields() {
    let schema = user_schema();
    assert!(!violations(&schema, &json!({"id": 1, "name": "Ada"})).is_empty());
    assert!(!violations(&schema, &json!({"id": "1", "name": "Ada", "email": "a@b.c"})).is_empty());
}

#[test]
fn error_body_does_not_match_user_schema() {
    let client = api_client();
    let data = client
        .fetch("/invalid_user", None)
        .unwrap()
        .unwrap()
        .json_value()
        .unwrap();
    assert!(!violations(&user_schema(), &data).is_empty());
}
