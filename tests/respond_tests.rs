//! Tests for response-data deconstruction and the respond orchestrator.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use brrtweb::respond::{
    deconstruct, respond, HandlerResult, HttpResponse, Model, RespondError,
};
use brrtweb::responsifier::ResponsifierRegistry;
use minijinja::Environment;
use serde_json::{json, Value};

fn template_registry() -> ResponsifierRegistry {
    let mut environment = Environment::new();
    environment
        .add_template("login.html", "Rendered {{ view_name }}")
        .unwrap();
    environment
        .add_template("greeting.html", "{{ greeting }}, {{ name }}!")
        .unwrap();
    ResponsifierRegistry::standard(Arc::new(environment))
}

#[test]
fn test_deconstruct_string() {
    let parts = deconstruct(&json!("login")).unwrap();
    assert_eq!(parts.view_name, "login");
    assert_eq!(parts.model, Model::new());
    assert_eq!(parts.status_code, 200);
}

#[test]
fn test_deconstruct_empty_string_fails() {
    let err = deconstruct(&json!("")).unwrap_err();
    assert!(matches!(err, RespondError::InvalidResponse(_)));
}

#[test]
fn test_deconstruct_blank_string_fails() {
    let err = deconstruct(&json!("   ")).unwrap_err();
    assert!(matches!(err, RespondError::InvalidResponse(_)));
}

#[test]
fn test_deconstruct_list_with_name_only() {
    let parts = deconstruct(&json!(["login"])).unwrap();
    assert_eq!(parts.view_name, "login");
    assert_eq!(parts.model, Model::new());
    assert_eq!(parts.status_code, 200);
}

#[test]
fn test_deconstruct_list_with_name_and_model() {
    let parts = deconstruct(&json!(["login", {"user": "ada"}])).unwrap();
    assert_eq!(parts.view_name, "login");
    assert_eq!(parts.model.get("user"), Some(&json!("ada")));
    assert_eq!(parts.status_code, 200);
}

#[test]
fn test_deconstruct_list_with_all_elements() {
    let parts = deconstruct(&json!(["login", {"user": "ada"}, 201])).unwrap();
    assert_eq!(parts.view_name, "login");
    assert_eq!(parts.model.get("user"), Some(&json!("ada")));
    assert_eq!(parts.status_code, 201);
}

#[test]
fn test_deconstruct_list_fills_null_elements_with_defaults() {
    let parts = deconstruct(&json!(["login", null, null])).unwrap();
    assert_eq!(parts.model, Model::new());
    assert_eq!(parts.status_code, 200);
}

#[test]
fn test_deconstruct_list_ignores_extra_elements() {
    let parts = deconstruct(&json!(["login", null, 204, "extra"])).unwrap();
    assert_eq!(parts.status_code, 204);
}

#[test]
fn test_deconstruct_empty_list_fails() {
    let err = deconstruct(&json!([])).unwrap_err();
    assert!(matches!(err, RespondError::InvalidResponse(_)));
    assert!(err.to_string().contains("view name at least is required"));
}

#[test]
fn test_deconstruct_list_with_non_string_name_fails() {
    let err = deconstruct(&json!([42])).unwrap_err();
    assert!(err.to_string().contains("must be a string"));
}

#[test]
fn test_deconstruct_list_with_non_mapping_model_fails() {
    let err = deconstruct(&json!(["login", "not-a-mapping"])).unwrap_err();
    assert!(err.to_string().contains("must be a mapping"));
}

#[test]
fn test_deconstruct_list_with_bad_status_fails() {
    for bad in [json!(["login", null, "ok"]), json!(["login", null, -1]), json!(["login", null, 0])] {
        let err = deconstruct(&bad).unwrap_err();
        assert!(err.to_string().contains("positive integer"), "{bad}");
    }
}

#[test]
fn test_deconstruct_map_with_all_keys() {
    let parts = deconstruct(&json!({
        "view_name": "login",
        "model": {"user": "ada"},
        "status_code": 202,
    }))
    .unwrap();
    assert_eq!(parts.view_name, "login");
    assert_eq!(parts.model.get("user"), Some(&json!("ada")));
    assert_eq!(parts.status_code, 202);
}

#[test]
fn test_deconstruct_map_defaults() {
    let parts = deconstruct(&json!({"view_name": "login"})).unwrap();
    assert_eq!(parts.model, Model::new());
    assert_eq!(parts.status_code, 200);
}

#[test]
fn test_deconstruct_map_with_null_model_uses_whole_mapping() {
    // An explicitly null model means the descriptor mapping serves double
    // duty as both metadata and template variables.
    let parts = deconstruct(&json!({
        "view_name": "login",
        "model": null,
        "user": "ada",
    }))
    .unwrap();
    assert_eq!(parts.model.get("user"), Some(&json!("ada")));
    assert_eq!(parts.model.get("view_name"), Some(&json!("login")));
}

#[test]
fn test_deconstruct_map_without_view_name_fails() {
    let err = deconstruct(&json!({"model": {}})).unwrap_err();
    assert!(matches!(err, RespondError::InvalidResponse(_)));
}

#[test]
fn test_deconstruct_map_with_blank_view_name_fails() {
    let err = deconstruct(&json!({"view_name": " "})).unwrap_err();
    assert!(err.to_string().contains("empty"));
}

#[test]
fn test_deconstruct_rejects_other_kinds_naming_the_type() {
    let err = deconstruct(&json!(42)).unwrap_err();
    assert!(err.to_string().contains("number"));

    let err = deconstruct(&json!(true)).unwrap_err();
    assert!(err.to_string().contains("boolean"));

    let err = deconstruct(&Value::Null).unwrap_err();
    assert!(err.to_string().contains("null"));
}

#[test]
fn test_deconstruct_is_idempotent() {
    let descriptor = json!(["login", {"user": "ada"}, 201]);
    let first = deconstruct(&descriptor).unwrap();
    let second = deconstruct(&descriptor).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_respond_returns_fully_formed_response_unchanged() {
    let registry = template_registry();
    let response = HttpResponse::new(302, "").with_location("/elsewhere");
    let result = respond(
        HandlerResult::Response(response.clone()),
        Some("text/html"),
        &registry,
    )
    .unwrap();
    assert_eq!(result, response);
}

#[test]
fn test_respond_renders_template_round_trip() {
    let registry = template_registry();
    let response = respond("login".into(), Some("text/html"), &registry).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, "Rendered login");
}

#[test]
fn test_respond_merges_model_into_template() {
    let registry = template_registry();
    let descriptor = json!(["greeting", {"greeting": "Hello", "name": "Ada"}, 201]);
    let response = respond(descriptor.into(), Some("text/html"), &registry).unwrap();
    assert_eq!(response.status, 201);
    assert_eq!(response.body, "Hello, Ada!");
}

#[test]
fn test_respond_renders_json() {
    let registry = template_registry();
    let descriptor = json!(["login", {"user": "ada", "count": 2}]);
    let response = respond(descriptor.into(), Some("application/json"), &registry).unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body, json!({"user": "ada", "count": 2}));
}

#[test]
fn test_respond_propagates_unsupported_media_type() {
    let registry = template_registry();
    let err = respond("login".into(), Some("application/xml"), &registry).unwrap_err();
    assert!(matches!(err, RespondError::UnsupportedMediaType { .. }));
    assert_eq!(err.status_code(), 415);
}

#[test]
fn test_respond_propagates_invalid_response() {
    let registry = template_registry();
    let err = respond(json!([]).into(), Some("text/html"), &registry).unwrap_err();
    assert!(matches!(err, RespondError::InvalidResponse(_)));
    assert_eq!(err.status_code(), 500);
}

#[test]
fn test_http_response_header_helpers() {
    let response = HttpResponse::new(200, "body")
        .with_content_type("text/html")
        .with_location("https://example.com/");

    assert_eq!(response.header("content-type"), Some("text/html"));
    assert_eq!(response.header("Location"), Some("https://example.com/"));

    // Setting an existing header replaces the value in place.
    let response = response.with_content_type("application/json");
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    assert_eq!(response.headers.len(), 2);
}
