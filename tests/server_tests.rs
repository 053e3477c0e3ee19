//! End-to-end tests for the HTTP service: routing, the response pipeline,
//! and the error-to-status mapping.
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::net::{SocketAddr, TcpListener};
use std::sync::Arc;

use brrtweb::registry::HandlerRegistry;
use brrtweb::respond::HttpResponse;
use brrtweb::responsifier::ResponsifierRegistry;
use brrtweb::server::{AppService, HttpServer, ServerHandle};
use http::Method;
use minijinja::Environment;
use serde_json::{json, Value};

mod common;
use common::http::{send_request, TestResponse};
use common::test_server::setup_may_runtime;

/// Test fixture with automatic setup and teardown using RAII.
struct TestServer {
    handle: Option<ServerHandle>,
    addr: SocketAddr,
}

impl TestServer {
    fn new() -> Self {
        setup_may_runtime();

        let mut environment = Environment::new();
        environment
            .add_template("index.html", "<h1>Welcome</h1>")
            .unwrap();
        environment
            .add_template(
                "pets.html",
                "<ul>{% for pet in pets %}<li>{{ pet }}</li>{% endfor %}</ul>",
            )
            .unwrap();

        let mut registry = HandlerRegistry::new();
        registry.route(Method::GET, "/", "display_homepage", |_req| {
            Ok("index".into())
        });
        registry.route(Method::GET, "/pets", "list_pets", |_req| {
            Ok(json!(["pets", {"pets": ["rex", "whiskers"]}]).into())
        });
        registry.route(Method::POST, "/pets", "add_pet", |_req| {
            Ok(json!(["pets", {"pets": ["rex"]}, 201]).into())
        });
        registry.route(Method::GET, "/broken", "broken", |_req| {
            Err(anyhow::anyhow!("boom"))
        });
        registry.route(Method::GET, "/unmapped-view", "unmapped_view", |_req| {
            Ok("nonexistent".into())
        });
        registry.route(Method::GET, "/raw", "raw", |_req| {
            Ok(HttpResponse::new(302, "")
                .with_location("/pets")
                .with_content_type("text/plain")
                .into())
        });

        let responsifiers = ResponsifierRegistry::standard(Arc::new(environment));
        let service = AppService::new(Arc::new(registry), Arc::new(responsifiers));

        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let handle = HttpServer(service).start(addr).unwrap();
        handle.wait_ready().unwrap();

        Self {
            handle: Some(handle),
            addr,
        }
    }

    fn get(&self, path: &str, accept: Option<&str>) -> TestResponse {
        let headers: Vec<(&str, &str)> = accept.map(|a| ("Accept", a)).into_iter().collect();
        send_request(self.addr, "GET", path, &headers)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.stop();
        }
    }
}

#[test]
fn test_renders_html_for_browser_accept() {
    let server = TestServer::new();
    let response = server.get("/", Some("text/html,application/xhtml+xml;q=0.9"));
    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
    assert_eq!(response.body, "<h1>Welcome</h1>");
}

#[test]
fn test_renders_template_with_model() {
    let server = TestServer::new();
    let response = server.get("/pets", Some("text/html"));
    assert_eq!(response.status, 200);
    assert_eq!(response.body, "<ul><li>rex</li><li>whiskers</li></ul>");
}

#[test]
fn test_renders_json_for_json_accept() {
    let server = TestServer::new();
    let response = server.get("/pets", Some("application/json"));
    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("application/json"));
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body, json!({"pets": ["rex", "whiskers"]}));
}

#[test]
fn test_absent_accept_prefers_first_registered_family() {
    let server = TestServer::new();
    let response = server.get("/", None);
    assert_eq!(response.status, 200);
    assert_eq!(response.header("Content-Type"), Some("text/html"));
}

#[test]
fn test_custom_status_code() {
    let server = TestServer::new();
    let response = send_request(
        server.addr,
        "POST",
        "/pets",
        &[("Accept", "application/json")],
    );
    assert_eq!(response.status, 201);
}

#[test]
fn test_unsupported_accept_is_bodyless_415() {
    let server = TestServer::new();
    let response = server.get("/", Some("application/xml"));
    assert_eq!(response.status, 415);
    assert!(response.body.is_empty());
}

#[test]
fn test_unknown_route_is_404() {
    let server = TestServer::new();
    let response = server.get("/nope", Some("text/html"));
    assert_eq!(response.status, 404);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "Not Found");
    assert_eq!(body["path"], "/nope");
}

#[test]
fn test_handler_error_is_500() {
    let server = TestServer::new();
    let response = server.get("/broken", Some("text/html"));
    assert_eq!(response.status, 500);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["error"], "boom");
}

#[test]
fn test_missing_template_is_500() {
    let server = TestServer::new();
    let response = server.get("/unmapped-view", Some("text/html"));
    assert_eq!(response.status, 500);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert!(body["error"].as_str().unwrap().contains("nonexistent.html"));
}

#[test]
fn test_fully_formed_response_bypasses_pipeline() {
    let server = TestServer::new();
    let response = server.get("/raw", Some("application/xml"));
    // The bypass ignores content negotiation entirely.
    assert_eq!(response.status, 302);
    assert_eq!(response.header("Location"), Some("/pets"));
    assert_eq!(response.header("Content-Type"), Some("text/plain"));
}

#[test]
fn test_health_endpoint() {
    let server = TestServer::new();
    let response = server.get("/health", None);
    assert_eq!(response.status, 200);
    let body: Value = serde_json::from_str(&response.body).unwrap();
    assert_eq!(body["status"], "ok");
}
