use std::io;
use std::sync::Arc;

use http::Method;
use may_minihttp::{HttpService, Request, Response};
use serde_json::json;
use tracing::{error, info, warn};

use super::request::parse_request;
use super::response::{write_empty, write_json, write_response};
use crate::ids::RequestId;
use crate::registry::HandlerRegistry;
use crate::respond::respond;
use crate::responsifier::ResponsifierRegistry;

/// The HTTP service: looks up the handler for each request, runs the
/// response pipeline over its result, and translates pipeline failures
/// into HTTP status codes.
///
/// Both registries are built once at startup and shared read-only across
/// worker coroutines; the service itself holds no mutable state.
#[derive(Clone)]
pub struct AppService {
    pub registry: Arc<HandlerRegistry>,
    pub responsifiers: Arc<ResponsifierRegistry>,
}

impl AppService {
    pub fn new(registry: Arc<HandlerRegistry>, responsifiers: Arc<ResponsifierRegistry>) -> Self {
        Self {
            registry,
            responsifiers,
        }
    }
}

/// Basic health check endpoint returning `{ "status": "ok" }`.
pub fn health_endpoint(res: &mut Response) -> io::Result<()> {
    write_json(res, 200, json!({ "status": "ok" }));
    Ok(())
}

impl HttpService for AppService {
    fn call(&mut self, req: Request, res: &mut Response) -> io::Result<()> {
        let parsed = parse_request(req);
        let request_id = RequestId::from_header_or_new(parsed.get_header("x-request-id"));

        if parsed.method == Method::GET && parsed.path == "/health" {
            return health_endpoint(res);
        }

        let Some(entry) = self.registry.lookup(&parsed.method, &parsed.path) else {
            warn!(
                request_id = %request_id,
                method = %parsed.method,
                path = %parsed.path,
                "no handler mapped"
            );
            write_json(
                res,
                404,
                json!({"error": "Not Found", "method": parsed.method.as_str(), "path": parsed.path}),
            );
            return Ok(());
        };

        info!(
            request_id = %request_id,
            handler = %entry.name,
            method = %parsed.method,
            path = %parsed.path,
            "dispatching request"
        );

        let result = match (entry.handler)(&parsed) {
            Ok(result) => result,
            Err(err) => {
                error!(
                    request_id = %request_id,
                    handler = %entry.name,
                    error = %err,
                    "handler failed"
                );
                write_json(res, 500, json!({"error": err.to_string()}));
                return Ok(());
            }
        };

        match respond(result, parsed.accept(), &self.responsifiers) {
            Ok(response) => write_response(res, &response),
            Err(err) => {
                let status = err.status_code();
                if status == 415 {
                    // Client-attributable; 415 carries no body.
                    warn!(
                        request_id = %request_id,
                        accept = ?parsed.accept(),
                        "no acceptable representation"
                    );
                    write_empty(res, status);
                } else {
                    error!(
                        request_id = %request_id,
                        handler = %entry.name,
                        error = %err,
                        "response pipeline failed"
                    );
                    write_json(res, status, json!({"error": err.to_string()}));
                }
            }
        }
        Ok(())
    }
}
