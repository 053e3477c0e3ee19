//! HTTP server glue built on `may_minihttp`.
//!
//! [`AppService`] connects the transport to the pipeline: it parses the
//! raw request, looks the handler up in the
//! [`HandlerRegistry`](crate::registry::HandlerRegistry), runs
//! [`respond`](crate::respond::respond) over the handler's result, and
//! maps each pipeline failure kind onto its HTTP status (415 bodyless for
//! unsupported media types, 500 with a JSON error body otherwise).

pub mod http_server;
pub mod request;
pub mod response;
pub mod service;

pub use http_server::{HttpServer, ServerHandle};
pub use request::{parse_query_params, parse_request, ParsedRequest};
pub use response::{write_json, write_response};
pub use service::{health_endpoint, AppService};
