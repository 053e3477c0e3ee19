//! # Respond Module
//!
//! The heart of the response resolution pipeline: deconstruction of raw
//! handler results into a canonical `(view_name, model, status_code)`
//! triple, and the `respond` orchestrator that drives deconstruction,
//! content negotiation, and rendering for a single request/response cycle.
//!
//! ## Handler result shapes
//!
//! A handler may return response data in three shapes, carried as a
//! [`serde_json::Value`]:
//!
//! - a bare view-name string: `"login"`
//! - an ordered sequence of 1 to 3 elements: `["login", {"user": "ada"}, 201]`
//! - a mapping: `{"view_name": "login", "model": {...}, "status_code": 200}`
//!
//! Omitted or null trailing elements default to an empty model and status
//! 200. Handlers that need full control return a
//! [`HandlerResult::Response`] instead, which bypasses the pipeline.
//!
//! ## Error handling
//!
//! All pipeline failures are variants of [`RespondError`] and propagate
//! unmodified through [`respond`]. The server glue maps each kind onto an
//! HTTP status code; nothing is retried and nothing falls back silently.

mod core;
mod error;

pub use core::{
    deconstruct, respond, HandlerResult, HttpResponse, Model, ResponseParts, ViewContext,
    HEADER_CONTENT_TYPE, HEADER_LOCATION, MODEL_KEY, STATUS_CODE_KEY, VIEW_NAME_KEY,
};
pub use error::RespondError;
