//! # BRRTWeb
//!
//! **BRRTWeb** is a small web application scaffold for Rust built on the
//! `may` coroutine runtime, centered on a content-negotiating response
//! resolution pipeline: handlers return lightweight response data and the
//! pipeline turns it into a concrete HTTP response.
//!
//! ## Overview
//!
//! A request handler returns one of three descriptor shapes (a bare view
//! name, a 1-to-3 element sequence, or a mapping), or a fully formed
//! response to bypass the pipeline. The pipeline deconstructs the
//! descriptor into a canonical `(view_name, model, status_code)` triple,
//! negotiates the client's `Accept` header against a registry of
//! responsifiers, resolves the logical view name through a pluggable
//! strategy, renders the body, and attaches the status code and a
//! matching `Content-Type`.
//!
//! ## Architecture
//!
//! The library is organized into several key modules:
//!
//! - **[`respond`]** - Descriptor deconstruction, the `respond`
//!   orchestrator, and the pipeline error taxonomy
//! - **[`negotiation`]** - RFC 7231 `Accept` parsing and content-family
//!   selection
//! - **[`resolver`]** - View resolution strategies (suffix-based and
//!   mapping-based)
//! - **[`responsifier`]** - Body production strategies (minijinja
//!   templates and JSON with pluggable value conversion)
//! - **[`registry`]** - The route table mapping `(method, path)` to named
//!   handlers
//! - **[`server`]** - HTTP glue built on `may_minihttp` with
//!   request/response types
//! - **[`runtime_config`]** - Environment-variable runtime configuration
//! - **[`telemetry`]** - Tracing subscriber initialization
//! - **[`ids`]** - ULID-backed request identifiers
//!
//! ### Request Handling Flow
//!
//! 1. `AppService` parses the raw HTTP request
//! 2. The route table resolves `(method, path)` to a handler
//! 3. The handler runs synchronously and returns a `HandlerResult`
//! 4. `respond` deconstructs the descriptor, negotiates the `Accept`
//!    header, resolves the view, and renders the body
//! 5. Pipeline failures map onto HTTP statuses: invalid descriptors,
//!    unresolvable views, and render failures are server errors;
//!    an unsatisfiable `Accept` header is a bodyless 415
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use brrtweb::registry::HandlerRegistry;
//! use brrtweb::responsifier::ResponsifierRegistry;
//! use brrtweb::runtime_config::RuntimeConfig;
//! use brrtweb::server::{AppService, HttpServer};
//! use http::Method;
//! use minijinja::Environment;
//!
//! brrtweb::telemetry::init_tracing();
//! let config = RuntimeConfig::from_env();
//! may::config().set_stack_size(config.stack_size);
//!
//! let mut environment = Environment::new();
//! environment.set_loader(minijinja::path_loader(&config.template_dir));
//!
//! let mut registry = HandlerRegistry::new();
//! registry.route(Method::GET, "/", "display_homepage", |_req| Ok("index".into()));
//!
//! let responsifiers = ResponsifierRegistry::standard(Arc::new(environment));
//! let service = AppService::new(Arc::new(registry), Arc::new(responsifiers));
//! let handle = HttpServer(service).start("0.0.0.0:8080").expect("failed to bind");
//! handle.join().expect("server crashed");
//! ```
//!
//! ## Runtime Considerations
//!
//! BRRTWeb uses the `may` coroutine runtime, not tokio or async-std.
//! Handlers run synchronously inside per-connection coroutines; the
//! pipeline has no suspension points, no locking, and no shared mutable
//! state. Stack size is configurable via the `BRRTW_STACK_SIZE`
//! environment variable.

pub mod ids;
pub mod negotiation;
pub mod registry;
pub mod resolver;
pub mod respond;
pub mod responsifier;
pub mod runtime_config;
pub mod server;
pub mod telemetry;

pub use negotiation::{negotiate, parse_accept, ContentFamily, MediaRange};
pub use registry::{HandlerEntry, HandlerRegistry};
pub use resolver::{
    MappingBasedViewResolver, ResolverConfigError, SuffixBasedViewResolver, ViewResolver,
};
pub use respond::{
    deconstruct, respond, HandlerResult, HttpResponse, Model, ResponseParts, RespondError,
    ViewContext,
};
pub use responsifier::{
    JsonResponsifier, RegistryConfigError, Responsifier, ResponsifierRegistry,
    TemplatedResponsifier, ValueConverter,
};
