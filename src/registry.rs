//! Route table mapping `(method, path)` to named handler functions.
//!
//! Lookup is an explicit table rather than any dynamic resolution, so an
//! unknown route is statically distinguishable from a handler failure.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use http::Method;

use crate::respond::HandlerResult;
use crate::server::ParsedRequest;

/// A request handler. Returns response data for the pipeline, or an error
/// the server surfaces as a 500.
pub type HandlerFn = Arc<dyn Fn(&ParsedRequest) -> anyhow::Result<HandlerResult> + Send + Sync>;

/// A registered handler and its name (used for logging and tracing).
#[derive(Clone)]
pub struct HandlerEntry {
    pub name: String,
    pub handler: HandlerFn,
}

/// The route table. Built once at startup; read-only at request time.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    routes: HashMap<Method, HashMap<String, HandlerEntry>>,
}

impl HandlerRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` under `name` for `method` and `path`. The last
    /// registration for a route wins.
    pub fn route<F>(&mut self, method: Method, path: &str, name: &str, handler: F)
    where
        F: Fn(&ParsedRequest) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        self.routes.entry(method).or_default().insert(
            path.to_string(),
            HandlerEntry {
                name: name.to_string(),
                handler: Arc::new(handler),
            },
        );
    }

    /// Look up the handler registered for `method` and `path`.
    #[must_use]
    pub fn lookup(&self, method: &Method, path: &str) -> Option<&HandlerEntry> {
        self.routes.get(method)?.get(path)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.values().map(HashMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlerRegistry")
            .field("routes", &self.len())
            .finish()
    }
}
