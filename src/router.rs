//! Exact-match route table.
//!
//! Routes are `(method, path)` pairs mapped to handlers: no path
//! parameters, no wildcards, no method-set shorthand. Registration happens
//! once during application setup and the table is read-only afterwards:
//! the engine takes the router by value, so no locking is needed on the
//! lookup path.

use crate::dispatcher::{HandlerRef, HandlerResult};
use crate::request::Request;
use http::Method;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Route table mapping `(method, path)` to a handler.
#[derive(Clone, Default)]
pub struct Router {
    routes: HashMap<(Method, String), HandlerRef>,
}

impl Router {
    #[must_use]
    pub fn new() -> Self {
        Self {
            routes: HashMap::new(),
        }
    }

    /// Register a handler for an exact `(method, path)` pair.
    ///
    /// Registering the same pair twice overwrites the previous handler;
    /// last registration wins. That is almost always a configuration
    /// mistake in the application, so it is logged, but the router does
    /// not forbid it.
    pub fn register<F>(&mut self, method: Method, path: &str, handler: F)
    where
        F: Fn(&Request) -> anyhow::Result<HandlerResult> + Send + Sync + 'static,
    {
        self.register_handler(method, path, Arc::new(handler));
    }

    /// Register a pre-built shared handler, same overwrite semantics as
    /// [`Router::register`].
    pub fn register_handler(&mut self, method: Method, path: &str, handler: HandlerRef) {
        let key = (method, path.to_string());
        if self.routes.contains_key(&key) {
            warn!(method = %key.0, path = %key.1, "Route registered twice, overwriting previous handler");
        }
        self.routes.insert(key, handler);
    }

    /// Look up the handler for `(method, path)`.
    ///
    /// Pure lookup with no side effects; a miss is a normal outcome that
    /// downstream response construction resolves via static file serving.
    #[must_use]
    pub fn resolve(&self, method: &Method, path: &str) -> Option<HandlerRef> {
        let hit = self
            .routes
            .get(&(method.clone(), path.to_string()))
            .cloned();
        if hit.is_some() {
            debug!(method = %method, path = %path, "Route matched");
        } else {
            debug!(method = %method, path = %path, "No route matched");
        }
        hit
    }

    /// Number of registered routes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.routes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Log the full route table, normally once at startup.
    pub fn log_routes(&self) {
        let summary: Vec<String> = self
            .routes
            .keys()
            .map(|(method, path)| format!("{method} {path}"))
            .collect();
        info!(
            routes_count = self.routes.len(),
            routes = ?summary,
            "Routing table loaded"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatcher::Handler;
    use serde_json::json;

    fn tagged(
        tag: &'static str,
    ) -> impl Fn(&Request) -> anyhow::Result<HandlerResult> + Send + Sync + 'static {
        move |_req| Ok(HandlerResult::Value(json!({ "tag": tag })))
    }

    #[test]
    fn test_exact_match_only() {
        let mut router = Router::new();
        router.register(Method::GET, "/users", tagged("users"));
        assert!(router.resolve(&Method::GET, "/users").is_some());
        assert!(router.resolve(&Method::GET, "/users/").is_none());
        assert!(router.resolve(&Method::GET, "/users/1").is_none());
        assert!(router.resolve(&Method::POST, "/users").is_none());
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let mut router = Router::new();
        router.register(Method::GET, "/ping", tagged("ping"));
        let first = router.resolve(&Method::GET, "/ping").unwrap();
        let second = router.resolve(&Method::GET, "/ping").unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(router.len(), 1);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut router = Router::new();
        router.register(Method::GET, "/dup", tagged("first"));
        router.register(Method::GET, "/dup", tagged("second"));
        assert_eq!(router.len(), 1);
        let handler = router.resolve(&Method::GET, "/dup").unwrap();
        let req = Request::for_tests(Method::GET, "/dup");
        let result = handler.handle(&req).unwrap();
        assert_eq!(result, HandlerResult::Value(json!({ "tag": "second" })));
    }
}
