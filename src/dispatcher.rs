//! Handler invocation and result normalization.
//!
//! A handler is application code bound to a `(method, path)` pair. Handlers
//! run synchronously on the calling worker: the engine is invoked once per
//! connection by an external transport, so there is no channel or task
//! plumbing between the router and the handler. Whatever a handler does,
//! including returning an error or panicking, the dispatcher converts the
//! outcome into a well-formed 500 so the transport always has bytes to send.

use crate::cookies::SetCookie;
use crate::request::Request;
use crate::response::error_body;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tracing::{debug, warn};

/// Cookies a handler wants set on the response.
///
/// A map yields one `Set-Cookie: name=value` line per entry; a pre-formatted
/// string (e.g. `auth=true; Path=/; HttpOnly`) is emitted verbatim as a
/// single line. The map is ordered so emission is deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerCookies {
    Map(BTreeMap<String, String>),
    Header(String),
}

impl HandlerCookies {
    fn into_set_cookies(self) -> Vec<SetCookie> {
        match self {
            HandlerCookies::Map(map) => map
                .into_iter()
                .map(|(name, value)| SetCookie::Pair { name, value })
                .collect(),
            HandlerCookies::Header(raw) => vec![SetCookie::Formatted(raw)],
        }
    }
}

/// What a handler returns.
///
/// The three shapes mirror the handler boundary: a bare payload (status
/// defaults to 200), a status/payload pair, or status/payload/cookies.
/// The engine discriminates on the variant tag, never on payload structure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HandlerResult {
    Value(Value),
    Status(u16, Value),
    StatusWithCookies(u16, Value, HandlerCookies),
}

/// Normalized handler outcome consumed by response framing.
#[derive(Debug, Clone, Serialize)]
pub struct HandlerResponse {
    pub status: u16,
    pub body: Value,
    pub cookies: Vec<SetCookie>,
}

impl From<HandlerResult> for HandlerResponse {
    fn from(result: HandlerResult) -> Self {
        match result {
            HandlerResult::Value(body) => HandlerResponse {
                status: 200,
                body,
                cookies: Vec::new(),
            },
            HandlerResult::Status(status, body) => HandlerResponse {
                status,
                body,
                cookies: Vec::new(),
            },
            HandlerResult::StatusWithCookies(status, body, cookies) => HandlerResponse {
                status,
                body,
                cookies: cookies.into_set_cookies(),
            },
        }
    }
}

/// Application-supplied route handler.
///
/// Implemented for any `Fn(&Request) -> anyhow::Result<HandlerResult>`
/// closure, so registration reads:
///
/// ```rust
/// use weaprous::{HandlerResult, Request, Router};
/// use http::Method;
/// use serde_json::json;
///
/// let mut router = Router::new();
/// router.register(Method::GET, "/ping", |_req: &Request| {
///     Ok(HandlerResult::Value(json!({ "pong": true })))
/// });
/// ```
pub trait Handler: Send + Sync {
    fn handle(&self, req: &Request) -> anyhow::Result<HandlerResult>;
}

impl<F> Handler for F
where
    F: Fn(&Request) -> anyhow::Result<HandlerResult> + Send + Sync,
{
    fn handle(&self, req: &Request) -> anyhow::Result<HandlerResult> {
        self(req)
    }
}

/// Shared handler reference as stored in the route table and on a resolved
/// request.
pub type HandlerRef = Arc<dyn Handler>;

/// Invoke a handler, normalizing every outcome into a `HandlerResponse`.
///
/// Errors and panics become a 500 carrying the failure's message in the
/// standard `{"error", "status"}` body; neither propagates to the caller.
#[must_use]
pub fn invoke(handler: &HandlerRef, req: &Request) -> HandlerResponse {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| handler.handle(req)));
    match outcome {
        Ok(Ok(result)) => {
            let response = HandlerResponse::from(result);
            debug!(status = response.status, "Handler completed");
            response
        }
        Ok(Err(err)) => {
            warn!(error = %err, method = %req.method, path = %req.path, "Handler failed");
            failure_response(err.to_string())
        }
        Err(payload) => {
            let msg = panic_message(payload.as_ref());
            warn!(panic = %msg, method = %req.method, path = %req.path, "Handler panicked");
            failure_response(format!("Handler panicked: {msg}"))
        }
    }
}

fn failure_response(message: String) -> HandlerResponse {
    HandlerResponse {
        status: 500,
        body: error_body(500, &message),
        cookies: Vec::new(),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
