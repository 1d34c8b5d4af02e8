//! # weaprous
//!
//! A from-scratch HTTP/1.1 request parsing and response construction engine
//! sitting beneath an exact-match route-dispatch layer. The engine turns a
//! raw request byte blob into a structured [`Request`], resolves it against
//! a registered route table, and serializes the handler's result (or a
//! static file, or a structured error) back into literal HTTP response
//! bytes.
//!
//! ## Architecture
//!
//! The library is organized into small, single-concern modules:
//!
//! - **[`headers`]** - Ordered, case-insensitive header storage
//! - **[`request`]** - Raw request parsing (request line, headers, cookies,
//!   authorization, `Content-Length`-bounded bodies)
//! - **[`cookies`]** - `Cookie` header parsing and `Set-Cookie` serialization
//! - **[`router`]** - Exact-match `(method, path)` route table
//! - **[`dispatcher`]** - Synchronous handler invocation with failure and
//!   panic capture
//! - **[`response`]** - Response framing and wire serialization
//! - **[`static_files`]** - Filesystem fallback with MIME-derived storage
//!   roots and traversal confinement
//! - **[`config`]** - Storage-root configuration with env overrides
//! - **[`engine`]** - The byte-in/byte-out seam tying it all together
//!
//! ## Boundaries
//!
//! The socket accept loop and connection threading model are external: a
//! transport collaborator reads one complete request off the wire, calls
//! [`Engine::handle`], and writes the returned bytes back verbatim. The
//! engine is synchronous and never touches a socket. Handler bodies are
//! application code; the engine only guarantees that whether they return a
//! payload, return an error, or panic, the connection always gets a
//! well-formed HTTP response.
//!
//! ## Quick Start
//!
//! ```rust
//! use weaprous::{Engine, EngineConfig, HandlerResult, Request, Router};
//! use http::Method;
//! use serde_json::json;
//!
//! let mut router = Router::new();
//! router.register(Method::GET, "/ping", |_req: &Request| {
//!     Ok(HandlerResult::Value(json!({ "pong": true })))
//! });
//!
//! let engine = Engine::new(router, &EngineConfig::default());
//! let response = engine.handle(b"GET /ping HTTP/1.1\r\nHost: localhost\r\n\r\n");
//! assert!(response.starts_with(b"HTTP/1.1 200 OK\r\n"));
//! ```
//!
//! ## Error Behavior
//!
//! All generated error responses carry the JSON body
//! `{"error": <message>, "status": <code>}`: malformed request lines are
//! rejected with 400, missing static files with 404 naming the requested
//! path, and handler failures of any kind with 500 carrying the failure's
//! message. No input leaves the connection without a response.

pub mod config;
pub mod cookies;
pub mod dispatcher;
pub mod engine;
pub mod headers;
pub mod request;
pub mod response;
pub mod router;
pub mod static_files;

pub use config::EngineConfig;
pub use cookies::SetCookie;
pub use dispatcher::{Handler, HandlerCookies, HandlerRef, HandlerResponse, HandlerResult};
pub use engine::Engine;
pub use headers::HeaderMap;
pub use request::{Authorization, ParseError, Request};
pub use response::Response;
pub use router::Router;
pub use static_files::{StaticError, StaticFiles};
