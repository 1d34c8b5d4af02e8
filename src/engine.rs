//! Request/response engine: the byte-in/byte-out seam the transport calls.
//!
//! The transport collaborator (accept loop, thread-per-connection model)
//! reads a complete raw request off the socket, calls [`Engine::handle`],
//! and writes the returned bytes back verbatim. The engine itself never
//! touches a socket, spawns nothing, and holds no per-request state; it is
//! safe to call from any number of worker threads at once because the
//! route table is immutable after construction.

use crate::config::EngineConfig;
use crate::dispatcher;
use crate::request::{ParseError, Request};
use crate::response::Response;
use crate::router::Router;
use crate::static_files::{StaticError, StaticFiles};
use tracing::{info, warn};

/// The assembled engine: route table plus static resolver.
pub struct Engine {
    router: Router,
    static_files: StaticFiles,
}

impl Engine {
    /// Build an engine from a fully-registered router and configuration.
    ///
    /// Registration is over once the router is handed in; the engine offers
    /// no way to mutate the table afterwards.
    #[must_use]
    pub fn new(router: Router, config: &EngineConfig) -> Self {
        router.log_routes();
        Self {
            router,
            static_files: StaticFiles::new(config),
        }
    }

    /// Handle one complete raw request, producing the complete response
    /// bytes to send on the connection.
    ///
    /// Never fails: every malformed input, handler failure, or missing
    /// file becomes a well-formed HTTP response with a JSON error body.
    #[must_use]
    pub fn handle(&self, raw: &[u8]) -> Vec<u8> {
        let text = String::from_utf8_lossy(raw);
        self.respond(&text).to_bytes()
    }

    fn respond(&self, raw: &str) -> Response {
        let request = match Request::parse(raw, &self.router) {
            Ok(request) => request,
            Err(err @ ParseError::EmptyRequest) => {
                warn!("Rejecting empty request");
                return Response::error(500, &err.to_string());
            }
            Err(err) => {
                warn!(error = %err, "Rejecting malformed request");
                return Response::error(400, &err.to_string());
            }
        };

        match &request.handler {
            Some(handler) => {
                info!(method = %request.method, path = %request.path, "Dispatching to handler");
                Response::from_handler(dispatcher::invoke(handler, &request))
            }
            None => self.serve_static(&request),
        }
    }

    fn serve_static(&self, request: &Request) -> Response {
        match self.static_files.resolve(&request.path) {
            Ok((bytes, mime)) => Response::file(bytes, mime),
            Err(err @ StaticError::NotFound(_)) => Response::error(404, &err.to_string()),
            Err(err) => Response::error(500, &err.to_string()),
        }
    }
}
