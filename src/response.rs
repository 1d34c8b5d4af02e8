//! Outbound response construction and wire serialization.
//!
//! A [`Response`] is built fresh per request, fully materialized to bytes,
//! and handed to the transport. The wire format is literal HTTP/1.1:
//! status line, header lines, one `Set-Cookie` line per cookie, a blank
//! line, then the body. `Content-Length` always equals the exact byte
//! length of the body.

use crate::cookies::SetCookie;
use crate::dispatcher::HandlerResponse;
use crate::headers::HeaderMap;
use serde_json::{json, Value};
use tracing::debug;

/// Reason phrase for a status code.
///
/// Codes outside the table fall back to `"OK"`.
#[must_use]
pub fn status_reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        401 => "Unauthorized",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "OK",
    }
}

/// Standard error body: `{"error": <message>, "status": <code>}`.
///
/// Every generated error response (400/401/404/500) uses this two-field
/// shape so clients can detect failures uniformly.
#[must_use]
pub fn error_body(status: u16, message: &str) -> Value {
    json!({ "error": message, "status": status })
}

/// One outbound HTTP transaction under construction.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub headers: HeaderMap,
    pub cookies: Vec<SetCookie>,
    pub body: Vec<u8>,
}

impl Response {
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            cookies: Vec::new(),
            body: Vec::new(),
        }
    }

    /// JSON response from a serialized value.
    #[must_use]
    pub fn json(status: u16, body: &Value) -> Self {
        let mut response = Response::new(status);
        response
            .headers
            .insert("Content-Type", "application/json");
        response.body = body.to_string().into_bytes();
        response
    }

    /// Error response with the standard `{"error", "status"}` JSON body.
    #[must_use]
    pub fn error(status: u16, message: &str) -> Self {
        debug!(status = status, message = %message, "Building error response");
        Response::json(status, &error_body(status, message))
    }

    /// 200 response carrying file bytes with the given MIME type.
    #[must_use]
    pub fn file(bytes: Vec<u8>, mime_type: &str) -> Self {
        let mut response = Response::new(200);
        response.headers.insert("Content-Type", mime_type);
        response.body = bytes;
        response
    }

    /// Build from a normalized handler outcome: JSON body plus one
    /// `Set-Cookie` line per cookie the handler set.
    #[must_use]
    pub fn from_handler(hr: HandlerResponse) -> Self {
        let mut response = Response::json(hr.status, &hr.body);
        response.cookies = hr.cookies;
        response
    }

    pub fn set_cookie(&mut self, cookie: SetCookie) {
        self.cookies.push(cookie);
    }

    /// Serialize to the literal bytes sent on the connection.
    ///
    /// `Content-Length` is computed here from the body, and a missing
    /// `Content-Type` falls back to `application/octet-stream` so both
    /// headers are always present on the wire.
    #[must_use]
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = String::new();
        out.push_str(&format!(
            "HTTP/1.1 {} {}\r\n",
            self.status,
            status_reason(self.status)
        ));

        if !self.headers.contains("Content-Type") {
            out.push_str("Content-Type: application/octet-stream\r\n");
        }
        for (name, value) in self.headers.iter() {
            if name.eq_ignore_ascii_case("content-length") {
                continue;
            }
            out.push_str(&format!("{name}: {value}\r\n"));
        }
        for cookie in &self.cookies {
            out.push_str(&format!("Set-Cookie: {}\r\n", cookie.header_value()));
        }
        out.push_str(&format!("Content-Length: {}\r\n\r\n", self.body.len()));

        let mut bytes = out.into_bytes();
        bytes.extend_from_slice(&self.body);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_reason_table() {
        assert_eq!(status_reason(200), "OK");
        assert_eq!(status_reason(204), "No Content");
        assert_eq!(status_reason(404), "Not Found");
        assert_eq!(status_reason(500), "Internal Server Error");
        assert_eq!(status_reason(418), "OK");
    }

    #[test]
    fn test_content_length_matches_body() {
        let response = Response::json(200, &json!({"x": 1}));
        let text = String::from_utf8(response.to_bytes()).unwrap();
        let body = text.split("\r\n\r\n").nth(1).unwrap();
        assert!(text.contains(&format!("Content-Length: {}\r\n", body.len())));
    }

    #[test]
    fn test_error_body_shape() {
        let response = Response::error(404, "File not found: /missing");
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.1 404 Not Found\r\n"));
        assert!(text.contains("Content-Type: application/json\r\n"));
        assert!(text.ends_with(r#"{"error":"File not found: /missing","status":404}"#));
    }

    #[test]
    fn test_set_cookie_lines() {
        let mut response = Response::json(200, &json!({"ok": true}));
        response.set_cookie(SetCookie::pair("auth", "true"));
        response.set_cookie(SetCookie::formatted("sid=1; Path=/; HttpOnly"));
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.contains("Set-Cookie: auth=true\r\n"));
        assert!(text.contains("Set-Cookie: sid=1; Path=/; HttpOnly\r\n"));
    }
}
