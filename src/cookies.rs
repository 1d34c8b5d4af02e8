//! Cookie header parsing and `Set-Cookie` serialization.

use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use tracing::warn;

/// Parse a `Cookie` header value into a name/value map.
///
/// Pairs are split on `;`, trimmed, then split on the **first** `=` only so
/// values that themselves contain `=` (base64 session tokens, signatures)
/// survive intact. Empty segments (trailing `;`) are skipped; segments with
/// no `=` are dropped with a warning rather than failing the request.
///
/// # Arguments
///
/// * `raw` - The raw `Cookie` header value (e.g., `a=1; b=2`)
///
/// # Returns
///
/// A map of cookie names to values, both trimmed of surrounding whitespace.
#[must_use]
pub fn parse_cookie_header(raw: &str) -> HashMap<String, String> {
    let mut cookies = HashMap::new();
    for pair in raw.split(';') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((name, value)) => {
                cookies.insert(name.trim().to_string(), value.trim().to_string());
            }
            None => {
                warn!(segment = %pair, "Dropping cookie segment without '='");
            }
        }
    }
    cookies
}

/// One outbound `Set-Cookie` header line.
///
/// Handlers either hand back plain name/value pairs, emitted as `name=value`
/// with no implicit attributes, or a pre-formatted attribute string
/// (e.g. `auth=true; Path=/; HttpOnly`) emitted verbatim. The engine never
/// imposes cookie attributes of its own; applications that need `Secure` or
/// `HttpOnly` supply the formatted form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum SetCookie {
    Pair { name: String, value: String },
    Formatted(String),
}

impl SetCookie {
    pub fn pair(name: impl Into<String>, value: impl Into<String>) -> Self {
        SetCookie::Pair {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn formatted(raw: impl Into<String>) -> Self {
        SetCookie::Formatted(raw.into())
    }

    /// The header value after `Set-Cookie: `.
    #[must_use]
    pub fn header_value(&self) -> String {
        match self {
            SetCookie::Pair { name, value } => format_set_cookie(name, value),
            SetCookie::Formatted(raw) => raw.clone(),
        }
    }
}

impl fmt::Display for SetCookie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SetCookie::Pair { name, value } => write!(f, "{name}={value}"),
            SetCookie::Formatted(raw) => f.write_str(raw),
        }
    }
}

/// Serialize a cookie assignment as `name=value`.
#[must_use]
pub fn format_set_cookie(name: &str, value: &str) -> String {
    format!("{name}={value}")
}
