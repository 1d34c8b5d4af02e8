//! Static file resolution: the fallback path when no route matches.
//!
//! URL paths map to files under one of three storage roots chosen by MIME
//! main type: HTML pages live under the www root, plain text, CSS, and
//! images under the static root, application payloads under the apps root.
//! Resolution confines every lookup to its root: `..` and absolute
//! components are rejected outright, so a crafted path can never escape.

use crate::config::EngineConfig;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use tracing::{debug, warn};

/// Why a static lookup failed.
#[derive(Debug)]
pub enum StaticError {
    /// No file at the resolved location; carries the *requested* URL path.
    NotFound(String),
    /// MIME main type outside the closed {text, image, application} set.
    UnsupportedMime(String),
    /// Filesystem read failed after the path resolved.
    Io(io::Error),
}

impl fmt::Display for StaticError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StaticError::NotFound(path) => write!(f, "File not found: {path}"),
            StaticError::UnsupportedMime(mime) => {
                write!(f, "Unsupported MIME type: {mime}")
            }
            StaticError::Io(err) => write!(f, "Failed to read file: {err}"),
        }
    }
}

impl std::error::Error for StaticError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StaticError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for StaticError {
    fn from(err: io::Error) -> Self {
        StaticError::Io(err)
    }
}

/// Closed set of MIME main types the resolver serves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MimeMain {
    Text,
    Image,
    Application,
}

impl MimeMain {
    fn from_mime(mime: &str) -> Option<Self> {
        match mime.split('/').next().unwrap_or("") {
            "text" => Some(MimeMain::Text),
            "image" => Some(MimeMain::Image),
            "application" => Some(MimeMain::Application),
            _ => None,
        }
    }
}

/// Best-effort MIME type from a file extension.
#[must_use]
pub fn mime_type(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|s| s.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "html" | "htm" => "text/html",
        "css" => "text/css",
        "txt" => "text/plain",
        "js" => "application/javascript",
        "json" => "application/json",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "ico" => "image/x-icon",
        // Recognized but outside the servable main types; resolution
        // turns these into an explicit unsupported-MIME failure.
        "mp4" => "video/mp4",
        "mpeg" | "mpg" => "video/mpeg",
        "mp3" => "audio/mpeg",
        _ => "application/octet-stream",
    }
}

/// Normalize a URL path into the file path to look up.
///
/// Strips the query string, maps `/` to `/index.html`, and appends `.html`
/// when the final segment has no dot, so `/login` serves `/login.html`.
#[must_use]
pub fn normalize_path(url_path: &str) -> String {
    let mut path = url_path.split('?').next().unwrap_or("").to_string();
    if path.is_empty() || path == "/" {
        path = "/index.html".to_string();
    }
    let last_segment = path.rsplit('/').next().unwrap_or("");
    if !last_segment.contains('.') {
        path.push_str(".html");
    }
    path
}

/// Resolver from URL path to file bytes plus MIME type.
#[derive(Debug, Clone)]
pub struct StaticFiles {
    www_dir: PathBuf,
    static_dir: PathBuf,
    apps_dir: PathBuf,
}

impl StaticFiles {
    #[must_use]
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            www_dir: config.www_dir.clone(),
            static_dir: config.static_dir.clone(),
            apps_dir: config.apps_dir.clone(),
        }
    }

    /// Resolve and read the file for a requested URL path.
    ///
    /// Errors carry the requested path (not the normalized file path) so
    /// the 404 body names what the client actually asked for.
    pub fn resolve(&self, url_path: &str) -> Result<(Vec<u8>, &'static str), StaticError> {
        let normalized = normalize_path(url_path);
        let mime = mime_type(Path::new(&normalized));
        let root = self.storage_root(mime)?;

        let file_path = map_path(root, &normalized)
            .ok_or_else(|| StaticError::NotFound(url_path.to_string()))?;
        if !file_path.is_file() {
            warn!(requested = %url_path, resolved = %file_path.display(), "Static file missing");
            return Err(StaticError::NotFound(url_path.to_string()));
        }

        let bytes = fs::read(&file_path)?;
        debug!(
            requested = %url_path,
            resolved = %file_path.display(),
            mime_type = %mime,
            size_bytes = bytes.len(),
            "Serving static file"
        );
        Ok((bytes, mime))
    }

    /// Pick the storage root for a MIME type.
    ///
    /// Sub-type granularity within `text`: HTML under the www root,
    /// everything else (plain, css) under the static root.
    fn storage_root(&self, mime: &str) -> Result<&Path, StaticError> {
        let main = MimeMain::from_mime(mime)
            .ok_or_else(|| StaticError::UnsupportedMime(mime.to_string()))?;
        Ok(match main {
            MimeMain::Text if mime == "text/html" => &self.www_dir,
            MimeMain::Text => &self.static_dir,
            MimeMain::Image => &self.static_dir,
            MimeMain::Application => &self.apps_dir,
        })
    }
}

/// Join a URL path onto a root, admitting only normal components.
///
/// `..`, absolute prefixes, and drive/root components return `None`, which
/// keeps every resolved path confined under the storage root.
fn map_path(root: &Path, url_path: &str) -> Option<PathBuf> {
    let mut resolved = root.to_path_buf();
    for component in Path::new(url_path.trim_start_matches('/')).components() {
        match component {
            Component::Normal(segment) => resolved.push(segment),
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(resolved)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_root_maps_to_index() {
        assert_eq!(normalize_path("/"), "/index.html");
        assert_eq!(normalize_path(""), "/index.html");
    }

    #[test]
    fn test_normalize_appends_html_to_extensionless_path() {
        assert_eq!(normalize_path("/login"), "/login.html");
        assert_eq!(normalize_path("/chat"), "/chat.html");
    }

    #[test]
    fn test_normalize_keeps_paths_with_extension() {
        assert_eq!(normalize_path("/abc.html"), "/abc.html");
        assert_eq!(normalize_path("/style.css"), "/style.css");
    }

    #[test]
    fn test_normalize_strips_query_string() {
        assert_eq!(normalize_path("/login?next=%2F"), "/login.html");
    }

    #[test]
    fn test_mime_type_guess() {
        assert_eq!(mime_type(Path::new("index.html")), "text/html");
        assert_eq!(mime_type(Path::new("logo.png")), "image/png");
        assert_eq!(mime_type(Path::new("data.bin")), "application/octet-stream");
        assert_eq!(mime_type(Path::new("noext")), "application/octet-stream");
    }

    #[test]
    fn test_map_path_rejects_traversal() {
        let root = Path::new("www");
        assert!(map_path(root, "../Cargo.toml").is_none());
        assert!(map_path(root, "a/../../etc/passwd").is_none());
        assert_eq!(
            map_path(root, "sub/page.html"),
            Some(PathBuf::from("www/sub/page.html"))
        );
    }
}
