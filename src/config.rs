//! Engine configuration.
//!
//! The storage roots for static resolution are plain directories, settable
//! programmatically or from environment variables:
//!
//! - `WEAPROUS_WWW_DIR`: HTML pages (default `www`)
//! - `WEAPROUS_STATIC_DIR`: plain text, CSS, images (default `static`)
//! - `WEAPROUS_APPS_DIR`: application payloads (default `apps`)
//!
//! Built once at process start and injected into the engine; nothing reads
//! ambient global state afterwards.

use std::env;
use std::path::PathBuf;

/// Storage-root configuration for static file resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Root for HTML pages.
    pub www_dir: PathBuf,
    /// Root for plain-text, CSS, and image assets.
    pub static_dir: PathBuf,
    /// Root for `application/*` payloads.
    pub apps_dir: PathBuf,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            www_dir: PathBuf::from("www"),
            static_dir: PathBuf::from("static"),
            apps_dir: PathBuf::from("apps"),
        }
    }
}

impl EngineConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            www_dir: env_dir("WEAPROUS_WWW_DIR", defaults.www_dir),
            static_dir: env_dir("WEAPROUS_STATIC_DIR", defaults.static_dir),
            apps_dir: env_dir("WEAPROUS_APPS_DIR", defaults.apps_dir),
        }
    }

    /// All three roots under one base directory, keeping the conventional
    /// `www` / `static` / `apps` names.
    #[must_use]
    pub fn under(base: impl Into<PathBuf>) -> Self {
        let base = base.into();
        Self {
            www_dir: base.join("www"),
            static_dir: base.join("static"),
            apps_dir: base.join("apps"),
        }
    }
}

fn env_dir(var: &str, default: PathBuf) -> PathBuf {
    match env::var(var) {
        Ok(val) if !val.is_empty() => PathBuf::from(val),
        _ => default,
    }
}
