//! Tests for static file resolution against real directories

use std::fs;
use tempfile::TempDir;
use weaprous::{EngineConfig, StaticError, StaticFiles};

fn site() -> (TempDir, StaticFiles) {
    let dir = TempDir::new().unwrap();
    let config = EngineConfig::under(dir.path());
    fs::create_dir_all(&config.www_dir).unwrap();
    fs::create_dir_all(&config.static_dir).unwrap();
    fs::create_dir_all(&config.apps_dir).unwrap();

    fs::write(config.www_dir.join("index.html"), "<h1>Index</h1>").unwrap();
    fs::write(config.www_dir.join("login.html"), "<h1>Login</h1>").unwrap();
    fs::write(config.static_dir.join("style.css"), "body{}").unwrap();
    fs::write(config.static_dir.join("logo.png"), [0x89, 0x50, 0x4e, 0x47]).unwrap();
    fs::write(config.apps_dir.join("bundle.js"), "console.log('hi');").unwrap();

    let files = StaticFiles::new(&config);
    (dir, files)
}

#[test]
fn test_root_serves_index_html() {
    let (_dir, files) = site();
    let (bytes, mime) = files.resolve("/").unwrap();
    assert_eq!(mime, "text/html");
    assert_eq!(bytes, b"<h1>Index</h1>");
}

#[test]
fn test_extensionless_path_gets_html_appended() {
    let (_dir, files) = site();
    let (bytes, mime) = files.resolve("/login").unwrap();
    assert_eq!(mime, "text/html");
    assert_eq!(bytes, b"<h1>Login</h1>");
}

#[test]
fn test_css_served_from_static_root() {
    let (_dir, files) = site();
    let (bytes, mime) = files.resolve("/style.css").unwrap();
    assert_eq!(mime, "text/css");
    assert_eq!(bytes, b"body{}");
}

#[test]
fn test_image_served_from_static_root() {
    let (_dir, files) = site();
    let (_, mime) = files.resolve("/logo.png").unwrap();
    assert_eq!(mime, "image/png");
}

#[test]
fn test_javascript_served_from_apps_root() {
    let (_dir, files) = site();
    let (bytes, mime) = files.resolve("/bundle.js").unwrap();
    assert_eq!(mime, "application/javascript");
    assert_eq!(bytes, b"console.log('hi');");
}

#[test]
fn test_missing_file_names_requested_path() {
    let (_dir, files) = site();
    match files.resolve("/chat") {
        Err(StaticError::NotFound(path)) => assert_eq!(path, "/chat"),
        other => panic!("expected NotFound, got {other:?}"),
    }
}

#[test]
fn test_query_string_ignored() {
    let (_dir, files) = site();
    let (_, mime) = files.resolve("/login?next=%2Fchat").unwrap();
    assert_eq!(mime, "text/html");
}

#[test]
fn test_traversal_confined_to_root() {
    let (dir, files) = site();
    // Plant a secret outside the storage roots; traversal must not reach it.
    fs::write(dir.path().join("secret.css"), "leak{}").unwrap();
    assert!(files.resolve("/../secret.css").is_err());
    assert!(files.resolve("/a/../../secret.css").is_err());
}

#[test]
fn test_unsupported_mime_main_type() {
    let (dir, files) = site();
    let config = EngineConfig::under(dir.path());
    fs::write(config.static_dir.join("clip.mp4"), b"\x00").unwrap();
    match files.resolve("/clip.mp4") {
        Err(StaticError::UnsupportedMime(mime)) => assert_eq!(mime, "video/mp4"),
        other => panic!("expected unsupported MIME failure, got {other:?}"),
    }
}
