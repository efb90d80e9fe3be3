//! Static file serving module
//!
//! Serves the landing page and the assets under the static prefix, typed by extension.

use crate::config::SiteConfig;
use crate::http::{self, mime};
use crate::logger;
use http_body_util::Full;
use hyper::body::Bytes;
use hyper::Response;
use std::path::{Component, Path, PathBuf};
use tokio::fs;

/// Landing page compiled into the binary, served when `site.index_file` is unreadable
const EMBEDDED_INDEX: &str = include_str!("../../public/index.html");

/// Serve the landing page markup
pub async fn serve_index(site: &SiteConfig, is_head: bool) -> Response<Full<Bytes>> {
    let content = match fs::read(&site.index_file).await {
        Ok(c) => Bytes::from(c),
        Err(e) => {
            tracing::debug!(
                "Index file '{}' unavailable ({e}), serving built-in page",
                site.index_file
            );
            Bytes::from_static(EMBEDDED_INDEX.as_bytes())
        }
    };

    http::build_content_response(content, "text/html; charset=utf-8", is_head)
}

/// Serve a file from the static directory
pub async fn serve_static(site: &SiteConfig, path: &str, is_head: bool) -> Response<Full<Bytes>> {
    match load_from_directory(&site.static_dir, path, &site.static_prefix).await {
        Some((content, content_type)) => {
            http::build_content_response(Bytes::from(content), content_type, is_head)
        }
        None => http::build_404_response(),
    }
}

/// Part of `path` below the static prefix, or `None` when the path is outside it
pub fn strip_static_prefix<'a>(path: &'a str, prefix: &str) -> Option<&'a str> {
    let prefix = prefix.trim_end_matches('/');
    path.strip_prefix(prefix)?.strip_prefix('/')
}

/// Resolve a request path to a relative file path, refusing anything but plain names
fn relative_asset_path(relative: &str) -> Option<PathBuf> {
    let candidate = Path::new(relative);
    if relative.is_empty() || candidate.components().any(|c| !matches!(c, Component::Normal(_))) {
        return None;
    }
    Some(candidate.to_path_buf())
}

/// Load static file from directory
pub async fn load_from_directory(
    static_dir: &str,
    path: &str,
    route_prefix: &str,
) -> Option<(Vec<u8>, &'static str)> {
    let relative = strip_static_prefix(path, route_prefix)?;
    let Some(relative) = relative_asset_path(relative) else {
        logger::log_warning(&format!("Rejected static path: {path}"));
        return None;
    };

    let static_dir_canonical = match Path::new(static_dir).canonicalize() {
        Ok(p) => p,
        Err(e) => {
            logger::log_warning(&format!(
                "Static directory not found or inaccessible '{static_dir}': {e}"
            ));
            return None;
        }
    };

    // File not found is common (404), no need to log at warning level
    let file_path = static_dir_canonical.join(relative).canonicalize().ok()?;

    // Symlinks may still point outside the directory
    if !file_path.starts_with(&static_dir_canonical) {
        logger::log_warning(&format!(
            "Path traversal attempt blocked: {} -> {}",
            path,
            file_path.display()
        ));
        return None;
    }
    if !file_path.is_file() {
        return None;
    }

    let content = match fs::read(&file_path).await {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!(
                "Failed to read file '{}': {}",
                file_path.display(),
                e
            ));
            return None;
        }
    };

    Some((content, mime::content_type_for(&file_path)))
}
