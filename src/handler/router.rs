//! Request routing dispatch module
//!
//! Entry point for HTTP request processing: splits `/api/` traffic from page and
//! asset traffic, validates methods and body size, and writes the access log.

use crate::config::AppState;
use crate::handler::{inquiry, static_files};
use crate::http;
use crate::inquiry::InquiryResponse;
use crate::logger::{self, AccessLogEntry};
use http_body_util::Full;
use hyper::body::{Body, Bytes};
use hyper::{Method, Request, Response, StatusCode};
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

/// Path of the inquiry form endpoint
pub const INQUIRY_PATH: &str = "/api/submit-inquiry";
const API_PREFIX: &str = "/api";

/// Main entry point for HTTP request handling
///
/// Generic over the body so tests can drive it with in-memory bodies.
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
    peer: Option<SocketAddr>,
) -> Result<Response<Full<Bytes>>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let started = Instant::now();
    let access_entry = state
        .config
        .logging
        .access_log
        .then(|| AccessLogEntry::from_request(&req, peer));

    let response = route_request(req, &state).await;
    let response = http::with_server_name(response, &state.config.http.server_name);

    if let Some(mut entry) = access_entry {
        let body_bytes = response
            .body()
            .size_hint()
            .exact()
            .and_then(|n| usize::try_from(n).ok())
            .unwrap_or(0);
        entry.complete(response.status().as_u16(), body_bytes, started);
        logger::log_access(&entry, &state.config.logging.access_log_format);
    }

    Ok(response)
}

fn is_api_path(path: &str) -> bool {
    path == API_PREFIX
        || path
            .strip_prefix(API_PREFIX)
            .is_some_and(|rest| rest.starts_with('/'))
}

/// Route request based on path and method
async fn route_request<B>(req: Request<B>, state: &AppState) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    if is_api_path(&path) {
        let response = route_api(req, &method, &path, state).await;
        return if state.config.http.enable_cors {
            http::with_cors(response)
        } else {
            response
        };
    }

    route_page(&method, &path, state).await
}

async fn route_api<B>(
    req: Request<B>,
    method: &Method,
    path: &str,
    state: &AppState,
) -> Response<Full<Bytes>>
where
    B: Body<Data = Bytes>,
    B::Error: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    match (method, path) {
        (&Method::OPTIONS, _) => {
            http::build_options_response(http::API_METHODS, state.config.http.enable_cors)
        }
        (&Method::POST, INQUIRY_PATH) => {
            if let Some(resp) = check_body_size(&req, state.config.http.max_body_size) {
                return resp;
            }
            inquiry::submit_inquiry(req, state).await
        }
        (_, INQUIRY_PATH) => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            http::build_405_response(http::API_METHODS)
        }
        _ => http::build_json_response(
            StatusCode::NOT_FOUND,
            &InquiryResponse::rejected("Not Found"),
        ),
    }
}

async fn route_page(method: &Method, path: &str, state: &AppState) -> Response<Full<Bytes>> {
    let is_head = match *method {
        Method::GET => false,
        Method::HEAD => true,
        Method::OPTIONS => return http::build_options_response(http::PAGE_METHODS, false),
        _ => {
            logger::log_warning(&format!("Method not allowed: {method} {path}"));
            return http::build_405_response(http::PAGE_METHODS);
        }
    };

    // Health check endpoints (highest priority, always fast)
    let health = &state.config.health;
    if health.enabled && (path == health.liveness_path || path == health.readiness_path) {
        return http::build_health_response("ok");
    }

    let site = &state.config.site;
    if path == "/" {
        return static_files::serve_index(site, is_head).await;
    }

    if static_files::strip_static_prefix(path, &site.static_prefix).is_some() {
        return static_files::serve_static(site, path, is_head).await;
    }

    http::build_404_response()
}

/// Validate Content-Length header and return 413 if exceeded
fn check_body_size<B>(req: &Request<B>, max_body_size: u64) -> Option<Response<Full<Bytes>>> {
    let content_length = req.headers().get("content-length")?;
    content_length.to_str().map_or_else(
        |_| {
            logger::log_warning("Content-Length header contains non-ASCII characters");
            None
        },
        |size_str| match size_str.parse::<u64>() {
            Ok(size) if size > max_body_size => {
                logger::log_warning(&format!(
                    "Request body too large: {size} bytes (max: {max_body_size})"
                ));
                Some(http::build_413_response())
            }
            _ => None,
        },
    )
}
