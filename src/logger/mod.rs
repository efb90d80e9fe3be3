//! Logger module
//!
//! Provides logging utilities for the site server including:
//! - Subscriber setup (text or JSON, stdout or file)
//! - Server lifecycle logging
//! - Access logging with multiple formats
//! - Inquiry audit entries

mod format;

pub use format::AccessLogEntry;

use std::fs::OpenOptions;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, LoggingConfig};
use crate::error::{InquiryError, ServerError};
use crate::inquiry::Inquiry;

/// Initialize the global subscriber with configuration
///
/// Should be called once at application startup. `RUST_LOG` overrides `logging.level`.
pub fn init(config: &LoggingConfig) -> Result<(), ServerError> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| ServerError::Logger(format!("invalid level '{}': {e}", config.level)))?;

    let writer = match config.log_file.as_deref() {
        Some(path) => BoxMakeWriter::new(Mutex::new(open_log_file(path)?)),
        None => BoxMakeWriter::new(std::io::stdout),
    };
    let ansi = config.log_file.is_none();

    let result = if config.format == "json" {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(false)
                    .json(),
            )
            .try_init()
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(writer)
                    .with_ansi(ansi)
                    .with_thread_ids(false)
                    .compact(),
            )
            .try_init()
    };

    result.map_err(|e| ServerError::Logger(e.to_string()))
}

/// Open or create a log file for appending
fn open_log_file(path: &str) -> std::io::Result<std::fs::File> {
    // Create parent directories if they don't exist
    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    OpenOptions::new().create(true).append(true).open(path)
}

pub fn log_server_start(addr: &SocketAddr, config: &Config) {
    tracing::info!(
        addr = %addr,
        workers = ?config.server.workers,
        max_connections = ?config.performance.max_connections,
        max_body_size = config.http.max_body_size,
        strict_validation = config.inquiry.strict_validation,
        "Server started, listening on http://{addr}"
    );
    tracing::info!(
        index = %config.site.index_file,
        static_dir = %config.site.static_dir,
        prefix = %config.site.static_prefix,
        "Serving landing page"
    );
    if let Some(ref path) = config.logging.log_file {
        tracing::info!("Log file: {path}");
    }
}

pub fn log_connection_accepted(peer_addr: &SocketAddr) {
    tracing::debug!("Connection accepted from {peer_addr}");
}

pub fn log_connection_rejected(active: usize, max: u64) {
    tracing::warn!("Max connections reached: {active}/{max}. Connection rejected.");
}

pub fn log_connection_error(err: &impl std::fmt::Debug) {
    tracing::error!("Failed to serve connection: {err:?}");
}

pub fn log_error(message: &str) {
    tracing::error!("{message}");
}

pub fn log_warning(message: &str) {
    tracing::warn!("{message}");
}

/// Log formatted access log entry
pub fn log_access(entry: &AccessLogEntry, format: &str) {
    tracing::info!(target: "access", "{}", entry.format(format));
}

/// Record an accepted inquiry; this is the only trace a submission leaves
pub fn log_inquiry_received(inquiry: &Inquiry) {
    tracing::info!(
        target: "inquiry",
        customer = %inquiry.name,
        email = %inquiry.email,
        phone = %inquiry.phone,
        business_name = %inquiry.business_name,
        requirements = %inquiry.requirements,
        reference = %inquiry.reference,
        "New inquiry received"
    );
}

pub fn log_inquiry_rejected(err: &InquiryError) {
    if err.is_validation() {
        tracing::warn!(target: "inquiry", "Inquiry rejected: {err}");
    } else {
        tracing::error!(target: "inquiry", "Inquiry processing failed: {err}");
    }
}

pub fn log_shutdown_requested(signal: &str) {
    tracing::info!("{signal} received, shutting down");
}

pub fn log_shutdown_complete(remaining: usize) {
    if remaining == 0 {
        tracing::info!("All connections closed, server stopped");
    } else {
        tracing::warn!("Grace period elapsed with {remaining} connection(s) still open");
    }
}
