//! Error types
//!
//! `InquiryError` covers everything the inquiry endpoint can report to a caller;
//! `ServerError` covers startup failures.

use hyper::StatusCode;
use thiserror::Error;

/// Message returned to callers for any processing failure; the cause is only logged
pub const PROCESSING_ERROR_MESSAGE: &str = "Failed to process your request. Please try again.";

#[derive(Debug, Error)]
pub enum InquiryError {
    /// A required field is absent or empty
    #[error("{0} is required")]
    MissingField(&'static str),

    /// A required field is present but malformed (strict mode only)
    #[error("{message}")]
    InvalidField {
        field: &'static str,
        message: &'static str,
    },

    #[error("Failed to read request body: {0}")]
    Body(String),

    #[error("Invalid JSON payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Request body is JSON null")]
    NullBody,
}

impl InquiryError {
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::MissingField(_) | Self::InvalidField { .. } => StatusCode::BAD_REQUEST,
            Self::Body(_) | Self::Json(_) | Self::NullBody => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::MissingField(_) | Self::InvalidField { .. })
    }

    /// Text placed in the `error` field of the JSON response
    pub fn public_message(&self) -> String {
        if self.is_validation() {
            self.to_string()
        } else {
            PROCESSING_ERROR_MESSAGE.to_string()
        }
    }
}

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("Invalid address '{addr}': {source}")]
    InvalidAddress {
        addr: String,
        source: std::net::AddrParseError,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid validation pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("Logger setup failed: {0}")]
    Logger(String),
}
