// Application state module
// Read-only state shared by every connection

use std::sync::atomic::{AtomicUsize, Ordering};

use super::types::Config;
use crate::error::ServerError;
use crate::inquiry::InquiryValidator;

/// Application state
pub struct AppState {
    pub config: Config,
    pub validator: InquiryValidator,

    // Connections currently being served, checked against `max_connections`
    pub active_connections: AtomicUsize,
}

impl AppState {
    pub fn new(config: Config) -> Result<Self, ServerError> {
        let validator = InquiryValidator::new(config.inquiry.strict_validation)?;

        Ok(Self {
            config,
            validator,
            active_connections: AtomicUsize::new(0),
        })
    }

    pub fn connection_count(&self) -> usize {
        self.active_connections.load(Ordering::SeqCst)
    }
}
