//! Request handler module
//!
//! Responsible for request routing dispatch: the inquiry endpoint plus the landing
//! page and its static assets.

pub mod inquiry;
pub mod router;
pub mod static_files;

// Re-export main entry point
pub use router::{handle_request, INQUIRY_PATH};
