//! LaunchPad landing site server
//!
//! Serves the marketing landing page with its static assets and accepts contact
//! inquiries on `POST /api/submit-inquiry`.

pub mod config;
pub mod error;
pub mod handler;
pub mod http;
pub mod inquiry;
pub mod logger;
pub mod server;
