//! HTTP protocol layer module
//!
//! Response builders and content typing shared by the page server and the inquiry endpoint.

pub mod mime;
pub mod response;

// Re-export commonly used types
pub use response::{
    build_404_response, build_405_response, build_413_response, build_content_response,
    build_health_response, build_json_response, build_options_response, with_cors,
    with_server_name, API_METHODS, PAGE_METHODS,
};
