// Configuration module entry point
// Loads layered configuration and holds the shared runtime state

mod state;
mod types;

use std::net::SocketAddr;

use crate::error::ServerError;

// Re-export public types
pub use state::AppState;
pub use types::{
    Config, HealthConfig, HttpConfig, InquiryConfig, LoggingConfig, PerformanceConfig,
    ServerConfig, SiteConfig,
};

/// Environment variable prefix, e.g. `LAUNCHPAD_SERVER__PORT=9000`
const ENV_PREFIX: &str = "LAUNCHPAD";

impl Config {
    /// Load configuration from specified file path (without extension)
    /// Default config file is "config.toml" when no path specified
    pub fn load_from(config_path: &str) -> Result<Self, config::ConfigError> {
        let settings = with_defaults(config::Config::builder())?
            .add_source(config::File::with_name(config_path).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Configuration built from defaults only, ignoring files and environment
    pub fn defaults() -> Result<Self, config::ConfigError> {
        with_defaults(config::Config::builder())?
            .build()?
            .try_deserialize()
    }

    pub fn get_socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let addr = format!("{}:{}", self.server.host, self.server.port);
        addr.parse()
            .map_err(|e| ServerError::InvalidAddress { addr, source: e })
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> Result<config::ConfigBuilder<config::builder::DefaultState>, config::ConfigError> {
    builder
        .set_default("server.host", "127.0.0.1")?
        .set_default("server.port", 8080)?
        .set_default("logging.level", "info")?
        .set_default("logging.format", "text")?
        .set_default("logging.access_log", true)?
        .set_default("logging.access_log_format", "combined")?
        .set_default("performance.keep_alive", true)?
        .set_default("performance.read_timeout", 30)?
        .set_default("performance.write_timeout", 30)?
        .set_default("performance.shutdown_grace", 10)?
        .set_default("http.server_name", "LaunchPad/1.0")?
        .set_default("http.enable_cors", true)?
        .set_default("http.max_body_size", 1_048_576)? // 1MB
        .set_default("site.index_file", "public/index.html")?
        .set_default("site.static_prefix", "/static")?
        .set_default("site.static_dir", "public/static")?
        .set_default("health.enabled", true)?
        .set_default("health.liveness_path", "/healthz")?
        .set_default("health.readiness_path", "/readyz")?
        .set_default("inquiry.strict_validation", false)
}
