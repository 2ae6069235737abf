//! Client configuration loaded from environment variables and config files.
//!
//! Supports `.env` files for development and environment variables for
//! production. Config precedence: env vars > .env file > config.toml > defaults

use serde::Deserialize;

/// Load the client configuration.
///
/// Unlike server-side config there is no global accessor here: the
/// composition root loads this once and hands the relevant pieces to the
/// client constructor, which keeps everything injectable in tests.
pub fn load() -> Result<AppConfig, config::ConfigError> {
    // Load .env file if present (development)
    let _ = dotenvy::dotenv();

    let cfg = config::Config::builder()
        // Defaults
        .set_default("api.base_url", "http://localhost:8080/api")?
        .set_default("api.timeout_secs", 30)?
        .set_default("session.store_path", "pharmapos-session.json")?
        // Optional config file
        .add_source(config::File::with_name("config").required(false))
        // Environment variables (PHARMAPOS_API__BASE_URL, etc.)
        .add_source(
            config::Environment::with_prefix("PHARMAPOS")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    cfg.try_deserialize()
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub session: SessionConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL of the PharmaPOS backend, including the `/api` prefix.
    pub base_url: String,
    /// Per-request timeout applied by the HTTP transport.
    pub timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SessionConfig {
    /// Path of the durable credential store file.
    pub store_path: String,
}
