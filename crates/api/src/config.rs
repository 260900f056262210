use std::path::PathBuf;

use capdeck_openai::api::DEFAULT_API_URL;

/// Server configuration loaded from environment variables.
///
/// All fields have sensible defaults suitable for local development.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `127.0.0.1`).
    pub host: String,
    /// Bind port (default: `8000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `120`; must exceed the
    /// 60-second captioning call).
    pub request_timeout_secs: u64,
    /// Where the settings file lives.
    pub settings_path: PathBuf,
    /// Base URL of the captioning API (override for local stubs).
    pub openai_api_url: String,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                | Default                         |
    /// |------------------------|---------------------------------|
    /// | `HOST`                 | `127.0.0.1`                     |
    /// | `PORT`                 | `8000`                          |
    /// | `CORS_ORIGINS`         | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS` | `120`                           |
    /// | `SETTINGS_PATH`        | `capdeck-settings.json`         |
    /// | `OPENAI_API_URL`       | `https://api.openai.com/v1`     |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "120".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let settings_path = std::env::var("SETTINGS_PATH")
            .unwrap_or_else(|_| "capdeck-settings.json".into())
            .into();

        let openai_api_url =
            std::env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.into());

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            settings_path,
            openai_api_url,
        }
    }
}
