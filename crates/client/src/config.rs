use std::path::PathBuf;

/// Client configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the REST API, including `/api/v1`.
    pub api_url: String,
    /// Realtime endpoint (`.../api/v1/ws`).
    pub ws_url: String,
    pub email: Option<String>,
    pub password: Option<String>,
    /// Directory holding the JSON cache files.
    pub cache_dir: PathBuf,
}

impl ClientConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var          | Default                           |
    /// |------------------|-----------------------------------|
    /// | `SITE_API_URL`   | `http://localhost:3000/api/v1`    |
    /// | `SITE_WS_URL`    | `ws://localhost:3000/api/v1/ws`   |
    /// | `SITE_EMAIL`     | --                                |
    /// | `SITE_PASSWORD`  | --                                |
    /// | `SITE_CACHE_DIR` | `.site-cache`                     |
    pub fn from_env() -> Self {
        let api_url = std::env::var("SITE_API_URL")
            .unwrap_or_else(|_| "http://localhost:3000/api/v1".into());
        let ws_url =
            std::env::var("SITE_WS_URL").unwrap_or_else(|_| "ws://localhost:3000/api/v1/ws".into());
        let cache_dir = std::env::var("SITE_CACHE_DIR").unwrap_or_else(|_| ".site-cache".into());

        Self {
            api_url: api_url.trim_end_matches('/').to_string(),
            ws_url,
            email: std::env::var("SITE_EMAIL").ok().filter(|s| !s.is_empty()),
            password: std::env::var("SITE_PASSWORD").ok().filter(|s| !s.is_empty()),
            cache_dir: PathBuf::from(cache_dir),
        }
    }
}
