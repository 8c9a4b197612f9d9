/// Errors surfaced by the client library.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The HTTP request itself failed (network, DNS, TLS, decoding).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a non-2xx status and an `{error, code}` body.
    #[error("API error ({status} {code}): {message}")]
    Api {
        status: u16,
        code: String,
        message: String,
    },

    #[error("Cache I/O error: {0}")]
    CacheIo(#[from] std::io::Error),

    #[error("Cache entry is not valid JSON: {0}")]
    CacheFormat(#[from] serde_json::Error),

    #[error("Invalid cache key '{0}'")]
    CacheKey(String),

    #[error("WebSocket error: {0}")]
    WebSocket(String),

    /// An authenticated call was made before `login`.
    #[error("Not logged in")]
    NotLoggedIn,
}

impl ClientError {
    /// `true` for an API rejection with the given error code.
    pub fn is_api_code(&self, expected: &str) -> bool {
        matches!(self, ClientError::Api { code, .. } if code == expected)
    }
}
