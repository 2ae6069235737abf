//! Error types for the PharmaPOS client.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PosError {
    /// The HTTP response had a non-2xx status code.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// The server answered 429. Never retried automatically; the hint is
    /// also surfaced on the notification channel.
    #[error("Rate limited by server")]
    RateLimited { retry_after_secs: Option<u64> },

    /// No usable credential — nothing was sent. The session has already
    /// been torn down when this is returned.
    #[error("Not authenticated")]
    Unauthenticated,

    /// No response received at all (DNS, refused connection, timeout).
    #[error("Network error: {0}")]
    Network(String),

    /// An error from the underlying HTTP client.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The configured base URL did not parse.
    #[error("Invalid base URL: {0}")]
    BaseUrl(#[from] url::ParseError),

    /// A generic error string.
    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PosError>;
