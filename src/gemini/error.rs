//! Error types for the Gemini API client.
//!
//! None of these reach the user interface: the insight service turns every
//! failure into a text message.

use thiserror::Error;

/// Errors from calling the `generateContent` endpoint.
#[derive(Debug, Error)]
pub enum GeminiError {
    /// The server returned HTTP 429.
    #[error("rate limited, retry after {retry_after_ms}ms")]
    RateLimited { retry_after_ms: u64 },

    /// Any other non-2xx status (e.g. 400 for a bad key, 500 for a server fault).
    #[error("API error (status {status}): {message}")]
    ApiError { status: u16, message: String },

    /// Network or body decoding failure.
    #[error("network error: {0}")]
    NetworkError(#[from] reqwest::Error),
}
