//! Error types for the polysearch crate.
//!
//! Adapter failures are recovered at the adapter boundary and surfaced
//! only as observability signals; the public `search` call fails only
//! on configuration misuse. All errors use stable string messages with
//! no API keys or sensitive data.

/// Errors that can occur during search aggregation.
#[derive(Debug, thiserror::Error)]
pub enum SearchError {
    /// An HTTP request to a search backend failed (connection refused,
    /// reset, DNS failure, non-2xx status).
    #[error("HTTP error: {0}")]
    Http(String),

    /// The backend blocked or rate-limited the request (403/429 status
    /// or a CAPTCHA/consent interstitial in the response body).
    #[error("blocked by engine: {0}")]
    Blocked(String),

    /// An adapter call exceeded its timeout.
    #[error("engine timed out: {0}")]
    Timeout(String),

    /// Expected HTML/JSON structure not found in a backend response.
    #[error("parse error: {0}")]
    Parse(String),

    /// Invalid search configuration. The only variant that reaches the
    /// public API — it indicates a caller bug, not a runtime condition.
    #[error("config error: {0}")]
    Config(String),
}

/// Convenience type alias for polysearch results.
pub type Result<T> = std::result::Result<T, SearchError>;
