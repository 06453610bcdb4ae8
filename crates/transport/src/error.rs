//! Error taxonomy shared by every workflow crate
//!
//! All errors carry a message safe to show directly to an end user. Business
//! failures (a rejected PIN, an already-confirmed return) are never retried
//! automatically; only transport-level failures get the scheme-fallback retry
//! in [`crate::client::RestClient`].

/// Typed client error, classified at the call boundary.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Base URL missing or invalid. Fatal, never retried.
    #[error("client is not configured: {0}")]
    Configuration(String),

    /// Connection-level failure after the transport candidates are exhausted.
    /// Never an HTTP error status.
    #[error("can't reach the server: {0}")]
    Transport(String),

    /// HTTP 401 or an envelope signaling an expired/missing session. Surfaced
    /// distinctly so the UI can prompt re-authentication.
    #[error("your session has expired, please sign in again")]
    Auth,

    /// Client-detected precondition failure. Fails fast, never hits the
    /// network.
    #[error("{0}")]
    Validation(String),

    /// Non-2xx response or an envelope whose status is not SUCCESS. Carries
    /// the HTTP/business status code and the best-available human message
    /// from the error body.
    #[error("{message}")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Whether this error represents a "not found"-flavored API outcome.
    ///
    /// Callers that model absence as a valid state (settlement lookups,
    /// contract search misses) use this to normalize to `None` instead of
    /// propagating an error.
    pub fn is_not_found(&self) -> bool {
        match self {
            ClientError::Api { status: 404, .. } => true,
            ClientError::Api { message, .. } => {
                message.to_ascii_lowercase().contains("not found")
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, ClientError>;
