//! API base-URL configuration and websocket URL derivation

use crate::error::{ClientError, Result};

/// Environment variable consulted by [`ApiConfig::from_env`].
pub const BASE_URL_ENV: &str = "RENTRO_API_BASE_URL";

/// Configured REST base URL.
///
/// The base may legitimately be unset (e.g. a build without a backend wired
/// in); every lookup then fails with [`ClientError::Configuration`] instead
/// of producing a malformed URL.
#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    base_url: Option<String>,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base = base_url.into();
        let trimmed = base.trim().trim_end_matches('/').to_string();
        Self {
            base_url: if trimmed.is_empty() { None } else { Some(trimmed) },
        }
    }

    /// Reads the base URL from `RENTRO_API_BASE_URL`, tolerating absence.
    pub fn from_env() -> Self {
        match std::env::var(BASE_URL_ENV) {
            Ok(value) => Self::new(value),
            Err(_) => Self::default(),
        }
    }

    /// The normalized base URL, or `Configuration` when none is set.
    pub fn base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .ok_or_else(|| ClientError::Configuration("no API base URL is set".into()))
    }

    /// Derives the websocket endpoint candidates for the chat/notification
    /// collaborators.
    ///
    /// The STOMP broker lives next to the REST API: the `/api` suffix is
    /// stripped, `http(s)` becomes `ws(s)`, and the `/ws/websocket` path is
    /// appended. An `http` base yields a `ws` candidate followed by its `wss`
    /// sibling, mirroring the scheme fallback used for REST calls.
    pub fn websocket_candidates(&self) -> Result<Vec<String>> {
        let base = self.base_url()?;
        let root = base.strip_suffix("/api").unwrap_or(base);

        let mut candidates = Vec::new();
        if let Some(rest) = root.strip_prefix("http://") {
            candidates.push(format!("ws://{}/ws/websocket", rest));
            candidates.push(format!("wss://{}/ws/websocket", rest));
        } else if let Some(rest) = root.strip_prefix("https://") {
            candidates.push(format!("wss://{}/ws/websocket", rest));
        } else {
            return Err(ClientError::Configuration(format!(
                "unsupported base URL scheme: {}",
                root
            )));
        }
        Ok(candidates)
    }
}
