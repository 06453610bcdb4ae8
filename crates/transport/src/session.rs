//! Session credentials supplied per call
//!
//! The session lifecycle (login, refresh, storage) is owned by an external
//! auth collaborator. This core only consumes `{accessToken, tokenType}` to
//! format the Authorization header; credentials are never persisted here.

use serde::{Deserialize, Serialize};

/// Bearer credentials for one authenticated call.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionCredentials {
    pub access_token: String,

    /// Token scheme reported by the auth backend. Defaults to `Bearer` when
    /// absent.
    #[serde(default)]
    pub token_type: Option<String>,
}

impl SessionCredentials {
    pub fn new(access_token: impl Into<String>, token_type: Option<String>) -> Self {
        Self {
            access_token: access_token.into(),
            token_type,
        }
    }

    /// Formats the `Authorization` header value: `{tokenType|Bearer} {accessToken}`.
    pub fn authorization_header(&self) -> String {
        let scheme = self
            .token_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or("Bearer");
        format!("{} {}", scheme, self.access_token)
    }
}
