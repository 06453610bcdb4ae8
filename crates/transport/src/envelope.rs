//! Uniform response envelope
//!
//! Every endpoint wraps its payload as `{status, message, details, code,
//! data}`. A response is successful iff the HTTP status is 2xx **and**
//! `status == "SUCCESS"`; `data` may be legitimately null (empty search
//! results, fire-and-forget acknowledgements). All classification lives in
//! [`decode`] so call sites never re-derive truthiness checks ad hoc.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::{ClientError, Result};
use crate::executor::RawResponse;

pub const STATUS_SUCCESS: &str = "SUCCESS";

/// The backend's uniform success/error wrapper.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Envelope<T> {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub details: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default = "Option::default")]
    pub data: Option<T>,
}

impl<T> Envelope<T> {
    /// Best-available human message from the error body: first non-empty of
    /// `message`/`details`/`error`.
    fn human_message(&self) -> Option<String> {
        [&self.message, &self.details, &self.error]
            .into_iter()
            .flatten()
            .map(|s| s.trim())
            .find(|s| !s.is_empty())
            .map(str::to_string)
    }
}

/// Validates and unwraps one raw response.
///
/// Returns the payload (possibly `None` when the backend legitimately sends
/// null data) or a classified [`ClientError`]:
///
/// - HTTP 401 or an envelope `code` of 401 → [`ClientError::Auth`]
/// - non-2xx or `status != "SUCCESS"` → [`ClientError::Api`] with the
///   best-available message, falling back to `"(status N)"` when the body is
///   unparseable or silent
pub fn decode<T: DeserializeOwned>(response: &RawResponse) -> Result<Option<T>> {
    if response.status == 401 {
        return Err(ClientError::Auth);
    }

    let http_ok = (200..300).contains(&response.status);
    let envelope: Envelope<T> = match serde_json::from_str(&response.body) {
        Ok(envelope) => envelope,
        Err(_) => {
            return Err(ClientError::Api {
                status: response.status,
                message: format!("(status {})", response.status),
            });
        }
    };

    if envelope.code == Some(401) {
        return Err(ClientError::Auth);
    }

    if http_ok && envelope.status.as_deref() == Some(STATUS_SUCCESS) {
        return Ok(envelope.data);
    }

    let message = envelope
        .human_message()
        .unwrap_or_else(|| format!("(status {})", response.status));
    Err(ClientError::Api {
        status: response.status,
        message,
    })
}

/// Like [`decode`], but requires the payload to be present.
pub fn decode_required<T: DeserializeOwned>(response: &RawResponse) -> Result<T> {
    decode(response)?.ok_or_else(|| ClientError::Api {
        status: response.status,
        message: "response carried no data".into(),
    })
}
