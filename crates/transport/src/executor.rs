//! Pluggable HTTP execution
//!
//! The wire I/O sits behind [`HttpExecutor`] so every workflow service can be
//! driven by an in-memory double in tests. The production implementation is
//! [`ReqwestExecutor`], which reuses one pooled `reqwest::Client`.
//!
//! A [`TransportFailure`] is strictly a connection-level failure (refused,
//! reset, DNS, timeout). An HTTP error status is a *successful* execution
//! whose classification belongs to the envelope layer.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// HTTP method subset used by the backend API.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

/// One fully-built request, ready for execution against a candidate URL.
#[derive(Clone, Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    /// Header name/value pairs; Authorization is added here by the client.
    pub headers: Vec<(String, String)>,
    pub body: Option<serde_json::Value>,
}

/// Raw response body + status, before envelope validation.
#[derive(Clone, Debug)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

/// Connection-level failure. Never carries an HTTP status.
#[derive(Clone, Debug)]
pub struct TransportFailure(pub String);

impl std::fmt::Display for TransportFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[async_trait]
pub trait HttpExecutor: Send + Sync {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure>;
}

/// Production executor over a pooled `reqwest::Client`.
pub struct ReqwestExecutor {
    client: Client,
}

impl ReqwestExecutor {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpExecutor for ReqwestExecutor {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        debug!(method = request.method.as_str(), url = %request.url, "dispatching request");

        let mut builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
            Method::Patch => self.client.patch(&request.url),
        };
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| TransportFailure(e.to_string()))?;
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| TransportFailure(e.to_string()))?;

        Ok(RawResponse { status, body })
    }
}
