//! REST client: URL building + candidate retry + envelope unwrap

use std::sync::Arc;

use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::ApiConfig;
use crate::envelope;
use crate::error::{ClientError, Result};
use crate::executor::{HttpExecutor, HttpRequest, Method, RawResponse, ReqwestExecutor};
use crate::retry::{transport_candidates, RetryPolicy};
use crate::session::SessionCredentials;
use crate::url::{append_query, build_url};

/// Shared client handed to every workflow service.
///
/// Cheap to clone; holds the configured base URL, the retry policy and the
/// executor behind an `Arc`.
#[derive(Clone)]
pub struct RestClient {
    config: ApiConfig,
    executor: Arc<dyn HttpExecutor>,
    retry: RetryPolicy,
}

impl RestClient {
    pub fn new(config: ApiConfig) -> Self {
        Self::with_executor(config, Arc::new(ReqwestExecutor::new()))
    }

    pub fn with_executor(config: ApiConfig, executor: Arc<dyn HttpExecutor>) -> Self {
        Self {
            config,
            executor,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    /// Builds an absolute endpoint URL from logical path segments.
    pub fn endpoint(&self, segments: &[&str]) -> Result<String> {
        Ok(build_url(self.config.base_url()?, segments))
    }

    /// Executes one logical call across the transport candidates.
    ///
    /// At most `retry.max_attempts` network attempts are made. A candidate is
    /// only skipped to on a connection-level failure; any HTTP response,
    /// error status included, ends the loop. The first transport error is the
    /// one propagated when every candidate fails.
    pub async fn send(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        session: Option<&SessionCredentials>,
        body: Option<serde_json::Value>,
    ) -> Result<RawResponse> {
        let url = append_query(&self.endpoint(segments)?, query);

        let mut headers = vec![("Accept".to_string(), "application/json".to_string())];
        if let Some(session) = session {
            headers.push(("Authorization".to_string(), session.authorization_header()));
        }
        if body.is_some() {
            headers.push(("Content-Type".to_string(), "application/json".to_string()));
        }

        let candidates = transport_candidates(&url, self.retry.max_attempts);
        let mut first_failure = None;
        for (attempt, candidate) in candidates.iter().enumerate() {
            if attempt > 0 {
                warn!(original = %url, fallback = %candidate, "transport failed, retrying on fallback scheme");
            }
            let request = HttpRequest {
                method,
                url: candidate.clone(),
                headers: headers.clone(),
                body: body.clone(),
            };
            match self.executor.execute(&request).await {
                Ok(response) => {
                    debug!(status = response.status, url = %candidate, "response received");
                    return Ok(response);
                }
                Err(failure) => {
                    if first_failure.is_none() {
                        first_failure = Some(failure);
                    }
                }
            }
        }

        let failure = first_failure
            .map(|f| f.to_string())
            .unwrap_or_else(|| "no transport candidate available".to_string());
        Err(ClientError::Transport(failure))
    }

    /// Sends and unwraps the envelope, requiring a payload.
    pub async fn fetch<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        session: Option<&SessionCredentials>,
        body: Option<serde_json::Value>,
    ) -> Result<T> {
        let response = self.send(method, segments, query, session, body).await?;
        envelope::decode_required(&response)
    }

    /// Sends and unwraps the envelope, tolerating null data.
    pub async fn fetch_optional<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        session: Option<&SessionCredentials>,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>> {
        let response = self.send(method, segments, query, session, body).await?;
        envelope::decode(&response)
    }

    /// Sends and unwraps, normalizing "not found" outcomes to `None`.
    ///
    /// HTTP 404 and "not found"-flavored error envelopes both model the
    /// absence of a resource that has simply not been created yet (a
    /// settlement not yet proposed, a contract search miss). A naive caller
    /// that errored here could not tell "nothing there yet" from "backend
    /// down".
    pub async fn fetch_absent_ok<T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        query: &[(&str, String)],
        session: Option<&SessionCredentials>,
        body: Option<serde_json::Value>,
    ) -> Result<Option<T>> {
        let response = self.send(method, segments, query, session, body).await?;
        match envelope::decode(&response) {
            Ok(data) => Ok(data),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }
}
