//! View-driven fetches discard results that arrive after teardown.

use std::sync::Arc;

use async_trait::async_trait;
use transport::{
    ApiConfig, HttpExecutor, HttpRequest, Liveness, LivenessGuard, Method, RawResponse,
    RestClient, TransportFailure,
};

struct SlowBackend;

#[async_trait]
impl HttpExecutor for SlowBackend {
    async fn execute(&self, _request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        Ok(RawResponse {
            status: 200,
            body: r#"{"status":"SUCCESS","data":{"contractId":11}}"#.to_string(),
        })
    }
}

/// The caller-side pattern: capture a token before the await, check it after,
/// and silently drop (not error on) a stale result.
async fn load_if_live(client: &RestClient, token: Liveness) -> Option<serde_json::Value> {
    let result: serde_json::Value = client
        .fetch(Method::Get, &["contracts", "11"], &[], None, None)
        .await
        .ok()?;
    if !token.is_live() {
        return None;
    }
    Some(result)
}

#[tokio::test]
async fn live_context_applies_the_result() {
    let client = RestClient::with_executor(
        ApiConfig::new("https://api.example.com/api"),
        Arc::new(SlowBackend),
    );
    let guard = LivenessGuard::new();

    let applied = load_if_live(&client, guard.token()).await;
    assert!(applied.is_some());
}

#[tokio::test]
async fn torn_down_context_discards_the_result() {
    let client = RestClient::with_executor(
        ApiConfig::new("https://api.example.com/api"),
        Arc::new(SlowBackend),
    );
    let guard = LivenessGuard::new();
    let token = guard.token();

    // The triggering view goes away while the request is in flight.
    drop(guard);

    let applied = load_if_live(&client, token).await;
    assert!(applied.is_none());
}
