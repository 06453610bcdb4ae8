//! Settlement and handover scenarios against an in-memory backend double.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use transport::{
    ApiConfig, ClientError, HttpExecutor, HttpRequest, RawResponse, RestClient,
    SessionCredentials, TransportFailure,
};

use settlement::{HandoverKind, HandoverService, SettlementService, SettlementStatus};

const SETTLEMENT_PROPOSED: &str = include_str!("fixtures/settlement_proposed.json");
const HANDOVER_REPORTS: &str = include_str!("fixtures/handover_reports.json");

struct StubBackend {
    routes: Vec<(&'static str, u16, String)>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl StubBackend {
    fn new(routes: Vec<(&'static str, u16, String)>) -> Self {
        Self {
            routes,
            requests: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl HttpExecutor for StubBackend {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        self.requests.lock().push(request.clone());
        for (fragment, status, body) in &self.routes {
            if request.url.contains(fragment) {
                return Ok(RawResponse {
                    status: *status,
                    body: body.clone(),
                });
            }
        }
        Ok(RawResponse {
            status: 404,
            body: r#"{"status":"NOT_FOUND","message":"no route","data":null}"#.to_string(),
        })
    }
}

fn client(backend: Arc<StubBackend>) -> RestClient {
    RestClient::with_executor(ApiConfig::new("https://api.example.com/api"), backend)
}

fn session() -> SessionCredentials {
    SessionCredentials::new("token-1", None)
}

#[tokio::test]
async fn absent_settlement_is_none_not_an_error() {
    let backend = Arc::new(StubBackend::new(vec![(
        "/settlements/order/999",
        404,
        r#"{"status":"NOT_FOUND","message":"Settlement not found for order","data":null}"#
            .to_string(),
    )]));
    let settlements = SettlementService::new(client(backend));

    let result = settlements
        .settlement_for_order(&session(), 999)
        .await
        .expect("absence is a valid state");
    assert!(result.is_none());
}

#[tokio::test]
async fn proposed_settlement_deserializes_and_is_open() {
    let backend = Arc::new(StubBackend::new(vec![(
        "/settlements/order/101",
        200,
        SETTLEMENT_PROPOSED.to_string(),
    )]));
    let settlements = SettlementService::new(client(backend));

    let proposed = settlements
        .settlement_for_order(&session(), 101)
        .await
        .unwrap()
        .expect("settlement exists");
    assert_eq!(proposed.settlement_id, 71);
    assert_eq!(proposed.status(), SettlementStatus::Proposed);
    assert!(proposed.is_open());
}

#[tokio::test]
async fn responding_posts_the_decision_and_trimmed_note() {
    let backend = Arc::new(StubBackend::new(vec![(
        "/settlements/71/respond",
        200,
        r#"{
            "status": "SUCCESS",
            "data": {"settlementId": 71, "orderId": 101, "status": "REJECTED", "customerNote": "scratch was pre-existing"}
        }"#
        .to_string(),
    )]));
    let settlements = SettlementService::new(client(backend.clone()));

    let resolved = settlements
        .respond(&session(), 71, false, Some("  scratch was pre-existing  "))
        .await
        .unwrap();
    assert_eq!(resolved.status(), SettlementStatus::Rejected);

    let body = backend.requests.lock()[0].body.clone().unwrap();
    assert_eq!(body["accepted"], false);
    assert_eq!(body["note"], "scratch was pre-existing");
}

#[tokio::test]
async fn handover_reports_scope_to_an_order() {
    let backend = Arc::new(StubBackend::new(vec![(
        "/customers/handover-reports/orders/101",
        200,
        HANDOVER_REPORTS.to_string(),
    )]));
    let handover = HandoverService::new(client(backend));

    let reports = handover.reports_for_order(&session(), 101).await.unwrap();
    assert_eq!(reports.len(), 2);
    assert_eq!(reports[0].kind(), HandoverKind::Checkout);
    assert_eq!(reports[1].kind(), HandoverKind::Checkin);
}

#[tokio::test]
async fn handover_sign_flow_uses_pin_then_signature_endpoints() {
    let backend = Arc::new(StubBackend::new(vec![
        (
            "/customers/handover-reports/55/pin",
            200,
            r#"{"status":"SUCCESS","message":"PIN sent","data":null}"#.to_string(),
        ),
        (
            "/customers/handover-reports/55/signature",
            200,
            r#"{"status":"SUCCESS","data":{"signatureId":901,"signatureMethod":"EMAIL_OTP"}}"#
                .to_string(),
        ),
    ]));
    let handover = HandoverService::new(client(backend.clone()));

    let mut flow = handover.sign_flow(55);
    flow.request_pin(&session(), "user@example.com").await.unwrap();
    let record = flow.submit_pin(&session(), "204981").await.unwrap();
    assert_eq!(record.signature_id, 901);

    let requests = backend.requests.lock();
    assert!(requests[0].url.ends_with("/customers/handover-reports/55/pin"));
    assert_eq!(requests[1].method, transport::Method::Patch);
    assert!(requests[1].url.ends_with("/customers/handover-reports/55/signature"));
}

#[tokio::test]
async fn transport_outage_is_not_mistaken_for_absence() {
    struct DownExecutor;

    #[async_trait]
    impl HttpExecutor for DownExecutor {
        async fn execute(&self, _request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
            Err(TransportFailure("connection refused".into()))
        }
    }

    let rest = RestClient::with_executor(
        ApiConfig::new("https://api.example.com/api"),
        Arc::new(DownExecutor),
    );
    let settlements = SettlementService::new(rest);

    let err = settlements
        .settlement_for_order(&session(), 101)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
}
