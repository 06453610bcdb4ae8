//! Contract/annex signing scenarios against a backend double that tracks
//! which targets have a PIN outstanding, mirroring the server-side ordering
//! rule.

use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::Mutex;
use transport::{
    ApiConfig, ClientError, HttpExecutor, HttpRequest, RawResponse, RestClient,
    SessionCredentials, TransportFailure,
};

use contracts::{ContractService, SignState};

const MY_CONTRACTS: &str = include_str!("fixtures/my_contracts.json");

/// Simulates the backend's PIN bookkeeping: `send-pin` marks the target,
/// `sign` succeeds only for marked targets.
struct SigningBackend {
    pins_outstanding: Mutex<Vec<String>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl SigningBackend {
    fn new() -> Self {
        Self {
            pins_outstanding: Mutex::new(Vec::new()),
            requests: Mutex::new(Vec::new()),
        }
    }

    fn target_of(url: &str) -> String {
        // Everything between the API base and the trailing protocol verb
        // identifies the target (contract or annex path).
        url.trim_end_matches("/send-pin/email")
            .trim_end_matches("/sign/customer")
            .trim_end_matches("/sign")
            .to_string()
    }
}

#[async_trait]
impl HttpExecutor for SigningBackend {
    async fn execute(&self, request: &HttpRequest) -> Result<RawResponse, TransportFailure> {
        self.requests.lock().push(request.clone());
        let url = request.url.as_str();

        if url.ends_with("/my-contracts") {
            return Ok(RawResponse {
                status: 200,
                body: MY_CONTRACTS.to_string(),
            });
        }

        if url.ends_with("/send-pin/email") {
            self.pins_outstanding.lock().push(Self::target_of(url));
            return Ok(RawResponse {
                status: 200,
                body: r#"{"status":"SUCCESS","message":"PIN sent","data":null}"#.to_string(),
            });
        }

        if url.ends_with("/sign") || url.ends_with("/sign/customer") {
            let target = Self::target_of(url);
            let mut outstanding = self.pins_outstanding.lock();
            if let Some(position) = outstanding.iter().position(|t| *t == target) {
                outstanding.remove(position);
                return Ok(RawResponse {
                    status: 200,
                    body: r#"{
                        "status": "SUCCESS",
                        "data": {
                            "signatureId": 900,
                            "contractId": 11,
                            "signatureHash": "c0ffee",
                            "signatureMethod": "EMAIL_OTP",
                            "signatureStatus": "VALID"
                        }
                    }"#
                    .to_string(),
                });
            }
            return Ok(RawResponse {
                status: 400,
                body: r#"{"status":"PIN_NOT_REQUESTED","message":"no PIN was requested for this document","data":null}"#
                    .to_string(),
            });
        }

        Ok(RawResponse {
            status: 404,
            body: r#"{"status":"NOT_FOUND","message":"no route","data":null}"#.to_string(),
        })
    }
}

fn service(backend: Arc<SigningBackend>) -> ContractService {
    let client = RestClient::with_executor(ApiConfig::new("https://api.example.com/api"), backend);
    ContractService::new(client)
}

fn session() -> SessionCredentials {
    SessionCredentials::new("token-1", None)
}

#[tokio::test]
async fn contract_sign_flow_happy_path() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend.clone());

    let mut flow = contracts.contract_sign_flow(11);
    flow.request_pin(&session(), "user@example.com").await.unwrap();
    let record = flow.submit_pin(&session(), "482913").await.unwrap();

    assert_eq!(record.signature_id, 900);
    assert_eq!(record.signature_method.as_deref(), Some("EMAIL_OTP"));
    assert_eq!(flow.state(), SignState::Signed);

    // The sign payload binds the channel to the proof.
    let sign_request = backend
        .requests
        .lock()
        .iter()
        .find(|r| r.url.ends_with("/sign"))
        .cloned()
        .expect("sign request issued");
    let body = sign_request.body.unwrap();
    assert_eq!(body["signatureMethod"], "EMAIL_OTP");
    assert_eq!(body["pinCode"], "482913");
}

#[tokio::test]
async fn direct_sign_without_pin_is_rejected_by_the_server_as_api_error() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend);

    // Bypassing the flow goes straight to the server, which rejects the
    // out-of-order attempt; the client surfaces it typed, not as a crash.
    let err = contracts
        .sign_contract(&session(), 11, "482913")
        .await
        .unwrap_err();
    match err {
        ClientError::Api { status, message } => {
            assert_eq!(status, 400);
            assert_eq!(message, "no PIN was requested for this document");
        }
        other => panic!("expected Api, got {:?}", other),
    }
}

#[tokio::test]
async fn annex_reuses_the_same_protocol_on_its_own_endpoints() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend.clone());

    let mut flow = contracts.annex_sign_flow(11, 3);
    flow.request_pin(&session(), "user@example.com").await.unwrap();
    flow.submit_pin(&session(), "771204").await.unwrap();
    assert_eq!(flow.state(), SignState::Signed);

    let urls: Vec<String> = backend.requests.lock().iter().map(|r| r.url.clone()).collect();
    assert!(urls
        .iter()
        .any(|u| u.ends_with("/contracts/11/annexes/3/send-pin/email")));
    assert!(urls
        .iter()
        .any(|u| u.ends_with("/contracts/11/annexes/3/sign/customer")));
}

#[tokio::test]
async fn contract_search_miss_is_an_empty_result() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend);

    let found = contracts
        .contract_for_order(&session(), 999)
        .await
        .expect("miss is not an error");
    assert!(found.is_none());
}

#[tokio::test]
async fn contract_lookup_by_order_finds_a_match() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend);

    let found = contracts
        .contract_for_order(&session(), 101)
        .await
        .unwrap()
        .expect("order 101 has a contract");
    assert_eq!(found.contract_id, 11);
    assert!(!found.is_signed());
}

#[tokio::test]
async fn blank_email_never_reaches_the_network() {
    let backend = Arc::new(SigningBackend::new());
    let contracts = service(backend.clone());

    let err = contracts
        .send_contract_pin(&session(), 11, "  ")
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::Validation(_)));
    assert!(backend.requests.lock().is_empty());
}
