//! Settlement & handover operations

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use contracts::service::SIGNATURE_METHOD;
use contracts::{OtpSigner, SignFlow, SignatureRecord};
use transport::{ClientError, Method, RestClient, Result, SessionCredentials};

use crate::models::{HandoverReport, Settlement};

/// Deposit settlement workflow.
#[derive(Clone)]
pub struct SettlementService {
    client: RestClient,
}

impl SettlementService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// The proposed settlement for one order, or `None` when the backend has
    /// not proposed one yet.
    ///
    /// Both an HTTP 404 and a "not found"-flavored error envelope model the
    /// absence of a proposal; treating them as failures would make "no
    /// settlement yet" indistinguishable from "backend down".
    pub async fn settlement_for_order(
        &self,
        session: &SessionCredentials,
        order_id: i64,
    ) -> Result<Option<Settlement>> {
        let settlement: Option<Settlement> = self
            .client
            .fetch_absent_ok(
                Method::Get,
                &["settlements", "order", &order_id.to_string()],
                &[],
                Some(session),
                None,
            )
            .await?;
        if settlement.is_none() {
            debug!(order_id, "no settlement proposed yet");
        }
        Ok(settlement)
    }

    /// Accepts or rejects a proposed settlement with an optional note.
    ///
    /// A single irreversible transition (`PROPOSED → ACCEPTED | REJECTED`);
    /// no undo exists. Responding to an already-resolved settlement surfaces
    /// the backend's own error.
    pub async fn respond(
        &self,
        session: &SessionCredentials,
        settlement_id: i64,
        accepted: bool,
        note: Option<&str>,
    ) -> Result<Settlement> {
        let body = json!({
            "accepted": accepted,
            "note": note.map(str::trim).filter(|n| !n.is_empty()),
        });
        let settlement: Settlement = self
            .client
            .fetch(
                Method::Post,
                &["settlements", &settlement_id.to_string(), "respond"],
                &[],
                Some(session),
                Some(body),
            )
            .await?;
        info!(settlement_id, accepted, "settlement response recorded");
        Ok(settlement)
    }
}

/// Handover report workflow: the same OTP sign protocol as contracts,
/// applied to physical-condition attestations.
#[derive(Clone)]
pub struct HandoverService {
    client: RestClient,
}

impl HandoverService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// All of the customer's handover reports. Null data is an empty list.
    pub async fn reports(&self, session: &SessionCredentials) -> Result<Vec<HandoverReport>> {
        let reports: Option<Vec<HandoverReport>> = self
            .client
            .fetch_optional(
                Method::Get,
                &["customers", "handover-reports"],
                &[],
                Some(session),
                None,
            )
            .await?;
        Ok(reports.unwrap_or_default())
    }

    /// Handover reports scoped to one order.
    pub async fn reports_for_order(
        &self,
        session: &SessionCredentials,
        order_id: i64,
    ) -> Result<Vec<HandoverReport>> {
        let reports: Option<Vec<HandoverReport>> = self
            .client
            .fetch_optional(
                Method::Get,
                &["customers", "handover-reports", "orders", &order_id.to_string()],
                &[],
                Some(session),
                None,
            )
            .await?;
        Ok(reports.unwrap_or_default())
    }

    /// Asks the backend to email a one-time PIN for signing a report.
    pub async fn send_pin(
        &self,
        session: &SessionCredentials,
        report_id: i64,
        email: &str,
    ) -> Result<()> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ClientError::Validation(
                "an email address is required for the signing PIN".into(),
            ));
        }
        let _: Option<serde_json::Value> = self
            .client
            .fetch_optional(
                Method::Post,
                &["customers", "handover-reports", &report_id.to_string(), "pin"],
                &[],
                Some(session),
                Some(json!({ "email": email })),
            )
            .await?;
        info!(report_id, "handover signing PIN requested");
        Ok(())
    }

    /// Submits the PIN as signature proof for a report.
    pub async fn sign(
        &self,
        session: &SessionCredentials,
        report_id: i64,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        let pin = pin_code.trim();
        if pin.is_empty() {
            return Err(ClientError::Validation("the PIN must not be empty".into()));
        }
        let record: SignatureRecord = self
            .client
            .fetch(
                Method::Patch,
                &["customers", "handover-reports", &report_id.to_string(), "signature"],
                &[],
                Some(session),
                Some(json!({
                    "pinCode": pin,
                    "signatureMethod": SIGNATURE_METHOD,
                })),
            )
            .await?;
        info!(report_id, signature_id = record.signature_id, "handover report signed");
        Ok(record)
    }

    /// Caller-held sign workflow for one report.
    pub fn sign_flow(&self, report_id: i64) -> SignFlow<HandoverSigner> {
        SignFlow::new(HandoverSigner {
            service: self.clone(),
            report_id,
        })
    }
}

/// [`OtpSigner`] over one handover report.
pub struct HandoverSigner {
    service: HandoverService,
    report_id: i64,
}

#[async_trait]
impl OtpSigner for HandoverSigner {
    fn describe(&self) -> String {
        format!("handover report {}", self.report_id)
    }

    async fn send_pin(&self, session: &SessionCredentials, email: &str) -> Result<()> {
        self.service.send_pin(session, self.report_id, email).await
    }

    async fn sign(
        &self,
        session: &SessionCredentials,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        self.service.sign(session, self.report_id, pin_code).await
    }
}
