//! Contract & annex operations

use async_trait::async_trait;
use serde_json::json;
use tracing::{debug, info};

use transport::{ClientError, Method, RestClient, Result, SessionCredentials};

use crate::models::{Contract, ContractAnnex, SignatureRecord};
use crate::sign_flow::{OtpSigner, SignFlow};

/// The proof channel declared on every sign payload, binding the PIN
/// dispatch to the signing attempt so the server can correlate the two.
pub const SIGNATURE_METHOD: &str = "EMAIL_OTP";

/// Contract & annex workflow service.
#[derive(Clone)]
pub struct ContractService {
    client: RestClient,
}

impl ContractService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// All contracts belonging to the authenticated customer. Null data is
    /// an empty list.
    pub async fn my_contracts(&self, session: &SessionCredentials) -> Result<Vec<Contract>> {
        let contracts: Option<Vec<Contract>> = self
            .client
            .fetch_optional(
                Method::Get,
                &["contracts", "my-contracts"],
                &[],
                Some(session),
                None,
            )
            .await?;
        Ok(contracts.unwrap_or_default())
    }

    pub async fn contract_by_id(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
    ) -> Result<Contract> {
        self.client
            .fetch(
                Method::Get,
                &["contracts", &contract_id.to_string()],
                &[],
                Some(session),
                None,
            )
            .await
    }

    /// Finds the contract for one order. A miss is a normal empty-result
    /// outcome, not an error.
    pub async fn contract_for_order(
        &self,
        session: &SessionCredentials,
        order_id: i64,
    ) -> Result<Option<Contract>> {
        let contracts = self.my_contracts(session).await?;
        let found = contracts.into_iter().find(|c| c.order_id == order_id);
        if found.is_none() {
            debug!(order_id, "no contract for order yet");
        }
        Ok(found)
    }

    /// Amendments of one contract. Null data is an empty list.
    pub async fn annexes(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
    ) -> Result<Vec<ContractAnnex>> {
        let annexes: Option<Vec<ContractAnnex>> = self
            .client
            .fetch_optional(
                Method::Get,
                &["contracts", &contract_id.to_string(), "annexes"],
                &[],
                Some(session),
                None,
            )
            .await?;
        Ok(annexes.unwrap_or_default())
    }

    /// Asks the backend to email a one-time PIN for signing a contract.
    ///
    /// No local state changes: the PIN lives server-side.
    pub async fn send_contract_pin(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
        email: &str,
    ) -> Result<()> {
        let email = non_empty(email, "an email address is required for the signing PIN")?;
        let _: Option<serde_json::Value> = self
            .client
            .fetch_optional(
                Method::Post,
                &["contracts", &contract_id.to_string(), "send-pin", "email"],
                &[],
                Some(session),
                Some(json!({ "email": email })),
            )
            .await?;
        info!(contract_id, "contract signing PIN requested");
        Ok(())
    }

    /// Submits the PIN as signature proof for a contract.
    pub async fn sign_contract(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        let pin = non_empty(pin_code, "the PIN must not be empty")?;
        let record: SignatureRecord = self
            .client
            .fetch(
                Method::Post,
                &["contracts", &contract_id.to_string(), "sign"],
                &[],
                Some(session),
                Some(json!({
                    "pinCode": pin,
                    "signatureMethod": SIGNATURE_METHOD,
                })),
            )
            .await?;
        info!(contract_id, signature_id = record.signature_id, "contract signed");
        Ok(record)
    }

    /// Asks the backend to email a one-time PIN for signing an annex.
    pub async fn send_annex_pin(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
        annex_id: i64,
        email: &str,
    ) -> Result<()> {
        let email = non_empty(email, "an email address is required for the signing PIN")?;
        let _: Option<serde_json::Value> = self
            .client
            .fetch_optional(
                Method::Post,
                &[
                    "contracts",
                    &contract_id.to_string(),
                    "annexes",
                    &annex_id.to_string(),
                    "send-pin",
                    "email",
                ],
                &[],
                Some(session),
                Some(json!({ "email": email })),
            )
            .await?;
        info!(contract_id, annex_id, "annex signing PIN requested");
        Ok(())
    }

    /// Submits the PIN as signature proof for an annex.
    pub async fn sign_annex(
        &self,
        session: &SessionCredentials,
        contract_id: i64,
        annex_id: i64,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        let pin = non_empty(pin_code, "the PIN must not be empty")?;
        let record: SignatureRecord = self
            .client
            .fetch(
                Method::Post,
                &[
                    "contracts",
                    &contract_id.to_string(),
                    "annexes",
                    &annex_id.to_string(),
                    "sign",
                    "customer",
                ],
                &[],
                Some(session),
                Some(json!({
                    "pinCode": pin,
                    "signatureMethod": SIGNATURE_METHOD,
                })),
            )
            .await?;
        info!(contract_id, annex_id, signature_id = record.signature_id, "annex signed");
        Ok(record)
    }

    /// Caller-held sign workflow for one contract.
    pub fn contract_sign_flow(&self, contract_id: i64) -> SignFlow<ContractSigner> {
        SignFlow::new(ContractSigner {
            service: self.clone(),
            contract_id,
        })
    }

    /// Caller-held sign workflow for one annex.
    pub fn annex_sign_flow(&self, contract_id: i64, annex_id: i64) -> SignFlow<AnnexSigner> {
        SignFlow::new(AnnexSigner {
            service: self.clone(),
            contract_id,
            annex_id,
        })
    }
}

fn non_empty<'a>(value: &'a str, message: &str) -> Result<&'a str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ClientError::Validation(message.into()));
    }
    Ok(trimmed)
}

/// [`OtpSigner`] over one contract.
pub struct ContractSigner {
    service: ContractService,
    contract_id: i64,
}

#[async_trait]
impl OtpSigner for ContractSigner {
    fn describe(&self) -> String {
        format!("contract {}", self.contract_id)
    }

    async fn send_pin(&self, session: &SessionCredentials, email: &str) -> Result<()> {
        self.service
            .send_contract_pin(session, self.contract_id, email)
            .await
    }

    async fn sign(
        &self,
        session: &SessionCredentials,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        self.service
            .sign_contract(session, self.contract_id, pin_code)
            .await
    }
}

/// [`OtpSigner`] over one annex.
pub struct AnnexSigner {
    service: ContractService,
    contract_id: i64,
    annex_id: i64,
}

#[async_trait]
impl OtpSigner for AnnexSigner {
    fn describe(&self) -> String {
        format!("annex {} of contract {}", self.annex_id, self.contract_id)
    }

    async fn send_pin(&self, session: &SessionCredentials, email: &str) -> Result<()> {
        self.service
            .send_annex_pin(session, self.contract_id, self.annex_id, email)
            .await
    }

    async fn sign(
        &self,
        session: &SessionCredentials,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        self.service
            .sign_annex(session, self.contract_id, self.annex_id, pin_code)
            .await
    }
}
