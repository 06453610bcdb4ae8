//! Wire models for contracts, annexes and signature proofs

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// A rental contract. Created server-side once an order reaches a signable
/// state; immutable once signed.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Contract {
    pub contract_id: i64,
    #[serde(default)]
    pub contract_number: Option<String>,
    pub order_id: i64,
    /// Free text: DRAFT / PENDING_SIGNATURE / SIGNED / EXPIRED.
    #[serde(default)]
    pub status: String,
    /// Rich text, opaque to this client.
    #[serde(default)]
    pub contract_content: Option<String>,
    #[serde(default)]
    pub terms_and_conditions: Option<String>,
    #[serde(default)]
    pub start_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub signed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub expires_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub total_amount: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
}

impl Contract {
    pub fn is_signed(&self) -> bool {
        self.status.trim().eq_ignore_ascii_case("SIGNED")
    }
}

/// A contract-scoped amendment covering only the delta being amended. Same
/// trust requirements as the contract itself, hence the same OTP protocol.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractAnnex {
    #[serde(alias = "id")]
    pub annex_id: i64,
    pub contract_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub effective_date: Option<NaiveDateTime>,
    #[serde(default)]
    pub signed_at: Option<NaiveDateTime>,
}

/// Opaque proof produced by a successful sign operation. Stored for display
/// only; the hash is never verified locally.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SignatureRecord {
    pub signature_id: i64,
    #[serde(default)]
    pub contract_id: Option<i64>,
    #[serde(default)]
    pub signature_hash: Option<String>,
    #[serde(default)]
    pub signature_method: Option<String>,
    #[serde(default)]
    pub signed_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub signature_status: Option<String>,
    #[serde(default)]
    pub audit_trail: Option<String>,
}
