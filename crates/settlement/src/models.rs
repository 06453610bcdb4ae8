//! Wire models for settlements and handover reports

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::Deserialize;

/// Where a proposed settlement stands.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SettlementStatus {
    Proposed,
    Accepted,
    Rejected,
    Unknown,
}

impl SettlementStatus {
    pub fn parse(raw: &str) -> SettlementStatus {
        match raw.trim().to_ascii_uppercase().as_str() {
            "PROPOSED" | "PENDING" => SettlementStatus::Proposed,
            "ACCEPTED" => SettlementStatus::Accepted,
            "REJECTED" => SettlementStatus::Rejected,
            _ => SettlementStatus::Unknown,
        }
    }
}

/// The backend's proposed resolution of a security deposit.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settlement {
    pub settlement_id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub deposit_amount_held: Option<Decimal>,
    #[serde(default)]
    pub deduction_amount: Option<Decimal>,
    #[serde(default)]
    pub refund_amount: Option<Decimal>,
    /// Staff rationale for any deduction.
    #[serde(default)]
    pub reason: Option<String>,
    /// Customer note supplied with accept/reject.
    #[serde(default)]
    pub customer_note: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub responded_at: Option<NaiveDateTime>,
}

impl Settlement {
    pub fn status(&self) -> SettlementStatus {
        SettlementStatus::parse(&self.status)
    }

    /// Whether the customer can still respond.
    pub fn is_open(&self) -> bool {
        self.status() == SettlementStatus::Proposed
    }
}

/// Which handover checkpoint a report covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HandoverKind {
    /// Device condition recorded at delivery.
    Checkout,
    /// Device condition recorded at return.
    Checkin,
    Unknown,
}

impl HandoverKind {
    pub fn parse(raw: &str) -> HandoverKind {
        match raw.trim().to_ascii_uppercase().as_str() {
            "CHECKOUT" | "DELIVERY" => HandoverKind::Checkout,
            "CHECKIN" | "RETURN" => HandoverKind::Checkin,
            _ => HandoverKind::Unknown,
        }
    }
}

/// A physical device-condition check, signed by the customer via OTP.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HandoverReport {
    pub report_id: i64,
    pub order_id: i64,
    #[serde(default)]
    pub report_type: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub condition_notes: Option<String>,
    #[serde(default)]
    pub created_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub signed_at: Option<NaiveDateTime>,
}

impl HandoverReport {
    pub fn kind(&self) -> HandoverKind {
        HandoverKind::parse(&self.report_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settlement_status_parsing_is_total() {
        assert_eq!(SettlementStatus::parse("proposed"), SettlementStatus::Proposed);
        assert_eq!(SettlementStatus::parse("ACCEPTED"), SettlementStatus::Accepted);
        assert_eq!(SettlementStatus::parse("REJECTED"), SettlementStatus::Rejected);
        assert_eq!(SettlementStatus::parse("???"), SettlementStatus::Unknown);
    }

    #[test]
    fn handover_kind_accepts_both_vocabularies() {
        assert_eq!(HandoverKind::parse("CHECKOUT"), HandoverKind::Checkout);
        assert_eq!(HandoverKind::parse("delivery"), HandoverKind::Checkout);
        assert_eq!(HandoverKind::parse("CHECKIN"), HandoverKind::Checkin);
        assert_eq!(HandoverKind::parse("return"), HandoverKind::Checkin);
    }

    #[test]
    fn only_proposed_settlements_are_open() {
        let settlement: Settlement = serde_json::from_str(
            r#"{"settlementId":1,"orderId":2,"status":"PROPOSED"}"#,
        )
        .unwrap();
        assert!(settlement.is_open());

        let settled: Settlement = serde_json::from_str(
            r#"{"settlementId":1,"orderId":2,"status":"ACCEPTED"}"#,
        )
        .unwrap();
        assert!(!settled.is_open());
    }
}
