//! Wire models for rental orders
//!
//! Field presence mirrors the backend: most monetary and descriptive fields
//! are nullable, so they deserialize into `Option` with defaults instead of
//! failing the whole payload. Orders are never mutated locally beyond
//! optimistic cache replacement; the backend owns every status transition.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::status::{normalize_status, NormalizedStatus};

/// One line of an order: a device model and how many units of it.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetail {
    #[serde(default)]
    pub order_detail_id: Option<i64>,
    pub device_model_id: i64,
    pub quantity: u32,
    #[serde(default)]
    pub price_per_day: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount_per_unit: Option<Decimal>,
}

/// A rental order as reported by the backend.
///
/// The time-of-day-aware variant of the API names the window
/// `planStartDate`/`planEndDate`; both spellings land on the same fields.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RentalOrder {
    pub order_id: i64,
    #[serde(alias = "planStartDate")]
    pub start_date: NaiveDateTime,
    #[serde(alias = "planEndDate")]
    pub end_date: NaiveDateTime,
    /// Free-form backend status; use [`RentalOrder::status`] for display.
    #[serde(default)]
    pub order_status: String,
    #[serde(default)]
    pub total_price: Option<Decimal>,
    #[serde(default)]
    pub price_per_day: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount_held: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount_used: Option<Decimal>,
    #[serde(default)]
    pub deposit_amount_refunded: Option<Decimal>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub order_details: Vec<OrderDetail>,
}

impl RentalOrder {
    /// The normalized lifecycle status.
    pub fn status(&self) -> NormalizedStatus {
        normalize_status(&self.order_status)
    }

    /// Deposit still held by the platform: held − used − refunded.
    ///
    /// The backend maintains this as non-negative; a negative value here
    /// indicates a reconciliation bug upstream and is worth logging, not
    /// clamping.
    pub fn deposit_outstanding(&self) -> Decimal {
        self.deposit_amount_held.unwrap_or_default()
            - self.deposit_amount_used.unwrap_or_default()
            - self.deposit_amount_refunded.unwrap_or_default()
    }
}

/// One page of a paginated search.
#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(default = "Vec::new")]
    pub content: Vec<T>,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub last: bool,
}
