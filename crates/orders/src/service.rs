//! Order lifecycle operations

use chrono::NaiveDateTime;
use serde::Serialize;
use serde_json::json;
use tracing::{debug, info};

use transport::{ClientError, Method, RestClient, Result, SessionCredentials};

use crate::models::{Page, RentalOrder};
use crate::status::{normalize_status, requires_kyc};

/// Wire timestamp format the backend expects: bare local date-time, no zone
/// suffix. A zone-suffixed timestamp gets silently misinterpreted
/// server-side, so the suffix is stripped by formatting explicitly.
const WIRE_TIMESTAMP: &str = "%Y-%m-%dT%H:%M:%S";

fn wire_timestamp(value: NaiveDateTime) -> String {
    value.format(WIRE_TIMESTAMP).to_string()
}

/// One requested order line.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDetailRequest {
    pub device_model_id: i64,
    pub quantity: u32,
}

/// Payload for placing a new order.
#[derive(Clone, Debug)]
pub struct CreateOrderRequest {
    pub start_date: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub shipping_address: String,
    pub order_details: Vec<OrderDetailRequest>,
}

/// Paginated search parameters.
#[derive(Clone, Debug, Default)]
pub struct SearchParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub status: Option<String>,
    pub sort: Option<String>,
}

impl SearchParams {
    fn query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(page) = self.page {
            pairs.push(("page", page.to_string()));
        }
        if let Some(size) = self.size {
            pairs.push(("size", size.to_string()));
        }
        if let Some(status) = &self.status {
            pairs.push(("orderStatus", status.clone()));
        }
        if let Some(sort) = &self.sort {
            pairs.push(("sort", sort.clone()));
        }
        pairs
    }
}

/// Where the UI should route after observing an order's status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OrderRoute {
    /// `PENDING_KYC`: the customer must finish identity verification before
    /// anything else.
    IdentityVerification,
    /// Return confirmed / settlement pending: drive the deposit settlement
    /// workflow.
    Settlement,
    /// Everything else renders the regular order detail.
    Detail,
}

impl OrderRoute {
    pub fn for_status(raw_status: &str) -> OrderRoute {
        if requires_kyc(raw_status) {
            return OrderRoute::IdentityVerification;
        }
        let upper = raw_status.trim().to_ascii_uppercase();
        if upper == "RETURN_CONFIRMED" || upper == "SETTLEMENT_PENDING" {
            return OrderRoute::Settlement;
        }
        OrderRoute::Detail
    }

    pub fn for_order(order: &RentalOrder) -> OrderRoute {
        Self::for_status(&order.order_status)
    }
}

/// Order lifecycle service.
///
/// Stateless beyond the shared [`RestClient`]; credentials are passed per
/// call and nothing authoritative is cached locally.
#[derive(Clone)]
pub struct OrderService {
    client: RestClient,
}

impl OrderService {
    pub fn new(client: RestClient) -> Self {
        Self { client }
    }

    /// Places a new rental order.
    ///
    /// Preconditions checked before any network call: at least one order
    /// detail, a window with `end > start`, a non-blank shipping address.
    pub async fn create_order(
        &self,
        session: &SessionCredentials,
        request: &CreateOrderRequest,
    ) -> Result<RentalOrder> {
        if request.order_details.is_empty() {
            return Err(ClientError::Validation(
                "add at least one device to the order".into(),
            ));
        }
        if request.end_date <= request.start_date {
            return Err(ClientError::Validation(
                "the rental end date must be after the start date".into(),
            ));
        }
        if request.shipping_address.trim().is_empty() {
            return Err(ClientError::Validation(
                "a shipping address is required".into(),
            ));
        }

        let body = json!({
            "startDate": wire_timestamp(request.start_date),
            "endDate": wire_timestamp(request.end_date),
            "shippingAddress": request.shipping_address.trim(),
            "orderDetails": &request.order_details,
        });

        let order: RentalOrder = self
            .client
            .fetch(Method::Post, &["rental-orders"], &[], Some(session), Some(body))
            .await?;
        info!(
            order_id = order.order_id,
            status = %order.order_status,
            bucket = normalize_status(&order.order_status).bucket.display(),
            "order created"
        );
        Ok(order)
    }

    /// Lists the customer's orders. Null data is an empty list.
    pub async fn list_orders(&self, session: &SessionCredentials) -> Result<Vec<RentalOrder>> {
        let orders: Option<Vec<RentalOrder>> = self
            .client
            .fetch_optional(Method::Get, &["rental-orders"], &[], Some(session), None)
            .await?;
        Ok(orders.unwrap_or_default())
    }

    /// Paginated order search.
    pub async fn search_orders(
        &self,
        session: &SessionCredentials,
        params: &SearchParams,
    ) -> Result<Page<RentalOrder>> {
        debug!(?params, "searching orders");
        self.client
            .fetch(
                Method::Get,
                &["rental-orders", "search"],
                &params.query(),
                Some(session),
                None,
            )
            .await
    }

    /// Confirms the device return, moving the order toward settlement.
    ///
    /// Idempotent from the client's perspective: a second confirmation on an
    /// already-confirmed order surfaces the backend's own error untouched —
    /// there is no local state to corrupt.
    pub async fn confirm_return(
        &self,
        session: &SessionCredentials,
        order_id: i64,
    ) -> Result<RentalOrder> {
        let order: RentalOrder = self
            .client
            .fetch(
                Method::Patch,
                &["rental-orders", &order_id.to_string(), "confirm-return"],
                &[],
                Some(session),
                None,
            )
            .await?;
        info!(order_id, status = %order.order_status, "return confirmed");
        Ok(order)
    }

    /// Requests an end-date extension.
    pub async fn extend_order(
        &self,
        session: &SessionCredentials,
        order_id: i64,
        new_end_date: NaiveDateTime,
    ) -> Result<RentalOrder> {
        let body = json!({
            "orderId": order_id,
            "newEndDate": wire_timestamp(new_end_date),
        });
        let order: RentalOrder = self
            .client
            .fetch(
                Method::Post,
                &["rental-orders", "extend"],
                &[],
                Some(session),
                Some(body),
            )
            .await?;
        info!(order_id, new_end = %new_end_date, "extension requested");
        Ok(order)
    }
}
