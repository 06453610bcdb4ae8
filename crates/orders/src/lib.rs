//! Rental order lifecycle
//!
//! Creates orders, lists and searches them, confirms returns and requests
//! extensions. Order status is owned by the backend; this crate only
//! observes it, normalizing the free-form status vocabulary into a closed
//! set of lifecycle buckets and routing `PENDING_KYC` orders toward the
//! identity-verification flow.

pub mod models;
pub mod service;
pub mod status;

pub use models::{OrderDetail, Page, RentalOrder};
pub use service::{CreateOrderRequest, OrderDetailRequest, OrderRoute, OrderService, SearchParams};
pub use status::{normalize_status, requires_kyc, NormalizedStatus, StatusBucket};
