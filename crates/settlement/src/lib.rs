//! Settlement & handover workflow
//!
//! After a device return the backend proposes a security-deposit settlement
//! that the customer must accept or reject — a single irreversible
//! transition. Physical condition checks at delivery ("checkout") and return
//! ("checkin") are recorded as handover reports and signed through the same
//! OTP protocol contracts use.
//!
//! The absence of a settlement (HTTP 404) is a valid state meaning "not yet
//! proposed", never an error.

pub mod models;
pub mod service;

pub use models::{HandoverKind, HandoverReport, Settlement, SettlementStatus};
pub use service::{HandoverService, HandoverSigner, SettlementService};
