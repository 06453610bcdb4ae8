//! Device-model name resolution for order display
//!
//! Orders reference devices by model id; rendering them needs human names.
//! Lookups fan out concurrently per distinct reference and join, and a
//! single failed lookup degrades to a placeholder label instead of failing
//! the aggregate. Results sit in an explicit TTL cache owned by the service
//! (no process-wide globals); cache lifetime and forced refresh are explicit
//! parameters.

pub mod cache;
pub mod resolve;

pub use cache::TtlCache;
pub use resolve::{CatalogService, DeviceModelSummary};
