//! Shared HTTP transport for the rental marketplace client
//!
//! Every workflow crate (orders, contracts, settlement, catalog) talks to the
//! backend through this layer:
//!
//! - **URL building**: logical path segments joined onto a configured base URL
//! - **Scheme fallback**: an explicit ordered list of transport candidates,
//!   so an `http://` base that turns out unreachable is retried once over
//!   `https://` before the failure is surfaced
//! - **Response envelope**: the uniform `{status, message, details, code, data}`
//!   wrapper every endpoint uses, validated in one place
//! - **Error taxonomy**: typed errors with user-presentable messages
//!
//! The actual wire I/O sits behind the [`HttpExecutor`] trait so workflow
//! code can be exercised against in-memory doubles.
//!
//! # Example
//!
//! ```ignore
//! use transport::{ApiConfig, RestClient, SessionCredentials, Method};
//!
//! let client = RestClient::new(ApiConfig::new("https://api.example.com/api"));
//! let session = SessionCredentials::new("token-abc", None);
//! let orders: Vec<serde_json::Value> =
//!     client.fetch(Method::Get, &["rental-orders"], &[], Some(&session), None).await?;
//! ```

pub mod client;
pub mod config;
pub mod envelope;
pub mod error;
pub mod executor;
pub mod liveness;
pub mod retry;
pub mod session;
pub mod url;

pub use client::RestClient;
pub use config::ApiConfig;
pub use envelope::Envelope;
pub use error::{ClientError, Result};
pub use executor::{HttpExecutor, HttpRequest, Method, RawResponse, ReqwestExecutor, TransportFailure};
pub use liveness::{Liveness, LivenessGuard};
pub use retry::{transport_candidates, RetryPolicy};
pub use session::SessionCredentials;
