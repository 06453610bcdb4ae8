//! Contract & annex workflow
//!
//! Legal rental contracts and their amendments ("annexes") are signed through
//! an OTP-gated protocol: the backend emails a one-time PIN to the customer,
//! and submitting that PIN is the proof of signature intent. The PIN lives
//! server-side only; nothing cryptographic happens on the client.
//!
//! The ordering dependency between `send_pin` and `sign` is made explicit by
//! [`SignFlow`], a small state machine (`Unsigned → PinRequested → Signed`)
//! that only permits signing after a PIN was dispatched for the same target.
//! The raw service methods stay available for callers that let the server
//! reject out-of-order attempts instead.

pub mod models;
pub mod service;
pub mod sign_flow;

pub use models::{Contract, ContractAnnex, SignatureRecord};
pub use service::{AnnexSigner, ContractService, ContractSigner};
pub use sign_flow::{OtpSigner, SignFlow, SignState};
