//! OTP sign state machine
//!
//! `Unsigned → PinRequested → Signed`, with a failed sign attempt reverting
//! to `Unsigned` so the caller may re-request a PIN. The server remains the
//! authority on PIN validity; this machine only rules out the out-of-order
//! call (signing before any PIN was dispatched for the target).

use async_trait::async_trait;
use tracing::{debug, warn};

use transport::{ClientError, Result, SessionCredentials};

use crate::models::SignatureRecord;

/// Sign protocol position for one target (contract, annex or handover
/// report).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignState {
    Unsigned,
    PinRequested,
    Signed,
}

/// One signable target's two protocol calls. Implemented by
/// contract/annex/handover signers; each call hits the target-scoped
/// endpoint.
#[async_trait]
pub trait OtpSigner: Send + Sync {
    /// Human-readable target description for logging.
    fn describe(&self) -> String;

    async fn send_pin(&self, session: &SessionCredentials, email: &str) -> Result<()>;

    async fn sign(
        &self,
        session: &SessionCredentials,
        pin_code: &str,
    ) -> Result<SignatureRecord>;
}

/// Caller-held sign workflow for one target.
pub struct SignFlow<S: OtpSigner> {
    signer: S,
    state: SignState,
}

impl<S: OtpSigner> SignFlow<S> {
    pub fn new(signer: S) -> Self {
        Self {
            signer,
            state: SignState::Unsigned,
        }
    }

    pub fn state(&self) -> SignState {
        self.state
    }

    /// Requests a PIN dispatch to `email`.
    ///
    /// Allowed from `Unsigned` and from `PinRequested` (a lost or expired
    /// PIN may be re-requested freely). The state only advances after the
    /// backend acknowledges the dispatch.
    pub async fn request_pin(
        &mut self,
        session: &SessionCredentials,
        email: &str,
    ) -> Result<()> {
        if self.state == SignState::Signed {
            return Err(ClientError::Validation(
                "this document is already signed".into(),
            ));
        }
        let email = email.trim();
        if email.is_empty() {
            return Err(ClientError::Validation(
                "an email address is required for the signing PIN".into(),
            ));
        }
        self.signer.send_pin(session, email).await?;
        debug!(document = %self.signer.describe(), "signing PIN dispatched");
        self.state = SignState::PinRequested;
        Ok(())
    }

    /// Submits the PIN as proof of signature intent.
    ///
    /// Only callable from `PinRequested`. A rejected PIN reverts the flow to
    /// `Unsigned`; the caller may then request a fresh PIN.
    pub async fn submit_pin(
        &mut self,
        session: &SessionCredentials,
        pin_code: &str,
    ) -> Result<SignatureRecord> {
        if self.state != SignState::PinRequested {
            return Err(ClientError::Validation(
                "request a signing PIN before submitting one".into(),
            ));
        }
        let pin = pin_code.trim();
        if pin.is_empty() {
            return Err(ClientError::Validation("the PIN must not be empty".into()));
        }
        match self.signer.sign(session, pin).await {
            Ok(record) => {
                self.state = SignState::Signed;
                Ok(record)
            }
            Err(err) => {
                warn!(document = %self.signer.describe(), error = %err, "sign attempt failed");
                self.state = SignState::Unsigned;
                Err(err)
            }
        }
    }
}
