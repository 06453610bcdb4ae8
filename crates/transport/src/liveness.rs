//! Stale-response discard for view-driven fetches
//!
//! A long-lived fetch triggered by a view must not apply its result after the
//! view is torn down. No cancellation token reaches the transport layer;
//! instead the caller captures a [`Liveness`] token at call time and checks
//! it before applying the response, discarding stale results silently.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Owned by the triggering context (a screen, a view model). Dropping it
/// marks every captured token dead.
#[derive(Debug)]
pub struct LivenessGuard {
    alive: Arc<AtomicBool>,
}

impl LivenessGuard {
    pub fn new() -> Self {
        Self {
            alive: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Captures a token to check after an await point.
    pub fn token(&self) -> Liveness {
        Liveness {
            alive: Arc::clone(&self.alive),
        }
    }
}

impl Default for LivenessGuard {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LivenessGuard {
    fn drop(&mut self) {
        self.alive.store(false, Ordering::Release);
    }
}

/// Cheap clonable view onto the guard's flag.
#[derive(Clone, Debug)]
pub struct Liveness {
    alive: Arc<AtomicBool>,
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        self.alive.load(Ordering::Acquire)
    }
}
