//! Single-flight guard against double submission of a user action.

use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};

use crate::error::{AquaError, Result};

/// Prevents the same action from running twice at once.
///
/// This is not a general lock: it only rejects a second attempt while the
/// first is still in flight.
#[derive(Debug, Clone, Default)]
pub struct RequestGuard {
    in_progress: Arc<AtomicBool>,
}

impl RequestGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the guard for `action`.
    ///
    /// # Errors
    ///
    /// `RequestInProgress` when a previous ticket is still alive.
    pub fn try_begin(&self, action: &str) -> Result<RequestTicket> {
        self.in_progress
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| AquaError::RequestInProgress {
                action: action.to_string(),
            })?;
        Ok(RequestTicket {
            in_progress: Arc::clone(&self.in_progress),
        })
    }

    pub fn is_in_progress(&self) -> bool {
        self.in_progress.load(Ordering::Acquire)
    }
}

/// Releases its guard when dropped.
#[derive(Debug)]
pub struct RequestTicket {
    in_progress: Arc<AtomicBool>,
}

impl Drop for RequestTicket {
    fn drop(&mut self) {
        self.in_progress.store(false, Ordering::Release);
    }
}
