//! Confirmation gate for irreversible actions

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::{ConfirmationRequest, GateChoice};
use crate::ports::ConfirmationPrompt;

/// Whether a confirmation is currently on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Idle,
    Pending,
}

/// How a gate request ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateResolution {
    Accepted,
    Declined,
    /// Another confirmation from this gate is still unresolved; nothing was shown
    AlreadyPending,
}

/// Modal two-choice confirmation that must be accepted before a destructive
/// action runs. At most one confirmation per gate is pending at a time.
pub struct DestructiveActionGate {
    prompt: Arc<dyn ConfirmationPrompt>,
    pending: AtomicBool,
}

/// Resets the gate to idle when the prompt returns, including on error
struct PendingGuard<'a>(&'a AtomicBool);

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl DestructiveActionGate {
    pub fn new(prompt: Arc<dyn ConfirmationPrompt>) -> Self {
        Self {
            prompt,
            pending: AtomicBool::new(false),
        }
    }

    pub fn state(&self) -> GateState {
        if self.pending.load(Ordering::SeqCst) {
            GateState::Pending
        } else {
            GateState::Idle
        }
    }

    /// Show the confirmation and wait for exactly one of accept/decline
    pub fn request(&self, request: &ConfirmationRequest) -> Result<GateResolution> {
        if self
            .pending
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            return Ok(GateResolution::AlreadyPending);
        }
        let _guard = PendingGuard(&self.pending);

        Ok(match self.prompt.confirm(request)? {
            GateChoice::Accept => GateResolution::Accepted,
            GateChoice::Decline => GateResolution::Declined,
        })
    }
}
