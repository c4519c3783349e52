//! Account mutation flows - profile/password update and account deletion
//!
//! Both flows run the same pipeline: local validation, session check,
//! one network mutation, shared response classification, then side effects
//! (notification, navigation, session teardown). Neither flow retries.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::domain::result::Result;
use crate::domain::{ConfirmationRequest, Destination, MutationOutcome, ProfileForm};
use crate::ports::{ConfirmationPrompt, MutationTransport, Navigator, Notifier};
use crate::services::classify::classify;
use crate::services::gate::{DestructiveActionGate, GateResolution, GateState};
use crate::services::session::{SessionContext, SessionGuard};

/// User-facing notification texts
pub mod messages {
    pub const PASSWORD_MISMATCH: &str = "New password & confirm password do not match";
    pub const PROFILE_UPDATED: &str = "Profile updated successfully";
    pub const SESSION_EXPIRED: &str = "Unauthorized: Invalid or expired token";
    pub const UPDATE_FAILED: &str = "Failed to update profile";
    pub const ACCOUNT_DELETED: &str = "Account and associated courses deleted successfully!";
    pub const DELETE_FAILED: &str = "Failed to delete account";
}

/// Busy state of a single flow. The triggering control should be disabled
/// while `Submitting`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Idle,
    Submitting,
}

/// Result of [`AccountMutationController::submit_update`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpdateStatus {
    /// An update was already in flight; nothing was done
    Busy,
    /// New and confirmation passwords differ; nothing was sent
    PasswordMismatch,
    /// No credential; redirected to sign-in, nothing was sent
    Unauthenticated,
    /// The request was sent and classified
    Completed(MutationOutcome),
}

/// Result of [`AccountMutationController::request_deletion`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeletionStatus {
    /// A deletion was already in flight; nothing was done
    Busy,
    /// A confirmation is already on screen; nothing was done
    GatePending,
    /// The user declined the confirmation
    Declined,
    /// No credential; redirected to sign-in, nothing was sent
    Unauthenticated,
    /// The account was deleted. `credential_cleared` is false if the local
    /// store could not be cleared.
    Deleted { credential_cleared: bool },
    /// The deletion request failed; the credential was left in place
    Failed(MutationOutcome),
}

struct BusyFlag(AtomicBool);

struct BusyGuard<'a>(&'a AtomicBool);

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

impl BusyFlag {
    fn new() -> Self {
        Self(AtomicBool::new(false))
    }

    fn try_begin(&self) -> Option<BusyGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| BusyGuard(&self.0))
    }

    fn state(&self) -> FlowState {
        if self.0.load(Ordering::SeqCst) {
            FlowState::Submitting
        } else {
            FlowState::Idle
        }
    }
}

/// Owns the two user-initiated account flows
pub struct AccountMutationController {
    session: SessionContext,
    guard: SessionGuard,
    gate: DestructiveActionGate,
    transport: Arc<dyn MutationTransport>,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
    update_flow: BusyFlag,
    deletion_flow: BusyFlag,
}

impl AccountMutationController {
    pub fn new(
        session: SessionContext,
        transport: Arc<dyn MutationTransport>,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> Self {
        let guard = SessionGuard::new(session.clone(), notifier.clone(), navigator.clone());
        Self {
            session,
            guard,
            gate: DestructiveActionGate::new(prompt),
            transport,
            notifier,
            navigator,
            update_flow: BusyFlag::new(),
            deletion_flow: BusyFlag::new(),
        }
    }

    pub fn update_state(&self) -> FlowState {
        self.update_flow.state()
    }

    pub fn deletion_state(&self) -> FlowState {
        self.deletion_flow.state()
    }

    pub fn gate_state(&self) -> GateState {
        self.gate.state()
    }

    /// Submit the profile/password form.
    ///
    /// The draft is reset only on success; on every other outcome it is left
    /// as typed so the user can correct and resubmit.
    pub async fn submit_update(&self, form: &mut ProfileForm) -> UpdateStatus {
        let Some(_busy) = self.update_flow.try_begin() else {
            return UpdateStatus::Busy;
        };
        form.clear_error();

        if !form.draft.passwords_match() {
            self.notifier.error(messages::PASSWORD_MISMATCH);
            return UpdateStatus::PasswordMismatch;
        }

        let Ok(credential) = self.guard.check() else {
            return UpdateStatus::Unauthenticated;
        };

        let request = form.draft.to_request();
        let outcome = classify(self.transport.update_profile(&request, &credential).await);

        match &outcome {
            MutationOutcome::Success(_) => {
                self.notifier.success(messages::PROFILE_UPDATED);
                form.draft.reset();
                self.navigator.go_to(Destination::Profile);
            }
            MutationOutcome::ApplicationRejected(message) => {
                form.set_error(message.clone());
                self.notifier.error(message);
            }
            // The credential is left in place; sign-in replaces it
            MutationOutcome::Unauthorized => {
                self.notifier.error(messages::SESSION_EXPIRED);
                self.navigator.go_to(Destination::SignIn);
            }
            MutationOutcome::TransportFailure => {
                self.notifier.error(messages::UPDATE_FAILED);
            }
        }

        UpdateStatus::Completed(outcome)
    }

    /// Ask for confirmation, then permanently delete the account.
    ///
    /// Declining ends the flow without any request or notification. Every
    /// failure, authorization included, gets the same generic message.
    pub async fn request_deletion(&self) -> Result<DeletionStatus> {
        if self.deletion_flow.state() == FlowState::Submitting {
            return Ok(DeletionStatus::Busy);
        }

        match self.gate.request(&ConfirmationRequest::delete_account())? {
            GateResolution::AlreadyPending => return Ok(DeletionStatus::GatePending),
            GateResolution::Declined => return Ok(DeletionStatus::Declined),
            GateResolution::Accepted => {}
        }

        let Some(_busy) = self.deletion_flow.try_begin() else {
            return Ok(DeletionStatus::Busy);
        };

        let Ok(credential) = self.guard.check() else {
            return Ok(DeletionStatus::Unauthenticated);
        };

        let outcome = classify(self.transport.delete_account(&credential).await);
        if !outcome.is_success() {
            self.notifier.error(messages::DELETE_FAILED);
            return Ok(DeletionStatus::Failed(outcome));
        }

        self.notifier.success(messages::ACCOUNT_DELETED);
        let credential_cleared = self.session.clear().is_ok();
        self.navigator.go_to(Destination::SignUp);

        Ok(DeletionStatus::Deleted { credential_cleared })
    }
}
