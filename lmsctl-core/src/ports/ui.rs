//! User-facing collaborators: notifications, navigation and confirmation

use crate::domain::result::Result;
use crate::domain::{ConfirmationRequest, Destination, GateChoice};

/// Transient user notifications. Fire-and-forget.
pub trait Notifier: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

/// Routing to another surface of the application
pub trait Navigator: Send + Sync {
    fn go_to(&self, destination: Destination);
}

/// Two-choice modal confirmation.
///
/// Blocks until the user picks one of the two actions in the request.
pub trait ConfirmationPrompt: Send + Sync {
    fn confirm(&self, request: &ConfirmationRequest) -> Result<GateChoice>;
}
