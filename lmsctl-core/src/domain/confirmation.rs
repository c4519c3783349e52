//! Confirmation request presented before a destructive action

/// Answer to a confirmation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateChoice {
    Accept,
    Decline,
}

/// Title, message and the two labeled actions of a confirmation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    pub accept_label: String,
    pub decline_label: String,
}

impl ConfirmationRequest {
    pub fn new(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            accept_label: "Yes".to_string(),
            decline_label: "No".to_string(),
        }
    }

    /// Prompt shown before deleting the account
    pub fn delete_account() -> Self {
        Self::new(
            "Confirm to delete",
            "Are you sure you want to delete your account?",
        )
    }
}
