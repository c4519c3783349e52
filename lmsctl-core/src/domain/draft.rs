//! Profile update draft and its wire request

use std::fmt;

use serde::{Deserialize, Serialize};

/// Editable field of a [`ProfileUpdateDraft`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    OldPassword,
    NewPassword,
    ConfirmPassword,
}

impl DraftField {
    /// Look up a field by its form name (`name`, `oldPassword`, ...)
    pub fn from_form_name(name: &str) -> Option<Self> {
        match name {
            "name" => Some(Self::Name),
            "oldPassword" => Some(Self::OldPassword),
            "newPassword" => Some(Self::NewPassword),
            "confirmPassword" => Some(Self::ConfirmPassword),
            _ => None,
        }
    }
}

/// In-progress edit of the user's name and password.
///
/// Lives for one edit session. Only the new/confirm password equality is
/// checked locally; everything else is left to the server.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct ProfileUpdateDraft {
    pub name: String,
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

impl ProfileUpdateDraft {
    pub fn new() -> Self {
        Self::default()
    }

    /// Update a single field from user input
    pub fn set(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Name => self.name = value,
            DraftField::OldPassword => self.old_password = value,
            DraftField::NewPassword => self.new_password = value,
            DraftField::ConfirmPassword => self.confirm_password = value,
        }
    }

    pub fn passwords_match(&self) -> bool {
        self.new_password == self.confirm_password
    }

    /// Clear every field
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Build the request body. The confirmation field is not transmitted.
    pub fn to_request(&self) -> UpdateProfileRequest {
        UpdateProfileRequest {
            name: self.name.clone(),
            old_password: self.old_password.clone(),
            new_password: self.new_password.clone(),
        }
    }
}

impl fmt::Debug for ProfileUpdateDraft {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProfileUpdateDraft")
            .field("name", &self.name)
            .field("old_password_set", &!self.old_password.is_empty())
            .field("new_password_set", &!self.new_password.is_empty())
            .field("passwords_match", &self.passwords_match())
            .finish()
    }
}

/// Settings form state: the draft plus the inline error shown above it
#[derive(Debug, Clone, Default)]
pub struct ProfileForm {
    pub draft: ProfileUpdateDraft,
    error: Option<String>,
}

impl ProfileForm {
    pub fn new(draft: ProfileUpdateDraft) -> Self {
        Self { draft, error: None }
    }

    /// Inline error from the last rejected submission
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn set_error(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Body of the profile update request
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileRequest {
    pub name: String,
    pub old_password: String,
    pub new_password: String,
}

impl fmt::Debug for UpdateProfileRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdateProfileRequest")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
