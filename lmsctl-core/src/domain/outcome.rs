//! Mutation responses, transport errors and their classification result

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Response body shared by the update and delete endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl MutationResponse {
    pub fn ok() -> Self {
        Self {
            success: true,
            message: None,
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: Some(message.into()),
        }
    }
}

/// Failure of a mutation request before an application-level answer arrived
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The server refused the credential (HTTP 401/403)
    #[error("Authorization rejected (HTTP {status})")]
    Forbidden { status: u16 },

    #[error("Server returned HTTP {status}")]
    Status { status: u16 },

    #[error("Request timed out")]
    Timeout,

    #[error("Unable to connect to server")]
    Connect,

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Request failed: {0}")]
    Request(String),
}

impl TransportError {
    /// Whether this error carries the authorization-failure marker
    pub fn is_authorization_failure(&self) -> bool {
        matches!(self, TransportError::Forbidden { .. })
    }
}

/// Classification of a completed mutation attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MutationOutcome {
    Success(MutationResponse),
    ApplicationRejected(String),
    Unauthorized,
    TransportFailure,
}

impl MutationOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, MutationOutcome::Success(_))
    }
}
