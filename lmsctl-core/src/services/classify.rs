//! Response classification shared by the update and deletion flows

use crate::domain::{MutationOutcome, MutationResponse, TransportError};

/// Shown when the server rejects a mutation without saying why
pub const FALLBACK_REJECTION_MESSAGE: &str = "Request was rejected by the server";

/// Classify a completed mutation attempt.
///
/// Authorization failures are recognized only through the transport's
/// `Forbidden` marker; every other transport error is a generic failure.
pub fn classify(result: Result<MutationResponse, TransportError>) -> MutationOutcome {
    match result {
        Err(e) if e.is_authorization_failure() => MutationOutcome::Unauthorized,
        Err(_) => MutationOutcome::TransportFailure,
        Ok(response) if response.success => MutationOutcome::Success(response),
        Ok(response) => {
            let message = response
                .message
                .filter(|m| !m.trim().is_empty())
                .unwrap_or_else(|| FALLBACK_REJECTION_MESSAGE.to_string());
            MutationOutcome::ApplicationRejected(message)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_success() {
        let outcome = classify(Ok(MutationResponse::ok()));
        assert_eq!(outcome, MutationOutcome::Success(MutationResponse::ok()));
    }

    #[test]
    fn test_rejected_with_message() {
        let outcome = classify(Ok(MutationResponse::rejected("Old password is incorrect")));
        assert_eq!(
            outcome,
            MutationOutcome::ApplicationRejected("Old password is incorrect".to_string())
        );
    }

    #[test]
    fn test_rejected_without_message_uses_fallback() {
        let outcome = classify(Ok(MutationResponse::default()));
        assert_eq!(
            outcome,
            MutationOutcome::ApplicationRejected(FALLBACK_REJECTION_MESSAGE.to_string())
        );

        let outcome = classify(Ok(MutationResponse::rejected("   ")));
        assert_eq!(
            outcome,
            MutationOutcome::ApplicationRejected(FALLBACK_REJECTION_MESSAGE.to_string())
        );
    }

    #[test]
    fn test_forbidden_is_unauthorized() {
        assert_eq!(
            classify(Err(TransportError::Forbidden { status: 403 })),
            MutationOutcome::Unauthorized
        );
        assert_eq!(
            classify(Err(TransportError::Forbidden { status: 401 })),
            MutationOutcome::Unauthorized
        );
    }

    #[test]
    fn test_other_errors_are_transport_failures() {
        for err in [
            TransportError::Status { status: 500 },
            TransportError::Status { status: 400 },
            TransportError::Timeout,
            TransportError::Connect,
            TransportError::Decode("eof".to_string()),
            TransportError::Request("boom".to_string()),
        ] {
            assert_eq!(classify(Err(err)), MutationOutcome::TransportFailure);
        }
    }
}
