//! Mutation transport port

use async_trait::async_trait;

use crate::domain::{MutationResponse, SessionCredential, TransportError, UpdateProfileRequest};

/// Network access for the two account mutations.
///
/// Retry and timeout policy belong to the implementation. Any non-success
/// HTTP status is reported as a [`TransportError`]; only a 2xx response with
/// a decodable body comes back as `Ok`.
#[async_trait]
pub trait MutationTransport: Send + Sync {
    /// Update name and password
    async fn update_profile(
        &self,
        request: &UpdateProfileRequest,
        credential: &SessionCredential,
    ) -> Result<MutationResponse, TransportError>;

    /// Permanently delete the account. The request has no body.
    async fn delete_account(
        &self,
        credential: &SessionCredential,
    ) -> Result<MutationResponse, TransportError>;
}
