//! Credential store port

use crate::domain::result::Result;
use crate::domain::SessionCredential;

/// Externally owned storage for the session credential.
///
/// The account flows only read and clear it; creating or refreshing a
/// credential happens at sign-in, outside this crate's flows.
pub trait CredentialStore: Send + Sync {
    /// Current credential, if any
    fn get(&self) -> Result<Option<SessionCredential>>;

    /// Remove the stored credential. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;
}
