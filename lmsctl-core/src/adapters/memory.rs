//! In-process credential store

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::result::{Error, Result};
use crate::domain::SessionCredential;
use crate::ports::CredentialStore;

/// Credential held in memory for the lifetime of the process.
///
/// Counts `clear` calls so callers can verify session teardown.
#[derive(Debug, Default)]
pub struct InMemoryCredentialStore {
    credential: Mutex<Option<SessionCredential>>,
    clears: AtomicUsize,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            credential: Mutex::new(Some(SessionCredential::new(token))),
            clears: AtomicUsize::new(0),
        }
    }

    /// Number of times `clear` has been called
    pub fn clear_count(&self) -> usize {
        self.clears.load(Ordering::SeqCst)
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Option<SessionCredential>>> {
        self.credential
            .lock()
            .map_err(|e| Error::credential(format!("Lock poisoned: {}", e)))
    }
}

impl CredentialStore for InMemoryCredentialStore {
    fn get(&self) -> Result<Option<SessionCredential>> {
        Ok(self.lock()?.clone())
    }

    fn clear(&self) -> Result<()> {
        self.clears.fetch_add(1, Ordering::SeqCst);
        *self.lock()? = None;
        Ok(())
    }
}
