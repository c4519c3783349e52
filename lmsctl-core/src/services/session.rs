//! Session context and the guard run before every mutation

use std::sync::Arc;

use thiserror::Error;

use crate::domain::result::Result;
use crate::domain::{Destination, SessionCredential};
use crate::ports::{CredentialStore, Navigator, Notifier};

/// Notification shown when a mutation is attempted without a credential
pub const NO_TOKEN_MESSAGE: &str = "Unauthorized: No token provided";

/// Handle to the externally owned credential store, injected into the flows
#[derive(Clone)]
pub struct SessionContext {
    store: Arc<dyn CredentialStore>,
}

impl SessionContext {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    pub fn credential(&self) -> Result<Option<SessionCredential>> {
        self.store.get()
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }
}

/// No usable credential was found
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("{}", NO_TOKEN_MESSAGE)]
pub struct Unauthorized;

/// Precondition gate: a credential must exist before a mutation is sent
pub struct SessionGuard {
    session: SessionContext,
    notifier: Arc<dyn Notifier>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(
        session: SessionContext,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            notifier,
            navigator,
        }
    }

    /// Return the stored credential, or notify and redirect to sign-in.
    ///
    /// An unreadable store counts as an absent credential.
    pub fn check(&self) -> std::result::Result<SessionCredential, Unauthorized> {
        match self.session.credential() {
            Ok(Some(credential)) if !credential.token().trim().is_empty() => Ok(credential),
            _ => {
                self.notifier.error(NO_TOKEN_MESSAGE);
                self.navigator.go_to(Destination::SignIn);
                Err(Unauthorized)
            }
        }
    }
}
