//! lmsctl core - account self-service for the LMS backend
//!
//! This crate follows a hexagonal layout:
//!
//! - **domain**: drafts, credentials, responses and outcomes
//! - **ports**: traits for the credential store, transport and UI collaborators
//! - **services**: the account mutation workflow (guard, gate, classifier, controller)
//! - **adapters**: concrete implementations (reqwest, session file, in-memory)

pub mod adapters;
pub mod config;
pub mod domain;
mod log_migrations;
pub mod ports;
pub mod services;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Result;

use adapters::credential_file::FileCredentialStore;
use adapters::http::HttpMutationTransport;
use config::Config;
use ports::{ConfirmationPrompt, Navigator, Notifier};

// Re-export commonly used types at crate root
pub use domain::result::{Error, Result as CoreResult};
pub use domain::{
    ConfirmationRequest, Destination, DraftField, GateChoice, MutationOutcome, MutationResponse,
    ProfileForm, ProfileUpdateDraft, SessionCredential, TransportError,
};
pub use services::{
    AccountMutationController, DeletionStatus, FlowState, LogEntry, LogEvent, LoggingService,
    SessionContext, UpdateStatus,
};

/// Main context for lmsctl operations
///
/// Holds the configuration, the on-disk credential store and the HTTP
/// transport. UI collaborators are supplied per front end when building the
/// controller.
pub struct LmsContext {
    pub config: Config,
    pub lmsctl_dir: PathBuf,
    pub credential_store: Arc<FileCredentialStore>,
    pub transport: Arc<HttpMutationTransport>,
}

impl LmsContext {
    pub fn new(lmsctl_dir: &Path) -> Result<Self> {
        let config = Config::load(lmsctl_dir)?;
        let credential_store = Arc::new(FileCredentialStore::new(lmsctl_dir));
        let transport = Arc::new(HttpMutationTransport::new(&config)?);

        Ok(Self {
            config,
            lmsctl_dir: lmsctl_dir.to_path_buf(),
            credential_store,
            transport,
        })
    }

    /// Session context over the on-disk credential store
    pub fn session(&self) -> SessionContext {
        SessionContext::new(self.credential_store.clone())
    }

    /// Build the account controller wired to this context's store and transport
    pub fn controller(
        &self,
        notifier: Arc<dyn Notifier>,
        navigator: Arc<dyn Navigator>,
        prompt: Arc<dyn ConfirmationPrompt>,
    ) -> AccountMutationController {
        AccountMutationController::new(
            self.session(),
            self.transport.clone(),
            notifier,
            navigator,
            prompt,
        )
    }
}
