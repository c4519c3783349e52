//! Port definitions (hexagonal architecture)
//!
//! Ports define the interfaces for the collaborators the account flows
//! depend on. The services depend only on these traits, not on concrete
//! implementations.

mod credential_store;
mod transport;
mod ui;

pub use credential_store::CredentialStore;
pub use transport::MutationTransport;
pub use ui::{ConfirmationPrompt, Navigator, Notifier};
