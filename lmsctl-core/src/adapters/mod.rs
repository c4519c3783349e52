//! Adapter implementations
//!
//! Adapters implement the port traits with concrete technologies:
//! - reqwest HTTP client for MutationTransport
//! - session.json file for CredentialStore
//! - in-memory CredentialStore for embedding and tests

pub mod credential_file;
pub mod http;
pub mod memory;

#[cfg(test)]
pub mod mock_server;
