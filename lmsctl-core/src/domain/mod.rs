//! Core domain types
//!
//! Pure data structures for the account flows - no I/O or external
//! dependencies.

mod confirmation;
mod credential;
mod draft;
mod navigation;
mod outcome;
pub mod result;

pub use confirmation::{ConfirmationRequest, GateChoice};
pub use credential::SessionCredential;
pub use draft::{DraftField, ProfileForm, ProfileUpdateDraft, UpdateProfileRequest};
pub use navigation::Destination;
pub use outcome::{MutationOutcome, MutationResponse, TransportError};
