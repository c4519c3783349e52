//! Service layer - business logic orchestration
//!
//! Services coordinate domain logic and port interactions. The account
//! controller owns the two user flows; the guard, gate and classifier are the
//! pieces it is built from.

pub mod account;
pub mod classify;
pub mod gate;
pub mod logging;
pub mod session;

pub use account::{AccountMutationController, DeletionStatus, FlowState, UpdateStatus};
pub use classify::classify;
pub use gate::{DestructiveActionGate, GateResolution, GateState};
pub use logging::{LogEntry, LogEvent, LoggingService};
pub use session::{SessionContext, SessionGuard, Unauthorized};
