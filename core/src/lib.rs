//! # sweepr core
//!
//! The concurrent scan engine.
//!
//! * **[`oracle`]**: classifies a single candidate by probing the remote endpoint.
//! * **[`state`]**: the one shared, lock-guarded record a scan mutates.
//! * **[`progress`]**: the read side observers poll while a scan runs.
//! * **[`coordinator`]**: fans candidates out to the oracle under a concurrency cap.
//! * **[`session`]**: resets state, launches a scan and drives it to `Done`.

pub mod coordinator;
pub mod error;
pub mod oracle;
pub mod progress;
pub mod session;
pub mod state;

#[cfg(test)]
pub(crate) mod testing;

pub use coordinator::{ScanCoordinator, ScanReport};
pub use error::{ProbeError, SessionError};
pub use oracle::{Oracle, OracleFactory, ProbeOutcome};
pub use progress::{ProgressPublisher, ProgressSnapshot};
pub use session::{ScanHandle, SessionController};
pub use state::{ScanCounters, ScanPhase, ScanState};
