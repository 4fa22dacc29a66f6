//! # Progress Publisher
//!
//! Observer-facing view of whichever scan the session currently owns.
//!
//! Readers take the state's lock only for the few loads a snapshot needs, so
//! polling never waits on network I/O and never sees a half-applied update.

use std::sync::{Arc, PoisonError, RwLock};

use serde::Serialize;
use sweepr_common::Candidate;
use sweepr_common::config::MATCH_THRESHOLD;

use crate::error::SessionError;
use crate::state::{ScanCounters, ScanPhase, ScanState};

/// What a poller sees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    /// 0 to 100, never decreasing within one scan.
    pub percent: u8,
    /// The committed candidate, once the match threshold was hit.
    #[serde(rename = "otp_found")]
    pub found: Option<Candidate>,
    pub done: bool,
}

#[derive(Debug, Clone)]
pub struct ProgressPublisher {
    current: Arc<RwLock<Arc<ScanState>>>,
}

impl Default for ProgressPublisher {
    fn default() -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(ScanState::new(MATCH_THRESHOLD)))),
        }
    }
}

impl ProgressPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> Arc<ScanState> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&*guard)
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.state().snapshot()
    }

    pub fn phase(&self) -> ScanPhase {
        self.state().phase()
    }

    pub fn counters(&self) -> ScanCounters {
        self.state().counters()
    }

    /// Swaps in a fresh scan's state and marks it running, unless the current
    /// scan has not reached `Done` yet.
    pub(crate) fn install(&self, next: Arc<ScanState>) -> Result<(), SessionError> {
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        if current.phase().is_active() {
            return Err(SessionError::ScanInProgress);
        }
        next.begin();
        *current = next;
        Ok(())
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
