//! # Scan State
//!
//! The single shared record every in-flight probe of one scan writes to.
//!
//! All counters, the found value and the phase live behind one mutex, and each
//! probe completion is applied in exactly one critical section. The cancel flag
//! is mirrored into an atomic so the dispatcher can check it without taking the
//! lock; it is only ever raised while the lock is held, together with the found
//! value, so a snapshot can never see one without the other.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use sweepr_common::Candidate;
use sweepr_common::config::PERCENT_STEP_EVERY;
use tracing::debug;

use crate::oracle::ProbeOutcome;
use crate::progress::ProgressSnapshot;

/// Lifecycle of one scan.
///
/// `Idle → Running → {Exhausted | Cancelled} → CosmeticFill → Done`, where
/// `CosmeticFill` is only entered when a match was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Idle,
    Running,
    Exhausted,
    Cancelled,
    CosmeticFill,
    Done,
}

impl ScanPhase {
    /// Whether a scan in this phase still owns the session.
    pub fn is_active(self) -> bool {
        !matches!(self, ScanPhase::Idle | ScanPhase::Done)
    }
}

/// Raw counters, for diagnostics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanCounters {
    /// Probes that finished, successfully or not.
    pub attempts: u64,
    /// Probes that got a response back.
    pub requests_completed: u64,
    /// Probes that failed at the transport level.
    pub failures: u64,
    /// Oracle-positive responses.
    pub matches: u32,
}

#[derive(Debug)]
struct Inner {
    phase: ScanPhase,
    counters: ScanCounters,
    percent: u8,
    found: Option<Candidate>,
    fill_requested: bool,
}

#[derive(Debug)]
pub struct ScanState {
    inner: Mutex<Inner>,
    cancelled: AtomicBool,
    match_threshold: u32,
}

impl ScanState {
    pub fn new(match_threshold: u32) -> Self {
        Self {
            inner: Mutex::new(Inner {
                phase: ScanPhase::Idle,
                counters: ScanCounters::default(),
                percent: 0,
                found: None,
                fill_requested: false,
            }),
            cancelled: AtomicBool::new(false),
            match_threshold,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// `Idle → Running`. Any other phase is left alone.
    pub fn begin(&self) {
        let mut inner = self.lock();
        if inner.phase == ScanPhase::Idle {
            inner.phase = ScanPhase::Running;
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }

    /// Applies one finished probe. Returns `true` for the single completion
    /// that pushed the match count onto the threshold.
    pub fn record(&self, candidate: Candidate, outcome: ProbeOutcome) -> bool {
        let mut inner = self.lock();
        if inner.phase == ScanPhase::Done {
            return false;
        }

        inner.counters.attempts += 1;
        if outcome.failed() {
            inner.counters.failures += 1;
        } else {
            inner.counters.requests_completed += 1;
        }

        if inner.counters.attempts % PERCENT_STEP_EVERY == 0 && inner.percent < 100 {
            inner.percent += 1;
        }

        if !outcome.is_match() {
            return false;
        }

        inner.counters.matches += 1;
        debug!(%candidate, matches = inner.counters.matches, "oversized response");

        if inner.counters.matches != self.match_threshold {
            return false;
        }

        inner.found = Some(candidate);
        inner.fill_requested = true;
        self.cancelled.store(true, Ordering::Release);
        true
    }

    /// `Running → Exhausted | Cancelled`, once every launched probe has finished.
    pub fn finish_dispatch(&self) -> ScanPhase {
        let mut inner = self.lock();
        if inner.phase == ScanPhase::Running {
            inner.phase = if self.is_cancelled() {
                ScanPhase::Cancelled
            } else {
                ScanPhase::Exhausted
            };
        }
        inner.phase
    }

    /// Moves into `CosmeticFill` if a match was committed.
    pub fn enter_fill(&self) -> bool {
        let mut inner = self.lock();
        if !inner.fill_requested || inner.phase == ScanPhase::Done {
            return false;
        }
        inner.phase = ScanPhase::CosmeticFill;
        true
    }

    /// Raises the published percent by one, capped at 100, and returns it.
    pub fn advance_fill(&self) -> u8 {
        let mut inner = self.lock();
        if inner.phase == ScanPhase::CosmeticFill && inner.percent < 100 {
            inner.percent += 1;
        }
        inner.percent
    }

    /// Final transition. Nothing mutates the state afterwards.
    pub fn mark_done(&self) {
        self.lock().phase = ScanPhase::Done;
    }

    pub fn phase(&self) -> ScanPhase {
        self.lock().phase
    }

    pub fn counters(&self) -> ScanCounters {
        self.lock().counters
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        let inner = self.lock();
        ProgressSnapshot {
            percent: inner.percent,
            found: inner.found,
            done: inner.phase == ScanPhase::Done,
        }
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
