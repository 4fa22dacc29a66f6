//! # Session Controller
//!
//! Entry point for callers: start a scan, then poll [`SessionController::snapshot`]
//! until `done` is set.
//!
//! Starting a scan validates the input and swaps in fresh state on the calling
//! thread, so a poll issued right after [`SessionController::run_scan`] returns
//! already sees the reset. The scan itself runs on a spawned task. While a scan
//! is active, further starts are rejected with [`SessionError::ScanInProgress`].

use std::sync::Arc;
use std::time::Duration;

use sweepr_common::config::MATCH_THRESHOLD;
use sweepr_common::{Config, Keyspace, TargetId, info, success};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::coordinator::{ScanCoordinator, ScanReport};
use crate::error::SessionError;
use crate::oracle::OracleFactory;
use crate::progress::{ProgressPublisher, ProgressSnapshot};
use crate::state::{ScanPhase, ScanState};

pub struct SessionController {
    factory: Arc<dyn OracleFactory>,
    publisher: ProgressPublisher,
    cfg: Config,
}

/// Completion handle for a launched scan. Dropping it does not stop the scan.
pub struct ScanHandle {
    handle: JoinHandle<ProgressSnapshot>,
}

impl ScanHandle {
    /// Waits for `Done` and returns the final snapshot.
    pub async fn finished(self) -> anyhow::Result<ProgressSnapshot> {
        Ok(self.handle.await?)
    }
}

impl SessionController {
    pub fn new(factory: impl OracleFactory + 'static, cfg: Config) -> Self {
        Self {
            factory: Arc::new(factory),
            publisher: ProgressPublisher::new(),
            cfg,
        }
    }

    /// A read-only handle observers can poll from anywhere.
    pub fn publisher(&self) -> ProgressPublisher {
        self.publisher.clone()
    }

    pub fn snapshot(&self) -> ProgressSnapshot {
        self.publisher.snapshot()
    }

    /// Resets progress and launches a scan against `target`.
    ///
    /// Must be called from within a Tokio runtime. Returns as soon as the scan
    /// is launched; nothing is mutated if validation fails.
    pub fn run_scan(&self, target: &str) -> Result<ScanHandle, SessionError> {
        let target: TargetId = target.parse()?;
        let keyspace = Keyspace::new(self.cfg.keyspace_width, self.cfg.keyspace_len)?;
        let runtime = Handle::try_current().map_err(|_| SessionError::NoRuntime)?;

        let state = Arc::new(ScanState::new(MATCH_THRESHOLD));
        self.publisher.install(Arc::clone(&state))?;
        info!("Scanning {} candidates for {target}", keyspace.len());

        let oracle = self.factory.oracle_for(&target);
        let coordinator = ScanCoordinator::new(oracle, Arc::clone(&state), self.cfg.concurrency)
            .with_cooldown(self.cfg.probe_cooldown);
        let fill_step = self.cfg.fill_step;

        let release = DoneOnDrop(Arc::clone(&state));
        let handle = runtime.spawn(async move {
            let _release = release;
            let report = coordinator.run(keyspace).await;
            conclude(&state, report, fill_step).await
        });

        Ok(ScanHandle { handle })
    }
}

/// Marks the scan done when the scan task ends, including by panic, so a
/// failed task never leaves the session locked.
struct DoneOnDrop(Arc<ScanState>);

impl Drop for DoneOnDrop {
    fn drop(&mut self) {
        if self.0.phase() != ScanPhase::Done {
            self.0.mark_done();
        }
    }
}

/// Runs the cosmetic fill when a match was committed, then marks the scan done.
async fn conclude(state: &ScanState, report: ScanReport, fill_step: Duration) -> ProgressSnapshot {
    match report.phase {
        ScanPhase::Cancelled => {
            if let Some(found) = state.snapshot().found {
                success!("Committed {found} after {} probes", report.dispatched);
            }
        }
        _ => info!("Keyspace exhausted after {} probes, no match", report.dispatched),
    }

    if state.enter_fill() {
        while state.advance_fill() < 100 {
            tokio::time::sleep(fill_step).await;
        }
    }

    state.mark_done();
    state.snapshot()
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
