//! # Scan Coordinator
//!
//! Drives a [`Keyspace`] through an [`Oracle`] with at most `concurrency`
//! probes outstanding.
//!
//! Candidates are launched in keyspace order. Each probe holds a semaphore
//! permit for its whole lifetime, so the cap holds regardless of how long the
//! oracle takes. Once a completion commits a match the cancel flag goes up and
//! no further candidates are launched; probes already in flight run to
//! completion and are still recorded.

use std::sync::Arc;
use std::time::Duration;

use sweepr_common::{Keyspace, info, warn};
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tracing::debug;

use crate::oracle::Oracle;
use crate::state::{ScanPhase, ScanState};

/// How a coordinator run ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanReport {
    /// `Exhausted` or `Cancelled`.
    pub phase: ScanPhase,
    /// Candidates handed to the oracle.
    pub dispatched: u64,
}

pub struct ScanCoordinator {
    oracle: Arc<dyn Oracle>,
    state: Arc<ScanState>,
    concurrency: usize,
    cooldown: Duration,
}

impl ScanCoordinator {
    pub fn new(oracle: Arc<dyn Oracle>, state: Arc<ScanState>, concurrency: usize) -> Self {
        Self {
            oracle,
            state,
            concurrency: concurrency.max(1),
            cooldown: Duration::ZERO,
        }
    }

    /// Pause kept inside the permit after every probe.
    pub fn with_cooldown(mut self, cooldown: Duration) -> Self {
        self.cooldown = cooldown;
        self
    }

    /// Runs until the keyspace is drained or a match is committed, then waits
    /// for every launched probe.
    pub async fn run(&self, keyspace: Keyspace) -> ScanReport {
        self.state.begin();

        let semaphore = Arc::new(Semaphore::new(self.concurrency));
        let mut probes: JoinSet<()> = JoinSet::new();
        let mut dispatched: u64 = 0;

        for candidate in keyspace {
            if self.state.is_cancelled() {
                break;
            }

            let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
                break;
            };

            // The flag may have gone up while we waited for a slot
            if self.state.is_cancelled() {
                break;
            }

            while let Some(res) = probes.try_join_next() {
                reap(res);
            }

            let oracle = Arc::clone(&self.oracle);
            let state = Arc::clone(&self.state);
            let cooldown = self.cooldown;

            probes.spawn(async move {
                let outcome = oracle.probe(candidate).await;
                if state.record(candidate, outcome) {
                    info!("Match committed on {candidate}, halting dispatch");
                }
                if !cooldown.is_zero() {
                    tokio::time::sleep(cooldown).await;
                }
                drop(permit);
            });
            dispatched += 1;
        }

        debug!(dispatched, "dispatch finished, draining in-flight probes");
        while let Some(res) = probes.join_next().await {
            reap(res);
        }

        let phase = self.state.finish_dispatch();
        ScanReport { phase, dispatched }
    }
}

fn reap(res: Result<(), JoinError>) {
    if let Err(e) = res {
        warn!("Probe task aborted: {e}");
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
