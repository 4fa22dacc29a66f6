//! In-memory oracles for exercising the scan engine without a network.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sweepr_common::Candidate;

use crate::oracle::{Oracle, ProbeOutcome};

#[derive(Default)]
pub(crate) struct ScriptedOracle {
    matches: HashSet<String>,
    fail_all: bool,
    panic_on: Option<String>,
    delay: Duration,
    in_flight: AtomicUsize,
    peak: AtomicUsize,
    probed: AtomicUsize,
}

impl ScriptedOracle {
    pub(crate) fn misses() -> Self {
        Self::default()
    }

    pub(crate) fn matching(codes: &[&str]) -> Self {
        Self {
            matches: codes.iter().map(|c| c.to_string()).collect(),
            ..Self::default()
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_all: true,
            ..Self::default()
        }
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub(crate) fn panicking_on(mut self, code: &str) -> Self {
        self.panic_on = Some(code.to_string());
        self
    }

    pub(crate) fn peak_in_flight(&self) -> usize {
        self.peak.load(Ordering::SeqCst)
    }

    pub(crate) fn probed(&self) -> usize {
        self.probed.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Oracle for ScriptedOracle {
    async fn probe(&self, candidate: Candidate) -> ProbeOutcome {
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak.fetch_max(now, Ordering::SeqCst);

        if self.delay.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.delay).await;
        }

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        self.probed.fetch_add(1, Ordering::SeqCst);

        let code = candidate.to_string();
        if self.panic_on.as_deref() == Some(code.as_str()) {
            panic!("scripted oracle blew up on {code}");
        }
        if self.fail_all {
            return ProbeOutcome::Failed;
        }
        if self.matches.contains(&code) {
            ProbeOutcome::Match
        } else {
            ProbeOutcome::Miss
        }
    }
}
