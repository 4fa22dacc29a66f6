//! The **oracle** abstraction.
//!
//! An oracle turns one [`Candidate`] into a [`ProbeOutcome`]. The scan engine
//! only ever talks to the [`Oracle`] trait; the [`http`] module holds the
//! implementation that measures response bodies over the network.

use std::sync::Arc;

use async_trait::async_trait;
use sweepr_common::{Candidate, TargetId};

pub mod http;

pub use http::{HttpOracle, HttpOracleFactory};

/// Result of probing a single candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    /// The response body crossed the length threshold.
    Match,
    /// A response arrived but was not oversized.
    Miss,
    /// The transport failed; there is no response to classify.
    Failed,
}

impl ProbeOutcome {
    /// Classifies a response body: strictly longer than `threshold` is a match.
    pub fn from_body_len(len: usize, threshold: usize) -> Self {
        if len > threshold {
            ProbeOutcome::Match
        } else {
            ProbeOutcome::Miss
        }
    }

    pub fn is_match(self) -> bool {
        matches!(self, ProbeOutcome::Match)
    }

    pub fn failed(self) -> bool {
        matches!(self, ProbeOutcome::Failed)
    }
}

/// Probes one candidate against the target.
///
/// Implementations must not retry and must not panic on transport errors;
/// those are reported as [`ProbeOutcome::Failed`].
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn probe(&self, candidate: Candidate) -> ProbeOutcome;
}

/// Builds the oracle for one scan, bound to that scan's target.
pub trait OracleFactory: Send + Sync {
    fn oracle_for(&self, target: &TargetId) -> Arc<dyn Oracle>;
}

impl<F> OracleFactory for F
where
    F: Fn(&TargetId) -> Arc<dyn Oracle> + Send + Sync,
{
    fn oracle_for(&self, target: &TargetId) -> Arc<dyn Oracle> {
        self(target)
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
