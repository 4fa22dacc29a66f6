use sweepr_common::SweepError;
use thiserror::Error;

/// Transport-level failure of one probe.
///
/// Never leaves the oracle: it is logged and folded into
/// [`ProbeOutcome::Failed`](crate::oracle::ProbeOutcome::Failed).
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("transport failure: {0}")]
    Transport(#[from] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    InvalidInput(#[from] SweepError),

    #[error("a scan is already running")]
    ScanInProgress,

    #[error("scans must be started from within a tokio runtime")]
    NoRuntime,

    #[error("failed to build http client: {0}")]
    Client(#[from] reqwest::Error),
}
