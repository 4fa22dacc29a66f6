use thiserror::Error;

/// Input validation failures, raised before a scan touches any shared state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SweepError {
    #[error("target identifier must not be empty")]
    InvalidTarget,

    #[error("invalid url template '{template}': {reason}")]
    InvalidTemplate { template: String, reason: String },

    #[error("invalid keyspace: {0}")]
    InvalidKeyspace(String),

    #[error("invalid candidate '{0}'")]
    InvalidCandidate(String),
}
