use std::time::Duration;

use crate::keyspace::{DEFAULT_LEN, DEFAULT_WIDTH};

/// Probes allowed in flight at once.
pub const DEFAULT_CONCURRENCY: usize = 25;

/// Oracle-positive responses needed before a scan commits to a result.
///
/// The first oversized response is treated as noise; the second one wins.
pub const MATCH_THRESHOLD: u32 = 2;

/// Responses with a body strictly longer than this many bytes are matches.
pub const DEFAULT_BODY_THRESHOLD: usize = 2_000;

/// Finished probes per organic percent step.
pub const PERCENT_STEP_EVERY: u64 = 100;

pub const DEFAULT_FILL_STEP: Duration = Duration::from_millis(40);
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(150);
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_PROBE_COOLDOWN: Duration = Duration::from_millis(1);

#[derive(Debug, Clone)]
pub struct Config {
    /// Upper bound on concurrently outstanding probes.
    pub concurrency: usize,

    /// Body length, in bytes, above which a response counts as a match.
    pub body_threshold: usize,

    /// Digits per candidate.
    pub keyspace_width: u8,

    /// How many candidates to dispatch, starting from zero.
    pub keyspace_len: u32,

    /// Delay between cosmetic fill steps once a match has been committed.
    pub fill_step: Duration,

    /// How often observers are expected to poll for progress.
    pub poll_interval: Duration,

    /// Transport timeout for a single probe. Expiry counts as a failed probe.
    pub request_timeout: Duration,

    /// Pause held inside the concurrency permit after each probe.
    pub probe_cooldown: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            body_threshold: DEFAULT_BODY_THRESHOLD,
            keyspace_width: DEFAULT_WIDTH,
            keyspace_len: DEFAULT_LEN,
            fill_step: DEFAULT_FILL_STEP,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            probe_cooldown: DEFAULT_PROBE_COOLDOWN,
        }
    }
}
