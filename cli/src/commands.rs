pub mod probe;
pub mod scan;

use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand};
use sweepr_common::config::{DEFAULT_BODY_THRESHOLD, DEFAULT_CONCURRENCY};
use sweepr_common::keyspace::DEFAULT_LEN;
use sweepr_common::{Config, UrlTemplate};

#[derive(Parser)]
#[command(name = "sweepr")]
#[command(about = "Sweeps a numeric code space against an HTTP endpoint.")]
pub struct CommandLine {
    /// Raise log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sweep the keyspace for one target until a match is committed
    #[command(alias = "s")]
    Scan(ScanArgs),
    /// Probe a single candidate and print the verdict
    #[command(alias = "p")]
    Probe(ProbeArgs),
}

/// Outbound request settings shared by every subcommand.
#[derive(Args)]
pub struct HttpArgs {
    /// Probe URL with `{target}` and `{candidate}` placeholders
    #[arg(short, long)]
    pub url: UrlTemplate,

    /// Body length in bytes above which a response is a match
    #[arg(long, default_value_t = DEFAULT_BODY_THRESHOLD)]
    pub threshold: usize,

    /// Per-request timeout in milliseconds
    #[arg(long, default_value_t = 10_000)]
    pub timeout_ms: u64,
}

impl HttpArgs {
    fn apply(&self, cfg: Config) -> Config {
        Config {
            body_threshold: self.threshold,
            request_timeout: Duration::from_millis(self.timeout_ms),
            ..cfg
        }
    }
}

#[derive(Args)]
pub struct ScanArgs {
    /// Identifier substituted for `{target}`
    pub target: String,

    #[command(flatten)]
    pub http: HttpArgs,

    /// Maximum probes in flight
    #[arg(short, long, default_value_t = DEFAULT_CONCURRENCY)]
    pub concurrency: usize,

    /// Only sweep the first N codes
    #[arg(long, default_value_t = DEFAULT_LEN)]
    pub limit: u32,

    /// Emit every polled snapshot as a JSON line on stdout
    #[arg(long)]
    pub json: bool,

    /// Hide the banner and progress bar
    #[arg(short, long)]
    pub quiet: bool,
}

impl ScanArgs {
    pub fn to_config(&self) -> Config {
        let cfg = Config {
            concurrency: self.concurrency,
            keyspace_len: self.limit,
            ..Config::default()
        };
        self.http.apply(cfg)
    }
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Identifier substituted for `{target}`
    pub target: String,

    /// Zero-padded code to try, e.g. 0042
    pub candidate: String,

    #[command(flatten)]
    pub http: HttpArgs,
}

impl ProbeArgs {
    pub fn to_config(&self) -> Config {
        self.http.apply(Config::default())
    }
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
