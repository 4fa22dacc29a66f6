//! An oracle backed by real HTTP GET requests.
//!
//! Only the byte length of the response body is consumed. Status codes are not
//! special-cased: a `404` with a large body is still a match. Anything that
//! prevents a body from arriving (connect error, reset, timeout) is a failed
//! probe.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{Client, Url};
use sweepr_common::{Candidate, Config, SweepError, TargetId, UrlTemplate};
use tracing::debug;

use super::{Oracle, OracleFactory, ProbeOutcome};
use crate::error::{ProbeError, SessionError};

const MAX_IDLE_PER_HOST: usize = 100;

pub struct HttpOracle {
    client: Client,
    template: UrlTemplate,
    target: TargetId,
    body_threshold: usize,
}

impl HttpOracle {
    pub fn url_for(&self, candidate: &Candidate) -> String {
        self.template.render(&self.target, candidate)
    }

    async fn body_len(&self, url: &str) -> Result<usize, ProbeError> {
        let response = self.client.get(url).send().await?;
        let body = response.bytes().await?;
        Ok(body.len())
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    async fn probe(&self, candidate: Candidate) -> ProbeOutcome {
        let url: String = self.url_for(&candidate);
        match self.body_len(&url).await {
            Ok(len) => ProbeOutcome::from_body_len(len, self.body_threshold),
            Err(e) => {
                debug!(%candidate, error = %e, "probe failed");
                ProbeOutcome::Failed
            }
        }
    }
}

/// Shares one connection pool across every scan it builds oracles for.
pub struct HttpOracleFactory {
    client: Client,
    template: UrlTemplate,
    body_threshold: usize,
}

impl HttpOracleFactory {
    /// Builds the client and checks that the template renders to a valid URL.
    pub fn new(template: UrlTemplate, cfg: &Config) -> Result<Self, SessionError> {
        let sample_target: TargetId = "target".parse()?;
        let sample_candidate: Candidate = Candidate::new(0, cfg.keyspace_width)?;
        let sample: String = template.render(&sample_target, &sample_candidate);
        Url::parse(&sample).map_err(|e| SweepError::InvalidTemplate {
            template: template.to_string(),
            reason: e.to_string(),
        })?;

        let client = Client::builder()
            .timeout(cfg.request_timeout)
            .pool_max_idle_per_host(MAX_IDLE_PER_HOST)
            .build()?;

        Ok(Self {
            client,
            template,
            body_threshold: cfg.body_threshold,
        })
    }
}

impl OracleFactory for HttpOracleFactory {
    fn oracle_for(&self, target: &TargetId) -> Arc<dyn Oracle> {
        Arc::new(HttpOracle {
            client: self.client.clone(),
            template: self.template.clone(),
            target: target.clone(),
            body_threshold: self.body_threshold,
        })
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
