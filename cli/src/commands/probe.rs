use sweepr_common::{Candidate, TargetId};
use sweepr_core::{Oracle, OracleFactory};
use sweepr_core::oracle::HttpOracleFactory;

use crate::commands::ProbeArgs;
use crate::terminal::print;

pub async fn probe(args: ProbeArgs) -> anyhow::Result<()> {
    let target: TargetId = args.target.parse()?;
    let candidate: Candidate = args.candidate.parse()?;
    let mut cfg = args.to_config();
    cfg.keyspace_width = candidate.width();

    let factory = HttpOracleFactory::new(args.http.url.clone(), &cfg)?;
    let oracle = factory.oracle_for(&target);
    let outcome = oracle.probe(candidate).await;

    print::verdict(&candidate, outcome);
    Ok(())
}
