use std::time::Instant;

use sweepr_core::oracle::HttpOracleFactory;
use sweepr_core::{ProgressSnapshot, SessionController};

use crate::commands::ScanArgs;
use crate::terminal::{print, progress::ScanProgress};

pub async fn scan(args: ScanArgs) -> anyhow::Result<()> {
    let cfg = args.to_config();
    let factory = HttpOracleFactory::new(args.http.url.clone(), &cfg)?;
    let session = SessionController::new(factory, cfg.clone());
    let publisher = session.publisher();

    let start_time: Instant = Instant::now();
    let handle = session.run_scan(&args.target)?;
    let bar = ScanProgress::start(args.quiet || args.json);

    let mut ticker = tokio::time::interval(cfg.poll_interval);
    let last: ProgressSnapshot = loop {
        ticker.tick().await;
        let snapshot = publisher.snapshot();
        if args.json {
            println!("{}", serde_json::to_string(&snapshot)?);
        }
        bar.update(&snapshot);
        if snapshot.done {
            break snapshot;
        }
    };

    handle.finished().await?;
    bar.finish().await;

    if !args.json {
        print::scan_summary(&last, publisher.counters(), start_time.elapsed(), args.quiet);
    }
    Ok(())
}
