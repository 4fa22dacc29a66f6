use std::time::Duration;

use indicatif::ProgressStyle;
use sweepr_core::ProgressSnapshot;
use tracing::{Span, info_span};
use tracing_indicatif::span_ext::IndicatifSpanExt;

const BAR_TEMPLATE: &str = "{spinner:.blue} [{bar:40.green/black}] {pos:>3}% {msg}";

/// Terminal progress bar fed from polled snapshots.
pub struct ScanProgress {
    span: Option<Span>,
}

impl ScanProgress {
    pub fn start(hidden: bool) -> Self {
        if hidden {
            return Self { span: None };
        }

        let span = info_span!("sweep");
        if let Ok(style) = ProgressStyle::with_template(BAR_TEMPLATE) {
            span.pb_set_style(&style.progress_chars("█▓░"));
        }
        span.pb_set_length(100);
        span.pb_set_message("probing");
        span.pb_start();

        Self { span: Some(span) }
    }

    pub fn update(&self, snapshot: &ProgressSnapshot) {
        let Some(span) = &self.span else {
            return;
        };

        span.pb_set_position(u64::from(snapshot.percent));
        if let Some(found) = snapshot.found {
            span.pb_set_message(&format!("found {found}"));
        }
    }

    pub async fn finish(self) {
        if let Some(span) = self.span {
            // Let the last frame render before the bar is torn down
            tokio::time::sleep(Duration::from_millis(50)).await;
            drop(span);
        }
    }
}
