use std::time::Duration;

use colored::*;
use sweepr_common::Candidate;
use sweepr_core::ProbeOutcome;

use crate::terminal::colors;

pub fn found(found: Option<Candidate>) -> ColoredString {
    match found {
        Some(candidate) => candidate.to_string().color(colors::FOUND).bold(),
        None => "none".red(),
    }
}

pub fn elapsed(elapsed: Duration) -> ColoredString {
    format!("{:.2}s", elapsed.as_secs_f64()).bold().yellow()
}

pub fn failures(count: u64) -> ColoredString {
    match count {
        0 => count.to_string().green(),
        _ => count.to_string().yellow(),
    }
}

pub fn outcome(outcome: ProbeOutcome) -> ColoredString {
    match outcome {
        ProbeOutcome::Match => "match (oversized body)".green().bold(),
        ProbeOutcome::Miss => "miss".normal(),
        ProbeOutcome::Failed => "transport failure".red(),
    }
}
