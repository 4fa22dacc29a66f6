use std::time::Duration;

use colored::*;
use sweepr_common::Candidate;
use sweepr_core::{ProbeOutcome, ProgressSnapshot, ScanCounters};
use tracing::info;
use unicode_width::UnicodeWidthStr;

use crate::terminal::logging::PRINT_TARGET;
use crate::terminal::{colors, format};

pub const TOTAL_WIDTH: usize = 64;

pub fn print(msg: &str) {
    info!(target: PRINT_TARGET, raw_msg = msg);
}

pub fn banner(hidden: bool) {
    if hidden {
        return;
    }

    let text_content: String = format!("⟦ SWEEPR v{} ⟧ ", env!("CARGO_PKG_VERSION"));
    let text_width: usize = UnicodeWidthStr::width(text_content.as_str());
    let text: ColoredString = text_content.bright_green().bold();
    let sep_width: usize = TOTAL_WIDTH.saturating_sub(text_width) / 2;
    let sep: ColoredString = "═".repeat(sep_width).bright_black();

    print(&format!("{}{}{}", sep, text, sep));
}

pub fn header(msg: &str, hidden: bool) {
    if hidden {
        return;
    }

    let formatted: String = format!("⟦ {} ⟧", msg);
    let msg_len: usize = UnicodeWidthStr::width(formatted.as_str());

    let dash_count: usize = TOTAL_WIDTH.saturating_sub(msg_len);
    let left: usize = dash_count / 2;
    let right: usize = dash_count - left;

    let line: ColoredString = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    print(&format!("{}", line));
}

pub fn fat_separator() {
    let sep: ColoredString = "═".repeat(TOTAL_WIDTH).bright_black();
    print(&format!("{}", sep));
}

pub fn aligned_line(key: &str, value: ColoredString) {
    const KEY_WIDTH: usize = 10;
    let dots: String = ".".repeat(KEY_WIDTH.saturating_sub(key.len()));
    print(&format!(
        "{} {}{}{} {}",
        ">".color(colors::SEPARATOR),
        key.color(colors::PRIMARY),
        dots.color(colors::SEPARATOR),
        ":".color(colors::SEPARATOR),
        value
    ));
}

pub fn centerln(msg: &str) {
    let width: usize = UnicodeWidthStr::width(msg);
    let space = " ".repeat(TOTAL_WIDTH.saturating_sub(width) / 2);
    print(&format!("{}{}", space, msg));
}

pub fn scan_summary(
    last: &ProgressSnapshot,
    counters: ScanCounters,
    elapsed: Duration,
    quiet: bool,
) {
    if quiet {
        match last.found {
            Some(found) => println!("{found}"),
            None => println!("none"),
        }
        return;
    }

    header("sweep results", false);
    aligned_line("Result", format::found(last.found));
    aligned_line("Progress", format!("{}%", last.percent).normal());
    aligned_line("Probes", counters.attempts.to_string().normal());
    aligned_line("Failed", format::failures(counters.failures));
    aligned_line("Elapsed", format::elapsed(elapsed));
    fat_separator();

    let output: String = match last.found {
        Some(found) => format!("Code {} committed", found.to_string().bold()),
        None => "No code crossed the match threshold".to_string(),
    };
    centerln(&output);
}

pub fn verdict(candidate: &Candidate, outcome: ProbeOutcome) {
    aligned_line("Candidate", candidate.to_string().color(colors::ACCENT));
    aligned_line("Verdict", format::outcome(outcome));
}
