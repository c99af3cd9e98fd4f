// ABOUTME: Report aggregator — sums a history log into a total and formatted text.
// ABOUTME: Pure over its input; clearing the log afterwards is the caller's job.

use chrono::Duration;

use crate::format::format_duration;
use crate::store::CompletedSession;

/// Report requested over an empty history log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("no recorded sessions yet!")]
pub struct EmptyHistory;

/// A composed report: display text plus the summed duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub text: String,
    pub total: Duration,
}

/// Build a report over a history log in insertion order.
///
/// One line per entry (name, duration, start and end clock text), then a total
/// footer. Fails with [`EmptyHistory`] if there is nothing to report; never
/// mutates anything, so on-demand and scheduled paths share it safely.
pub fn build_report(entries: &[CompletedSession]) -> Result<Report, EmptyHistory> {
    if entries.is_empty() {
        return Err(EmptyHistory);
    }

    let mut text = String::new();
    let mut total = Duration::zero();
    for entry in entries {
        text.push_str(&format!(
            "-> {} - {} | {} - {}\n",
            entry.name,
            format_duration(entry.duration),
            entry.start_text,
            entry.end_text,
        ));
        total = total + entry.duration;
    }
    text.push_str(&format!("\nTotal work time: {}", format_duration(total)));

    Ok(Report { text, total })
}

/// Format a history log for the `!history` command. Same line shape as the
/// report, but with no total footer and no clearing implied. Callers prepend
/// their own header.
pub fn history_text(entries: &[CompletedSession]) -> Result<String, EmptyHistory> {
    if entries.is_empty() {
        return Err(EmptyHistory);
    }

    let mut text = String::new();
    for entry in entries {
        text.push_str(&format!(
            "-> {} - {} | {} - {}\n",
            entry.name,
            format_duration(entry.duration),
            entry.start_text,
            entry.end_text,
        ));
    }
    Ok(text)
}
