// ABOUTME: Time formatting helpers — clock text and human-readable durations.
// ABOUTME: Pure functions shared by session replies, history listings, and reports.

use chrono::{DateTime, Duration, Local, Timelike};

/// Render an instant as zero-padded 12-hour clock text, e.g. "09:42 AM".
pub fn format_time(instant: &DateTime<Local>) -> String {
    let (is_pm, hour) = instant.hour12();
    let suffix = if is_pm { "PM" } else { "AM" };
    format!("{:02}:{:02} {}", hour, instant.minute(), suffix)
}

/// Render a non-negative span as a human phrase.
///
/// Whole hours and whole minutes only; seconds are truncated, never rounded.
/// Spans under a minute render as "less than a minute".
pub fn format_duration(span: Duration) -> String {
    let total_minutes = span.num_minutes().max(0);
    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, 0) => "less than a minute".to_string(),
        (h, 0) => format!("{} hr", h),
        (0, m) => format!("{} min", m),
        (h, m) => format!("{} hr {} min", h, m),
    }
}
