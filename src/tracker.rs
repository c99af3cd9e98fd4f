// ABOUTME: Tracker facade — the inbound surface the command layer and scheduler call.
// ABOUTME: Wires the stores, reminder spawning, report building, and the daily cycle together.

use std::sync::Arc;
use std::time::Duration;

use crate::delivery::Delivery;
use crate::format::{format_duration, format_time};
use crate::report::{build_report, history_text};
use crate::reminder::spawn_reminder;
use crate::store::{CompletedSession, HistoryStore, SessionError, SessionStore, UserId};

/// Expected, user-facing failures. The `Display` text is the reply shown to the
/// user; none of these are faults.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrackerError {
    #[error("you already have an active session!")]
    AlreadyActive,
    #[error("you don't have an active session!")]
    NoActiveSession,
    #[error("no recorded sessions yet!")]
    EmptyHistory,
}

impl From<SessionError> for TrackerError {
    fn from(e: SessionError) -> Self {
        match e {
            SessionError::AlreadyActive => TrackerError::AlreadyActive,
            SessionError::NoActiveSession => TrackerError::NoActiveSession,
        }
    }
}

/// Shared core handed to the command layer and the daily scheduler. Stores are
/// injected so there is no ambient state; cloning the `Arc`s is cheap.
pub struct Tracker {
    sessions: Arc<SessionStore>,
    history: Arc<HistoryStore>,
    delivery: Arc<dyn Delivery>,
    /// Destination for scheduled daily reports.
    report_destination: String,
    /// How long after a start the one-shot reminder fires.
    reminder_after: Duration,
}

impl Tracker {
    pub fn new(
        sessions: Arc<SessionStore>,
        history: Arc<HistoryStore>,
        delivery: Arc<dyn Delivery>,
        report_destination: String,
        reminder_after: Duration,
    ) -> Self {
        Self {
            sessions,
            history,
            delivery,
            report_destination,
            reminder_after,
        }
    }

    /// Start a named session and schedule its reminder.
    ///
    /// Must run inside a tokio runtime (the reminder is a spawned task).
    pub fn start(&self, user: &UserId, name: &str) -> Result<String, TrackerError> {
        let started = self.sessions.start(user, name)?;

        spawn_reminder(
            self.sessions.clone(),
            self.delivery.clone(),
            user.clone(),
            started.name.clone(),
            started.token,
            self.reminder_after,
        );

        Ok(format!(
            "Started session \"{}\" at {}.",
            started.name,
            format_time(&started.start_time),
        ))
    }

    /// End the active session, moving it into the user's history log.
    pub fn end(&self, user: &UserId) -> Result<String, TrackerError> {
        let finished = self.sessions.end(user)?;

        self.history.record(
            user,
            CompletedSession {
                name: finished.name.clone(),
                duration: finished.duration,
                start_text: format_time(&finished.start_time),
                end_text: format_time(&finished.end_time),
            },
        );

        Ok(format!(
            "Ended session \"{}\". Duration: {}.",
            finished.name,
            format_duration(finished.duration),
        ))
    }

    /// Format the user's history without clearing it.
    pub fn get_history_text(&self, user: &UserId) -> Result<String, TrackerError> {
        let text =
            history_text(&self.history.get(user)).map_err(|_| TrackerError::EmptyHistory)?;
        Ok(format!("Session history:\n{}", text))
    }

    /// Build the user's report and clear the reported entries.
    ///
    /// The clear is unconditional once the text is composed: the caller already
    /// holds the reply, so there is nothing left to lose by clearing. Only the
    /// snapshot that went into the report is removed, so a session completed in
    /// the meantime stays queued for the next report.
    pub fn get_and_clear_report(&self, user: &UserId) -> Result<String, TrackerError> {
        let entries = self.history.get(user);
        let report = build_report(&entries).map_err(|_| TrackerError::EmptyHistory)?;
        self.history.remove_first(user, entries.len());
        Ok(format!("Daily report:\n{}", report.text))
    }

    /// Run one scheduled report cycle over every user with history.
    ///
    /// Users with empty logs are skipped. A delivery failure for one user is
    /// logged and leaves that user's log intact for the next cycle; it never
    /// aborts the remaining users. On success only the snapshot that was
    /// reported is removed — an entry recorded while the delivery was in
    /// flight stays queued for the next cycle. Returns the number of reports
    /// delivered.
    pub async fn run_daily_cycle(&self) -> usize {
        let users = self.history.users_with_history();
        let mut delivered = 0;

        for user in users {
            let entries = self.history.get(&user);
            let report = match build_report(&entries) {
                Ok(report) => report,
                // Emptied between listing and reading; nothing to send.
                Err(_) => continue,
            };

            let text = format!("Daily work session report for {}:\n{}", user, report.text);
            match self.delivery.deliver(&self.report_destination, &text).await {
                Ok(()) => {
                    self.history.remove_first(&user, entries.len());
                    delivered += 1;
                }
                Err(e) => {
                    log::warn!(
                        "daily report delivery for {} failed, keeping their log: {:#}",
                        user,
                        e,
                    );
                }
            }
        }

        log::info!("daily cycle complete: {} report(s) delivered", delivered);
        delivered
    }
}
