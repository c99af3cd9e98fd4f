// ABOUTME: App orchestrator — wires stores, tracker, scheduler, and console delivery.
// ABOUTME: Runs a line-based command loop over stdin as a stand-in for a chat platform.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};

use crate::config::Config;
use crate::delivery::ConsoleDelivery;
use crate::schedule::DailyScheduler;
use crate::store::{HistoryStore, SessionStore, UserId};
use crate::tracker::Tracker;

/// Top-level application that owns the shared stores and drives the front end.
pub struct App {
    config: Config,
}

impl App {
    /// Create a new app with the given configuration.
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Run the application: wire subsystems, spawn the daily scheduler, and
    /// process commands from stdin until EOF. All unreported history is lost on
    /// exit; the stores are purely in-memory.
    pub async fn run(self) -> anyhow::Result<()> {
        let sessions = Arc::new(SessionStore::new());
        let history = Arc::new(HistoryStore::new());
        let delivery = Arc::new(ConsoleDelivery);

        let tracker = Arc::new(Tracker::new(
            sessions,
            history,
            delivery,
            self.config.report.destination.clone(),
            self.config.reminder_interval(),
        ));

        let scheduler = DailyScheduler::new(tracker.clone(), self.config.fire_time());
        let scheduler_handle = tokio::spawn(scheduler.run());
        log::info!(
            "worklog ready; daily reports go to \"{}\" at {:02}:{:02}",
            self.config.report.destination,
            self.config.report.hour,
            self.config.report.minute,
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        while let Some(line) = lines.next_line().await? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            println!("{}", handle_line(&tracker, line));
        }

        scheduler_handle.abort();
        Ok(())
    }
}

const USAGE: &str =
    "usage: <user> !start <session name> | <user> !end | <user> !history | <user> !report";

/// Dispatch one command line of the form `<user> !command [args]` and return
/// the reply text. Expected tracker errors come back as their display text,
/// matching how a chat command layer would relay them.
pub fn handle_line(tracker: &Tracker, line: &str) -> String {
    let mut parts = line.splitn(3, char::is_whitespace);
    let (Some(user), Some(command)) = (parts.next(), parts.next()) else {
        return USAGE.to_string();
    };
    let user = UserId::from(user);
    let rest = parts.next().map(str::trim).unwrap_or("");

    let result = match command {
        "!start" => {
            if rest.is_empty() {
                return "usage: <user> !start <session name>".to_string();
            }
            tracker.start(&user, rest)
        }
        "!end" => tracker.end(&user),
        "!history" => tracker.get_history_text(&user),
        "!report" => tracker.get_and_clear_report(&user),
        _ => return USAGE.to_string(),
    };

    match result {
        Ok(reply) => reply,
        Err(e) => format!("{}, {}", user, e),
    }
}
