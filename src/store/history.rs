// ABOUTME: History store — per-user ordered log of completed sessions.
// ABOUTME: Entries are append-only and cleared wholesale when a report is emitted.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::Duration;

use super::UserId;

/// A finished session as recorded in a user's history log. Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedSession {
    pub name: String,
    pub duration: Duration,
    pub start_text: String,
    pub end_text: String,
}

/// In-memory map from user to their completed sessions since the last report.
/// Insertion order is completion order. Lock per call, same as the session store.
pub struct HistoryStore {
    logs: Mutex<HashMap<UserId, Vec<CompletedSession>>>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(HashMap::new()),
        }
    }

    /// Append a completed session to the user's log, creating the log if absent.
    pub fn record(&self, user: &UserId, session: CompletedSession) {
        let mut logs = self.logs.lock().expect("history store lock poisoned");
        logs.entry(user.clone()).or_default().push(session);
    }

    /// Snapshot of the user's log, empty if the user has none. Does not mutate.
    pub fn get(&self, user: &UserId) -> Vec<CompletedSession> {
        let logs = self.logs.lock().expect("history store lock poisoned");
        logs.get(user).cloned().unwrap_or_default()
    }

    /// Reset the user's log to empty. No-op if the user has no log.
    pub fn clear(&self, user: &UserId) {
        let mut logs = self.logs.lock().expect("history store lock poisoned");
        if let Some(log) = logs.get_mut(user) {
            log.clear();
        }
    }

    /// Remove the first `n` entries of the user's log.
    ///
    /// Report emission uses this instead of [`clear`](Self::clear): a session
    /// completed while the report was in flight sits after the reported
    /// snapshot and must survive for the next report.
    pub fn remove_first(&self, user: &UserId, n: usize) {
        let mut logs = self.logs.lock().expect("history store lock poisoned");
        if let Some(log) = logs.get_mut(user) {
            log.drain(..n.min(log.len()));
        }
    }

    /// Users holding at least one entry, in stable (sorted) order so the daily
    /// cycle processes them deterministically.
    pub fn users_with_history(&self) -> Vec<UserId> {
        let logs = self.logs.lock().expect("history store lock poisoned");
        let mut users: Vec<UserId> = logs
            .iter()
            .filter(|(_, log)| !log.is_empty())
            .map(|(user, _)| user.clone())
            .collect();
        users.sort();
        users
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}
