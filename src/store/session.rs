// ABOUTME: Session store — at most one active work session per user.
// ABOUTME: Each start issues a unique token so deferred reminders can re-validate liveness.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Duration, Local};

use super::UserId;

/// Expected, user-facing failures from session transitions.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    /// The user already has an active session and must end it first.
    #[error("you already have an active session!")]
    AlreadyActive,
    /// The user has no active session to end.
    #[error("you don't have an active session!")]
    NoActiveSession,
}

/// Snapshot returned by a successful start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartedSession {
    pub name: String,
    pub start_time: DateTime<Local>,
    /// Unique per start; a reminder fires only if the store still holds this token.
    pub token: u64,
}

/// A session removed from the store by a successful end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinishedSession {
    pub name: String,
    pub start_time: DateTime<Local>,
    pub end_time: DateTime<Local>,
    pub duration: Duration,
}

struct ActiveSession {
    name: String,
    start_time: DateTime<Local>,
    token: u64,
}

struct Inner {
    active: HashMap<UserId, ActiveSession>,
    next_token: u64,
}

/// In-memory map of active sessions. Every public operation takes the lock
/// once, so each call is atomic with respect to concurrently arriving events.
pub struct SessionStore {
    inner: Mutex<Inner>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner {
                active: HashMap::new(),
                next_token: 1,
            }),
        }
    }

    /// Start a session for `user` at the current instant.
    pub fn start(&self, user: &UserId, name: &str) -> Result<StartedSession, SessionError> {
        self.start_at(user, name, Local::now())
    }

    /// Start a session with an explicit start instant.
    pub fn start_at(
        &self,
        user: &UserId,
        name: &str,
        now: DateTime<Local>,
    ) -> Result<StartedSession, SessionError> {
        let mut inner = self.inner.lock().expect("session store lock poisoned");
        if inner.active.contains_key(user) {
            return Err(SessionError::AlreadyActive);
        }
        let token = inner.next_token;
        inner.next_token += 1;
        inner.active.insert(
            user.clone(),
            ActiveSession {
                name: name.to_string(),
                start_time: now,
                token,
            },
        );
        Ok(StartedSession {
            name: name.to_string(),
            start_time: now,
            token,
        })
    }

    /// End the user's active session at the current instant.
    pub fn end(&self, user: &UserId) -> Result<FinishedSession, SessionError> {
        self.end_at(user, Local::now())
    }

    /// End the user's active session with an explicit end instant.
    pub fn end_at(
        &self,
        user: &UserId,
        now: DateTime<Local>,
    ) -> Result<FinishedSession, SessionError> {
        let mut inner = self.inner.lock().expect("session store lock poisoned");
        let session = inner
            .active
            .remove(user)
            .ok_or(SessionError::NoActiveSession)?;
        Ok(FinishedSession {
            name: session.name,
            start_time: session.start_time,
            end_time: now,
            duration: now - session.start_time,
        })
    }

    /// Whether the session identified by `token` is still the user's active one.
    ///
    /// False once the session ended, even if the user has since started a new
    /// session (which carries a different token).
    pub fn is_active(&self, user: &UserId, token: u64) -> bool {
        let inner = self.inner.lock().expect("session store lock poisoned");
        inner.active.get(user).is_some_and(|s| s.token == token)
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, h, m, s).unwrap()
    }

    #[test]
    fn start_then_end_computes_duration() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");

        let started = store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();
        assert_eq!(started.name, "Writing");

        let finished = store.end_at(&alice, at(9, 42, 0)).unwrap();
        assert_eq!(finished.name, "Writing");
        assert_eq!(finished.duration, Duration::minutes(42));
    }

    #[test]
    fn second_start_fails_while_active() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");

        store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();
        let err = store.start_at(&alice, "Editing", at(9, 5, 0)).unwrap_err();
        assert_eq!(err, SessionError::AlreadyActive);
    }

    #[test]
    fn end_without_active_session_fails() {
        let store = SessionStore::new();
        let err = store.end_at(&UserId::from("alice"), at(10, 0, 0)).unwrap_err();
        assert_eq!(err, SessionError::NoActiveSession);
    }

    #[test]
    fn start_succeeds_again_after_end() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");

        store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();
        store.end_at(&alice, at(9, 30, 0)).unwrap();
        store.start_at(&alice, "Editing", at(9, 31, 0)).unwrap();
    }

    #[test]
    fn users_are_isolated() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");
        let bob = UserId::from("bob");

        store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();

        // Bob has no active session even though Alice does.
        assert_eq!(
            store.end_at(&bob, at(9, 10, 0)).unwrap_err(),
            SessionError::NoActiveSession
        );

        // Bob can start independently.
        store.start_at(&bob, "Reading", at(9, 15, 0)).unwrap();
        let finished = store.end_at(&alice, at(9, 20, 0)).unwrap();
        assert_eq!(finished.name, "Writing");
    }

    #[test]
    fn token_is_stale_after_end() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");

        let started = store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();
        assert!(store.is_active(&alice, started.token));

        store.end_at(&alice, at(9, 30, 0)).unwrap();
        assert!(!store.is_active(&alice, started.token));
    }

    #[test]
    fn token_is_stale_after_restart_with_same_name() {
        let store = SessionStore::new();
        let alice = UserId::from("alice");

        let first = store.start_at(&alice, "Writing", at(9, 0, 0)).unwrap();
        store.end_at(&alice, at(9, 10, 0)).unwrap();
        let second = store.start_at(&alice, "Writing", at(9, 11, 0)).unwrap();

        // Same user, same name, but a new start — only the new token is live.
        assert!(!store.is_active(&alice, first.token));
        assert!(store.is_active(&alice, second.token));
    }
}
