// ABOUTME: Store module — in-memory session and history state shared across events.
// ABOUTME: Both stores are injected by handle; there is no ambient module-level state.

pub mod history;
pub mod session;

pub use history::{CompletedSession, HistoryStore};
pub use session::{FinishedSession, SessionError, SessionStore, StartedSession};

/// Opaque identifier for a user, as supplied by the host chat platform.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct UserId(pub String);

impl UserId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for UserId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
