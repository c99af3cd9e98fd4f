// ABOUTME: One-shot reminder — fires a fixed interval after a session start.
// ABOUTME: Re-validates the start token at fire time; a stale token makes it a silent no-op.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::delivery::Delivery;
use crate::store::{SessionStore, UserId};

/// Spawn the deferred reminder for a freshly started session.
///
/// The task sleeps for `after`, then checks whether the session identified by
/// `token` is still the user's active one. The user may have ended the session,
/// or ended it and started another (even with the same name) — in both cases
/// the token no longer matches and nothing is sent. At most one reminder is
/// produced per start, never a repeat.
pub fn spawn_reminder(
    sessions: Arc<SessionStore>,
    delivery: Arc<dyn Delivery>,
    user: UserId,
    name: String,
    token: u64,
    after: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        tokio::time::sleep(after).await;

        if !sessions.is_active(&user, token) {
            return;
        }

        let text = format!(
            "{}, you've been working on \"{}\" for a while now. Take a short break!",
            user, name,
        );
        if let Err(e) = delivery.deliver(user.as_str(), &text).await {
            log::warn!("reminder delivery to {} failed: {:#}", user, e);
        }
    })
}
