// ABOUTME: Outbound delivery collaborator — how report and reminder text leaves the core.
// ABOUTME: The trait seam keeps the core platform-agnostic and testable with a recording double.

use async_trait::async_trait;

/// Sends composed text to a destination (a channel, a user, ...) on the host
/// platform. Treated as fallible; callers isolate per-destination failures.
#[async_trait]
pub trait Delivery: Send + Sync {
    async fn deliver(&self, destination: &str, text: &str) -> anyhow::Result<()>;
}

/// Delivery that prints to stdout, used by the line-based front end.
pub struct ConsoleDelivery;

#[async_trait]
impl Delivery for ConsoleDelivery {
    async fn deliver(&self, destination: &str, text: &str) -> anyhow::Result<()> {
        println!("[{}] {}", destination, text);
        Ok(())
    }
}
