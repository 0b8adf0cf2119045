//! Notification dispatch: policy (who gets told what) and delivery.
//!
//! Services produce a `GameEvent` from the already-updated in-memory game;
//! the policy turns it into concrete (address, message) pairs; the
//! `Notifier` hands those to the push collaborator after the surrounding
//! transaction has committed. Delivery is best-effort: failures are logged
//! and never affect the state transition that produced the event.

pub mod policy;
pub mod push;

use std::sync::Arc;

use tracing::warn;

pub use policy::{GameEvent, GameRef, PushMessage, UserRef};
pub use push::{HttpPushSender, NoopPushSender, PushSender};

#[derive(Clone)]
pub struct Notifier {
    sender: Arc<dyn PushSender>,
}

impl Notifier {
    pub fn new(sender: Arc<dyn PushSender>) -> Self {
        Self { sender }
    }

    /// Fan out an event to its recipients, fire-and-forget.
    pub fn notify(&self, event: GameEvent) {
        for (address, message) in policy::plan(&event) {
            let sender = Arc::clone(&self.sender);
            tokio::spawn(async move {
                if let Err(e) = sender.send(&address, &message).await {
                    warn!("push delivery failed: {e}");
                }
            });
        }
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier").finish_non_exhaustive()
    }
}
