//! SessionRegistry - process-wide table of notification subscriptions.
//!
//! Replaces an implicit global event bus keyed by view attach/detach with
//! an explicit owned registry: `register` on attach, `unregister` on
//! detach, broadcast on job completion, at-most-once per session.

use std::collections::HashMap;
use std::sync::RwLock;

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::debug;

use crate::domain::foundation::{ServiceResult, SessionKey};

struct Subscription {
    caller_identity: Option<String>,
    sender: UnboundedSender<ServiceResult>,
}

/// Maps a logical session key to its delivery channel.
///
/// A session registered after a job's terminal state never receives that
/// result; there is no replay buffer.
#[derive(Default)]
pub struct SessionRegistry {
    subscriptions: RwLock<HashMap<SessionKey, Subscription>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a subscription for the session, replacing any previous one
    /// for the same key (re-attach supersedes the old channel).
    ///
    /// Returns the receiving end; dropping it makes the session eligible
    /// for pruning on the next delivery.
    pub fn register(
        &self,
        key: SessionKey,
        caller_identity: Option<String>,
    ) -> UnboundedReceiver<ServiceResult> {
        let (sender, receiver) = mpsc::unbounded_channel();
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        debug!(session = %key, "registered notification session");
        subscriptions.insert(
            key,
            Subscription {
                caller_identity,
                sender,
            },
        );
        receiver
    }

    /// Remove the session's subscription, if any.
    pub fn unregister(&self, key: &SessionKey) {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if subscriptions.remove(key).is_some() {
            debug!(session = %key, "unregistered notification session");
        }
    }

    /// Broadcast a terminal result to every currently registered session.
    ///
    /// Sessions whose receiver was dropped are pruned. Returns the number
    /// of sessions the result was delivered to.
    pub fn deliver(&self, result: &ServiceResult) -> usize {
        let mut subscriptions = self
            .subscriptions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let mut delivered = 0;
        subscriptions.retain(|key, subscription| {
            match subscription.sender.send(result.clone()) {
                Ok(()) => {
                    delivered += 1;
                    true
                }
                Err(_) => {
                    debug!(session = %key, "pruned dead notification session");
                    false
                }
            }
        });
        delivered
    }

    /// The caller identity recorded for a session, when registered.
    pub fn caller_identity(&self, key: &SessionKey) -> Option<String> {
        let subscriptions = self
            .subscriptions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscriptions
            .get(key)
            .and_then(|s| s.caller_identity.clone())
    }

    /// Number of registered sessions.
    pub fn len(&self) -> usize {
        let subscriptions = self
            .subscriptions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
