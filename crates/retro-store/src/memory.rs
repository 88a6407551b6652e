//! In-memory channel
//!
//! Scripted join replies, synchronous event emission and a record of
//! outbound pushes. Used by tests and by the replay CLI.

use crate::channel::{EventHandler, RetroChannel, SubscriptionId};
use crate::error::ChannelError;
use async_trait::async_trait;
use parking_lot::Mutex;
use serde_json::{json, Value};
use std::collections::VecDeque;

#[derive(Default)]
struct Inner {
    next_id: u64,
    handlers: Vec<(SubscriptionId, String, EventHandler)>,
    scripted_joins: VecDeque<Result<Value, ChannelError>>,
    fallback_join: Option<Value>,
    join_attempts: usize,
    pushes: Vec<(String, Value)>,
}

/// Channel that lives entirely in process memory
#[derive(Default)]
pub struct MemoryChannel {
    inner: Mutex<Inner>,
}

impl MemoryChannel {
    /// Channel whose joins are rejected until a reply is scripted
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Channel whose joins succeed with `snapshot` once scripted replies run out
    #[must_use]
    pub fn with_join_snapshot(snapshot: Value) -> Self {
        let channel = Self::new();
        channel.inner.lock().fallback_join = Some(snapshot);
        channel
    }

    /// Queue a reply for the next join attempt
    pub fn script_join(&self, reply: Result<Value, ChannelError>) {
        self.inner.lock().scripted_joins.push_back(reply);
    }

    /// Deliver an inbound event to every subscriber of `event`
    ///
    /// Handlers run on the caller's thread, outside the channel lock.
    /// Returns the number of handlers invoked.
    pub fn emit(&self, event: &str, payload: Value) -> usize {
        let handlers: Vec<EventHandler> = self
            .inner
            .lock()
            .handlers
            .iter()
            .filter(|(_, name, _)| name == event)
            .map(|(_, _, handler)| EventHandler::clone(handler))
            .collect();

        for handler in &handlers {
            handler(payload.clone());
        }
        handlers.len()
    }

    /// Total live subscriptions
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.inner.lock().handlers.len()
    }

    /// Live subscriptions for one event
    #[must_use]
    pub fn subscriber_count_for(&self, event: &str) -> usize {
        self.inner
            .lock()
            .handlers
            .iter()
            .filter(|(_, name, _)| name == event)
            .count()
    }

    /// Number of join calls so far
    #[must_use]
    pub fn join_attempts(&self) -> usize {
        self.inner.lock().join_attempts
    }

    /// Outbound pushes in emission order
    #[must_use]
    pub fn pushes(&self) -> Vec<(String, Value)> {
        self.inner.lock().pushes.clone()
    }
}

impl std::fmt::Debug for MemoryChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let inner = self.inner.lock();
        f.debug_struct("MemoryChannel")
            .field("subscriptions", &inner.handlers.len())
            .field("join_attempts", &inner.join_attempts)
            .field("pushes", &inner.pushes.len())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl RetroChannel for MemoryChannel {
    async fn join(&self) -> Result<Value, ChannelError> {
        let mut inner = self.inner.lock();
        inner.join_attempts += 1;
        if let Some(reply) = inner.scripted_joins.pop_front() {
            return reply;
        }
        inner
            .fallback_join
            .clone()
            .ok_or_else(|| ChannelError::Rejected(json!({ "reason": "unmatched topic" })))
    }

    fn on(&self, event: &str, handler: EventHandler) -> SubscriptionId {
        let mut inner = self.inner.lock();
        inner.next_id += 1;
        let id = SubscriptionId(inner.next_id);
        inner.handlers.push((id, event.to_string(), handler));
        id
    }

    fn off(&self, subscription: SubscriptionId) {
        self.inner
            .lock()
            .handlers
            .retain(|(id, _, _)| *id != subscription);
    }

    async fn push(&self, event: &str, payload: Value) -> Result<(), ChannelError> {
        self.inner.lock().pushes.push((event.to_string(), payload));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn join_uses_scripted_replies_then_fallback() {
        let channel = MemoryChannel::with_join_snapshot(json!({ "stage": "voting" }));
        channel.script_join(Err(ChannelError::Timeout));

        assert!(matches!(channel.join().await, Err(ChannelError::Timeout)));
        assert_eq!(channel.join().await.unwrap(), json!({ "stage": "voting" }));
        assert_eq!(channel.join_attempts(), 2);
    }

    #[tokio::test]
    async fn join_without_snapshot_is_rejected() {
        let channel = MemoryChannel::new();
        assert!(matches!(channel.join().await, Err(ChannelError::Rejected(_))));
    }

    #[test]
    fn emit_reaches_only_matching_subscribers() {
        let channel = MemoryChannel::new();
        let hits = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&hits);
        let sub = channel.on(
            "idea_deleted",
            Arc::new(move |_: Value| {
                counter.fetch_add(1, Ordering::SeqCst);
            }),
        );
        channel.on("new_idea_created", Arc::new(|_: Value| {}));

        assert_eq!(channel.emit("idea_deleted", json!({ "id": 1 })), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 1);

        channel.off(sub);
        assert_eq!(channel.emit("idea_deleted", json!({ "id": 1 })), 0);
        assert_eq!(channel.subscriber_count(), 1);
    }

    #[tokio::test]
    async fn pushes_are_recorded() {
        let channel = MemoryChannel::new();
        channel
            .push("enable_idea_edit", json!({ "id": 3 }))
            .await
            .unwrap();
        assert_eq!(
            channel.pushes(),
            vec![("enable_idea_edit".to_string(), json!({ "id": 3 }))]
        );
    }
}
