//! Channel client interface
//!
//! The store consumes this trait only. Transport and wire encoding live
//! behind it.

use crate::error::ChannelError;
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Callback invoked with each payload of a subscribed event
pub type EventHandler = Arc<dyn Fn(serde_json::Value) + Send + Sync>;

/// Handle returned by [`RetroChannel::on`], used to unsubscribe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubscriptionId(pub u64);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// Bidirectional event channel scoped to one retro
#[async_trait]
pub trait RetroChannel: Send + Sync {
    /// Join the channel
    ///
    /// Resolves with the full state snapshot as raw JSON.
    ///
    /// # Errors
    /// `ChannelError::Rejected` carries the server's error reply.
    async fn join(&self) -> Result<serde_json::Value, ChannelError>;

    /// Subscribe `handler` to every future arrival of `event`
    fn on(&self, event: &str, handler: EventHandler) -> SubscriptionId;

    /// Remove a subscription; unknown ids are ignored
    fn off(&self, subscription: SubscriptionId);

    /// Emit an outbound event
    ///
    /// # Errors
    /// Returns the transport's failure.
    async fn push(&self, event: &str, payload: serde_json::Value) -> Result<(), ChannelError>;
}
