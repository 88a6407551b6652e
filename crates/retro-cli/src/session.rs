//! Recorded channel sessions
//!
//! A session file holds the join reply and the events the server pushed
//! afterwards. Replaying it drives a real [`StoreHandle`] over a
//! [`MemoryChannel`].

use anyhow::Context;
use retro_store::{
    JoinStatus, MemoryChannel, RetroSnapshot, StageNotifier, StoreConfig, StoreHandle,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

/// One pushed event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionEvent {
    /// Wire event name
    pub event: String,
    /// Raw payload
    #[serde(default)]
    pub payload: Value,
}

/// Join reply plus the event stream that followed it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    /// Join reply; `None` makes the join fail
    #[serde(default)]
    pub join: Option<Value>,
    /// Events in server order
    #[serde(default)]
    pub events: Vec<SessionEvent>,
}

impl Session {
    /// Parse a session from JSON text
    ///
    /// # Errors
    /// Fails if `raw` is not a valid session document.
    pub fn from_json_str(raw: &str) -> anyhow::Result<Self> {
        serde_json::from_str(raw).context("invalid session JSON")
    }

    /// Load a session file
    ///
    /// # Errors
    /// Fails if the file cannot be read or does not parse as a session.
    pub fn from_file(path: &Path) -> anyhow::Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read session {}", path.display()))?;
        Self::from_json_str(&raw).with_context(|| format!("in {}", path.display()))
    }

    /// In-memory channel answering the join with this session's reply
    #[must_use]
    pub fn channel(&self) -> MemoryChannel {
        match &self.join {
            Some(snapshot) => MemoryChannel::with_join_snapshot(snapshot.clone()),
            None => MemoryChannel::new(),
        }
    }

    /// Attach a store, wait for the join to settle, then deliver every event
    ///
    /// # Errors
    /// Fails if the store's event loop stops before the replay completes.
    pub async fn replay(
        &self,
        config: StoreConfig,
        notifier: Arc<dyn StageNotifier>,
    ) -> anyhow::Result<RetroSnapshot> {
        let channel = Arc::new(self.channel());
        let store = StoreHandle::attach(channel.clone(), config, notifier);

        let joined = store.wait_for(|s| s.join != JoinStatus::Joining).await?;
        info!(join = ?joined.join, events = self.events.len(), "replaying session");

        for SessionEvent { event, payload } in &self.events {
            if channel.emit(event, payload.clone()) == 0 {
                warn!(event = %event, "no subscriber for event, skipped");
            }
        }

        let snapshot = store.flush().await?;
        store.detach();
        Ok(snapshot)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_fields_default() {
        let session = Session::from_json_str("{}").unwrap();
        assert_eq!(session, Session::default());

        let session = Session::from_json_str(r#"{ "join": null, "events": [{ "event": "idea_deleted" }] }"#)
            .unwrap();
        assert!(session.join.is_none());
        assert_eq!(session.events[0].payload, Value::Null);
    }

    #[test]
    fn rejects_malformed_json() {
        assert!(Session::from_json_str("{ nope").is_err());
    }

    #[test]
    fn channel_uses_join_reply() {
        let session = Session {
            join: Some(json!({ "stage": "voting" })),
            events: Vec::new(),
        };
        let channel = session.channel();
        assert_eq!(channel.subscriber_count(), 0);
        assert_eq!(channel.join_attempts(), 0);
    }
}
