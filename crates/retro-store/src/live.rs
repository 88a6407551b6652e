//! Live store driver
//!
//! Wires a [`RetroChannel`] to a [`RetroStore`]:
//! - one forwarding handler per consumed event
//! - a join task with bounded retry
//! - an event loop that applies inputs in arrival order and republishes
//!   snapshots through a `watch` channel
//!
//! Join replies and events share one queue, so the store never sees two
//! inputs at once.

use crate::channel::{EventHandler, RetroChannel, SubscriptionId};
use crate::config::{JoinPolicy, StoreConfig};
use crate::error::{ChannelError, StoreError};
use crate::notify::{StageNotifier, DISTRIBUTION_NOTICE};
use crate::store::{RetroSnapshot, RetroStore, StoreEffect};
use retro_domain::RetroState;
use retro_reconcile::{EventKind, RetroEvent};
use std::sync::Arc;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

enum StoreInput {
    Joined(RetroState),
    JoinFailed { attempts: u32 },
    Event(RetroEvent),
    Flush(oneshot::Sender<()>),
}

/// A store attached to a live channel
///
/// Dropping the handle tears the store down: every subscription is removed
/// from the channel and the background tasks stop.
pub struct StoreHandle {
    channel: Arc<dyn RetroChannel>,
    subscriptions: Vec<SubscriptionId>,
    inputs: Option<mpsc::UnboundedSender<StoreInput>>,
    snapshots: watch::Receiver<RetroSnapshot>,
    join_task: JoinHandle<()>,
    event_loop: JoinHandle<()>,
}

impl StoreHandle {
    /// Initialize defaults, subscribe to every consumed event and start joining
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn attach(
        channel: Arc<dyn RetroChannel>,
        config: StoreConfig,
        notifier: Arc<dyn StageNotifier>,
    ) -> Self {
        let store = RetroStore::new(&config);
        let (snapshot_tx, snapshots) = watch::channel(store.snapshot());
        let (inputs, queue) = mpsc::unbounded_channel();

        let subscriptions = EventKind::ALL
            .iter()
            .map(|&kind| channel.on(kind.name(), forwarder(kind, inputs.clone())))
            .collect();

        let join_task = tokio::spawn(join_with_retry(
            Arc::clone(&channel),
            config.join,
            inputs.clone(),
        ));
        let event_loop = tokio::spawn(run_event_loop(store, queue, snapshot_tx, notifier));

        Self {
            channel,
            subscriptions,
            inputs: Some(inputs),
            snapshots,
            join_task,
            event_loop,
        }
    }

    /// Latest published snapshot
    #[must_use]
    pub fn snapshot(&self) -> RetroSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Receiver that observes every republished snapshot
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<RetroSnapshot> {
        self.snapshots.clone()
    }

    /// Wait until a published snapshot satisfies `predicate`
    ///
    /// # Errors
    /// `StoreError::Detached` if the event loop stopped first
    pub async fn wait_for(
        &self,
        predicate: impl FnMut(&RetroSnapshot) -> bool,
    ) -> Result<RetroSnapshot, StoreError> {
        let mut rx = self.snapshots.clone();
        let snapshot = rx.wait_for(predicate).await.map_err(|_| StoreError::Detached)?;
        Ok(snapshot.clone())
    }

    /// Wait until every input queued before this call has been applied
    ///
    /// # Errors
    /// `StoreError::Detached` if the event loop stopped first
    pub async fn flush(&self) -> Result<RetroSnapshot, StoreError> {
        let (done_tx, done_rx) = oneshot::channel();
        self.inputs
            .as_ref()
            .ok_or(StoreError::Detached)?
            .send(StoreInput::Flush(done_tx))
            .map_err(|_| StoreError::Detached)?;
        done_rx.await.map_err(|_| StoreError::Detached)?;
        Ok(self.snapshot())
    }

    /// The channel, for outbound writes
    #[inline]
    #[must_use]
    pub fn channel(&self) -> &Arc<dyn RetroChannel> {
        &self.channel
    }

    /// Emit an outbound event on the channel
    ///
    /// # Errors
    /// Returns the channel's failure.
    pub async fn push(&self, event: &str, payload: serde_json::Value) -> Result<(), StoreError> {
        Ok(self.channel.push(event, payload).await?)
    }

    /// Tear the store down
    pub fn detach(self) {
        drop(self);
    }

    fn teardown(&mut self) {
        for subscription in self.subscriptions.drain(..) {
            self.channel.off(subscription);
        }
        self.inputs = None;
        self.join_task.abort();
        self.event_loop.abort();
    }
}

impl Drop for StoreHandle {
    fn drop(&mut self) {
        if !self.subscriptions.is_empty() || self.inputs.is_some() {
            info!(subscriptions = self.subscriptions.len(), "detaching retro store");
        }
        self.teardown();
    }
}

impl std::fmt::Debug for StoreHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreHandle")
            .field("subscriptions", &self.subscriptions)
            .field("revision", &self.snapshots.borrow().revision)
            .finish_non_exhaustive()
    }
}

fn forwarder(kind: EventKind, inputs: mpsc::UnboundedSender<StoreInput>) -> EventHandler {
    Arc::new(move |payload: serde_json::Value| match RetroEvent::decode(kind, payload) {
        Ok(event) => {
            // Closed only after teardown
            let _ = inputs.send(StoreInput::Event(event));
        }
        Err(err) => warn!(event = %kind, error = %err, "dropping undecodable payload"),
    })
}

async fn join_with_retry(
    channel: Arc<dyn RetroChannel>,
    policy: JoinPolicy,
    inputs: mpsc::UnboundedSender<StoreInput>,
) {
    let attempts = policy.attempts();

    for attempt in 1..=attempts {
        match join_once(channel.as_ref(), &policy).await {
            Ok(snapshot) => {
                info!(attempt, "joined retro channel");
                let _ = inputs.send(StoreInput::Joined(snapshot));
                return;
            }
            Err(err) => {
                warn!(attempt, max_attempts = attempts, error = %err, "channel join failed");
                if attempt < attempts {
                    tokio::time::sleep(policy.backoff(attempt)).await;
                }
            }
        }
    }

    error!(attempts, "giving up on channel join");
    let _ = inputs.send(StoreInput::JoinFailed { attempts });
}

async fn join_once(channel: &dyn RetroChannel, policy: &JoinPolicy) -> Result<RetroState, StoreError> {
    let reply = match policy.timeout() {
        Some(limit) => tokio::time::timeout(limit, channel.join())
            .await
            .map_err(|_| ChannelError::Timeout)??,
        None => channel.join().await?,
    };
    serde_json::from_value(reply).map_err(StoreError::InvalidSnapshot)
}

async fn run_event_loop(
    mut store: RetroStore,
    mut queue: mpsc::UnboundedReceiver<StoreInput>,
    snapshots: watch::Sender<RetroSnapshot>,
    notifier: Arc<dyn StageNotifier>,
) {
    while let Some(input) = queue.recv().await {
        let effect = match input {
            StoreInput::Joined(snapshot) => {
                store.apply_join(snapshot);
                None
            }
            StoreInput::JoinFailed { attempts } => {
                store.mark_join_failed(attempts);
                None
            }
            StoreInput::Event(event) => store.apply(event),
            StoreInput::Flush(done) => {
                let _ = done.send(());
                continue;
            }
        };

        snapshots.send_replace(store.snapshot());

        if let Some(StoreEffect::AnnounceDistribution) = effect {
            notifier.notify(DISTRIBUTION_NOTICE);
        }
    }
}
