//! Synchronous store core
//!
//! Owns the retro state and applies join snapshots and events one at a time.
//! Side effects are returned as [`StoreEffect`] values instead of being
//! performed, so the core runs without any transport or runtime.

use crate::config::StoreConfig;
use retro_domain::{IdeaCollection, PresenceEntry, PresenceMap, RetroState, Stage, User};
use retro_reconcile::{reduce, IdeaView, RetroEvent};
use tracing::{debug, info};

/// Progress of the channel join
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinStatus {
    /// No reply yet
    Joining,
    /// Snapshot received and applied
    Joined,
    /// Every attempt failed
    Failed {
        /// Attempts made
        attempts: u32,
    },
}

/// Side effect requested by a state transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreEffect {
    /// The retro just entered the distribution stage
    AnnounceDistribution,
}

/// Point-in-time view handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct RetroSnapshot {
    /// Connected sessions
    pub presences: PresenceMap,
    /// Ideas in arrival order
    pub ideas: IdeaCollection,
    /// Current stage
    pub stage: Stage,
    /// Join progress
    pub join: JoinStatus,
    /// Number of inputs applied so far
    pub revision: u64,
}

impl RetroSnapshot {
    /// One user per connected session
    #[must_use]
    pub fn users(&self) -> Vec<User> {
        retro_reconcile::list_users(&self.presences)
    }

    /// The viewer's presence entry
    #[must_use]
    pub fn current_presence(&self, user_token: &str) -> Option<&PresenceEntry> {
        retro_reconcile::current_presence(&self.presences, user_token)
    }

    /// The viewer's user record
    #[must_use]
    pub fn current_user(&self, user_token: &str) -> Option<&User> {
        retro_reconcile::current_user(&self.presences, user_token)
    }

    /// Render data for every idea, as seen by the viewer
    #[must_use]
    pub fn idea_views(&self, user_token: &str) -> Vec<IdeaView<'_>> {
        let is_facilitator = self
            .current_user(user_token)
            .is_some_and(|user| user.is_facilitator);
        retro_reconcile::idea_views(&self.ideas, is_facilitator)
    }
}

/// Owner of the retro state
#[derive(Debug, Clone)]
pub struct RetroStore {
    state: RetroState,
    join: JoinStatus,
    revision: u64,
    distribution_stage: Stage,
}

impl RetroStore {
    /// Empty defaults, waiting for the join reply
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            state: RetroState::new(),
            join: JoinStatus::Joining,
            revision: 0,
            distribution_stage: config.distribution_stage,
        }
    }

    /// Current state
    #[inline]
    #[must_use]
    pub fn state(&self) -> &RetroState {
        &self.state
    }

    /// Join progress
    #[inline]
    #[must_use]
    pub fn join_status(&self) -> JoinStatus {
        self.join
    }

    /// Inputs applied so far
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Replace the whole state with the join snapshot
    pub fn apply_join(&mut self, snapshot: RetroState) {
        info!(
            ideas = snapshot.ideas.len(),
            presences = snapshot.presences.len(),
            stage = %snapshot.stage,
            "applied join snapshot"
        );
        self.state = snapshot;
        self.join = JoinStatus::Joined;
        self.revision += 1;
    }

    /// Record that the join was abandoned; the current state stays
    pub fn mark_join_failed(&mut self, attempts: u32) {
        self.join = JoinStatus::Failed { attempts };
        self.revision += 1;
    }

    /// Apply one event
    ///
    /// Returns [`StoreEffect::AnnounceDistribution`] only for the transition
    /// into the distribution stage, never while already in it.
    pub fn apply(&mut self, event: RetroEvent) -> Option<StoreEffect> {
        let previous = self.state.stage;
        debug!(event = %event.kind(), idea = ?event.idea_id(), "applying event");

        self.state = reduce(std::mem::take(&mut self.state), event);
        self.revision += 1;

        let current = self.state.stage;
        if current != previous {
            info!(from = %previous, to = %current, "stage changed");
        }
        (current == self.distribution_stage && previous != self.distribution_stage)
            .then_some(StoreEffect::AnnounceDistribution)
    }

    /// Copy out the current view
    #[must_use]
    pub fn snapshot(&self) -> RetroSnapshot {
        RetroSnapshot {
            presences: self.state.presences.clone(),
            ideas: self.state.ideas.clone(),
            stage: self.state.stage,
            join: self.join,
            revision: self.revision,
        }
    }
}
