//! The retro state aggregate

use crate::idea::IdeaCollection;
use crate::presence::PresenceMap;
use crate::types::Stage;
use serde::{Deserialize, Serialize};

/// `{ presences, ideas, stage }`
///
/// Also the shape of the snapshot the server returns on join. Absent fields
/// decode to their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RetroState {
    /// Connected sessions
    #[serde(default)]
    pub presences: PresenceMap,
    /// Ideas in arrival order
    #[serde(default)]
    pub ideas: IdeaCollection,
    /// Current workflow stage
    #[serde(default)]
    pub stage: Stage,
}

impl RetroState {
    /// Empty presences, no ideas, first stage
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}
