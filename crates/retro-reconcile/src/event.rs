//! Typed inbound channel events
//!
//! The channel delivers `(name, json payload)` pairs. [`RetroEvent::decode`]
//! maps the eight event names the reconciler consumes onto typed variants.

use crate::error::DecodeError;
use retro_domain::{Idea, IdeaId, IdeaPatch, PresenceMap, Stage};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// Names of the events the reconciler subscribes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    /// Full presence snapshot
    PresenceState,
    /// A new idea was stored
    NewIdeaCreated,
    /// The facilitator advanced the workflow
    ProceedToNextStage,
    /// Edit lock acquired on an idea
    EnableEditState,
    /// Edit lock released without saving
    DisableEditState,
    /// Keystroke-level mirror of the editor's text
    IdeaLiveEdit,
    /// Edit committed
    IdeaEdited,
    /// Idea removed
    IdeaDeleted,
}

impl EventKind {
    /// Every consumed event
    pub const ALL: [EventKind; 8] = [
        EventKind::PresenceState,
        EventKind::NewIdeaCreated,
        EventKind::ProceedToNextStage,
        EventKind::EnableEditState,
        EventKind::DisableEditState,
        EventKind::IdeaLiveEdit,
        EventKind::IdeaEdited,
        EventKind::IdeaDeleted,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            EventKind::PresenceState => "presence_state",
            EventKind::NewIdeaCreated => "new_idea_created",
            EventKind::ProceedToNextStage => "proceed_to_next_stage",
            EventKind::EnableEditState => "enable_edit_state",
            EventKind::DisableEditState => "disable_edit_state",
            EventKind::IdeaLiveEdit => "idea_live_edit",
            EventKind::IdeaEdited => "idea_edited",
            EventKind::IdeaDeleted => "idea_deleted",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for EventKind {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DecodeError::UnknownEvent(s.to_string()))
    }
}

/// A decoded inbound event
#[derive(Debug, Clone, PartialEq)]
pub enum RetroEvent {
    /// Replace presences wholesale
    PresenceState(PresenceMap),
    /// Append an idea
    NewIdeaCreated(Idea),
    /// Replace the stage
    ProceedToNextStage {
        /// The new stage
        stage: Stage,
    },
    /// Mark an idea as being edited
    EnableEditState {
        /// Target idea
        id: IdeaId,
    },
    /// Release an idea's edit lock
    DisableEditState {
        /// Target idea
        id: IdeaId,
    },
    /// Merge in-progress fields
    IdeaLiveEdit(IdeaPatch),
    /// Merge committed fields and finish editing
    IdeaEdited(IdeaPatch),
    /// Remove an idea
    IdeaDeleted {
        /// Target idea
        id: IdeaId,
    },
}

#[derive(Deserialize)]
struct IdeaRef {
    id: IdeaId,
}

#[derive(Deserialize)]
struct StagePayload {
    stage: Stage,
}

impl RetroEvent {
    /// Decode a payload for a known event kind
    ///
    /// # Errors
    /// `DecodeError::InvalidPayload` if the payload does not match the shape
    /// the event carries.
    pub fn decode(kind: EventKind, payload: serde_json::Value) -> Result<Self, DecodeError> {
        let event = match kind {
            EventKind::PresenceState => RetroEvent::PresenceState(parse(kind, payload)?),
            EventKind::NewIdeaCreated => RetroEvent::NewIdeaCreated(parse(kind, payload)?),
            EventKind::ProceedToNextStage => {
                let StagePayload { stage } = parse(kind, payload)?;
                RetroEvent::ProceedToNextStage { stage }
            }
            EventKind::EnableEditState => {
                let IdeaRef { id } = parse(kind, payload)?;
                RetroEvent::EnableEditState { id }
            }
            EventKind::DisableEditState => {
                let IdeaRef { id } = parse(kind, payload)?;
                RetroEvent::DisableEditState { id }
            }
            EventKind::IdeaLiveEdit => RetroEvent::IdeaLiveEdit(parse(kind, payload)?),
            EventKind::IdeaEdited => RetroEvent::IdeaEdited(parse(kind, payload)?),
            EventKind::IdeaDeleted => {
                let IdeaRef { id } = parse(kind, payload)?;
                RetroEvent::IdeaDeleted { id }
            }
        };
        Ok(event)
    }

    /// Decode a payload by wire name
    ///
    /// # Errors
    /// `DecodeError::UnknownEvent` for names outside [`EventKind::ALL`], or
    /// `DecodeError::InvalidPayload` as for [`RetroEvent::decode`].
    pub fn decode_named(name: &str, payload: serde_json::Value) -> Result<Self, DecodeError> {
        Self::decode(name.parse()?, payload)
    }

    /// The kind of this event
    #[must_use]
    pub fn kind(&self) -> EventKind {
        match self {
            RetroEvent::PresenceState(_) => EventKind::PresenceState,
            RetroEvent::NewIdeaCreated(_) => EventKind::NewIdeaCreated,
            RetroEvent::ProceedToNextStage { .. } => EventKind::ProceedToNextStage,
            RetroEvent::EnableEditState { .. } => EventKind::EnableEditState,
            RetroEvent::DisableEditState { .. } => EventKind::DisableEditState,
            RetroEvent::IdeaLiveEdit(_) => EventKind::IdeaLiveEdit,
            RetroEvent::IdeaEdited(_) => EventKind::IdeaEdited,
            RetroEvent::IdeaDeleted { .. } => EventKind::IdeaDeleted,
        }
    }

    /// The idea this event targets, if it is idea-bearing
    #[must_use]
    pub fn idea_id(&self) -> Option<IdeaId> {
        match self {
            RetroEvent::NewIdeaCreated(idea) => Some(idea.id),
            RetroEvent::EnableEditState { id }
            | RetroEvent::DisableEditState { id }
            | RetroEvent::IdeaDeleted { id } => Some(*id),
            RetroEvent::IdeaLiveEdit(patch) | RetroEvent::IdeaEdited(patch) => Some(patch.id),
            RetroEvent::PresenceState(_) | RetroEvent::ProceedToNextStage { .. } => None,
        }
    }
}

fn parse<T: DeserializeOwned>(kind: EventKind, payload: serde_json::Value) -> Result<T, DecodeError> {
    serde_json::from_value(payload).map_err(|source| DecodeError::InvalidPayload {
        event: kind.name(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_domain::Category;
    use serde_json::json;

    #[test]
    fn every_kind_round_trips_its_name() {
        for kind in EventKind::ALL {
            assert_eq!(kind.name().parse::<EventKind>().unwrap(), kind);
        }
    }

    #[test]
    fn unknown_event_name_is_rejected() {
        let err = RetroEvent::decode_named("vote_cast", json!({})).unwrap_err();
        assert!(matches!(err, DecodeError::UnknownEvent(name) if name == "vote_cast"));
    }

    #[test]
    fn decodes_new_idea() {
        let event = RetroEvent::decode_named(
            "new_idea_created",
            json!({ "id": 7, "author": "Mugatu", "category": "confused", "body": "why" }),
        )
        .unwrap();

        match event {
            RetroEvent::NewIdeaCreated(idea) => {
                assert_eq!(idea.id, IdeaId(7));
                assert_eq!(idea.category, Category::Confused);
            }
            other => panic!("unexpected event: {other:?}"),
        }
    }

    #[test]
    fn identity_events_ignore_extra_fields() {
        let event = RetroEvent::decode(
            EventKind::EnableEditState,
            json!({ "id": 4, "body": "whatever", "editing": false }),
        )
        .unwrap();
        assert_eq!(event, RetroEvent::EnableEditState { id: IdeaId(4) });
        assert_eq!(event.idea_id(), Some(IdeaId(4)));
    }

    #[test]
    fn decodes_stage_transition() {
        let event = RetroEvent::decode(
            EventKind::ProceedToNextStage,
            json!({ "stage": "action-item-distribution" }),
        )
        .unwrap();
        assert_eq!(
            event,
            RetroEvent::ProceedToNextStage {
                stage: Stage::ActionItemDistribution
            }
        );
        assert_eq!(event.idea_id(), None);
    }

    #[test]
    fn malformed_payload_names_the_event() {
        let err = RetroEvent::decode(EventKind::IdeaDeleted, json!({ "idea": 1 })).unwrap_err();
        assert!(matches!(err, DecodeError::InvalidPayload { event: "idea_deleted", .. }));
    }
}
