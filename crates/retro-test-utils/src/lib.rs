//! Testing utilities for the retro sync workspace
//!
//! Shared fixtures for ideas, users, presence maps and join snapshots.

#![allow(missing_docs)]

use retro_domain::{Category, Idea, IdeaId, PresenceEntry, PresenceMap, RetroState, Stage, User};
use serde_json::{json, Value};

pub const FACILITATOR_TOKEN: &str = "tok-mugatu";
pub const PARTICIPANT_TOKEN: &str = "tok-hansel";

/// A happy, idle idea by Mugatu
pub fn idea(id: u64, body: &str) -> Idea {
    Idea::new(IdeaId(id), "Mugatu", Category::Happy, body)
}

pub fn idea_json(id: u64, body: &str) -> Value {
    json!({
        "id": id,
        "author": "Mugatu",
        "category": "happy",
        "body": body,
        "editing": false,
        "liveEditText": null,
    })
}

pub fn user(given_name: &str, is_facilitator: bool) -> User {
    User::new(given_name, is_facilitator)
}

pub fn presence_map(entries: &[(&str, User)]) -> PresenceMap {
    entries
        .iter()
        .map(|(token, user)| ((*token).to_string(), PresenceEntry::single(user.clone())))
        .collect()
}

/// Mugatu facilitating, Hansel participating
pub fn room_presences() -> PresenceMap {
    presence_map(&[
        (FACILITATOR_TOKEN, user("Mugatu", true)),
        (PARTICIPANT_TOKEN, user("Hansel", false)),
    ])
}

pub fn state_with_ideas(ideas: Vec<Idea>) -> RetroState {
    RetroState {
        ideas: ideas.into(),
        ..RetroState::default()
    }
}

/// The snapshot a server would return on join
pub fn join_snapshot() -> RetroState {
    RetroState {
        presences: room_presences(),
        ideas: vec![idea(1, "Derelicte"), idea(2, "Blue Steel")].into(),
        stage: Stage::Grouping,
    }
}
