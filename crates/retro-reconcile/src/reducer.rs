//! Pure reducer over the retro state
//!
//! One arm per event kind. Each arm touches only its own slice of the state.
//! Idea-bearing events locate their target by id and are no-ops when no idea
//! matches, which absorbs duplicate and late-arriving events.

use crate::event::RetroEvent;
use retro_domain::{Idea, IdeaCollection, IdeaId, IdeaPatch, RetroState};
use tracing::debug;

/// Apply one event, returning the next state
#[must_use]
pub fn reduce(mut state: RetroState, event: RetroEvent) -> RetroState {
    let kind = event.kind();
    let applied = match event {
        RetroEvent::PresenceState(presences) => {
            state.presences = presences;
            true
        }
        RetroEvent::NewIdeaCreated(idea) => append_idea(&mut state.ideas, idea),
        RetroEvent::ProceedToNextStage { stage } => {
            state.stage = stage;
            true
        }
        RetroEvent::EnableEditState { id } => enable_edit(&mut state.ideas, id),
        RetroEvent::DisableEditState { id } => disable_edit(&mut state.ideas, id),
        RetroEvent::IdeaLiveEdit(patch) => live_edit(&mut state.ideas, patch),
        RetroEvent::IdeaEdited(patch) => finish_edit(&mut state.ideas, patch),
        RetroEvent::IdeaDeleted { id } => delete_idea(&mut state.ideas, id),
    };

    if !applied {
        debug!(event = %kind, "ignored event for unknown or duplicate idea");
    }
    state
}

/// Append a new idea at the end
///
/// Returns `false` if an idea with the same id is already present.
pub fn append_idea(ideas: &mut IdeaCollection, idea: Idea) -> bool {
    ideas.push(idea)
}

/// Set `editing = true`
pub fn enable_edit(ideas: &mut IdeaCollection, id: IdeaId) -> bool {
    ideas.update(id, |idea| idea.editing = true)
}

/// Set `editing = false` and clear the live text
pub fn disable_edit(ideas: &mut IdeaCollection, id: IdeaId) -> bool {
    ideas.update(id, Idea::finish_editing)
}

/// Shallow-merge the supplied fields
pub fn live_edit(ideas: &mut IdeaCollection, patch: IdeaPatch) -> bool {
    ideas.update(patch.id, |idea| idea.merge(patch))
}

/// Merge the supplied fields, then finish editing
pub fn finish_edit(ideas: &mut IdeaCollection, patch: IdeaPatch) -> bool {
    ideas.update(patch.id, |idea| {
        idea.merge(patch);
        idea.finish_editing();
    })
}

/// Remove the matching idea
pub fn delete_idea(ideas: &mut IdeaCollection, id: IdeaId) -> bool {
    ideas.remove(id).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use retro_domain::{Category, PresenceEntry, PresenceMap, Stage, User};
    use retro_test_utils::{idea, state_with_ideas};

    #[test]
    fn presence_state_replaces_wholesale() {
        let mut first = PresenceMap::new();
        first.insert("a".into(), PresenceEntry::single(User::new("Derek", false)));
        let state = reduce(RetroState::new(), RetroEvent::PresenceState(first));

        let mut second = PresenceMap::new();
        second.insert("b".into(), PresenceEntry::single(User::new("Hansel", false)));
        let state = reduce(state, RetroEvent::PresenceState(second.clone()));

        assert_eq!(state.presences, second);
    }

    #[test]
    fn new_ideas_append_in_arrival_order() {
        let state = [3, 1, 2].into_iter().fold(RetroState::new(), |state, id| {
            reduce(state, RetroEvent::NewIdeaCreated(idea(id, "x")))
        });
        assert_eq!(state.ideas.ids(), vec![IdeaId(3), IdeaId(1), IdeaId(2)]);
    }

    #[test]
    fn duplicate_creation_keeps_the_first_copy() {
        let state = state_with_ideas(vec![idea(1, "first")]);
        let state = reduce(state, RetroEvent::NewIdeaCreated(idea(1, "second")));
        assert_eq!(state.ideas.len(), 1);
        assert_eq!(state.ideas.get(IdeaId(1)).unwrap().body, "first");
    }

    #[test]
    fn stage_transition_replaces_stage_only() {
        let state = state_with_ideas(vec![idea(1, "a")]);
        let next = reduce(
            state.clone(),
            RetroEvent::ProceedToNextStage {
                stage: Stage::Voting,
            },
        );
        assert_eq!(next.stage, Stage::Voting);
        assert_eq!(next.ideas, state.ideas);
    }

    #[test]
    fn discussion_transition_decodes_and_applies() {
        let event = RetroEvent::decode_named(
            "proceed_to_next_stage",
            serde_json::json!({ "stage": "discussion" }),
        )
        .unwrap();
        let next = reduce(state_with_ideas(vec![idea(1, "a")]), event);
        assert_eq!(next.stage, Stage::Discussion);
        assert_eq!(next.ideas.len(), 1);
    }

    #[test]
    fn enable_edit_state_is_idempotent() {
        let state = state_with_ideas(vec![idea(1, "a"), idea(2, "b")]);
        let once = reduce(state, RetroEvent::EnableEditState { id: IdeaId(1) });
        let twice = reduce(once.clone(), RetroEvent::EnableEditState { id: IdeaId(1) });

        assert_eq!(once, twice);
        assert!(twice.ideas.get(IdeaId(1)).unwrap().editing);
        assert!(!twice.ideas.get(IdeaId(2)).unwrap().editing);
    }

    #[test]
    fn disable_edit_state_clears_live_text() {
        let mut editing = idea(1, "a");
        editing.editing = true;
        editing.live_edit_text = Some("ab".into());
        let state = reduce(
            state_with_ideas(vec![editing]),
            RetroEvent::DisableEditState { id: IdeaId(1) },
        );

        let idea = state.ideas.get(IdeaId(1)).unwrap();
        assert!(!idea.editing);
        assert_eq!(idea.live_edit_text, None);
        assert_eq!(idea.body, "a");
    }

    #[test]
    fn live_edit_mirrors_text_without_touching_lock() {
        let mut editing = idea(1, "a");
        editing.editing = true;
        let state = reduce(
            state_with_ideas(vec![editing]),
            RetroEvent::IdeaLiveEdit(IdeaPatch::new(IdeaId(1)).with_live_edit_text("a sm")),
        );

        let idea = state.ideas.get(IdeaId(1)).unwrap();
        assert!(idea.editing);
        assert_eq!(idea.live_edit_text.as_deref(), Some("a sm"));
        assert_eq!(idea.body, "a");
    }

    #[test]
    fn idea_edited_finalizes() {
        let mut editing = idea(1, "draft");
        editing.editing = true;
        editing.live_edit_text = Some("x".into());
        let state = reduce(
            state_with_ideas(vec![editing]),
            RetroEvent::IdeaEdited(IdeaPatch::new(IdeaId(1)).with_body("final")),
        );

        let expected = Idea::new(IdeaId(1), "Mugatu", Category::Happy, "final");
        assert_eq!(state.ideas.get(IdeaId(1)), Some(&expected));
    }

    #[test]
    fn idea_deleted_removes_only_the_match() {
        let state = state_with_ideas(vec![idea(1, "a"), idea(2, "b"), idea(3, "c")]);
        let state = reduce(state, RetroEvent::IdeaDeleted { id: IdeaId(2) });
        assert_eq!(state.ideas.ids(), vec![IdeaId(1), IdeaId(3)]);
    }

    #[test]
    fn unknown_id_leaves_ideas_unchanged() {
        let state = state_with_ideas(vec![idea(1, "a")]);
        let events = vec![
            RetroEvent::EnableEditState { id: IdeaId(9) },
            RetroEvent::DisableEditState { id: IdeaId(9) },
            RetroEvent::IdeaLiveEdit(IdeaPatch::new(IdeaId(9)).with_live_edit_text("z")),
            RetroEvent::IdeaEdited(IdeaPatch::new(IdeaId(9)).with_body("z")),
            RetroEvent::IdeaDeleted { id: IdeaId(9) },
        ];

        for event in events {
            let next = reduce(state.clone(), event);
            assert_eq!(next, state);
        }
    }
}
