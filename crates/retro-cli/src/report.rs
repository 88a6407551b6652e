//! Replay output

use retro_domain::{Category, IdeaId, Stage};
use retro_reconcile::IdeaMode;
use retro_store::{JoinStatus, RetroSnapshot};
use serde::Serialize;
use std::fmt::Write;

/// One rendered idea
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IdeaLine {
    /// Idea identity
    pub id: IdeaId,
    /// Category
    pub category: Category,
    /// Submitter
    pub author: String,
    /// Displayed text
    pub text: String,
    /// Updated since insertion
    pub edited: bool,
    /// `edit-form`, `read-only` or `facilitator-editing`
    pub mode: &'static str,
    /// Facilitator controls shown
    pub controls: bool,
}

/// Final state of a replay, as seen by one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Current stage
    pub stage: Stage,
    /// Join outcome
    pub join: String,
    /// Inputs applied
    pub revision: u64,
    /// Connected users in token order
    pub users: Vec<String>,
    /// Viewer's name, when the token is present
    pub viewer: Option<String>,
    /// Ideas in arrival order
    pub ideas: Vec<IdeaLine>,
}

fn join_label(status: JoinStatus) -> String {
    match status {
        JoinStatus::Joining => "joining".to_string(),
        JoinStatus::Joined => "joined".to_string(),
        JoinStatus::Failed { attempts } => format!("failed after {attempts} attempts"),
    }
}

fn mode_label(mode: IdeaMode) -> (&'static str, bool) {
    match mode {
        IdeaMode::EditForm => ("edit-form", true),
        IdeaMode::ReadOnly {
            facilitator_editing_banner: true,
            show_controls,
        } => ("facilitator-editing", show_controls),
        IdeaMode::ReadOnly { show_controls, .. } => ("read-only", show_controls),
    }
}

impl Report {
    /// Project a snapshot for `user_token`; without a token nobody is a facilitator
    #[must_use]
    pub fn new(snapshot: &RetroSnapshot, user_token: Option<&str>) -> Self {
        let token = user_token.unwrap_or_default();
        let ideas = snapshot
            .idea_views(token)
            .into_iter()
            .map(|view| {
                let (mode, controls) = mode_label(view.mode);
                IdeaLine {
                    id: view.id,
                    category: view.category,
                    author: view.author.to_string(),
                    text: view.display_text.to_string(),
                    edited: view.edited,
                    mode,
                    controls,
                }
            })
            .collect();

        Self {
            stage: snapshot.stage,
            join: join_label(snapshot.join),
            revision: snapshot.revision,
            users: snapshot.users().into_iter().map(|u| u.given_name).collect(),
            viewer: user_token
                .and_then(|token| snapshot.current_user(token))
                .map(|u| u.given_name.clone()),
            ideas,
        }
    }

    /// Human-readable rendering
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "stage: {} ({}, revision {})", self.stage, self.join, self.revision);
        let _ = writeln!(out, "users: {}", self.users.join(", "));
        if let Some(viewer) = &self.viewer {
            let _ = writeln!(out, "viewer: {viewer}");
        }
        let _ = writeln!(out, "ideas: {}", self.ideas.len());
        for idea in &self.ideas {
            let _ = write!(out, "  #{} [{}] {}: {}", idea.id, idea.category, idea.author, idea.text);
            if idea.edited {
                out.push_str(" (edited)");
            }
            if idea.mode != "read-only" {
                let _ = write!(out, " <{}>", idea.mode);
            }
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use retro_test_utils::{idea, join_snapshot, FACILITATOR_TOKEN, PARTICIPANT_TOKEN};

    fn snapshot() -> RetroSnapshot {
        let state = join_snapshot();
        RetroSnapshot {
            presences: state.presences,
            ideas: state.ideas,
            stage: state.stage,
            join: JoinStatus::Joined,
            revision: 1,
        }
    }

    #[test]
    fn facilitator_sees_edit_form_for_locked_idea() {
        let mut snapshot = snapshot();
        snapshot.ideas.update(IdeaId(1), |idea| idea.editing = true);

        let report = Report::new(&snapshot, Some(FACILITATOR_TOKEN));
        assert_eq!(report.viewer.as_deref(), Some("Mugatu"));
        assert_eq!(report.ideas[0].mode, "edit-form");
        assert_eq!(report.ideas[1].mode, "read-only");
        assert!(report.ideas[1].controls);

        let participant = Report::new(&snapshot, Some(PARTICIPANT_TOKEN));
        assert_eq!(participant.ideas[0].mode, "facilitator-editing");
        assert!(!participant.ideas[0].controls);
    }

    #[test]
    fn text_lists_users_and_ideas() {
        let mut snapshot = snapshot();
        snapshot.ideas.push(idea(3, "Magnum"));

        let text = Report::new(&snapshot, None).render_text();
        assert!(text.starts_with("stage: grouping (joined, revision 1)\n"));
        assert!(text.contains("users: Hansel, Mugatu\n"));
        assert!(text.contains("  #3 [happy] Mugatu: Magnum\n"));
        assert!(!text.contains("viewer:"));
    }

    #[test]
    fn failed_join_is_labelled() {
        assert_eq!(join_label(JoinStatus::Failed { attempts: 3 }), "failed after 3 attempts");
    }
}
