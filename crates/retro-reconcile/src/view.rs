//! Render-ready idea projection
//!
//! Decides, per viewer, whether an idea renders read-only or as the edit form.

use retro_domain::{Category, Idea, IdeaId};

/// How an idea renders for one viewer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdeaMode {
    /// The facilitator holds the lock and sees the edit form
    EditForm,
    /// Plain rendering
    ReadOnly {
        /// Show the "Facilitator is Editing" banner
        facilitator_editing_banner: bool,
        /// Show facilitator controls (edit, delete)
        show_controls: bool,
    },
}

/// Derived view of one idea
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaView<'a> {
    /// Idea identity
    pub id: IdeaId,
    /// Submitter
    pub author: &'a str,
    /// Category
    pub category: Category,
    /// Live text while someone types, else the committed body
    pub display_text: &'a str,
    /// Committed body, for tooltips
    pub body: &'a str,
    /// `updated_at > inserted_at`
    pub edited: bool,
    /// Rendering mode
    pub mode: IdeaMode,
}

impl<'a> IdeaView<'a> {
    /// Project an idea for a viewer
    #[must_use]
    pub fn new(idea: &'a Idea, viewer_is_facilitator: bool) -> Self {
        let display_text = idea
            .live_edit_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .unwrap_or(idea.body.as_str());

        let mode = if idea.editing && viewer_is_facilitator {
            IdeaMode::EditForm
        } else {
            IdeaMode::ReadOnly {
                facilitator_editing_banner: idea.editing && !viewer_is_facilitator,
                show_controls: viewer_is_facilitator,
            }
        };

        Self {
            id: idea.id,
            author: &idea.author,
            category: idea.category,
            display_text,
            body: &idea.body,
            edited: idea.is_edited(),
            mode,
        }
    }
}

/// Project every idea in order
pub fn idea_views<'a, I>(ideas: I, viewer_is_facilitator: bool) -> Vec<IdeaView<'a>>
where
    I: IntoIterator<Item = &'a Idea>,
{
    ideas
        .into_iter()
        .map(|idea| IdeaView::new(idea, viewer_is_facilitator))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use retro_test_utils::idea;

    fn editing_idea() -> Idea {
        let mut idea = idea(1, "committed");
        idea.editing = true;
        idea.live_edit_text = Some("in progress".into());
        idea
    }

    #[test]
    fn facilitator_gets_the_edit_form_while_editing() {
        let idea = editing_idea();
        assert_eq!(IdeaView::new(&idea, true).mode, IdeaMode::EditForm);
    }

    #[test]
    fn participants_see_banner_and_live_text() {
        let idea = editing_idea();
        let view = IdeaView::new(&idea, false);

        assert_eq!(
            view.mode,
            IdeaMode::ReadOnly {
                facilitator_editing_banner: true,
                show_controls: false,
            }
        );
        assert_eq!(view.display_text, "in progress");
        assert_eq!(view.body, "committed");
    }

    #[test]
    fn idle_idea_shows_body_and_controls_for_facilitator() {
        let idea = idea(2, "plain");
        let view = IdeaView::new(&idea, true);

        assert_eq!(view.display_text, "plain");
        assert_eq!(
            view.mode,
            IdeaMode::ReadOnly {
                facilitator_editing_banner: false,
                show_controls: true,
            }
        );
    }

    #[test]
    fn empty_live_text_falls_back_to_body() {
        let mut idea = editing_idea();
        idea.live_edit_text = Some(String::new());
        assert_eq!(IdeaView::new(&idea, false).display_text, "committed");
    }

    #[test]
    fn edited_flag_comes_from_timestamps() {
        let day = NaiveDate::from_ymd_opt(2017, 3, 2).unwrap();
        let idea = idea(3, "x").with_timestamps(
            day.and_hms_opt(9, 0, 0).unwrap(),
            day.and_hms_opt(9, 5, 0).unwrap(),
        );
        assert!(IdeaView::new(&idea, false).edited);
    }

    #[test]
    fn views_preserve_order() {
        let ideas = [idea(5, "e"), idea(4, "d")];
        let ids: Vec<IdeaId> = idea_views(&ideas, false).iter().map(|v| v.id).collect();
        assert_eq!(ids, vec![IdeaId(5), IdeaId(4)]);
    }
}
