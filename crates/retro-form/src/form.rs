//! Idea submission form engine
//!
//! Holds the draft `{ category, body }`, gates submission on body length and
//! keeps the idea input focused whenever the category changes.

use crate::error::FormError;
use crate::rest::{IdeaRestClient, NewIdea};
use retro_domain::{Category, Stage, User};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Minimum trimmed body length, counted in characters
pub const MIN_BODY_CHARS: usize = 3;

const ACTION_ITEM_ONLY: [Category; 1] = [Category::ActionItem];

/// Which control holds input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    /// The idea text input
    IdeaInput,
    /// Anything else
    Elsewhere,
}

/// Form mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FormConfig {
    /// Offer only the action-item category
    #[serde(default)]
    pub show_action_item: bool,
}

impl FormConfig {
    /// Mode for a retro stage: action items are collected in `action-items`
    #[must_use]
    pub fn for_stage(stage: Stage) -> Self {
        Self {
            show_action_item: stage == Stage::ActionItems,
        }
    }
}

fn categories_for(show_action_item: bool) -> &'static [Category] {
    if show_action_item {
        &ACTION_ITEM_ONLY
    } else {
        &Category::BASIC
    }
}

fn default_category(show_action_item: bool) -> Category {
    if show_action_item {
        Category::ActionItem
    } else {
        Category::DEFAULT_BASIC
    }
}

/// Draft state of the idea submission form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaSubmissionForm {
    author: String,
    show_action_item: bool,
    category: Category,
    body: String,
    focus: Focus,
}

impl IdeaSubmissionForm {
    /// Empty form for `current_user`, with the idea input focused
    #[must_use]
    pub fn new(current_user: &User, config: FormConfig) -> Self {
        Self {
            author: current_user.given_name.clone(),
            show_action_item: config.show_action_item,
            category: default_category(config.show_action_item),
            body: String::new(),
            focus: Focus::IdeaInput,
        }
    }

    /// Selected category
    #[inline]
    #[must_use]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Draft idea text
    #[inline]
    #[must_use]
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Control holding focus
    #[inline]
    #[must_use]
    pub fn focus(&self) -> Focus {
        self.focus
    }

    /// Name sent as the idea's author
    #[inline]
    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    /// Whether only action items are offered
    #[inline]
    #[must_use]
    pub fn show_action_item(&self) -> bool {
        self.show_action_item
    }

    /// Categories the form currently offers
    #[must_use]
    pub fn categories(&self) -> &'static [Category] {
        categories_for(self.show_action_item)
    }

    /// True while the trimmed body is shorter than [`MIN_BODY_CHARS`]
    #[must_use]
    pub fn submit_disabled(&self) -> bool {
        self.body.trim().chars().count() < MIN_BODY_CHARS
    }

    /// Switch between action-item and basic mode
    ///
    /// Reasserting the current mode keeps the selected category.
    pub fn set_show_action_item(&mut self, show_action_item: bool) {
        if show_action_item == self.show_action_item {
            return;
        }
        self.show_action_item = show_action_item;
        self.change_category(default_category(show_action_item));
    }

    /// Select one of the offered categories
    ///
    /// # Errors
    /// `FormError::CategoryUnavailable` if the current mode does not offer it
    pub fn select_category(&mut self, category: Category) -> Result<(), FormError> {
        if !self.categories().contains(&category) {
            return Err(FormError::CategoryUnavailable(category));
        }
        self.change_category(category);
        Ok(())
    }

    /// Replace the draft text
    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Focus left the idea input
    pub fn blur(&mut self) {
        self.focus = Focus::Elsewhere;
    }

    /// Payload the form would submit right now
    ///
    /// # Errors
    /// `FormError::SubmitDisabled` while the body is too short
    pub fn draft(&self) -> Result<NewIdea, FormError> {
        if self.submit_disabled() {
            return Err(FormError::SubmitDisabled {
                min_chars: MIN_BODY_CHARS,
            });
        }
        Ok(NewIdea {
            category: self.category,
            body: self.body.clone(),
            author: self.author.clone(),
        })
    }

    /// Issue the draft to `client` and clear the body
    ///
    /// The request runs on a spawned task; the created idea comes back as a
    /// channel event, so nothing is appended locally. Must be called from
    /// within a tokio runtime.
    ///
    /// # Errors
    /// `FormError::SubmitDisabled` while the body is too short
    pub fn submit(&mut self, client: Arc<dyn IdeaRestClient>) -> Result<JoinHandle<()>, FormError> {
        let idea = self.draft()?;
        self.body.clear();
        info!(category = %idea.category, author = %idea.author, "submitting idea");

        Ok(tokio::spawn(async move {
            if let Err(err) = client.post(idea).await {
                warn!(error = %err, "idea submission failed");
            }
        }))
    }

    fn change_category(&mut self, category: Category) {
        self.category = category;
        self.focus = Focus::IdeaInput;
    }
}
