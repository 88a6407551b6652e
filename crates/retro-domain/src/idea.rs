//! Idea records and the ordered idea collection
//!
//! Ideas are created by the server, mutated in place by id, and removed by id.
//! The collection keeps arrival order while indexing by [`IdeaId`].

use crate::timestamp::deserialize_lenient;
use crate::types::{Category, IdeaId};
use chrono::NaiveDateTime;
use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

/// One submitted retrospective item
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Idea {
    /// Server-assigned identity
    pub id: IdeaId,
    /// Display name of the submitter
    pub author: String,
    /// Idea category
    pub category: Category,
    /// Committed text
    #[serde(default)]
    pub body: String,
    /// In-progress text mirrored from the current editor
    #[serde(rename = "liveEditText", default)]
    pub live_edit_text: Option<String>,
    /// True while the edit lock is held
    #[serde(default)]
    pub editing: bool,
    /// Creation timestamp
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub inserted_at: Option<NaiveDateTime>,
    /// Last update timestamp
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl Idea {
    /// Create an idea that is not being edited
    #[must_use]
    pub fn new(
        id: IdeaId,
        author: impl Into<String>,
        category: Category,
        body: impl Into<String>,
    ) -> Self {
        Self {
            id,
            author: author.into(),
            category,
            body: body.into(),
            live_edit_text: None,
            editing: false,
            inserted_at: None,
            updated_at: None,
        }
    }

    /// With creation and update timestamps
    #[inline]
    #[must_use]
    pub fn with_timestamps(mut self, inserted_at: NaiveDateTime, updated_at: NaiveDateTime) -> Self {
        self.inserted_at = Some(inserted_at);
        self.updated_at = Some(updated_at);
        self
    }

    /// Check if the idea changed after creation (`updated_at > inserted_at`)
    #[must_use]
    pub fn is_edited(&self) -> bool {
        match (self.inserted_at, self.updated_at) {
            (Some(inserted), Some(updated)) => updated > inserted,
            _ => false,
        }
    }

    /// Shallow-merge every field the patch supplies
    ///
    /// `id` and `author` never change.
    pub fn merge(&mut self, patch: IdeaPatch) {
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(body) = patch.body {
            self.body = body;
        }
        if let Some(live_edit_text) = patch.live_edit_text {
            self.live_edit_text = live_edit_text;
        }
        if let Some(editing) = patch.editing {
            self.editing = editing;
        }
        if let Some(inserted_at) = patch.inserted_at {
            self.inserted_at = Some(inserted_at);
        }
        if let Some(updated_at) = patch.updated_at {
            self.updated_at = Some(updated_at);
        }
    }

    /// Release the edit lock and drop any in-progress text
    #[inline]
    pub fn finish_editing(&mut self) {
        self.editing = false;
        self.live_edit_text = None;
    }
}

/// Partial idea carried by edit events
///
/// `live_edit_text` distinguishes "absent" (`None`) from an explicit `null`
/// (`Some(None)`), which clears the field on merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IdeaPatch {
    /// Identity of the idea to update
    pub id: IdeaId,
    /// New category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<Category>,
    /// New committed text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    /// New in-progress text (`Some(None)` clears)
    #[serde(
        rename = "liveEditText",
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub live_edit_text: Option<Option<String>>,
    /// New lock state
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub editing: Option<bool>,
    /// New creation timestamp
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub inserted_at: Option<NaiveDateTime>,
    /// New update timestamp
    #[serde(
        default,
        deserialize_with = "deserialize_lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub updated_at: Option<NaiveDateTime>,
}

impl IdeaPatch {
    /// Patch that only names an idea
    #[must_use]
    pub fn new(id: IdeaId) -> Self {
        Self {
            id,
            category: None,
            body: None,
            live_edit_text: None,
            editing: None,
            inserted_at: None,
            updated_at: None,
        }
    }

    /// With committed text
    #[inline]
    #[must_use]
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// With in-progress text
    #[inline]
    #[must_use]
    pub fn with_live_edit_text(mut self, text: impl Into<String>) -> Self {
        self.live_edit_text = Some(Some(text.into()));
        self
    }

    /// With an update timestamp
    #[inline]
    #[must_use]
    pub fn with_updated_at(mut self, updated_at: NaiveDateTime) -> Self {
        self.updated_at = Some(updated_at);
        self
    }
}

// A present field (even `null`) becomes `Some(..)`; `default` covers absence.
fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Ideas in arrival order, indexed by id
///
/// Serializes as a plain JSON array. Equality is order-sensitive.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(from = "Vec<Idea>", into = "Vec<Idea>")]
pub struct IdeaCollection {
    entries: IndexMap<IdeaId, Idea>,
}

impl IdeaCollection {
    /// Create an empty collection
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of ideas
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if there are no ideas
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Check if an idea with this id is present
    #[inline]
    #[must_use]
    pub fn contains(&self, id: IdeaId) -> bool {
        self.entries.contains_key(&id)
    }

    /// Look up an idea by id
    #[inline]
    #[must_use]
    pub fn get(&self, id: IdeaId) -> Option<&Idea> {
        self.entries.get(&id)
    }

    /// Append an idea at the end
    ///
    /// Returns `false` (and leaves the collection untouched) when the id is
    /// already present.
    pub fn push(&mut self, idea: Idea) -> bool {
        if self.entries.contains_key(&idea.id) {
            return false;
        }
        self.entries.insert(idea.id, idea);
        true
    }

    /// Mutate the idea with this id in place
    ///
    /// Returns `false` when no idea matches.
    pub fn update(&mut self, id: IdeaId, f: impl FnOnce(&mut Idea)) -> bool {
        match self.entries.get_mut(&id) {
            Some(idea) => {
                f(idea);
                true
            }
            None => false,
        }
    }

    /// Remove the idea with this id, keeping the order of the rest
    pub fn remove(&mut self, id: IdeaId) -> Option<Idea> {
        self.entries.shift_remove(&id)
    }

    /// Iterate in arrival order
    pub fn iter(&self) -> impl Iterator<Item = &Idea> {
        self.entries.values()
    }

    /// Ids in arrival order
    #[must_use]
    pub fn ids(&self) -> Vec<IdeaId> {
        self.entries.keys().copied().collect()
    }

    /// Copy out as an ordered vector
    #[must_use]
    pub fn to_vec(&self) -> Vec<Idea> {
        self.entries.values().cloned().collect()
    }
}

impl PartialEq for IdeaCollection {
    fn eq(&self, other: &Self) -> bool {
        self.entries.len() == other.entries.len() && self.iter().eq(other.iter())
    }
}

impl Eq for IdeaCollection {}

/// Later copies of a repeated id are dropped; the first keeps its position.
impl From<Vec<Idea>> for IdeaCollection {
    fn from(ideas: Vec<Idea>) -> Self {
        ideas.into_iter().collect()
    }
}

impl From<IdeaCollection> for Vec<Idea> {
    fn from(collection: IdeaCollection) -> Self {
        collection.entries.into_values().collect()
    }
}

impl FromIterator<Idea> for IdeaCollection {
    fn from_iter<I: IntoIterator<Item = Idea>>(iter: I) -> Self {
        let mut collection = Self::new();
        for idea in iter {
            let id = idea.id;
            if !collection.push(idea) {
                debug!(idea = %id, "dropping duplicate idea id");
            }
        }
        collection
    }
}

impl<'a> IntoIterator for &'a IdeaCollection {
    type Item = &'a Idea;
    type IntoIter = indexmap::map::Values<'a, IdeaId, Idea>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.values()
    }
}
