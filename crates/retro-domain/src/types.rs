//! Core value types
//!
//! - Idea identifiers (server-assigned, never reused)
//! - Idea categories
//! - Workflow stages

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Server-assigned idea identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IdeaId(pub u64);

impl From<u64> for IdeaId {
    fn from(value: u64) -> Self {
        Self(value)
    }
}

impl fmt::Display for IdeaId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Idea category
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Category {
    /// Went well
    Happy,
    /// Went poorly
    Sad,
    /// Unclear or puzzling
    Confused,
    /// Follow-up work, offered only during the action-item stage
    ActionItem,
}

impl Category {
    /// The basic retro categories, in display order
    pub const BASIC: [Category; 3] = [Category::Happy, Category::Sad, Category::Confused];

    /// Category selected by default when action items are hidden
    pub const DEFAULT_BASIC: Category = Category::Happy;

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Happy => "happy",
            Category::Sad => "sad",
            Category::Confused => "confused",
            Category::ActionItem => "action-item",
        }
    }

    /// Check if this is the action-item category
    #[inline]
    #[must_use]
    pub fn is_action_item(&self) -> bool {
        matches!(self, Category::ActionItem)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "happy" => Ok(Category::Happy),
            "sad" => Ok(Category::Sad),
            "confused" => Ok(Category::Confused),
            "action-item" => Ok(Category::ActionItem),
            other => Err(DomainError::UnknownCategory(other.to_string())),
        }
    }
}

/// Retrospective workflow stage
///
/// Variants are declared in workflow order, so `Ord` follows the sequence.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    /// Participants submit ideas
    #[default]
    IdeaGeneration,
    /// Ideas are clustered
    Grouping,
    /// Participants vote on ideas
    Voting,
    /// Top-voted ideas are talked through
    Discussion,
    /// Facilitator records action items
    ActionItems,
    /// Action items are mailed out; terminal
    ActionItemDistribution,
}

impl Stage {
    /// All stages in workflow order
    pub const ALL: [Stage; 6] = [
        Stage::IdeaGeneration,
        Stage::Grouping,
        Stage::Voting,
        Stage::Discussion,
        Stage::ActionItems,
        Stage::ActionItemDistribution,
    ];

    /// Wire name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Stage::IdeaGeneration => "idea-generation",
            Stage::Grouping => "grouping",
            Stage::Voting => "voting",
            Stage::Discussion => "discussion",
            Stage::ActionItems => "action-items",
            Stage::ActionItemDistribution => "action-item-distribution",
        }
    }

    /// The stage that follows this one, if any
    #[must_use]
    pub fn next(&self) -> Option<Stage> {
        let idx = Self::ALL.iter().position(|s| s == self)?;
        Self::ALL.get(idx + 1).copied()
    }

    /// Check if this is the last stage of the workflow
    #[inline]
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.next().is_none()
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Stage {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStage(s.to_string()))
    }
}
