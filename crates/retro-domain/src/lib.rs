//! Retro Domain
//!
//! Data model shared by every retro sync crate:
//! - [`Idea`] records and partial [`IdeaPatch`] updates
//! - [`IdeaCollection`]: identity-indexed, arrival-ordered idea sequence
//! - [`Category`] and [`Stage`] enumerations with their wire names
//! - Presence types keyed by opaque user token
//! - [`RetroState`]: the `{ presences, ideas, stage }` aggregate
//!
//! # Example
//!
//! ```rust
//! use retro_domain::{Category, Idea, IdeaCollection, IdeaId};
//!
//! let mut ideas = IdeaCollection::new();
//! ideas.push(Idea::new(IdeaId(1), "Mugatu", Category::Happy, "so hot right now"));
//!
//! assert_eq!(ideas.len(), 1);
//! assert!(ideas.contains(IdeaId(1)));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod idea;
pub mod presence;
pub mod state;
pub mod timestamp;
pub mod types;

// Re-exports
pub use error::DomainError;
pub use idea::{Idea, IdeaCollection, IdeaPatch};
pub use presence::{PresenceEntry, PresenceMap, PresenceMeta, User, UserToken};
pub use state::RetroState;
pub use timestamp::parse_timestamp;
pub use types::{Category, IdeaId, Stage};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the retro data model
    pub use crate::{
        Category, Idea, IdeaCollection, IdeaId, IdeaPatch, PresenceEntry, PresenceMap,
        PresenceMeta, RetroState, Stage, User, UserToken,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
