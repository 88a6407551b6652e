//! Retro Reconcile
//!
//! Transport-free reconciliation logic:
//! - [`RetroEvent`]: typed form of the eight inbound channel events
//! - [`reduce`]: pure `(state, event) -> state` reducer
//! - [`presence`]: presence map projections
//! - [`view`]: per-viewer idea rendering data
//!
//! # Example
//!
//! ```rust
//! use retro_domain::{Category, Idea, IdeaId, RetroState};
//! use retro_reconcile::{reduce, RetroEvent};
//!
//! let idea = Idea::new(IdeaId(1), "Mugatu", Category::Happy, "Derelicte");
//! let state = reduce(RetroState::new(), RetroEvent::NewIdeaCreated(idea));
//! let state = reduce(state, RetroEvent::EnableEditState { id: IdeaId(1) });
//!
//! assert!(state.ideas.get(IdeaId(1)).unwrap().editing);
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod event;
pub mod presence;
pub mod reducer;
pub mod view;

// Re-exports
pub use error::DecodeError;
pub use event::{EventKind, RetroEvent};
pub use presence::{current_presence, current_user, list_by, list_users};
pub use reducer::reduce;
pub use view::{idea_views, IdeaMode, IdeaView};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
