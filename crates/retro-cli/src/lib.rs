//! Retro Sync CLI support
//!
//! - [`Session`]: recorded join reply plus pushed events, replayable through a
//!   live store
//! - [`Report`]: viewer-specific rendering of the resulting snapshot

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod report;
pub mod session;

pub use report::{IdeaLine, Report};
pub use session::{Session, SessionEvent};
