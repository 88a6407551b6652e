//! Retro Form
//!
//! Idea submission for a retro board:
//! - [`IdeaSubmissionForm`]: draft state, category options and submit gating
//! - [`IdeaRestClient`]: the idea creation endpoint, with [`HttpIdeaClient`]
//!   over reqwest
//!
//! # Example
//!
//! ```rust
//! use retro_domain::{Category, Stage, User};
//! use retro_form::{FormConfig, IdeaSubmissionForm};
//!
//! let mugatu = User::new("Mugatu", true);
//! let mut form = IdeaSubmissionForm::new(&mugatu, FormConfig::for_stage(Stage::ActionItems));
//!
//! assert_eq!(form.category(), Category::ActionItem);
//! form.set_body("ship it");
//! assert!(!form.submit_disabled());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

pub mod error;
pub mod form;
pub mod rest;

// Re-exports
pub use error::{FormError, RestError};
pub use form::{Focus, FormConfig, IdeaSubmissionForm, MIN_BODY_CHARS};
pub use rest::{HttpIdeaClient, IdeaRestClient, NewIdea};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
