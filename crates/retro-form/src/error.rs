//! Error types for idea submission

use retro_domain::Category;

/// Errors from the submission form engine
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormError {
    /// Body is shorter than the submission threshold
    #[error("submit disabled: idea needs at least {min_chars} non-blank characters")]
    SubmitDisabled {
        /// Required trimmed length
        min_chars: usize,
    },

    /// Category is not among the offered options
    #[error("category '{0}' is not offered by this form")]
    CategoryUnavailable(Category),
}

/// Errors from the idea REST endpoint
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Request could not be sent or the response not read
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("unexpected status: {0}")]
    Status(u16),
}
