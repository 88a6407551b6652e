//! Error types for the retro data model

/// Errors raised while interpreting domain values
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomainError {
    /// Category name outside the fixed set
    #[error("unknown category: '{0}'")]
    UnknownCategory(String),

    /// Stage name outside the workflow sequence
    #[error("unknown stage: '{0}'")]
    UnknownStage(String),
}
