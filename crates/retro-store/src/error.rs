//! Error types for the retro store
//!
//! - Channel failures (join rejection, timeout, transport)
//! - Store failures (bad join snapshot, detached handle)
//! - Configuration loading failures

use std::path::PathBuf;

/// Errors reported by a [`crate::RetroChannel`]
#[derive(Debug, thiserror::Error)]
pub enum ChannelError {
    /// Server answered the join with an error reply
    #[error("join rejected: {0}")]
    Rejected(serde_json::Value),

    /// No reply within the configured limit
    #[error("channel operation timed out")]
    Timeout,

    /// Channel is closed
    #[error("channel closed")]
    Closed,

    /// Transport-level failure
    #[error("transport error: {0}")]
    Transport(String),
}

/// Errors raised by the store
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Channel failed
    #[error("channel error: {0}")]
    Channel(#[from] ChannelError),

    /// Join reply does not decode as `{ presences, ideas, stage }`
    #[error("invalid join snapshot: {0}")]
    InvalidSnapshot(#[source] serde_json::Error),

    /// The store was torn down
    #[error("store detached")]
    Detached,
}

/// Errors loading a [`crate::StoreConfig`]
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("io error reading {path}: {source}")]
    Io {
        /// File path
        path: PathBuf,
        /// Underlying error
        #[source]
        source: std::io::Error,
    },

    /// Config is not valid TOML for this schema
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// Create IO error for path
    pub fn io_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
