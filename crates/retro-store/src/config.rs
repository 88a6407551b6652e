//! Store configuration
//!
//! Every field has a default, so an empty TOML document is a valid config.
//!
//! ```toml
//! distribution_stage = "action-item-distribution"
//!
//! [join]
//! max_attempts = 5
//! initial_backoff_ms = 250
//! max_backoff_ms = 4000
//! timeout_ms = 10000
//! ```

use crate::error::ConfigError;
use retro_domain::Stage;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Retry policy for joining the channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JoinPolicy {
    /// Total join attempts (at least one is always made)
    pub max_attempts: u32,
    /// Delay after the first failed attempt
    pub initial_backoff_ms: u64,
    /// Upper bound on the delay between attempts
    pub max_backoff_ms: u64,
    /// Per-attempt reply limit; `None` waits indefinitely
    pub timeout_ms: Option<u64>,
}

impl JoinPolicy {
    /// A single attempt with no retry
    #[inline]
    #[must_use]
    pub fn no_retry() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Attempts actually made
    #[inline]
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }

    /// Delay after failed attempt number `attempt` (1-based), doubling each time
    #[must_use]
    pub fn backoff(&self, attempt: u32) -> Duration {
        let exponent = attempt.saturating_sub(1).min(31);
        let delay = self
            .initial_backoff_ms
            .saturating_mul(1u64 << exponent)
            .min(self.max_backoff_ms);
        Duration::from_millis(delay)
    }

    /// Per-attempt timeout
    #[inline]
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}

impl Default for JoinPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff_ms: 200,
            max_backoff_ms: 5_000,
            timeout_ms: None,
        }
    }
}

/// Store configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Channel join policy
    pub join: JoinPolicy,
    /// Stage whose entry triggers the distribution notice
    pub distribution_stage: Stage,
}

impl StoreConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With join policy
    #[inline]
    #[must_use]
    pub fn with_join_policy(mut self, join: JoinPolicy) -> Self {
        self.join = join;
        self
    }

    /// With max join attempts
    #[inline]
    #[must_use]
    pub fn with_max_join_attempts(mut self, max: u32) -> Self {
        self.join.max_attempts = max;
        self
    }

    /// With distribution stage
    #[inline]
    #[must_use]
    pub fn with_distribution_stage(mut self, stage: Stage) -> Self {
        self.distribution_stage = stage;
        self
    }

    /// Parse from a TOML string
    ///
    /// # Errors
    /// `ConfigError::Parse` if the document does not match the schema
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Load from a TOML file
    ///
    /// # Errors
    /// `ConfigError::Io` if the file cannot be read, `ConfigError::Parse` if
    /// its contents are invalid
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents =
            std::fs::read_to_string(path).map_err(|e| ConfigError::io_error(path, e))?;
        Self::from_toml_str(&contents)
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            join: JoinPolicy::default(),
            distribution_stage: Stage::ActionItemDistribution,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_document_yields_defaults() {
        assert_eq!(StoreConfig::from_toml_str("").unwrap(), StoreConfig::default());
    }

    #[test]
    fn partial_join_table_keeps_other_defaults() {
        let config = StoreConfig::from_toml_str("[join]\nmax_attempts = 7\n").unwrap();
        assert_eq!(config.join.max_attempts, 7);
        assert_eq!(config.join.initial_backoff_ms, 200);
        assert_eq!(config.distribution_stage, Stage::ActionItemDistribution);
    }

    #[test]
    fn rejects_unknown_stage() {
        let err = StoreConfig::from_toml_str("distribution_stage = \"lunch\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn backoff_doubles_up_to_the_cap() {
        let policy = JoinPolicy {
            max_attempts: 10,
            initial_backoff_ms: 100,
            max_backoff_ms: 350,
            timeout_ms: None,
        };
        assert_eq!(policy.backoff(1), Duration::from_millis(100));
        assert_eq!(policy.backoff(2), Duration::from_millis(200));
        assert_eq!(policy.backoff(3), Duration::from_millis(350));
        assert_eq!(policy.backoff(60), Duration::from_millis(350));
    }

    #[test]
    fn zero_attempts_still_tries_once() {
        let policy = JoinPolicy {
            max_attempts: 0,
            ..JoinPolicy::default()
        };
        assert_eq!(policy.attempts(), 1);
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[join]\ntimeout_ms = 1500").unwrap();

        let config = StoreConfig::from_file(file.path()).unwrap();
        assert_eq!(config.join.timeout(), Some(Duration::from_millis(1500)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StoreConfig::from_file("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
