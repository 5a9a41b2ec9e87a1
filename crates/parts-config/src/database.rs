//! Database location and connection settings.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default on-disk database path, relative to the working directory.
fn default_path() -> String {
    ".parts/parts.db".to_string()
}

/// Default time a writer waits on a locked database, in milliseconds.
const fn default_busy_timeout_ms() -> u64 {
    5_000
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the libSQL database file, or `:memory:`.
    #[serde(default = "default_path")]
    pub path: String,

    /// How long a write waits for a competing writer before failing.
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only in memory.
    pub fn is_in_memory(&self) -> bool {
        self.path == ":memory:"
    }

    /// Reject settings the store cannot open.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.busy_timeout_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "database.busy_timeout_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = DatabaseConfig::default();
        assert_eq!(config.path, ".parts/parts.db");
        assert_eq!(config.busy_timeout_ms, 5_000);
        assert!(!config.is_in_memory());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn empty_path_is_rejected() {
        let config = DatabaseConfig {
            path: "  ".into(),
            ..DatabaseConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("database.path"));
    }

    #[test]
    fn memory_path_is_detected() {
        let config = DatabaseConfig {
            path: ":memory:".into(),
            ..DatabaseConfig::default()
        };
        assert!(config.is_in_memory());
    }
}
