//! `coverage.toml` loading and resolution.
//!
//! ```toml
//! [database]
//! path = "coverage.db"
//! busy_timeout_ms = 5000
//!
//! [validation]
//! evaluation_date = "2025-07-15"
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

/// Environment variable naming a config file.
pub const CONFIG_ENV_VAR: &str = "COVERAGE_GATE_CONFIG";

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "coverage.toml";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GateConfig {
    pub database: DatabaseConfig,
    pub validation: ValidationConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DatabaseConfig {
    /// SQLite database file.
    pub path: PathBuf,
    /// How long to wait on a locked database before failing.
    pub busy_timeout_ms: u64,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("coverage.db"),
            busy_timeout_ms: 5_000,
        }
    }
}

impl DatabaseConfig {
    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidationConfig {
    /// Fixed date for price validity; today when unset.
    pub evaluation_date: Option<NaiveDate>,
}

impl GateConfig {
    /// Parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Load the resolved config file, or defaults when there is none.
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        match resolve_config_path(explicit) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    /// Apply `--database` and `--as-of` on top of the file values.
    #[must_use]
    pub fn with_overrides(mut self, database: Option<PathBuf>, as_of: Option<NaiveDate>) -> Self {
        if let Some(path) = database {
            self.database.path = path;
        }
        if as_of.is_some() {
            self.validation.evaluation_date = as_of;
        }
        self
    }
}

/// Locate the config file.
///
/// Resolution order:
/// 1. `explicit` (the `--config` flag)
/// 2. `COVERAGE_GATE_CONFIG` environment variable
/// 3. `coverage.toml` in the working directory, if it exists
pub fn resolve_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    resolve_from(
        explicit,
        std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from),
        Path::new(DEFAULT_CONFIG_FILE),
    )
}

fn resolve_from(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    fallback: &Path,
) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(path) = env.filter(|path| !path.as_os_str().is_empty()) {
        return Some(path);
    }
    fallback.is_file().then(|| fallback.to_path_buf())
}
