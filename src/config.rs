//! Harness configuration
//!
//! Read once when the selector is first built. An optional TOML file named by
//! `TESTDB_CONFIG` is loaded first, then environment variables override it.
//! Loading never fails: bad input is logged and the defaults apply.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::warn;

use testdb_core::{EngineKind, StandaloneSettings};

/// Path of an optional TOML configuration file
pub const CONFIG_FILE_ENV: &str = "TESTDB_CONFIG";
/// `true` selects the file-embedded engine
pub const FILE_EMBEDDED_ENV: &str = "TESTDB_FILE_EMBEDDED";
/// `true` selects PostgreSQL instead of MySQL
pub const POSTGRESQL_ENV: &str = "TESTDB_POSTGRESQL";
/// Presence alone (any value) selects a locally running server
pub const USE_LOCAL_DB_ENV: &str = "TESTDB_USE_LOCAL_DB";
pub const LOCAL_DATABASE_ENV: &str = "TESTDB_LOCAL_DATABASE";
pub const LOCAL_USERNAME_ENV: &str = "TESTDB_LOCAL_USERNAME";
pub const LOCAL_PASSWORD_ENV: &str = "TESTDB_LOCAL_PASSWORD";
pub const LOCAL_HOST_ENV: &str = "TESTDB_LOCAL_HOST";
pub const LOCAL_PORT_ENV: &str = "TESTDB_LOCAL_PORT";

/// Error loading a configuration file
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Backend selection flags and local-server overrides
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    /// Use the in-process file engine, overriding every other flag
    pub file_embedded: bool,
    /// Use PostgreSQL; MySQL otherwise
    pub postgresql: bool,
    /// Connect to a locally running server instead of a container
    pub use_local_db: bool,
    /// Overrides for the local server
    pub local: LocalDbConfig,
}

/// Optional overrides for a locally running server
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocalDbConfig {
    pub database: Option<String>,
    pub username: Option<String>,
    pub password: Option<String>,
    pub host: Option<String>,
    pub port: Option<u16>,
}

impl LocalDbConfig {
    /// Fill unset values from the engine's stock settings
    pub fn settings_for(&self, engine: EngineKind) -> StandaloneSettings {
        let defaults = StandaloneSettings::defaults_for(engine);
        StandaloneSettings {
            database_name: self.database.clone().unwrap_or(defaults.database_name),
            username: self.username.clone().unwrap_or(defaults.username),
            password: self.password.clone().unwrap_or(defaults.password),
            host: self.host.clone().unwrap_or(defaults.host),
            port: self.port.unwrap_or(defaults.port),
        }
    }
}

impl HarnessConfig {
    /// Load from the optional file, then the process environment
    pub fn load() -> Self {
        let base = match std::env::var(CONFIG_FILE_ENV) {
            Ok(path) => Self::load_from_file(Path::new(&path)).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring harness configuration file");
                Self::default()
            }),
            Err(_) => Self::default(),
        };

        base.with_overrides(|key| std::env::var(key).ok())
    }

    /// Load configuration from a TOML file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Apply overrides from any key lookup, typically the environment.
    ///
    /// Boolean flags only turn on for the exact value `true`; the local flag
    /// turns on whenever its key is present.
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(FILE_EMBEDDED_ENV) {
            self.file_embedded = is_true(&value);
        }
        if let Some(value) = lookup(POSTGRESQL_ENV) {
            self.postgresql = is_true(&value);
        }
        if lookup(USE_LOCAL_DB_ENV).is_some() {
            self.use_local_db = true;
        }

        if let Some(database) = lookup(LOCAL_DATABASE_ENV) {
            self.local.database = Some(database);
        }
        if let Some(username) = lookup(LOCAL_USERNAME_ENV) {
            self.local.username = Some(username);
        }
        if let Some(password) = lookup(LOCAL_PASSWORD_ENV) {
            self.local.password = Some(password);
        }
        if let Some(host) = lookup(LOCAL_HOST_ENV) {
            self.local.host = Some(host);
        }
        if let Some(port) = lookup(LOCAL_PORT_ENV) {
            match port.parse() {
                Ok(port) => self.local.port = Some(port),
                Err(_) => warn!(value = %port, "Ignoring invalid {}", LOCAL_PORT_ENV),
            }
        }

        self
    }
}

fn is_true(value: &str) -> bool {
    value == "true"
}
