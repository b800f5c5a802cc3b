//! Backend precedence rules

use serde::{Deserialize, Serialize};
use tracing::info;

use testdb_core::{EngineKind, StandaloneSettings};

use crate::config::HarnessConfig;

/// Which backend variant a process uses
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "variant", rename_all = "snake_case")]
pub enum BackendChoice {
    FileEmbedded,
    LocalStandalone {
        engine: EngineKind,
        settings: StandaloneSettings,
    },
    ContainerManaged {
        engine: EngineKind,
    },
}

impl BackendChoice {
    pub fn engine(&self) -> EngineKind {
        match self {
            Self::FileEmbedded => EngineKind::FileEmbedded,
            Self::LocalStandalone { engine, .. } | Self::ContainerManaged { engine } => *engine,
        }
    }

    /// Resolve the configuration to a backend; first match wins.
    ///
    /// 1. file-embedded flag
    /// 2. PostgreSQL flag: local server if requested, else a container
    /// 3. MySQL: local server if requested, else a container
    pub fn resolve(config: &HarnessConfig) -> Self {
        if config.file_embedded {
            info!("Using the file-embedded database");
            return Self::FileEmbedded;
        }

        let engine = if config.postgresql {
            EngineKind::PostgreSql
        } else {
            EngineKind::MySql
        };

        if config.use_local_db {
            if engine == EngineKind::MySql {
                info!("Local database requested without an engine flag, defaulting to MySQL");
            }
            let settings = config.local.settings_for(engine);
            info!(engine = %engine, database = %settings.database_name, "Using a local database");
            Self::LocalStandalone { engine, settings }
        } else {
            info!(engine = %engine, "Using a containerized database");
            Self::ContainerManaged { engine }
        }
    }
}
