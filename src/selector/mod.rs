//! Process-wide database selector
//!
//! Resolves [`HarnessConfig`] into exactly one [`DatabaseHandle`] per process
//! and hands the same handle to every caller.
//!
//! # Example
//! ```ignore
//! let selector = testdb::DatabaseSelector::instance();
//! let db = selector.handle();
//! db.start()?;
//! db.refresh_tables()?;
//! // ...
//! db.stop();
//! ```

mod choice;
mod slot;

pub use choice::BackendChoice;
pub use slot::SharedSlot;

use once_cell::sync::Lazy;
use std::sync::Arc;
use tracing::info;

use testdb_core::{DatabaseHandle, EngineKind, FileEmbeddedDb, SqlClient, StandaloneDb};
use testdb_drivers::{SqlxClient, containerized_mysql, containerized_postgres};

use crate::config::HarnessConfig;

static SELECTOR: Lazy<SharedSlot<DatabaseSelector>> = Lazy::new(SharedSlot::new);

/// The resolved backend choice and its single handle
pub struct DatabaseSelector {
    choice: BackendChoice,
    handle: Arc<dyn DatabaseHandle>,
}

impl DatabaseSelector {
    /// Shared selector for this process, resolved from the environment on
    /// first call
    pub fn instance() -> Arc<DatabaseSelector> {
        SELECTOR.get_or_init(|| Self::from_config(&HarnessConfig::load()))
    }

    /// Drop the memoized selector so the next [`instance`](Self::instance)
    /// resolves again.
    ///
    /// The old handle is stopped before it is returned, so a started container
    /// or database file never outlives the reset.
    pub fn reset_instance() -> Option<Arc<DatabaseSelector>> {
        let previous = SELECTOR.take()?;
        info!(engine = %previous.handle.engine_kind(), "Resetting database selector");
        previous.handle.stop();
        Some(previous)
    }

    /// Resolve `config` and build the chosen handle with the sqlx client
    pub fn from_config(config: &HarnessConfig) -> Self {
        Self::with_sql_client(BackendChoice::resolve(config), Arc::new(SqlxClient::new()))
    }

    /// Build the handle for `choice` on top of the given SQL client
    pub fn with_sql_client(choice: BackendChoice, sql: Arc<dyn SqlClient>) -> Self {
        let handle: Arc<dyn DatabaseHandle> = match &choice {
            BackendChoice::FileEmbedded => Arc::new(FileEmbeddedDb::new(sql)),
            BackendChoice::LocalStandalone { engine, settings } => {
                Arc::new(StandaloneDb::new(*engine, settings.clone(), sql))
            }
            BackendChoice::ContainerManaged {
                engine: EngineKind::PostgreSql,
            } => Arc::new(containerized_postgres(sql)),
            // Resolution never pairs a container with the file engine
            BackendChoice::ContainerManaged { .. } => Arc::new(containerized_mysql(sql)),
        };

        Self::with_handle(choice, handle)
    }

    /// Wrap an already built handle
    pub fn with_handle(choice: BackendChoice, handle: Arc<dyn DatabaseHandle>) -> Self {
        info!(
            engine = %handle.engine_kind(),
            database = %handle.database_name(),
            "Database handle ready"
        );

        Self { choice, handle }
    }

    pub fn choice(&self) -> &BackendChoice {
        &self.choice
    }

    /// The process's database handle
    pub fn handle(&self) -> Arc<dyn DatabaseHandle> {
        Arc::clone(&self.handle)
    }
}

#[cfg(test)]
mod tests;
