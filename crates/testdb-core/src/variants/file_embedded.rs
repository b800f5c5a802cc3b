//! File-backed embedded database
//!
//! A SQLite file in the temp directory. It lives exactly as long as the
//! handle is started: start creates it, stop deletes it.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::debug;
use uuid::Uuid;

use crate::collaborators::SqlClient;
use crate::engine::{ConnectionParams, EngineKind};
use crate::error::{IntrospectionError, ProvisioningError};
use crate::handle::{DatabaseHandle, Lifecycle};

const DEFAULT_DATABASE: &str = "killbill";
const DEFAULT_CREDENTIAL: &str = "root";

/// Embedded database stored in a single throwaway file
pub struct FileEmbeddedDb {
    params: ConnectionParams,
    path: PathBuf,
    sql: Arc<dyn SqlClient>,
    lifecycle: Lifecycle,
}

impl FileEmbeddedDb {
    /// Fresh database file under the system temp directory
    pub fn new(sql: Arc<dyn SqlClient>) -> Self {
        let path = std::env::temp_dir().join(format!("testdb-{}.sqlite", Uuid::new_v4()));
        Self::at_path(path, sql)
    }

    pub fn at_path(path: impl Into<PathBuf>, sql: Arc<dyn SqlClient>) -> Self {
        let path = path.into();
        let engine = EngineKind::FileEmbedded;

        Self {
            params: ConnectionParams {
                engine,
                database_name: DEFAULT_DATABASE.to_string(),
                username: DEFAULT_CREDENTIAL.to_string(),
                password: DEFAULT_CREDENTIAL.to_string(),
                connection_string: format!("{}://{}?mode=rwc", engine.scheme(), path.display()),
            },
            path,
            sql,
            lifecycle: Lifecycle::new(engine),
        }
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DatabaseHandle for FileEmbeddedDb {
    fn connection_params(&self) -> &ConnectionParams {
        &self.params
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn start(&self) -> Result<(), ProvisioningError> {
        self.lifecycle.start(|| {
            if let Some(parent) = self.path.parent() {
                fs::create_dir_all(parent).map_err(|source| ProvisioningError::FileSetup {
                    path: self.path.clone(),
                    source,
                })?;
            }

            // Opening the first connection creates the file
            self.sql
                .ping(&self.params.connection_string)
                .map_err(|source| ProvisioningError::Unreachable {
                    engine: self.params.engine,
                    database: self.params.database_name.clone(),
                    source,
                })
        })
    }

    fn stop(&self) {
        self.lifecycle.stop(|| {
            if self.path.exists() {
                debug!(path = %self.path.display(), "Removing database file");
                fs::remove_file(&self.path)?;
            }
            Ok(())
        })
    }

    fn refresh_tables(&self) -> Result<(), IntrospectionError> {
        self.lifecycle.refresh(|| {
            self.sql.query_column(
                &self.params.connection_string,
                self.params.engine.catalog_query(),
            )
        })
    }
}
