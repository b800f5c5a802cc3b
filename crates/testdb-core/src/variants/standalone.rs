//! Locally running, externally managed server

use std::sync::Arc;
use tracing::debug;

use crate::collaborators::SqlClient;
use crate::engine::{ConnectionParams, EngineKind, StandaloneSettings};
use crate::error::{IntrospectionError, ProvisioningError};
use crate::handle::{DatabaseHandle, Lifecycle};

/// Database on a server someone else started.
///
/// Starting only checks that the server answers; stopping leaves the server
/// alone.
pub struct StandaloneDb {
    params: ConnectionParams,
    host: String,
    port: u16,
    sql: Arc<dyn SqlClient>,
    lifecycle: Lifecycle,
}

impl StandaloneDb {
    pub fn new(engine: EngineKind, settings: StandaloneSettings, sql: Arc<dyn SqlClient>) -> Self {
        let connection_string = engine.server_url(
            &settings.host,
            settings.port,
            &settings.database_name,
            &settings.username,
            &settings.password,
        );

        Self {
            params: ConnectionParams {
                engine,
                database_name: settings.database_name,
                username: settings.username,
                password: settings.password,
                connection_string,
            },
            host: settings.host,
            port: settings.port,
            sql,
            lifecycle: Lifecycle::new(engine),
        }
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }
}

impl DatabaseHandle for StandaloneDb {
    fn connection_params(&self) -> &ConnectionParams {
        &self.params
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn start(&self) -> Result<(), ProvisioningError> {
        self.lifecycle.start(|| {
            debug!(host = %self.host, port = self.port, "Checking local database server");
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
        self.lifecycle.stop(|| Ok(()))
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
