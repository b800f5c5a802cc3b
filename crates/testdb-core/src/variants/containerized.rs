//! Container-managed database
//!
//! Wraps a [`ContainerDriver`] behind the handle contract. The container's
//! credentials are deterministic, so they are read from the descriptor at
//! construction, before anything boots.

use parking_lot::Mutex;
use std::sync::Arc;
use tracing::{debug, info};

use crate::collaborators::{ContainerDriver, SqlClient};
use crate::engine::{ConnectionParams, EngineKind};
use crate::error::{IntrospectionError, ProvisioningError, TeardownError};
use crate::handle::{DatabaseHandle, Lifecycle};

/// Database running in a container booted on first start
pub struct ContainerizedDb<D> {
    params: ConnectionParams,
    image: String,
    driver: Mutex<D>,
    sql: Arc<dyn SqlClient>,
    lifecycle: Lifecycle,
}

impl<D: ContainerDriver> ContainerizedDb<D> {
    pub fn new(engine: EngineKind, driver: D, sql: Arc<dyn SqlClient>) -> Self {
        let descriptor = driver.descriptor();
        debug!(image = %descriptor.image, "Resolved container descriptor");

        Self {
            params: ConnectionParams {
                engine,
                database_name: descriptor.database_name,
                username: descriptor.username,
                password: descriptor.password,
                connection_string: descriptor.connection_string,
            },
            image: descriptor.image,
            driver: Mutex::new(driver),
            sql,
            lifecycle: Lifecycle::new(engine),
        }
    }

    /// Pinned image reference
    pub fn image(&self) -> &str {
        &self.image
    }

    /// Whether the underlying container is up right now
    pub fn is_container_running(&self) -> bool {
        self.driver.lock().is_running()
    }
}

impl<D: ContainerDriver> DatabaseHandle for ContainerizedDb<D> {
    fn connection_params(&self) -> &ConnectionParams {
        &self.params
    }

    fn lifecycle(&self) -> &Lifecycle {
        &self.lifecycle
    }

    fn start(&self) -> Result<(), ProvisioningError> {
        self.lifecycle.start(|| {
            let mut driver = self.driver.lock();
            if driver.is_running() {
                debug!(image = %self.image, "Container already running");
                return Ok(());
            }

            info!(image = %self.image, "Booting container");
            driver
                .start()
                .map_err(|source| ProvisioningError::Container {
                    engine: self.params.engine,
                    source,
                })
        })
    }

    fn stop(&self) {
        self.lifecycle.stop(|| {
            let mut driver = self.driver.lock();
            if driver.is_running() {
                info!(image = %self.image, "Stopping container");
                driver.stop().map_err(TeardownError::from)?;
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
