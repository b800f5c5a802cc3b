//! Handle state machine
//!
//! One coarse lock guards both the state and the table cache. Backend work
//! (boot, teardown, catalog query) runs while the lock is held, so racing
//! callers observe each transition exactly once.

use parking_lot::Mutex;
use std::collections::BTreeSet;
use tracing::{debug, info, warn};

use super::HandleState;
use crate::engine::EngineKind;
use crate::error::{IntrospectionError, ProvisioningError, SqlError, TeardownError};

#[derive(Debug, Default)]
struct Inner {
    state: HandleState,
    tables: BTreeSet<String>,
}

/// Created → started → stopped, plus the cached table names
#[derive(Debug)]
pub struct Lifecycle {
    engine: EngineKind,
    inner: Mutex<Inner>,
}

impl Lifecycle {
    pub fn new(engine: EngineKind) -> Self {
        Self {
            engine,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub fn state(&self) -> HandleState {
        self.inner.lock().state
    }

    pub fn table_names(&self) -> BTreeSet<String> {
        self.inner.lock().tables.clone()
    }

    /// Run `boot` once, moving created → started.
    ///
    /// Already started is a no-op. A failed boot leaves the handle created.
    pub fn start<F>(&self, boot: F) -> Result<(), ProvisioningError>
    where
        F: FnOnce() -> Result<(), ProvisioningError>,
    {
        let mut inner = self.inner.lock();
        match inner.state {
            HandleState::Started => {
                debug!(engine = %self.engine, "Database already started");
                Ok(())
            }
            HandleState::Stopped => Err(ProvisioningError::Terminated {
                engine: self.engine,
            }),
            HandleState::Created => {
                info!(engine = %self.engine, "Starting database");
                boot()?;
                inner.state = HandleState::Started;
                info!(engine = %self.engine, "Database started");
                Ok(())
            }
        }
    }

    /// Run `teardown` unless already stopped, then clear the table cache.
    ///
    /// `teardown` also runs for a handle that never started, so it must only
    /// release resources that are actually present. Failures are logged.
    pub fn stop<F>(&self, teardown: F)
    where
        F: FnOnce() -> Result<(), TeardownError>,
    {
        let mut inner = self.inner.lock();
        match inner.state {
            HandleState::Stopped => {
                debug!(engine = %self.engine, "Database already stopped");
                return;
            }
            HandleState::Created => {
                debug!(engine = %self.engine, "Stopping database that was never started");
            }
            HandleState::Started => {
                info!(engine = %self.engine, "Stopping database");
            }
        }
        if let Err(e) = teardown() {
            warn!(engine = %self.engine, error = %e, "Database teardown failed");
        }
        inner.tables.clear();
        inner.state = HandleState::Stopped;
    }

    /// Replace the table cache with the result of `query`. Requires started.
    pub fn refresh<F>(&self, query: F) -> Result<(), IntrospectionError>
    where
        F: FnOnce() -> Result<Vec<String>, SqlError>,
    {
        let mut inner = self.inner.lock();
        if inner.state != HandleState::Started {
            return Err(IntrospectionError::NotStarted { state: inner.state });
        }

        let names = query().map_err(|source| IntrospectionError::Query {
            engine: self.engine,
            source,
        })?;
        inner.tables = names.into_iter().collect();
        debug!(engine = %self.engine, tables = inner.tables.len(), "Refreshed table names");
        Ok(())
    }
}
