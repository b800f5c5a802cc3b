//! Database handle contract
//!
//! Defines the interface every backend variant implements.

mod lifecycle;

pub use lifecycle::Lifecycle;

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::engine::{ConnectionParams, EngineKind};
use crate::error::{IntrospectionError, ProvisioningError};

/// Lifecycle state of a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HandleState {
    #[default]
    Created,
    Started,
    /// Terminal
    Stopped,
}

impl fmt::Display for HandleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Created => write!(f, "created"),
            Self::Started => write!(f, "started"),
            Self::Stopped => write!(f, "stopped"),
        }
    }
}

/// Lifecycle-managed database, identical for every backend.
///
/// Handles are shared across threads; every transition is serialized by
/// the handle's [`Lifecycle`].
pub trait DatabaseHandle: Send + Sync {
    /// Connection parameters fixed at construction
    fn connection_params(&self) -> &ConnectionParams;

    /// State machine and table cache backing this handle
    fn lifecycle(&self) -> &Lifecycle;

    /// Bring the backend up. Calling it again while started does nothing.
    fn start(&self) -> Result<(), ProvisioningError>;

    /// Tear the backend down and forget cached tables.
    ///
    /// Never fails: teardown problems are logged and the handle still ends
    /// up stopped.
    fn stop(&self);

    /// Replace the cached table names with the backend's base tables
    fn refresh_tables(&self) -> Result<(), IntrospectionError>;

    fn engine_kind(&self) -> EngineKind {
        self.connection_params().engine
    }

    fn database_name(&self) -> &str {
        &self.connection_params().database_name
    }

    fn username(&self) -> &str {
        &self.connection_params().username
    }

    fn password(&self) -> &str {
        &self.connection_params().password
    }

    fn connection_string(&self) -> &str {
        &self.connection_params().connection_string
    }

    fn state(&self) -> HandleState {
        self.lifecycle().state()
    }

    /// Snapshot of the tables seen by the last refresh
    fn table_names(&self) -> BTreeSet<String> {
        self.lifecycle().table_names()
    }
}
