//! Error taxonomy
//!
//! Callers only ever see [`ProvisioningError`] (from `start`) and
//! [`IntrospectionError`] (from `refresh_tables`). Collaborator failures
//! ([`ContainerError`], [`SqlError`]) are always wrapped, never returned raw.

use std::path::PathBuf;
use thiserror::Error;

use crate::engine::EngineKind;
use crate::handle::HandleState;

/// Boxed cause coming from an external runtime
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure to bring a database up
#[derive(Debug, Error)]
pub enum ProvisioningError {
    #[error("{engine} container failed to boot")]
    Container {
        engine: EngineKind,
        #[source]
        source: ContainerError,
    },

    #[error("{engine} database '{database}' is unreachable")]
    Unreachable {
        engine: EngineKind,
        database: String,
        #[source]
        source: SqlError,
    },

    #[error("Failed to prepare database file {}", path.display())]
    FileSetup {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{engine} handle was already stopped and cannot be restarted")]
    Terminated { engine: EngineKind },
}

/// Failure to read the table catalog
#[derive(Debug, Error)]
pub enum IntrospectionError {
    #[error("Table refresh requires a started handle, current state is {state}")]
    NotStarted { state: HandleState },

    #[error("Catalog query failed on {engine}")]
    Query {
        engine: EngineKind,
        #[source]
        source: SqlError,
    },
}

impl IntrospectionError {
    /// Whether the caller broke the started-only precondition
    pub fn is_precondition_violation(&self) -> bool {
        matches!(self, Self::NotStarted { .. })
    }
}

/// Failure reported by the container runtime
#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("Could not reserve a host port for {image}")]
    PortReservation {
        image: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Container {image} failed to start")]
    Start {
        image: String,
        #[source]
        source: BoxError,
    },

    #[error("Container {image} failed to stop")]
    Stop {
        image: String,
        #[source]
        source: BoxError,
    },
}

/// Failure reported by the SQL driver
#[derive(Debug, Error)]
pub enum SqlError {
    #[error("Connection failed: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Unexpected result shape: {0}")]
    Decode(String),

    #[error("Driver runtime unavailable: {0}")]
    Runtime(#[from] std::io::Error),
}

/// Failure while tearing a backend down; logged, never propagated
#[derive(Debug, Error)]
pub enum TeardownError {
    #[error(transparent)]
    Container(#[from] ContainerError),

    #[error("Failed to remove database file: {0}")]
    Io(#[from] std::io::Error),
}
