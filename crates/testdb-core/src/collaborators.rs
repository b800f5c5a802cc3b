//! Seams to the external container runtime and SQL driver

use crate::error::{ContainerError, SqlError};

/// Credentials a container exposes, known before it boots
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContainerDescriptor {
    /// Pinned image reference, e.g. `postgres:10.21`
    pub image: String,
    pub database_name: String,
    pub username: String,
    pub password: String,
    pub connection_string: String,
}

/// A single managed database container
#[cfg_attr(test, mockall::automock)]
pub trait ContainerDriver: Send {
    /// Credentials and connection string the container will expose
    fn descriptor(&self) -> ContainerDescriptor;

    /// Whether the container process is currently up
    fn is_running(&self) -> bool;

    /// Pull the image if needed and boot the container
    fn start(&mut self) -> Result<(), ContainerError>;

    /// Stop and remove the container
    fn stop(&mut self) -> Result<(), ContainerError>;
}

/// Minimal SQL access needed by handles
#[cfg_attr(test, mockall::automock)]
pub trait SqlClient: Send + Sync {
    /// Open a connection and verify it answers
    fn ping(&self, connection_string: &str) -> Result<(), SqlError>;

    /// Run `sql` and collect the first column of every row as text
    fn query_column(&self, connection_string: &str, sql: &str) -> Result<Vec<String>, SqlError>;
}
