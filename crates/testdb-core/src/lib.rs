//! Core contract for ephemeral test databases
//!
//! A test process talks to exactly one database through a [`DatabaseHandle`].
//! The handle hides which backend is live:
//!
//! - [`FileEmbeddedDb`]: a throwaway SQLite file in the temp directory
//! - [`StandaloneDb`]: an externally managed local MySQL/PostgreSQL server
//! - [`ContainerizedDb`]: a pinned MySQL/PostgreSQL image booted on demand
//!
//! All variants share the same [`Lifecycle`] state machine
//! (created → started → stopped) and surface failures through two error
//! families, [`ProvisioningError`] and [`IntrospectionError`]. The actual
//! container runtime and SQL driver are reached through the
//! [`ContainerDriver`] and [`SqlClient`] traits.

pub mod collaborators;
pub mod engine;
pub mod error;
pub mod handle;
pub mod variants;

pub use collaborators::{ContainerDescriptor, ContainerDriver, SqlClient};
pub use engine::{ConnectionParams, EngineKind, StandaloneSettings};
pub use error::{
    BoxError, ContainerError, IntrospectionError, ProvisioningError, SqlError, TeardownError,
};
pub use handle::{DatabaseHandle, HandleState, Lifecycle};
pub use variants::{ContainerizedDb, FileEmbeddedDb, StandaloneDb};
