//! Ephemeral databases for integration tests
//!
//! One process-wide [`DatabaseSelector`] decides, from flags, whether tests
//! run against a file-embedded database, a locally running server, or a
//! throwaway container, and hands every caller the same [`DatabaseHandle`].
//!
//! ```ignore
//! use testdb::DatabaseSelector;
//!
//! testdb::init_logging();
//! let db = DatabaseSelector::instance().handle();
//! db.start()?;
//! println!("{}", db.connection_string());
//! db.refresh_tables()?;
//! assert!(db.table_names().contains("accounts"));
//! db.stop();
//! ```

pub mod config;
pub mod logging;
pub mod selector;

pub use config::{ConfigError, HarnessConfig, LocalDbConfig};
pub use logging::init_logging;
pub use selector::{BackendChoice, DatabaseSelector, SharedSlot};

pub use testdb_core::{
    ConnectionParams, ContainerDescriptor, ContainerDriver, ContainerError, ContainerizedDb,
    DatabaseHandle, EngineKind, FileEmbeddedDb, HandleState, IntrospectionError,
    ProvisioningError, SqlClient, SqlError, StandaloneDb, StandaloneSettings, TeardownError,
};
pub use testdb_drivers::{SqlxClient, TestcontainersDriver};
