//! Production collaborators for testdb handles
//!
//! - [`TestcontainersDriver`]: pinned MySQL/PostgreSQL containers
//! - [`SqlxClient`]: blocking catalog queries over sqlx

mod blocking;
pub mod container;
pub mod sql;

use std::sync::Arc;
use testcontainers_modules::mysql::Mysql;
use testcontainers_modules::postgres::Postgres;

use testdb_core::{ContainerizedDb, EngineKind, SqlClient};

pub use container::{MYSQL_TAG, POSTGRES_TAG, TestcontainersDriver};
pub use sql::SqlxClient;

/// Handle for a PostgreSQL container
pub type ContainerizedPostgres = ContainerizedDb<TestcontainersDriver<Postgres>>;
/// Handle for a MySQL container
pub type ContainerizedMysql = ContainerizedDb<TestcontainersDriver<Mysql>>;

pub fn containerized_postgres(sql: Arc<dyn SqlClient>) -> ContainerizedPostgres {
    ContainerizedDb::new(EngineKind::PostgreSql, TestcontainersDriver::postgres(), sql)
}

pub fn containerized_mysql(sql: Arc<dyn SqlClient>) -> ContainerizedMysql {
    ContainerizedDb::new(EngineKind::MySql, TestcontainersDriver::mysql(), sql)
}
