//! Blocking SQL access over sqlx's `Any` driver
//!
//! Each call opens a short-lived connection on a private current-thread
//! runtime, so callers stay fully synchronous, even when they already sit
//! inside a tokio runtime.

use once_cell::sync::OnceCell;
use sqlx::{AnyConnection, Connection};
use std::future::Future;
use tokio::runtime::{Builder, Runtime};
use tracing::debug;

use testdb_core::{SqlClient, SqlError};

use crate::blocking::outside_runtime;

/// [`SqlClient`] for PostgreSQL, MySQL and SQLite URLs
pub struct SqlxClient {
    runtime: OnceCell<Runtime>,
}

impl SqlxClient {
    pub fn new() -> Self {
        sqlx::any::install_default_drivers();
        Self {
            runtime: OnceCell::new(),
        }
    }

    fn block_on<F>(&self, future: F) -> Result<F::Output, SqlError>
    where
        F: Future + Send,
        F::Output: Send,
    {
        let runtime = self
            .runtime
            .get_or_try_init(|| Builder::new_current_thread().enable_all().build())?;
        Ok(outside_runtime(|| runtime.block_on(future)))
    }
}

impl Default for SqlxClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlClient for SqlxClient {
    fn ping(&self, connection_string: &str) -> Result<(), SqlError> {
        self.block_on(async {
            let mut conn = connect(connection_string).await?;
            conn.ping()
                .await
                .map_err(|e| SqlError::Connection(e.to_string()))?;
            close(conn).await;
            Ok::<_, SqlError>(())
        })?
    }

    fn query_column(&self, connection_string: &str, sql: &str) -> Result<Vec<String>, SqlError> {
        self.block_on(async {
            let mut conn = connect(connection_string).await?;
            let rows = sqlx::query_scalar::<_, String>(sql)
                .fetch_all(&mut conn)
                .await
                .map_err(classify)?;
            close(conn).await;
            Ok::<_, SqlError>(rows)
        })?
    }
}

async fn connect(connection_string: &str) -> Result<AnyConnection, SqlError> {
    AnyConnection::connect(connection_string)
        .await
        .map_err(|e| SqlError::Connection(e.to_string()))
}

async fn close(conn: AnyConnection) {
    if let Err(e) = conn.close().await {
        debug!(error = %e, "Ignoring error while closing connection");
    }
}

fn classify(err: sqlx::Error) -> SqlError {
    match &err {
        sqlx::Error::Io(_)
        | sqlx::Error::Tls(_)
        | sqlx::Error::Configuration(_)
        | sqlx::Error::PoolTimedOut
        | sqlx::Error::PoolClosed => SqlError::Connection(err.to_string()),
        sqlx::Error::ColumnDecode { .. }
        | sqlx::Error::Decode(_)
        | sqlx::Error::ColumnNotFound(_)
        | sqlx::Error::ColumnIndexOutOfBounds { .. }
        | sqlx::Error::TypeNotFound { .. } => SqlError::Decode(err.to_string()),
        _ => SqlError::Query(err.to_string()),
    }
}
