//! Engine kinds and connection parameters

use serde::{Deserialize, Serialize};
use std::fmt;

/// Database engine behind a handle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EngineKind {
    /// In-process engine backed by a single file
    FileEmbedded,
    MySql,
    PostgreSql,
}

impl EngineKind {
    /// URL scheme understood by the SQL driver
    pub fn scheme(&self) -> &'static str {
        match self {
            Self::FileEmbedded => "sqlite",
            Self::MySql => "mysql",
            Self::PostgreSql => "postgres",
        }
    }

    /// Well-known server port, `None` for the file engine
    pub fn default_port(&self) -> Option<u16> {
        match self {
            Self::FileEmbedded => None,
            Self::MySql => Some(3306),
            Self::PostgreSql => Some(5432),
        }
    }

    /// Query listing the base tables of the active schema.
    ///
    /// Every query returns a single text column.
    pub fn catalog_query(&self) -> &'static str {
        match self {
            Self::FileEmbedded => {
                "select name from sqlite_master where type = 'table' and name not like 'sqlite_%'"
            }
            Self::MySql => {
                "select table_name from information_schema.tables \
                 where table_schema = database() and table_type = 'BASE TABLE'"
            }
            Self::PostgreSql => {
                "select table_name::text from information_schema.tables \
                 where table_schema = current_schema() and table_type = 'BASE TABLE'"
            }
        }
    }

    /// Build a server connection URL.
    ///
    /// An empty password is left out of the userinfo part.
    pub fn server_url(
        &self,
        host: &str,
        port: u16,
        database: &str,
        username: &str,
        password: &str,
    ) -> String {
        let userinfo = if password.is_empty() {
            username.to_string()
        } else {
            format!("{}:{}", username, password)
        };
        format!(
            "{}://{}@{}:{}/{}",
            self.scheme(),
            userinfo,
            host,
            port,
            database
        )
    }
}

impl fmt::Display for EngineKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::FileEmbedded => write!(f, "file-embedded"),
            Self::MySql => write!(f, "MySQL"),
            Self::PostgreSql => write!(f, "PostgreSQL"),
        }
    }
}

/// Immutable connection parameters of a handle, fixed at construction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionParams {
    pub engine: EngineKind,
    pub database_name: String,
    pub username: String,
    pub password: String,
    pub connection_string: String,
}

/// Where to find a locally running server
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandaloneSettings {
    pub database_name: String,
    pub username: String,
    pub password: String,
    pub host: String,
    pub port: u16,
}

impl StandaloneSettings {
    /// Stock settings for a local server of the given engine.
    ///
    /// PostgreSQL logs in as `postgres/postgres`, MySQL as `root/root`,
    /// both against the `killbill` database on localhost.
    pub fn defaults_for(engine: EngineKind) -> Self {
        let (username, password) = match engine {
            EngineKind::PostgreSql => ("postgres", "postgres"),
            EngineKind::MySql | EngineKind::FileEmbedded => ("root", "root"),
        };

        Self {
            database_name: "killbill".to_string(),
            username: username.to_string(),
            password: password.to_string(),
            host: "localhost".to_string(),
            port: engine.default_port().unwrap_or_default(),
        }
    }
}
