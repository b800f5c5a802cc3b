//! Containers managed through testcontainers
//!
//! The host port is reserved up front and mapped onto the database port, so
//! the connection string is final before the container exists. A listener
//! holds the port until the container is about to bind it.

use std::net::TcpListener;
use testcontainers::core::IntoContainerPort;
use testcontainers::runners::SyncRunner;
use testcontainers::{Container, ContainerRequest, Image, ImageExt};
use testcontainers_modules::mysql::Mysql;
use testcontainers_modules::postgres::Postgres;
use tracing::{debug, warn};

use testdb_core::{ContainerDescriptor, ContainerDriver, ContainerError, EngineKind};

use crate::blocking::outside_runtime;

/// Pinned PostgreSQL image tag
pub const POSTGRES_TAG: &str = "10.21";
/// Pinned MySQL image tag
pub const MYSQL_TAG: &str = "8.1";

const CONTAINER_HOST: &str = "127.0.0.1";

struct Credentials {
    database_name: &'static str,
    username: &'static str,
    password: &'static str,
}

/// [`ContainerDriver`] backed by the blocking testcontainers runner
pub struct TestcontainersDriver<I: Image> {
    descriptor: ContainerDescriptor,
    host_port: u16,
    build: fn(u16) -> ContainerRequest<I>,
    /// Keeps `host_port` bound until boot
    reservation: Option<TcpListener>,
    /// Port reservation failure, reported on start
    deferred: Option<std::io::Error>,
    container: Option<Container<I>>,
}

impl TestcontainersDriver<Postgres> {
    /// `postgres:10.21` with the module's stock `postgres` credentials
    pub fn postgres() -> Self {
        Self::with_reserved_port(
            EngineKind::PostgreSql,
            format!("postgres:{}", POSTGRES_TAG),
            Credentials {
                database_name: "postgres",
                username: "postgres",
                password: "postgres",
            },
            |host_port| {
                Postgres::default()
                    .with_tag(POSTGRES_TAG)
                    .with_mapped_port(host_port, 5432.tcp())
            },
        )
    }
}

impl TestcontainersDriver<Mysql> {
    /// `mysql:8.1` logged in as passwordless `root` on the `test` database
    pub fn mysql() -> Self {
        Self::with_reserved_port(
            EngineKind::MySql,
            format!("mysql:{}", MYSQL_TAG),
            Credentials {
                database_name: "test",
                username: "root",
                password: "",
            },
            |host_port| {
                Mysql::default()
                    .with_tag(MYSQL_TAG)
                    .with_mapped_port(host_port, 3306.tcp())
            },
        )
    }
}

impl<I: Image> TestcontainersDriver<I> {
    fn with_reserved_port(
        engine: EngineKind,
        image: String,
        credentials: Credentials,
        build: fn(u16) -> ContainerRequest<I>,
    ) -> Self {
        let (host_port, reservation, deferred) = match reserve_host_port() {
            Ok((port, listener)) => (port, Some(listener), None),
            Err(e) => {
                warn!(image = %image, error = %e, "Could not reserve a host port");
                (0, None, Some(e))
            }
        };

        let connection_string = engine.server_url(
            CONTAINER_HOST,
            host_port,
            credentials.database_name,
            credentials.username,
            credentials.password,
        );

        Self {
            descriptor: ContainerDescriptor {
                image,
                database_name: credentials.database_name.to_string(),
                username: credentials.username.to_string(),
                password: credentials.password.to_string(),
                connection_string,
            },
            host_port,
            build,
            reservation,
            deferred,
            container: None,
        }
    }

    /// Host port the database port is mapped to
    pub fn host_port(&self) -> u16 {
        self.host_port
    }
}

impl<I: Image> ContainerDriver for TestcontainersDriver<I> {
    fn descriptor(&self) -> ContainerDescriptor {
        self.descriptor.clone()
    }

    fn is_running(&self) -> bool {
        self.container.is_some()
    }

    fn start(&mut self) -> Result<(), ContainerError> {
        if let Some(e) = &self.deferred {
            return Err(ContainerError::PortReservation {
                image: self.descriptor.image.clone(),
                source: std::io::Error::new(e.kind(), e.to_string()),
            });
        }

        debug!(image = %self.descriptor.image, host_port = self.host_port, "Starting container");
        // Release the port only for the container to take it
        drop(self.reservation.take());

        let (build, host_port) = (self.build, self.host_port);
        match outside_runtime(move || build(host_port).start()) {
            Ok(container) => {
                self.container = Some(container);
                Ok(())
            }
            Err(e) => {
                // Hold the port again for a retry
                self.reservation = TcpListener::bind((CONTAINER_HOST, self.host_port)).ok();
                Err(ContainerError::Start {
                    image: self.descriptor.image.clone(),
                    source: Box::new(e),
                })
            }
        }
    }

    fn stop(&mut self) -> Result<(), ContainerError> {
        if let Some(container) = self.container.take() {
            // Dropping the container removes it
            outside_runtime(move || container.stop()).map_err(|e| ContainerError::Stop {
                image: self.descriptor.image.clone(),
                source: Box::new(e),
            })?;
        }
        Ok(())
    }
}

impl<I: Image> Drop for TestcontainersDriver<I> {
    fn drop(&mut self) {
        if let Some(container) = self.container.take() {
            outside_runtime(move || drop(container));
        }
    }
}

fn reserve_host_port() -> std::io::Result<(u16, TcpListener)> {
    let listener = TcpListener::bind((CONTAINER_HOST, 0))?;
    let port = listener.local_addr()?.port();
    Ok((port, listener))
}
