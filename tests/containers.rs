//! Container-managed databases against a real Docker daemon.
//!
//! Run with `cargo test --test containers -- --ignored`.

use std::sync::Arc;

use testdb::{DatabaseHandle, HandleState, SqlxClient};
use testdb_drivers::{containerized_mysql, containerized_postgres};

fn exercise(db: &dyn DatabaseHandle) {
    assert_eq!(db.state(), HandleState::Created);
    let connection_string = db.connection_string().to_string();

    db.start().unwrap();
    db.start().unwrap();
    assert_eq!(db.state(), HandleState::Started);
    assert_eq!(db.connection_string(), connection_string);

    db.refresh_tables().unwrap();
    assert!(!db.table_names().contains("accounts"));

    db.stop();
    db.stop();
    assert_eq!(db.state(), HandleState::Stopped);
    assert!(db.refresh_tables().unwrap_err().is_precondition_violation());
}

#[test]
#[ignore = "requires a Docker daemon"]
fn test_postgres_container_lifecycle() {
    testdb::init_logging();
    let db = containerized_postgres(Arc::new(SqlxClient::new()));
    assert_eq!(db.image(), "postgres:10.21");
    exercise(&db);
    assert!(!db.is_container_running());
}

#[test]
#[ignore = "requires a Docker daemon"]
fn test_mysql_container_lifecycle() {
    testdb::init_logging();
    let db = containerized_mysql(Arc::new(SqlxClient::new()));
    assert_eq!(db.image(), "mysql:8.1");
    exercise(&db);
    assert!(!db.is_container_running());
}
