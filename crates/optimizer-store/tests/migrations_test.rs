// Integration tests for the migration framework

use optimizer_core::errors::ExErrorKind;
use rusqlite::Connection;

fn setup_test_db() -> Connection {
    Connection::open_in_memory().expect("Failed to create in-memory database")
}

fn get_table_names(conn: &Connection) -> Vec<String> {
    let mut stmt = conn
        .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name")
        .unwrap();
    stmt.query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<Vec<String>, _>>()
        .unwrap()
}

#[test]
fn test_apply_migrations_on_empty_db() {
    let mut conn = setup_test_db();

    let result = optimizer_store::migrations::apply_migrations(&mut conn);
    assert!(
        result.is_ok(),
        "Migrations should succeed: {:?}",
        result.err()
    );

    let tables = get_table_names(&conn);
    for expected_table in [
        "schema_version",
        "optimizer",
        "optimizer_search_container",
        "sqlite_sequence", // created by SQLite for AUTOINCREMENT
    ] {
        assert!(
            tables.contains(&expected_table.to_string()),
            "Missing table: {}",
            expected_table
        );
    }
}

#[test]
fn test_migrations_recorded_in_order() {
    let mut conn = setup_test_db();
    optimizer_store::migrations::apply_migrations(&mut conn).unwrap();

    let applied = optimizer_store::migrations::applied_migrations(&conn).unwrap();

    assert_eq!(
        applied,
        vec![
            "001_optimizer_schema".to_string(),
            "002_optimizer_store_index".to_string()
        ]
    );
}

#[test]
fn test_migration_idempotency() {
    let mut conn = setup_test_db();
    optimizer_store::migrations::apply_migrations(&mut conn).unwrap();

    let result = optimizer_store::migrations::apply_migrations(&mut conn);
    assert!(result.is_ok(), "Re-running migrations should be a no-op");

    let version_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version_count, 2);
}

#[test]
fn test_tampered_checksum_is_rejected() {
    let mut conn = setup_test_db();
    optimizer_store::migrations::apply_migrations(&mut conn).unwrap();
    conn.execute(
        "UPDATE schema_version SET checksum = 'deadbeef' WHERE migration_id = '001_optimizer_schema'",
        [],
    )
    .unwrap();

    let err = optimizer_store::migrations::apply_migrations(&mut conn).unwrap_err();

    assert_eq!(err.kind(), ExErrorKind::ConstraintViolation);
    assert_eq!(err.op(), Some("migration_checksum"));
}

#[test]
fn test_store_index_exists() {
    let mut conn = setup_test_db();
    optimizer_store::migrations::apply_migrations(&mut conn).unwrap();

    let found: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'index' AND name = 'idx_optimizer_store_id'",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(found, 1);
}
