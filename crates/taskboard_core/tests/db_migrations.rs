use rusqlite::Connection;
use taskboard_core::db::migrations::latest_version;
use taskboard_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    assert_table_exists(&conn, "tasks");
    assert_index_exists(&conn, "ix_tasks_user_created");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("taskboard.db");

    let conn_first = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_first), latest_version());
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    assert_table_exists(&conn_second, "tasks");
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::SchemaTooNew { found, supported } => {
            assert_eq!(found, 999);
            assert_eq!(supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn opening_database_in_missing_directory_names_the_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("missing").join("taskboard.db");

    let err = open_db(&path).unwrap_err();
    match &err {
        DbError::Open { target, .. } => assert_eq!(target, &path.display().to_string()),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("taskboard.db"));
}

#[test]
fn failed_schema_step_rolls_back_and_names_the_step() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("clash.db");

    // A view named `tasks` cannot be indexed.
    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("CREATE VIEW tasks AS SELECT 1 AS id;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::Migration { version, step, .. } => {
            assert_eq!(version, 1);
            assert_eq!(step, "create tasks table");
        }
        other => panic!("unexpected error: {other}"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn), 0);
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, name: &str) {
    assert_schema_object(conn, "table", name);
}

fn assert_index_exists(conn: &Connection, name: &str) {
    assert_schema_object(conn, "index", name);
}

fn assert_schema_object(conn: &Connection, kind: &str, name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type = ?1 AND name = ?2);",
            [kind, name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "{kind} {name} does not exist");
}
