use rusqlite::Connection;
use spinit_core::db::migrations::{latest_version, schema_version};
use spinit_core::db::{open_db, open_db_in_memory, DbError};
use spinit_core::store::{StoreError, TASKS_KEY};
use spinit_core::{KvStore, SqliteKvStore};

#[test]
fn fresh_database_gets_kv_entries_layout() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_version());
    assert_eq!(
        column_names(&conn, "kv_entries"),
        vec!["key", "value", "updated_at"]
    );
}

#[test]
fn stored_blobs_survive_reopening() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("spinit.sqlite3");

    {
        let store = SqliteKvStore::open(&path).unwrap();
        store.set_raw(TASKS_KEY, "[]").unwrap();
        store.set_raw(TASKS_KEY, r#"[{"title":"kept"}]"#).unwrap();
    }

    let store = SqliteKvStore::open(&path).unwrap();
    assert_eq!(schema_version(store.connection()).unwrap(), latest_version());
    assert_eq!(
        store.get_raw(TASKS_KEY).unwrap().as_deref(),
        Some(r#"[{"title":"kept"}]"#)
    );
    assert_eq!(row_count(store.connection()), 1);
}

#[test]
fn unversioned_file_with_existing_blobs_is_upgraded_in_place() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("unversioned.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch(
        "CREATE TABLE kv_entries (
            key TEXT PRIMARY KEY NOT NULL,
            value TEXT NOT NULL,
            updated_at INTEGER NOT NULL DEFAULT 0
        );
        INSERT INTO kv_entries (key, value) VALUES ('spinit_stats', '{\"sessions\":4}');",
    )
    .unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 0);
    drop(conn);

    let store = SqliteKvStore::open(&path).unwrap();
    assert_eq!(schema_version(store.connection()).unwrap(), latest_version());
    assert_eq!(
        store.get_raw("spinit_stats").unwrap().as_deref(),
        Some("{\"sessions\":4}")
    );
}

#[test]
fn newer_layout_is_refused_and_left_untouched() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

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

    match SqliteKvStore::open(&path) {
        Err(StoreError::Db(DbError::SchemaTooNew { found: 999, .. })) => {}
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("newer layout must not open"),
    }

    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 999);
    let tables: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE name = 'kv_entries';",
            [],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(tables, 0);
}

fn column_names(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn
        .prepare(&format!("PRAGMA table_info({table});"))
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}

fn row_count(conn: &Connection) -> i64 {
    conn.query_row("SELECT COUNT(*) FROM kv_entries;", [], |row| row.get(0))
        .unwrap()
}
