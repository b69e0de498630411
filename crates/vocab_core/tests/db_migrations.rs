use rusqlite::Connection;
use vocab_core::db::migrations::latest_version;
use vocab_core::db::{open_db, open_db_in_memory, DbError};

#[test]
fn open_db_in_memory_applies_all_migrations() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(schema_version(&conn), latest_version());
    for table in ["teachers", "students", "units", "words", "word_synonyms"] {
        assert_table_exists(&conn, table);
    }
    assert_column_exists(&conn, "units", "readability_index");
    assert_column_exists(&conn, "units", "diversity_index");
    assert_column_exists(&conn, "words", "topic");
}

#[test]
fn opening_same_database_twice_is_idempotent() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("vocab.db");

    let conn_first = open_db(&path).unwrap();
    conn_first
        .execute("INSERT INTO units (name) VALUES ('kept');", [])
        .unwrap();
    drop(conn_first);

    let conn_second = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn_second), latest_version());
    let units: i64 = conn_second
        .query_row("SELECT COUNT(*) FROM units;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(units, 1);
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.db");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    let err = open_db(&path).unwrap_err();
    match err {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 999);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn deleting_unit_cascades_to_words_and_synonyms() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch(
        "INSERT INTO units (id, name) VALUES (1, 'animals');
         INSERT INTO words (id, unit_id, title) VALUES (1, 1, 'cat');
         INSERT INTO word_synonyms (word_id, title) VALUES (1, 'feline');
         DELETE FROM units WHERE id = 1;",
    )
    .unwrap();

    let words: i64 = conn
        .query_row("SELECT COUNT(*) FROM words;", [], |row| row.get(0))
        .unwrap();
    let synonyms: i64 = conn
        .query_row("SELECT COUNT(*) FROM word_synonyms;", [], |row| row.get(0))
        .unwrap();
    assert_eq!((words, synonyms), (0, 0));
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}

fn assert_column_exists(conn: &Connection, table: &str, column: &str) {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});")).unwrap();
    let columns: Vec<String> = stmt
        .query_map([], |row| row.get(1))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    assert!(
        columns.iter().any(|name| name == column),
        "column {table}.{column} does not exist"
    );
}
