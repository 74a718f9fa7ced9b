use book_madness_core::config::DEFAULT_DB_FILE_NAME;
use book_madness_core::db::migrations::latest_version;
use book_madness_core::db::{open_db, open_db_in_memory, DbError};
use book_madness_core::{Book, BookStore, RepoError, SqliteBookStore};
use rusqlite::Connection;

#[test]
fn open_db_in_memory_creates_books_table_at_version_one() {
    let conn = open_db_in_memory().unwrap();

    assert_eq!(latest_version(), 1);
    assert_eq!(schema_version(&conn), latest_version());
    assert_eq!(
        table_columns(&conn, "books"),
        vec![
            "id",
            "name",
            "genre",
            "paper",
            "rating",
            "start_date",
            "finish_date",
            "author",
            "notes"
        ]
    );
}

#[test]
fn reopening_a_file_keeps_schema_and_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("books.sqlite3");

    let store = SqliteBookStore::open(&path).unwrap();
    store.insert(&Book::with_id(7, "Dune", "SciFi", true)).unwrap();
    drop(store);

    let conn = open_db(&path).unwrap();
    assert_eq!(schema_version(&conn), latest_version());
    let store = SqliteBookStore::try_new(conn).unwrap();
    let book = store.get_by_id(7).current().unwrap().unwrap();
    assert_eq!(book.name, "Dune");
}

#[test]
fn open_in_dir_uses_default_file_name() {
    let dir = tempfile::tempdir().unwrap();

    let store = SqliteBookStore::open_in_dir(dir.path()).unwrap();
    store.insert(&Book::new("Dune", "SciFi", true)).unwrap();

    assert!(dir.path().join(DEFAULT_DB_FILE_NAME).is_file());
}

#[test]
fn opening_database_with_newer_schema_version_returns_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 42;").unwrap();
    drop(conn);

    match open_db(&path).unwrap_err() {
        DbError::UnsupportedSchemaVersion {
            db_version,
            latest_supported,
        } => {
            assert_eq!(db_version, 42);
            assert_eq!(latest_supported, latest_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    assert!(matches!(
        SqliteBookStore::open(&path),
        Err(RepoError::Db(DbError::UnsupportedSchemaVersion { .. }))
    ));
}

#[test]
fn store_rejects_connection_without_schema() {
    let conn = Connection::open_in_memory().unwrap();

    match SqliteBookStore::try_new(conn) {
        Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version: 0,
        }) => assert_eq!(expected_version, latest_version()),
        Err(other) => panic!("unexpected error: {other}"),
        Ok(_) => panic!("expected uninitialized connection error"),
    }
}

#[test]
fn corrupt_paper_value_is_reported_as_invalid_data() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("PRAGMA ignore_check_constraints = ON;").unwrap();
    conn.execute(
        "INSERT INTO books (id, name, genre, paper) VALUES (1, 'Dune', 'SciFi', 2);",
        [],
    )
    .unwrap();

    let store = SqliteBookStore::try_new(conn).unwrap();
    let err = store.get_all().current().unwrap_err();
    assert!(matches!(err, RepoError::InvalidData(_)), "{err}");
}

fn schema_version(conn: &Connection) -> u32 {
    conn.query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap()
}

fn table_columns(conn: &Connection, table: &str) -> Vec<String> {
    let mut stmt = conn.prepare(&format!("PRAGMA table_info({table});")).unwrap();
    stmt.query_map([], |row| row.get::<_, String>("name"))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap()
}
