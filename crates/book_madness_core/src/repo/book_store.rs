//! Book store contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the fixed read queries and the three writes over `books`.
//! - Wake live queries after every write that changed a row.
//!
//! # Invariants
//! - `insert` uses `INSERT OR IGNORE`: a primary key conflict is not an error
//!   and leaves the stored row untouched.
//! - `update`/`delete` of a missing id are no-ops.
//! - Read paths reject invalid persisted rows instead of masking them.

use crate::config::DEFAULT_DB_FILE_NAME;
use crate::db::migrations::{current_user_version, latest_version};
use crate::db::{open_db, open_db_in_memory, DbError};
use crate::model::book::{Book, BookId, BookValidationError};
use crate::repo::live::LiveQuery;
use log::{debug, error, info};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Instant;
use tokio::sync::watch;

const BOOK_SELECT_SQL: &str = "SELECT
    id,
    name,
    genre,
    paper,
    rating,
    start_date,
    finish_date,
    author,
    notes
FROM books";

pub type RepoResult<T> = Result<T, RepoError>;

/// Error for book persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(BookValidationError),
    Db(DbError),
    InvalidData(String),
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Every handle to the store was dropped.
    StoreClosed,
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted book data: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::StoreClosed => write!(f, "book store has been closed"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::InvalidData(_) | Self::UninitializedConnection { .. } | Self::StoreClosed => {
                None
            }
        }
    }
}

impl From<BookValidationError> for RepoError {
    fn from(value: BookValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// The fixed list queries over `books`.
///
/// Every variant breaks ordering ties by `id ASC`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookQuery {
    /// All books by id.
    All,
    /// All books by name, lexicographic.
    OrderedByName,
    /// All books by rating text, descending. Absent ratings sort last.
    OrderedByRating,
    /// `rating LIKE pattern`.
    WithRating(String),
    /// Books with neither a start nor a finish date.
    WithoutStartAndFinishDate,
    /// `finish_date LIKE pattern`.
    FinishedByYear(String),
}

impl BookQuery {
    /// Books whose finish date mentions `year` anywhere in the text.
    pub fn finished_in_year(year: i32) -> Self {
        Self::FinishedByYear(year_pattern(year))
    }

    fn to_sql(&self) -> (String, Vec<Value>) {
        let mut sql = BOOK_SELECT_SQL.to_string();
        let mut bind_values = Vec::new();

        match self {
            Self::All => sql.push_str(" ORDER BY id ASC"),
            Self::OrderedByName => sql.push_str(" ORDER BY name ASC, id ASC"),
            Self::OrderedByRating => sql.push_str(" ORDER BY rating DESC, id ASC"),
            Self::WithRating(pattern) => {
                sql.push_str(" WHERE rating LIKE ? ORDER BY id ASC");
                bind_values.push(Value::Text(pattern.clone()));
            }
            Self::WithoutStartAndFinishDate => sql.push_str(
                " WHERE start_date IS NULL AND finish_date IS NULL ORDER BY id ASC",
            ),
            Self::FinishedByYear(pattern) => {
                sql.push_str(" WHERE finish_date LIKE ? ORDER BY id ASC");
                bind_values.push(Value::Text(pattern.clone()));
            }
        }

        (sql, bind_values)
    }
}

/// `LIKE` pattern matching `year` anywhere in a date string.
pub fn year_pattern(year: i32) -> String {
    format!("%{year}%")
}

/// Single-book lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookLookup {
    Id(BookId),
    /// Exact name match; the lowest id wins when names repeat.
    Name(String),
}

/// Record store contract.
///
/// Implementors provide [`BookStore::list`], [`BookStore::find`] and the
/// writes; the named read operations are expressed on top of those.
pub trait BookStore {
    fn list(&self, query: BookQuery) -> LiveQuery<Vec<Book>>;
    fn find(&self, lookup: BookLookup) -> LiveQuery<Option<Book>>;
    fn insert(&self, book: &Book) -> RepoResult<()>;
    fn update(&self, book: &Book) -> RepoResult<()>;
    fn delete(&self, book: &Book) -> RepoResult<()>;

    fn get_all(&self) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::All)
    }

    fn get_all_ordered_by_name(&self) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::OrderedByName)
    }

    fn get_all_ordered_by_rating(&self) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::OrderedByRating)
    }

    fn get_all_with_rating(&self, pattern: &str) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::WithRating(pattern.to_string()))
    }

    fn get_all_without_start_and_finish_date(&self) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::WithoutStartAndFinishDate)
    }

    fn get_all_finished_by_year(&self, year_pattern: &str) -> LiveQuery<Vec<Book>> {
        self.list(BookQuery::FinishedByYear(year_pattern.to_string()))
    }

    fn get_by_id(&self, id: BookId) -> LiveQuery<Option<Book>> {
        self.find(BookLookup::Id(id))
    }

    fn get_by_name(&self, name: &str) -> LiveQuery<Option<Book>> {
        self.find(BookLookup::Name(name.to_string()))
    }
}

struct StoreInner {
    conn: Mutex<Connection>,
    changes: watch::Sender<u64>,
}

/// SQLite-backed book store.
///
/// Clones share one connection and one change counter.
#[derive(Clone)]
pub struct SqliteBookStore {
    inner: Arc<StoreInner>,
}

impl SqliteBookStore {
    /// Wraps a connection whose schema is already at the latest version.
    pub fn try_new(conn: Connection) -> RepoResult<Self> {
        let actual_version = current_user_version(&conn)?;
        let expected_version = latest_version();
        if actual_version != expected_version {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let (changes, _) = watch::channel(0);
        Ok(Self {
            inner: Arc::new(StoreInner {
                conn: Mutex::new(conn),
                changes,
            }),
        })
    }

    /// Opens a database file, applying the schema on first use.
    pub fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        Self::try_new(open_db(path)?)
    }

    /// Opens the default database file inside `dir`.
    pub fn open_in_dir(dir: impl AsRef<Path>) -> RepoResult<Self> {
        Self::open(dir.as_ref().join(DEFAULT_DB_FILE_NAME))
    }

    pub fn open_in_memory() -> RepoResult<Self> {
        Self::try_new(open_db_in_memory()?)
    }

    /// Number of live queries currently subscribed to this store.
    pub fn active_queries(&self) -> usize {
        self.inner.changes.receiver_count()
    }

    fn live<T: 'static>(
        &self,
        load: impl Fn(&Connection) -> RepoResult<T> + Send + Sync + 'static,
    ) -> LiveQuery<T> {
        // Weak so that dropping the last store handle closes the channel.
        let inner = Arc::downgrade(&self.inner);
        LiveQuery::new(self.inner.changes.subscribe(), move || {
            let inner = inner.upgrade().ok_or(RepoError::StoreClosed)?;
            let conn = lock_conn(&inner);
            load(&*conn)
        })
    }

    fn write(
        &self,
        event: &str,
        id: BookId,
        statement: impl FnOnce(&Connection) -> rusqlite::Result<(usize, BookId)>,
    ) -> RepoResult<()> {
        let started_at = Instant::now();
        let outcome = statement(&*lock_conn(&self.inner));

        match outcome {
            Ok((0, _)) => {
                debug!(
                    "event={event} module=repo status=ignored id={id} changed=0 duration_ms={}",
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Ok((changed, affected_id)) => {
                self.notify_changed();
                info!(
                    "event={event} module=repo status=ok id={affected_id} changed={changed} subscribers={} duration_ms={}",
                    self.active_queries(),
                    started_at.elapsed().as_millis()
                );
                Ok(())
            }
            Err(err) => {
                error!(
                    "event={event} module=repo status=error id={id} duration_ms={} error={err}",
                    started_at.elapsed().as_millis()
                );
                Err(err.into())
            }
        }
    }

    fn notify_changed(&self) {
        self.inner
            .changes
            .send_modify(|version| *version = version.wrapping_add(1));
    }
}

impl BookStore for SqliteBookStore {
    fn list(&self, query: BookQuery) -> LiveQuery<Vec<Book>> {
        self.live(move |conn| load_books(conn, &query))
    }

    fn find(&self, lookup: BookLookup) -> LiveQuery<Option<Book>> {
        self.live(move |conn| load_book(conn, &lookup))
    }

    fn insert(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        let requested_id = book.has_assigned_id().then_some(book.id);
        self.write("book_insert", book.id, |conn| {
            let changed = conn.execute(
                "INSERT OR IGNORE INTO books (
                    id,
                    name,
                    genre,
                    paper,
                    rating,
                    start_date,
                    finish_date,
                    author,
                    notes
                ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9);",
                params![
                    requested_id,
                    book.name.as_str(),
                    book.genre.as_str(),
                    book.paper,
                    book.rating.as_deref(),
                    book.start_date.as_deref(),
                    book.finish_date.as_deref(),
                    book.author.as_deref(),
                    book.notes.as_deref(),
                ],
            )?;
            Ok((changed, conn.last_insert_rowid()))
        })
    }

    fn update(&self, book: &Book) -> RepoResult<()> {
        book.validate()?;

        self.write("book_update", book.id, |conn| {
            let changed = conn.execute(
                "UPDATE books
                 SET
                    name = ?2,
                    genre = ?3,
                    paper = ?4,
                    rating = ?5,
                    start_date = ?6,
                    finish_date = ?7,
                    author = ?8,
                    notes = ?9
                 WHERE id = ?1;",
                params![
                    book.id,
                    book.name.as_str(),
                    book.genre.as_str(),
                    book.paper,
                    book.rating.as_deref(),
                    book.start_date.as_deref(),
                    book.finish_date.as_deref(),
                    book.author.as_deref(),
                    book.notes.as_deref(),
                ],
            )?;
            Ok((changed, book.id))
        })
    }

    fn delete(&self, book: &Book) -> RepoResult<()> {
        self.write("book_delete", book.id, |conn| {
            let changed = conn.execute("DELETE FROM books WHERE id = ?1;", [book.id])?;
            Ok((changed, book.id))
        })
    }
}

fn lock_conn(inner: &StoreInner) -> MutexGuard<'_, Connection> {
    // A panic while holding the lock cannot leave SQLite half-written.
    inner.conn.lock().unwrap_or_else(PoisonError::into_inner)
}

fn load_books(conn: &Connection, query: &BookQuery) -> RepoResult<Vec<Book>> {
    let (sql, bind_values) = query.to_sql();
    let mut stmt = conn.prepare_cached(&sql)?;
    let mut rows = stmt.query(params_from_iter(bind_values))?;
    let mut books = Vec::new();

    while let Some(row) = rows.next()? {
        books.push(parse_book_row(row)?);
    }

    Ok(books)
}

fn load_book(conn: &Connection, lookup: &BookLookup) -> RepoResult<Option<Book>> {
    let (sql, value) = match lookup {
        BookLookup::Id(id) => (
            format!("{BOOK_SELECT_SQL} WHERE id = ?1;"),
            Value::Integer(*id),
        ),
        BookLookup::Name(name) => (
            format!("{BOOK_SELECT_SQL} WHERE name = ?1 ORDER BY id ASC LIMIT 1;"),
            Value::Text(name.clone()),
        ),
    };

    let mut stmt = conn.prepare_cached(&sql)?;
    let mut rows = stmt.query([value])?;
    match rows.next()? {
        Some(row) => Ok(Some(parse_book_row(row)?)),
        None => Ok(None),
    }
}

fn parse_book_row(row: &Row<'_>) -> RepoResult<Book> {
    let id: BookId = row.get("id")?;
    let paper = match row.get::<_, i64>("paper")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid paper value `{other}` in books.paper for id {id}"
            )));
        }
    };

    let book = Book {
        id,
        name: row.get("name")?,
        genre: row.get("genre")?,
        paper,
        rating: row.get("rating")?,
        start_date: row.get("start_date")?,
        finish_date: row.get("finish_date")?,
        author: row.get("author")?,
        notes: row.get("notes")?,
    };
    book.validate().map_err(|err| {
        RepoError::InvalidData(format!("book {id} violates invariants: {err}"))
    })?;
    Ok(book)
}
