//! Core data layer for Book Madness, a personal book tracker.
//! This crate owns the `books` table and every rule about its contents.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod ui;

pub use logging::{init_logging, logging_status, LoggingError};
pub use model::book::{Book, BookId, BookValidationError, UNASSIGNED_BOOK_ID};
pub use repo::book_store::{
    year_pattern, BookLookup, BookQuery, BookStore, RepoError, RepoResult, SqliteBookStore,
};
pub use repo::live::LiveQuery;
pub use service::books_repository::{BooksRepository, OfflineBooksRepository};
pub use service::statistics::{extract_year, statistics_stream, BookStatistics};
pub use ui::form::{BookDetails, BookUiState};
pub use ui::navigation::{Route, RouteParseError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
