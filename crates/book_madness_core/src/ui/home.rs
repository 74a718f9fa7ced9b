//! Home screen list selection.

use crate::model::book::Book;
use crate::repo::book_store::year_pattern;
use crate::repo::live::LiveQuery;
use crate::service::books_repository::BooksRepository;

/// Which slice of the library the home list shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum HomeFilter {
    #[default]
    All,
    SortedByName,
    SortedByRating,
    /// `LIKE` pattern on the rating text.
    Rating(String),
    ToRead,
    /// `LIKE` pattern on the finish date, see [`year_pattern`].
    FinishedIn(String),
}

impl HomeFilter {
    pub fn finished_in_year(year: i32) -> Self {
        Self::FinishedIn(year_pattern(year))
    }
}

/// Live list for the home screen under `filter`.
pub fn home_stream(repo: &impl BooksRepository, filter: &HomeFilter) -> LiveQuery<Vec<Book>> {
    match filter {
        HomeFilter::All => repo.get_all_books_stream(),
        HomeFilter::SortedByName => repo.get_all_books_ordered_by_name_stream(),
        HomeFilter::SortedByRating => repo.get_all_books_ordered_by_rating_stream(),
        HomeFilter::Rating(pattern) => repo.get_all_books_with_rating_stream(pattern),
        HomeFilter::ToRead => repo.get_all_books_without_start_and_finish_date_stream(),
        HomeFilter::FinishedIn(pattern) => repo.get_all_finished_books_by_year_stream(pattern),
    }
}
