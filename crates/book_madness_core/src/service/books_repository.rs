//! Books repository facade.
//!
//! # Invariants
//! - Every call forwards to exactly one store operation.
//! - No validation, transformation or retry happens here.

use crate::model::book::{Book, BookId};
use crate::repo::book_store::{BookStore, RepoResult};
use crate::repo::live::LiveQuery;

/// Contract consumed by view models.
pub trait BooksRepository {
    fn get_all_books_stream(&self) -> LiveQuery<Vec<Book>>;
    fn get_all_books_ordered_by_name_stream(&self) -> LiveQuery<Vec<Book>>;
    fn get_all_books_ordered_by_rating_stream(&self) -> LiveQuery<Vec<Book>>;
    fn get_all_books_with_rating_stream(&self, rating: &str) -> LiveQuery<Vec<Book>>;
    fn get_all_books_without_start_and_finish_date_stream(&self) -> LiveQuery<Vec<Book>>;
    fn get_all_finished_books_by_year_stream(&self, year_pattern: &str)
        -> LiveQuery<Vec<Book>>;
    fn get_book_by_id_stream(&self, id: BookId) -> LiveQuery<Option<Book>>;
    fn get_book_by_name_stream(&self, name: &str) -> LiveQuery<Option<Book>>;
    fn insert_book(&self, book: &Book) -> RepoResult<()>;
    fn update_book(&self, book: &Book) -> RepoResult<()>;
    fn delete_book(&self, book: &Book) -> RepoResult<()>;
}

/// Repository backed by the on-device store.
pub struct OfflineBooksRepository<S: BookStore> {
    store: S,
}

impl<S: BookStore> OfflineBooksRepository<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

impl<S: BookStore> BooksRepository for OfflineBooksRepository<S> {
    fn get_all_books_stream(&self) -> LiveQuery<Vec<Book>> {
        self.store.get_all()
    }

    fn get_all_books_ordered_by_name_stream(&self) -> LiveQuery<Vec<Book>> {
        self.store.get_all_ordered_by_name()
    }

    fn get_all_books_ordered_by_rating_stream(&self) -> LiveQuery<Vec<Book>> {
        self.store.get_all_ordered_by_rating()
    }

    fn get_all_books_with_rating_stream(&self, rating: &str) -> LiveQuery<Vec<Book>> {
        self.store.get_all_with_rating(rating)
    }

    fn get_all_books_without_start_and_finish_date_stream(&self) -> LiveQuery<Vec<Book>> {
        self.store.get_all_without_start_and_finish_date()
    }

    fn get_all_finished_books_by_year_stream(
        &self,
        year_pattern: &str,
    ) -> LiveQuery<Vec<Book>> {
        self.store.get_all_finished_by_year(year_pattern)
    }

    fn get_book_by_id_stream(&self, id: BookId) -> LiveQuery<Option<Book>> {
        self.store.get_by_id(id)
    }

    fn get_book_by_name_stream(&self, name: &str) -> LiveQuery<Option<Book>> {
        self.store.get_by_name(name)
    }

    fn insert_book(&self, book: &Book) -> RepoResult<()> {
        self.store.insert(book)
    }

    fn update_book(&self, book: &Book) -> RepoResult<()> {
        self.store.update(book)
    }

    fn delete_book(&self, book: &Book) -> RepoResult<()> {
        self.store.delete(book)
    }
}
