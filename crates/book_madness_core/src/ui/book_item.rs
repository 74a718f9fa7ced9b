//! Entry, edit and details screen models.
//!
//! # Invariants
//! - Writes only happen when the current form state is valid.
//! - Each field change replaces the whole [`BookUiState`].

use crate::config::RATING_OPTIONS;
use crate::model::book::BookId;
use crate::repo::book_store::RepoResult;
use crate::repo::live::LiveQuery;
use crate::service::books_repository::BooksRepository;
use crate::ui::form::{BookDetails, BookUiState};
use crate::ui::navigation::Route;
use log::debug;

/// Model behind the "add book" screen.
pub struct BookEntryViewModel<'r, R: BooksRepository> {
    repo: &'r R,
    ui_state: BookUiState,
}

impl<'r, R: BooksRepository> BookEntryViewModel<'r, R> {
    pub fn new(repo: &'r R) -> Self {
        Self {
            repo,
            ui_state: BookUiState::empty(),
        }
    }

    pub fn ui_state(&self) -> &BookUiState {
        &self.ui_state
    }

    pub fn rating_list(&self) -> &'static [&'static str] {
        RATING_OPTIONS
    }

    pub fn update_ui_state(&mut self, book_details: BookDetails) {
        self.ui_state = BookUiState::new(book_details);
    }

    /// Inserts the book when the form is valid.
    ///
    /// Returns whether an insert was issued. An issued insert that hits an
    /// existing id is still reported as issued.
    pub fn save_book(&self) -> RepoResult<bool> {
        if !self.ui_state.is_entry_valid {
            debug!("event=book_save module=ui status=skipped reason=invalid_form");
            return Ok(false);
        }
        self.repo.insert_book(&self.ui_state.book_details.to_book())?;
        Ok(true)
    }
}

/// Model behind the "edit book" screen.
pub struct BookEditViewModel<'r, R: BooksRepository> {
    repo: &'r R,
    book_id: BookId,
    ui_state: BookUiState,
}

impl<'r, R: BooksRepository> BookEditViewModel<'r, R> {
    /// Snapshots the stored book once; later store changes do not overwrite
    /// in-progress edits.
    ///
    /// A missing book leaves the form empty and therefore unsavable.
    pub fn load(repo: &'r R, book_id: BookId) -> RepoResult<Self> {
        let ui_state = match repo.get_book_by_id_stream(book_id).current()? {
            Some(book) => BookUiState::from(&book),
            None => BookUiState::empty(),
        };
        Ok(Self {
            repo,
            book_id,
            ui_state,
        })
    }

    pub fn book_id(&self) -> BookId {
        self.book_id
    }

    pub fn ui_state(&self) -> &BookUiState {
        &self.ui_state
    }

    pub fn rating_list(&self) -> &'static [&'static str] {
        RATING_OPTIONS
    }

    /// Replaces the form state; the edited id is pinned to the loaded book.
    pub fn update_ui_state(&mut self, book_details: BookDetails) {
        self.ui_state = BookUiState::new(BookDetails {
            id: self.book_id,
            ..book_details
        });
    }

    /// Writes the full record back when the form is valid.
    pub fn update_book(&self) -> RepoResult<bool> {
        if !self.ui_state.is_entry_valid {
            debug!(
                "event=book_update module=ui status=skipped reason=invalid_form id={}",
                self.book_id
            );
            return Ok(false);
        }
        self.repo.update_book(&self.ui_state.book_details.to_book())?;
        Ok(true)
    }
}

/// Model behind the "book details" screen.
pub struct BookDetailsViewModel<'r, R: BooksRepository> {
    repo: &'r R,
    book_id: BookId,
    book: LiveQuery<Option<BookDetails>>,
}

impl<'r, R: BooksRepository> BookDetailsViewModel<'r, R> {
    pub fn new(repo: &'r R, book_id: BookId) -> Self {
        let book = repo
            .get_book_by_id_stream(book_id)
            .map(|book| book.as_ref().map(BookDetails::from));
        Self {
            repo,
            book_id,
            book,
        }
    }

    /// Next version of the displayed book; `Some(Ok(None))` once deleted.
    pub async fn next(&mut self) -> Option<RepoResult<Option<BookDetails>>> {
        self.book.next().await
    }

    pub fn edit_route(&self) -> Route {
        Route::BookEdit(self.book_id)
    }

    pub fn delete_book(&self, book_details: &BookDetails) -> RepoResult<()> {
        self.repo.delete_book(&book_details.to_book())
    }
}
