//! Book form state.

use crate::model::book::{Book, BookId, UNASSIGNED_BOOK_ID};
use serde::{Deserialize, Serialize};

/// Editable field values of the entry/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookDetails {
    pub id: BookId,
    pub name: String,
    pub genre: String,
    pub paper: bool,
    pub rating: Option<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
}

impl BookDetails {
    /// Name and genre are both filled in.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && !self.genre.trim().is_empty()
    }

    /// Converts form values into a storable book.
    ///
    /// Blank optional fields become absent so that a cleared date still
    /// counts as "not started".
    pub fn to_book(&self) -> Book {
        Book {
            id: self.id,
            name: self.name.clone(),
            genre: self.genre.clone(),
            paper: self.paper,
            rating: non_blank(&self.rating),
            start_date: non_blank(&self.start_date),
            finish_date: non_blank(&self.finish_date),
            author: non_blank(&self.author),
            notes: non_blank(&self.notes),
        }
    }
}

impl From<&Book> for BookDetails {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id,
            name: book.name.clone(),
            genre: book.genre.clone(),
            paper: book.paper,
            rating: book.rating.clone(),
            start_date: book.start_date.clone(),
            finish_date: book.finish_date.clone(),
            author: book.author.clone(),
            notes: book.notes.clone(),
        }
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .filter(|text| !text.trim().is_empty())
        .map(str::to_string)
}

/// Screen-scoped form state with its derived validity flag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookUiState {
    pub book_details: BookDetails,
    /// Gates the save button.
    pub is_entry_valid: bool,
}

impl BookUiState {
    pub fn new(book_details: BookDetails) -> Self {
        let is_entry_valid = book_details.is_valid();
        Self {
            book_details,
            is_entry_valid,
        }
    }

    /// Form state for a book that has not been saved yet.
    pub fn empty() -> Self {
        Self::new(BookDetails {
            id: UNASSIGNED_BOOK_ID,
            ..BookDetails::default()
        })
    }
}

impl From<&Book> for BookUiState {
    fn from(book: &Book) -> Self {
        Self::new(BookDetails::from(book))
    }
}

#[cfg(test)]
mod tests {
    use super::{BookDetails, BookUiState};

    #[test]
    fn validity_tracks_name_and_genre() {
        let mut details = BookDetails {
            name: "Fourth Wing".to_string(),
            ..BookDetails::default()
        };
        assert!(!BookUiState::new(details.clone()).is_entry_valid);

        details.genre = "Fantasy".to_string();
        assert!(BookUiState::new(details).is_entry_valid);
    }

    #[test]
    fn to_book_drops_blank_optional_fields() {
        let details = BookDetails {
            name: "Dune".to_string(),
            genre: "SciFi".to_string(),
            start_date: Some("  ".to_string()),
            finish_date: Some(String::new()),
            author: Some("Frank Herbert".to_string()),
            ..BookDetails::default()
        };

        let book = details.to_book();
        assert!(book.is_to_read());
        assert_eq!(book.author.as_deref(), Some("Frank Herbert"));
    }
}
