//! Book record.
//!
//! # Invariants
//! - `id == 0` means "not yet assigned"; SQLite assigns the next rowid.
//! - `name` and `genre` are never blank for a persisted record.
//! - Optional text fields are free-form and stored verbatim.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Primary key of the `books` table.
pub type BookId = i64;

/// Id value meaning "let the store assign one".
pub const UNASSIGNED_BOOK_ID: BookId = 0;

/// Validation failures for [`Book`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookValidationError {
    BlankName,
    BlankGenre,
    NegativeId(BookId),
}

impl Display for BookValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankName => write!(f, "book name must not be blank"),
            Self::BlankGenre => write!(f, "book genre must not be blank"),
            Self::NegativeId(id) => write!(f, "book id must not be negative, got {id}"),
        }
    }
}

impl Error for BookValidationError {}

/// One tracked book.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: BookId,
    pub name: String,
    pub genre: String,
    /// `true` for a physical copy, `false` for e-book/audio.
    pub paper: bool,
    /// Free-form, usually one of `config::RATING_OPTIONS`.
    pub rating: Option<String>,
    pub start_date: Option<String>,
    pub finish_date: Option<String>,
    pub author: Option<String>,
    pub notes: Option<String>,
}

impl Book {
    /// Creates a book with an unassigned id and no optional metadata.
    pub fn new(name: impl Into<String>, genre: impl Into<String>, paper: bool) -> Self {
        Self::with_id(UNASSIGNED_BOOK_ID, name, genre, paper)
    }

    /// Creates a book with a caller-chosen id.
    pub fn with_id(
        id: BookId,
        name: impl Into<String>,
        genre: impl Into<String>,
        paper: bool,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            genre: genre.into(),
            paper,
            rating: None,
            start_date: None,
            finish_date: None,
            author: None,
            notes: None,
        }
    }

    /// Checks the invariants a persisted book must satisfy.
    pub fn validate(&self) -> Result<(), BookValidationError> {
        if self.id < 0 {
            return Err(BookValidationError::NegativeId(self.id));
        }
        if self.name.trim().is_empty() {
            return Err(BookValidationError::BlankName);
        }
        if self.genre.trim().is_empty() {
            return Err(BookValidationError::BlankGenre);
        }
        Ok(())
    }

    pub fn has_assigned_id(&self) -> bool {
        self.id != UNASSIGNED_BOOK_ID
    }

    /// Neither started nor finished.
    pub fn is_to_read(&self) -> bool {
        self.start_date.is_none() && self.finish_date.is_none()
    }

    pub fn is_finished(&self) -> bool {
        self.finish_date.is_some()
    }

    /// Started but not finished yet.
    pub fn is_in_progress(&self) -> bool {
        self.start_date.is_some() && self.finish_date.is_none()
    }
}
