//! Reading statistics derived from the book list.
//!
//! # Invariants
//! - Statistics are a pure projection of the current book list; nothing is
//!   persisted.
//! - A finish date contributes to a year only when it contains exactly one
//!   standalone four-digit number.

use crate::model::book::Book;
use crate::repo::live::LiveQuery;
use crate::service::books_repository::BooksRepository;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b(\d{4})\b").expect("valid year regex"));

/// Aggregate view over all tracked books.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BookStatistics {
    pub total: usize,
    pub paper: usize,
    pub other_format: usize,
    /// Neither started nor finished.
    pub to_read: usize,
    pub in_progress: usize,
    pub finished: usize,
    /// Finished books keyed by the year found in `finish_date`.
    pub finished_per_year: BTreeMap<i32, usize>,
    /// Books keyed by their rating text; unrated books are not counted.
    pub per_rating: BTreeMap<String, usize>,
    /// Mean over ratings that parse as numbers.
    pub average_rating: Option<f64>,
}

impl BookStatistics {
    pub fn from_books(books: &[Book]) -> Self {
        let mut stats = Self {
            total: books.len(),
            ..Self::default()
        };
        let mut rating_sum = 0.0;
        let mut rated = 0usize;

        for book in books {
            if book.paper {
                stats.paper += 1;
            } else {
                stats.other_format += 1;
            }

            if book.is_to_read() {
                stats.to_read += 1;
            } else if book.is_in_progress() {
                stats.in_progress += 1;
            }

            if let Some(finish_date) = book.finish_date.as_deref() {
                stats.finished += 1;
                if let Some(year) = extract_year(finish_date) {
                    *stats.finished_per_year.entry(year).or_default() += 1;
                }
            }

            if let Some(rating) = book.rating.as_deref().map(str::trim) {
                if rating.is_empty() {
                    continue;
                }
                *stats.per_rating.entry(rating.to_string()).or_default() += 1;
                if let Ok(value) = rating.replace(',', ".").parse::<f64>() {
                    rating_sum += value;
                    rated += 1;
                }
            }
        }

        if rated > 0 {
            stats.average_rating = Some(rating_sum / rated as f64);
        }
        stats
    }

    /// Finished count for `year`, zero when none.
    pub fn finished_in(&self, year: i32) -> usize {
        self.finished_per_year.get(&year).copied().unwrap_or(0)
    }
}

/// Returns the single four-digit year in a free-form date string.
///
/// `"23.01.2024"` and `"2024-01-23"` both yield `2024`; text with no year or
/// with two candidate years (`"2023-2024"`) yields `None`.
pub fn extract_year(date: &str) -> Option<i32> {
    let mut years = YEAR_RE
        .captures_iter(date)
        .filter_map(|captures| captures.get(1))
        .filter_map(|year| year.as_str().parse::<i32>().ok());
    let year = years.next()?;
    if years.next().is_some() {
        return None;
    }
    Some(year)
}

/// Live statistics over every book in the repository.
pub fn statistics_stream(repo: &impl BooksRepository) -> LiveQuery<BookStatistics> {
    repo.get_all_books_stream()
        .map(|books| BookStatistics::from_books(&books))
}
