//! Record store over the `books` table.
//!
//! # Responsibility
//! - Own every SQL statement that touches `books`.
//! - Expose reads as live queries that re-run after each changing write.
//!
//! # Invariants
//! - Writes validate the book before any SQL mutation.
//! - An insert that hits an existing primary key is a silent no-op.
//! - Live queries are only woken by writes that changed at least one row.

pub mod book_store;
pub mod live;
