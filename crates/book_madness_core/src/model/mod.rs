//! Domain model for tracked books.
//!
//! # Invariants
//! - Every persisted book is identified by a stable integer `BookId`.
//! - Deletion is a hard delete; there are no tombstones.

pub mod book;
