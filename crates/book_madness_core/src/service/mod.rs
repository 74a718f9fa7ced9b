//! Application-facing services.
//!
//! # Responsibility
//! - Keep view models decoupled from the storage technology.

pub mod books_repository;
pub mod statistics;
