//! View-layer state models.
//!
//! # Responsibility
//! - Hold screen-scoped form state and derive its validity.
//! - Map screens to repository streams and writes.
//! - Describe the navigation routes between screens.
//!
//! # Invariants
//! - Form state is replaced, never mutated in place, on each field change.
//! - Nothing here is persisted except through an explicit save.

pub mod book_item;
pub mod form;
pub mod home;
pub mod navigation;
