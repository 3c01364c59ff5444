//! Saved-search domain entity.

pub mod model;

pub use model::SavedSearch;
