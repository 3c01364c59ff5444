//! Saved searches — named filters users subscribe to for new-listing
//! notifications.

pub mod service;

pub use service::{SavedSearchParams, SavedSearchService};
