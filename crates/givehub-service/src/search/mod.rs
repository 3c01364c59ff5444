//! Listing search: criteria, predicate composition, and matching.

pub mod criteria;
pub mod filter;
pub mod matching;
pub mod service;

pub use criteria::SearchCriteria;
pub use filter::{compose, Predicate};
pub use matching::MatchEngine;
pub use service::SearchService;
