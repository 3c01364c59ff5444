//! Shared value types used across GiveHub crates.

pub mod pagination;

pub use pagination::{PageRequest, PageResponse};
