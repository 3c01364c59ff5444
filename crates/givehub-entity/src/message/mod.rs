//! Message domain entity.

pub mod model;

pub use model::{Message, MAX_CONTENT_LEN};
