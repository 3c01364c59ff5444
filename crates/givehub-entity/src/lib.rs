//! # givehub-entity
//!
//! Domain entity models and enums for GiveHub: listings, saved searches,
//! notifications, messages, and the minimal user record the other
//! entities reference.

pub mod listing;
pub mod message;
pub mod notification;
pub mod saved_search;
pub mod user;

pub use listing::{Condition, DeliveryMode, Listing};
pub use message::Message;
pub use notification::{Notification, NotificationKind};
pub use saved_search::SavedSearch;
pub use user::User;
