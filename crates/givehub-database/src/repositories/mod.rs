//! Concrete repository implementations.

pub mod listing;
pub mod message;
pub mod notification;
pub mod saved_search;
pub mod user;

pub use listing::ListingRepository;
pub use message::MessageRepository;
pub use notification::NotificationRepository;
pub use saved_search::SavedSearchRepository;
pub use user::UserRepository;
