//! # givehub-service
//!
//! Business logic service layer for GiveHub. Each service orchestrates
//! the store traits to implement application-level use cases: dynamic
//! listing search, saved-search matching, notification dispatch, and
//! conversation aggregation.
//!
//! Services follow constructor injection — all dependencies are provided
//! at construction time via `Arc` references to store trait objects.

pub mod message;
pub mod notification;
pub mod saved_search;
pub mod search;
pub mod stores;

pub use message::{Conversation, ConversationKey, MessageService};
pub use notification::{NotificationDispatcher, NotificationService, StateChange};
pub use saved_search::{SavedSearchParams, SavedSearchService};
pub use search::{MatchEngine, Predicate, SearchCriteria, SearchService};
pub use stores::{ListingStore, MessageStore, NotificationStore, SavedSearchStore, UserStore};
