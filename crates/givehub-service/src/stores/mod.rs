//! Store traits — the persistence boundary the services depend on.
//!
//! The concrete implementations wrap the sqlx repositories (see
//! [`pg`]); tests substitute in-memory fakes.

pub mod pg;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_entity::listing::Listing;
use givehub_entity::message::Message;
use givehub_entity::notification::Notification;
use givehub_entity::saved_search::SavedSearch;
use givehub_entity::user::User;

/// Read access to listings for search and matching.
#[async_trait]
pub trait ListingStore: Send + Sync {
    /// All active listings.
    async fn find_active(&self) -> AppResult<Vec<Listing>>;

    /// Active listings published strictly after `since`.
    async fn find_active_published_after(&self, since: DateTime<Utc>) -> AppResult<Vec<Listing>>;

    /// Look up one listing.
    async fn find_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>>;
}

/// Persistence for saved searches and their watermarks.
#[async_trait]
pub trait SavedSearchStore: Send + Sync {
    /// All saved searches with notifications enabled.
    async fn find_enabled(&self) -> AppResult<Vec<SavedSearch>>;

    /// Look up one saved search.
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SavedSearch>>;

    /// List a user's saved searches, newest first.
    async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SavedSearch>>;

    /// Persist a new saved search.
    async fn create(&self, search: &SavedSearch) -> AppResult<SavedSearch>;

    /// Update filter fields and notification preference.
    async fn update(&self, search: &SavedSearch) -> AppResult<SavedSearch>;

    /// Advance the notification watermark (never moves it backwards).
    async fn advance_watermark(&self, id: Uuid, to: DateTime<Utc>) -> AppResult<()>;

    /// Delete a saved search. Returns `true` if a row was removed.
    async fn delete(&self, id: Uuid) -> AppResult<bool>;
}

/// Persistence for notifications.
#[async_trait]
pub trait NotificationStore: Send + Sync {
    /// Persist a notification.
    async fn create(&self, notification: &Notification) -> AppResult<Notification>;

    /// List a user's notifications, newest first.
    async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>>;

    /// Count unread notifications.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark one notification as read (recipient only, idempotent).
    async fn mark_read(&self, notification_id: Uuid, user_id: Uuid, at: DateTime<Utc>)
        -> AppResult<()>;

    /// Mark all of a user's notifications as read.
    async fn mark_all_read(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<u64>;
}

/// Persistence for messages.
#[async_trait]
pub trait MessageStore: Send + Sync {
    /// Persist a message.
    async fn create(&self, message: &Message) -> AppResult<Message>;

    /// Look up one message.
    async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>>;

    /// All messages where the user is sender or receiver, unordered.
    async fn find_all_for_user(&self, user_id: Uuid) -> AppResult<Vec<Message>>;

    /// Count unread messages addressed to the user.
    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64>;

    /// Mark one message as read. Idempotent.
    async fn mark_read(&self, message_id: Uuid, at: DateTime<Utc>) -> AppResult<()>;

    /// Mark every unread message of one thread addressed to `user_id`
    /// as read. Idempotent; returns the number transitioned.
    async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        listing_id: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> AppResult<u64>;
}

/// Read access to users.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Look up one user.
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>>;
}
