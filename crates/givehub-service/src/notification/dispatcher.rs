//! Notification dispatcher — constructs and persists one notification
//! record per call.
//!
//! The dispatcher performs no deduplication. Not notifying the same
//! listing twice is a structural property of the caller: the matching
//! cycle emits one call per (saved search, listing) pair and watermark
//! advancement prevents re-delivery across cycles; the message-send
//! path invokes `notify_new_message` at most once per sent message.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use givehub_core::result::AppResult;
use givehub_entity::listing::Listing;
use givehub_entity::message::Message;
use givehub_entity::notification::{Notification, NotificationKind};
use givehub_entity::saved_search::SavedSearch;
use givehub_entity::user::User;

use crate::stores::NotificationStore;

/// Listing state transitions that notify interested users.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateChange {
    /// The listing was reserved for a recipient.
    Reserved,
    /// The item was given away.
    Given,
}

impl StateChange {
    fn kind(self) -> NotificationKind {
        match self {
            Self::Reserved => NotificationKind::ListingReserved,
            Self::Given => NotificationKind::ListingGiven,
        }
    }

    fn body(self, listing: &Listing) -> String {
        match self {
            Self::Reserved => format!("The listing \"{}\" has been reserved", listing.title),
            Self::Given => format!("The listing \"{}\" has been given away", listing.title),
        }
    }
}

/// Turns domain events into persisted notification records.
#[derive(Clone)]
pub struct NotificationDispatcher {
    notifications: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for NotificationDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationDispatcher").finish()
    }
}

impl NotificationDispatcher {
    /// Create a new dispatcher.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// Notify a saved-search owner that a new listing matches.
    ///
    /// The listing owner is recorded as the notification sender.
    pub async fn notify_new_match(
        &self,
        user_id: Uuid,
        listing: &Listing,
        search: &SavedSearch,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let kind = NotificationKind::NewListingMatch;
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: kind.title().to_string(),
            body: format!(
                "The listing \"{}\" matches your search \"{}\"",
                listing.title, search.name
            ),
            listing_id: Some(listing.id),
            saved_search_id: Some(search.id),
            sender_id: Some(listing.owner_id),
            read: false,
            read_at: None,
            created_at: now,
        };
        self.notifications.create(&notification).await
    }

    /// Notify a message recipient. Invoked synchronously by the
    /// message-send path, at most once per sent message.
    pub async fn notify_new_message(
        &self,
        recipient_id: Uuid,
        sender: &User,
        message: &Message,
        listing: Option<&Listing>,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let kind = NotificationKind::NewMessage;
        let body = match listing {
            Some(listing) => format!(
                "You received a message from {} about \"{}\"",
                sender.username, listing.title
            ),
            None => format!("You received a message from {}", sender.username),
        };
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id: recipient_id,
            kind,
            title: kind.title().to_string(),
            body,
            listing_id: message.listing_id,
            saved_search_id: None,
            sender_id: Some(sender.id),
            read: false,
            read_at: None,
            created_at: now,
        };
        self.notifications.create(&notification).await
    }

    /// Notify a user that a listing they are involved with changed state.
    pub async fn notify_state_change(
        &self,
        user_id: Uuid,
        listing: &Listing,
        change: StateChange,
        now: DateTime<Utc>,
    ) -> AppResult<Notification> {
        let kind = change.kind();
        let notification = Notification {
            id: Uuid::new_v4(),
            user_id,
            kind,
            title: kind.title().to_string(),
            body: change.body(listing),
            listing_id: Some(listing.id),
            saved_search_id: None,
            sender_id: Some(listing.owner_id),
            read: false,
            read_at: None,
            created_at: now,
        };
        self.notifications.create(&notification).await
    }
}
