//! Notification entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::NotificationKind;

/// A notification delivered to a user.
///
/// Notifications are immutable once created except for the read
/// transition. The optional references form a tagged union keyed by
/// `kind`: a new-listing-match carries listing + saved-search + sender
/// (the listing owner), a new-message carries sender + optional listing,
/// state changes carry the listing.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Notification {
    /// Unique notification identifier.
    pub id: Uuid,
    /// The recipient user.
    pub user_id: Uuid,
    /// What triggered this notification.
    pub kind: NotificationKind,
    /// Notification title.
    pub title: String,
    /// Notification body text.
    pub body: String,
    /// The triggering listing (if applicable).
    pub listing_id: Option<Uuid>,
    /// The saved search that matched (if applicable).
    pub saved_search_id: Option<Uuid>,
    /// The user whose action triggered the notification (if applicable).
    pub sender_id: Option<Uuid>,
    /// Whether the recipient has read this notification.
    pub read: bool,
    /// When the notification was read.
    pub read_at: Option<DateTime<Utc>>,
    /// When the notification was created.
    pub created_at: DateTime<Utc>,
}

impl Notification {
    /// Check if the notification is still unread.
    pub fn is_unread(&self) -> bool {
        !self.read
    }
}
