//! Message entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Maximum message content length in characters.
pub const MAX_CONTENT_LEN: usize = 2000;

/// A direct message between two users, optionally about a listing.
///
/// Created by the sender; only the read transition (performed by the
/// receiver) mutates it afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Message {
    /// Unique message identifier.
    pub id: Uuid,
    /// The sending user.
    pub sender_id: Uuid,
    /// The receiving user.
    pub receiver_id: Uuid,
    /// The listing this message is about (if any).
    pub listing_id: Option<Uuid>,
    /// Message text, 1-2000 characters, non-blank.
    pub content: String,
    /// When the message was sent. Immutable.
    pub sent_at: DateTime<Utc>,
    /// Whether the receiver has read the message.
    pub read: bool,
    /// When the message was read.
    pub read_at: Option<DateTime<Utc>>,
}

impl Message {
    /// The conversation partner of `user_id` for this message.
    pub fn partner_of(&self, user_id: Uuid) -> Uuid {
        if self.sender_id == user_id {
            self.receiver_id
        } else {
            self.sender_id
        }
    }

    /// Whether this message is unread and addressed to `user_id`.
    pub fn is_unread_for(&self, user_id: Uuid) -> bool {
        self.receiver_id == user_id && !self.read
    }
}
