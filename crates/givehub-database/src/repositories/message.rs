//! Message repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use givehub_core::error::{AppError, ErrorKind};
use givehub_core::result::AppResult;
use givehub_entity::message::Message;

/// Repository for message persistence and read transitions.
#[derive(Debug, Clone)]
pub struct MessageRepository {
    pool: PgPool,
}

impl MessageRepository {
    /// Create a new message repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Persist a message.
    pub async fn create(&self, message: &Message) -> AppResult<Message> {
        sqlx::query_as::<_, Message>(
            "INSERT INTO messages \
             (id, sender_id, receiver_id, listing_id, content, sent_at, read, read_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8) RETURNING *",
        )
        .bind(message.id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(message.listing_id)
        .bind(&message.content)
        .bind(message.sent_at)
        .bind(message.read)
        .bind(message.read_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to create message", e))
    }

    /// Find a message by id.
    pub async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        sqlx::query_as::<_, Message>("SELECT * FROM messages WHERE id = $1")
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find message", e))
    }

    /// All messages where the user is sender or receiver, in no
    /// particular order; conversation grouping happens in the service.
    pub async fn find_all_for_user(&self, user_id: Uuid) -> AppResult<Vec<Message>> {
        sqlx::query_as::<_, Message>(
            "SELECT * FROM messages WHERE sender_id = $1 OR receiver_id = $1",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list messages", e))
    }

    /// Count unread messages addressed to a user.
    pub async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        sqlx::query_scalar(
            "SELECT COUNT(*) FROM messages WHERE receiver_id = $1 AND read = FALSE",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count unread", e))
    }

    /// Mark a single message as read. Idempotent.
    pub async fn mark_read(&self, message_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE messages SET read = TRUE, read_at = $2 WHERE id = $1 AND read = FALSE",
        )
        .bind(message_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to mark read", e))?;
        Ok(())
    }

    /// Mark every unread message of one conversation thread addressed to
    /// `user_id` as read. Idempotent; returns the number of messages
    /// transitioned.
    pub async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        listing_id: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = TRUE, read_at = $4 \
             WHERE receiver_id = $1 AND sender_id = $2 \
               AND listing_id IS NOT DISTINCT FROM $3 AND read = FALSE",
        )
        .bind(user_id)
        .bind(partner_id)
        .bind(listing_id)
        .bind(at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to mark conversation read", e)
        })?;
        Ok(result.rows_affected())
    }
}
