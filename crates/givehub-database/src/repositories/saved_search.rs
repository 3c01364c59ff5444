//! Saved-search repository implementation.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use givehub_core::error::{AppError, ErrorKind};
use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_entity::saved_search::SavedSearch;

/// Repository for saved-search persistence, including the watermark
/// read-modify-write used by the matching cycle.
#[derive(Debug, Clone)]
pub struct SavedSearchRepository {
    pool: PgPool,
}

impl SavedSearchRepository {
    /// Create a new saved-search repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a saved search by id.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SavedSearch>> {
        sqlx::query_as::<_, SavedSearch>("SELECT * FROM saved_searches WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find saved search", e)
            })
    }

    /// All saved searches with notifications enabled.
    pub async fn find_enabled(&self) -> AppResult<Vec<SavedSearch>> {
        sqlx::query_as::<_, SavedSearch>(
            "SELECT * FROM saved_searches WHERE notifications_enabled = TRUE",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list enabled searches", e)
        })
    }

    /// List saved searches for a user, newest first.
    pub async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SavedSearch>> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM saved_searches WHERE user_id = $1")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::with_source(ErrorKind::Database, "Failed to count saved searches", e)
                })?;

        let searches = sqlx::query_as::<_, SavedSearch>(
            "SELECT * FROM saved_searches WHERE user_id = $1 \
             ORDER BY created_at DESC LIMIT $2 OFFSET $3",
        )
        .bind(user_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list saved searches", e)
        })?;

        Ok(PageResponse::new(
            searches,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Create a saved search.
    pub async fn create(&self, search: &SavedSearch) -> AppResult<SavedSearch> {
        sqlx::query_as::<_, SavedSearch>(
            "INSERT INTO saved_searches \
             (id, user_id, name, query, zone, condition, delivery_mode, keywords, \
              notifications_enabled, last_notification_at, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) RETURNING *",
        )
        .bind(search.id)
        .bind(search.user_id)
        .bind(&search.name)
        .bind(&search.query)
        .bind(&search.zone)
        .bind(search.condition)
        .bind(search.delivery_mode)
        .bind(&search.keywords)
        .bind(search.notifications_enabled)
        .bind(search.last_notification_at)
        .bind(search.created_at)
        .bind(search.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to create saved search", e)
        })
    }

    /// Update the filter fields and notification preference of a search.
    pub async fn update(&self, search: &SavedSearch) -> AppResult<SavedSearch> {
        sqlx::query_as::<_, SavedSearch>(
            "UPDATE saved_searches SET name = $2, query = $3, zone = $4, condition = $5, \
             delivery_mode = $6, keywords = $7, notifications_enabled = $8, updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(search.id)
        .bind(&search.name)
        .bind(&search.query)
        .bind(&search.zone)
        .bind(search.condition)
        .bind(search.delivery_mode)
        .bind(&search.keywords)
        .bind(search.notifications_enabled)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to update saved search", e)
        })
    }

    /// Advance the notification watermark.
    ///
    /// The `WHERE` clause keeps the watermark monotonic even if an older
    /// cycle result lands late.
    pub async fn advance_watermark(&self, id: Uuid, to: DateTime<Utc>) -> AppResult<()> {
        sqlx::query(
            "UPDATE saved_searches SET last_notification_at = $2, updated_at = NOW() \
             WHERE id = $1 AND (last_notification_at IS NULL OR last_notification_at < $2)",
        )
        .bind(id)
        .bind(to)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to advance watermark", e)
        })?;
        Ok(())
    }

    /// Delete a saved search. Returns `true` if a row was removed.
    pub async fn delete(&self, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM saved_searches WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to delete saved search", e)
            })?;
        Ok(result.rows_affected() > 0)
    }
}
