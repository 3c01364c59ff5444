//! Listing repository implementation.
//!
//! The repository narrows on the indexed columns (`active`,
//! `published_at`); full criteria evaluation happens in the service
//! layer through the composed filter predicate.

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use givehub_core::error::{AppError, ErrorKind};
use givehub_core::result::AppResult;
use givehub_entity::listing::Listing;

/// Repository for listing reads used by search and matching.
#[derive(Debug, Clone)]
pub struct ListingRepository {
    pool: PgPool,
}

impl ListingRepository {
    /// Create a new listing repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a listing by id.
    pub async fn find_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
        sqlx::query_as::<_, Listing>("SELECT * FROM listings WHERE id = $1")
            .bind(listing_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find listing", e))
    }

    /// All active listings, newest first.
    pub async fn find_active(&self) -> AppResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings WHERE active = TRUE ORDER BY published_at DESC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list active listings", e)
        })
    }

    /// Active listings published strictly after `since`.
    pub async fn find_active_published_after(
        &self,
        since: DateTime<Utc>,
    ) -> AppResult<Vec<Listing>> {
        sqlx::query_as::<_, Listing>(
            "SELECT * FROM listings WHERE active = TRUE AND published_at > $1",
        )
        .bind(since)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list new listings", e)
        })
    }
}
