//! Saved-search lifecycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use givehub_core::error::AppError;
use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_entity::listing::{Condition, DeliveryMode};
use givehub_entity::saved_search::SavedSearch;

use crate::search::SearchCriteria;
use crate::stores::SavedSearchStore;

const NAME_MIN_LEN: usize = 3;
const NAME_MAX_LEN: usize = 100;

/// Filter fields of a saved search, as submitted by the owner.
#[derive(Debug, Clone, Default)]
pub struct SavedSearchParams {
    pub name: String,
    pub query: Option<String>,
    pub zone: Option<String>,
    pub condition: Option<Condition>,
    pub delivery_mode: Option<DeliveryMode>,
    /// Comma-separated keyword list.
    pub keywords: Option<String>,
    pub notifications_enabled: bool,
}

impl SavedSearchParams {
    fn validate(&self) -> AppResult<()> {
        // character count, not byte length
        let name_len = self.name.trim().chars().count();
        if name_len < NAME_MIN_LEN || name_len > NAME_MAX_LEN {
            return Err(AppError::validation(format!(
                "search name must be between {NAME_MIN_LEN} and {NAME_MAX_LEN} characters"
            )));
        }
        Ok(())
    }

    fn non_blank(value: &Option<String>) -> Option<String> {
        value
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_string)
    }
}

/// Creates, updates and deletes saved searches on behalf of their
/// owners.
#[derive(Clone)]
pub struct SavedSearchService {
    searches: Arc<dyn SavedSearchStore>,
}

impl std::fmt::Debug for SavedSearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SavedSearchService").finish()
    }
}

impl SavedSearchService {
    /// Create a new saved-search service.
    pub fn new(searches: Arc<dyn SavedSearchStore>) -> Self {
        Self { searches }
    }

    /// Create a saved search for a user.
    ///
    /// The notification watermark starts at the creation instant, so
    /// only listings published after the search existed can ever be
    /// notified.
    pub async fn create(
        &self,
        user_id: Uuid,
        params: &SavedSearchParams,
        now: DateTime<Utc>,
    ) -> AppResult<SavedSearch> {
        params.validate()?;
        let search = SavedSearch {
            id: Uuid::new_v4(),
            user_id,
            name: params.name.trim().to_string(),
            query: SavedSearchParams::non_blank(&params.query),
            zone: SavedSearchParams::non_blank(&params.zone),
            condition: params.condition,
            delivery_mode: params.delivery_mode,
            keywords: SavedSearchParams::non_blank(&params.keywords),
            notifications_enabled: params.notifications_enabled,
            last_notification_at: Some(now),
            created_at: now,
            updated_at: now,
        };
        self.searches.create(&search).await
    }

    /// Save the criteria of a one-off search under a name.
    pub async fn create_from_criteria(
        &self,
        user_id: Uuid,
        name: &str,
        criteria: &SearchCriteria,
        enabled: bool,
        now: DateTime<Utc>,
    ) -> AppResult<SavedSearch> {
        let keywords = if criteria.keywords.is_empty() {
            None
        } else {
            Some(criteria.keywords.join(","))
        };
        let params = SavedSearchParams {
            name: name.to_string(),
            query: criteria.query.clone(),
            zone: criteria.zone.clone(),
            condition: criteria.condition,
            delivery_mode: criteria.delivery_mode,
            keywords,
            notifications_enabled: enabled,
        };
        self.create(user_id, &params, now).await
    }

    /// A page of the user's saved searches, newest first.
    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SavedSearch>> {
        self.searches.find_for_user(user_id, page).await
    }

    /// Replace the filter fields of a saved search. Owner only. The
    /// watermark is left untouched, so an edit never replays listings
    /// already notified.
    pub async fn update(
        &self,
        search_id: Uuid,
        user_id: Uuid,
        params: &SavedSearchParams,
        now: DateTime<Utc>,
    ) -> AppResult<SavedSearch> {
        params.validate()?;
        let mut search = self.find_owned(search_id, user_id).await?;
        search.name = params.name.trim().to_string();
        search.query = SavedSearchParams::non_blank(&params.query);
        search.zone = SavedSearchParams::non_blank(&params.zone);
        search.condition = params.condition;
        search.delivery_mode = params.delivery_mode;
        search.keywords = SavedSearchParams::non_blank(&params.keywords);
        search.notifications_enabled = params.notifications_enabled;
        search.updated_at = now;
        self.searches.update(&search).await
    }

    /// Enable or disable match notifications. Owner only.
    pub async fn toggle_notifications(
        &self,
        search_id: Uuid,
        user_id: Uuid,
        enabled: bool,
        now: DateTime<Utc>,
    ) -> AppResult<SavedSearch> {
        let mut search = self.find_owned(search_id, user_id).await?;
        search.notifications_enabled = enabled;
        search.updated_at = now;
        self.searches.update(&search).await
    }

    /// Delete a saved search. Owner only.
    pub async fn delete(&self, search_id: Uuid, user_id: Uuid) -> AppResult<()> {
        self.find_owned(search_id, user_id).await?;
        if !self.searches.delete(search_id).await? {
            return Err(AppError::not_found(format!(
                "saved search {search_id} not found"
            )));
        }
        Ok(())
    }

    async fn find_owned(&self, search_id: Uuid, user_id: Uuid) -> AppResult<SavedSearch> {
        let search = self
            .searches
            .find_by_id(search_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("saved search {search_id} not found")))?;
        if search.user_id != user_id {
            return Err(AppError::authorization(
                "saved search belongs to another user",
            ));
        }
        Ok(search)
    }
}
