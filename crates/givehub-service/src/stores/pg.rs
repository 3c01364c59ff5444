//! PostgreSQL store adapters delegating to the sqlx repositories.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_database::repositories::{
    ListingRepository, MessageRepository, NotificationRepository, SavedSearchRepository,
    UserRepository,
};
use givehub_entity::listing::Listing;
use givehub_entity::message::Message;
use givehub_entity::notification::Notification;
use givehub_entity::saved_search::SavedSearch;
use givehub_entity::user::User;

use super::{ListingStore, MessageStore, NotificationStore, SavedSearchStore, UserStore};

#[async_trait]
impl ListingStore for ListingRepository {
    async fn find_active(&self) -> AppResult<Vec<Listing>> {
        ListingRepository::find_active(self).await
    }

    async fn find_active_published_after(&self, since: DateTime<Utc>) -> AppResult<Vec<Listing>> {
        ListingRepository::find_active_published_after(self, since).await
    }

    async fn find_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
        ListingRepository::find_by_id(self, listing_id).await
    }
}

#[async_trait]
impl SavedSearchStore for SavedSearchRepository {
    async fn find_enabled(&self) -> AppResult<Vec<SavedSearch>> {
        SavedSearchRepository::find_enabled(self).await
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<SavedSearch>> {
        SavedSearchRepository::find_by_id(self, id).await
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<SavedSearch>> {
        SavedSearchRepository::find_for_user(self, user_id, page).await
    }

    async fn create(&self, search: &SavedSearch) -> AppResult<SavedSearch> {
        SavedSearchRepository::create(self, search).await
    }

    async fn update(&self, search: &SavedSearch) -> AppResult<SavedSearch> {
        SavedSearchRepository::update(self, search).await
    }

    async fn advance_watermark(&self, id: Uuid, to: DateTime<Utc>) -> AppResult<()> {
        SavedSearchRepository::advance_watermark(self, id, to).await
    }

    async fn delete(&self, id: Uuid) -> AppResult<bool> {
        SavedSearchRepository::delete(self, id).await
    }
}

#[async_trait]
impl NotificationStore for NotificationRepository {
    async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        NotificationRepository::create(self, notification).await
    }

    async fn find_for_user(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        NotificationRepository::find_for_user(self, user_id, page).await
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        NotificationRepository::count_unread(self, user_id).await
    }

    async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
        at: DateTime<Utc>,
    ) -> AppResult<()> {
        NotificationRepository::mark_read(self, notification_id, user_id, at).await
    }

    async fn mark_all_read(&self, user_id: Uuid, at: DateTime<Utc>) -> AppResult<u64> {
        NotificationRepository::mark_all_read(self, user_id, at).await
    }
}

#[async_trait]
impl MessageStore for MessageRepository {
    async fn create(&self, message: &Message) -> AppResult<Message> {
        MessageRepository::create(self, message).await
    }

    async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
        MessageRepository::find_by_id(self, message_id).await
    }

    async fn find_all_for_user(&self, user_id: Uuid) -> AppResult<Vec<Message>> {
        MessageRepository::find_all_for_user(self, user_id).await
    }

    async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
        MessageRepository::count_unread(self, user_id).await
    }

    async fn mark_read(&self, message_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
        MessageRepository::mark_read(self, message_id, at).await
    }

    async fn mark_conversation_read(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        listing_id: Option<Uuid>,
        at: DateTime<Utc>,
    ) -> AppResult<u64> {
        MessageRepository::mark_conversation_read(self, user_id, partner_id, listing_id, at).await
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
        UserRepository::find_by_id(self, user_id).await
    }
}
