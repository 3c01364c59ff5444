//! Notification read path.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_entity::notification::Notification;

use crate::stores::NotificationStore;

/// Lists and acknowledges a user's notifications.
#[derive(Clone)]
pub struct NotificationService {
    notifications: Arc<dyn NotificationStore>,
}

impl std::fmt::Debug for NotificationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotificationService").finish()
    }
}

impl NotificationService {
    /// Create a new notification service.
    pub fn new(notifications: Arc<dyn NotificationStore>) -> Self {
        Self { notifications }
    }

    /// A page of the user's notifications, newest first.
    pub async fn list(
        &self,
        user_id: Uuid,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Notification>> {
        self.notifications.find_for_user(user_id, page).await
    }

    /// Count of the user's unread notifications.
    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        self.notifications.count_unread(user_id).await
    }

    /// Mark one notification read. Only the owning user's notifications
    /// are affected; marking an already-read notification is a no-op.
    pub async fn mark_read(
        &self,
        notification_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        self.notifications
            .mark_read(notification_id, user_id, now)
            .await
    }

    /// Mark every unread notification of the user read. Returns how
    /// many were affected.
    pub async fn mark_all_read(&self, user_id: Uuid, now: DateTime<Utc>) -> AppResult<u64> {
        self.notifications.mark_all_read(user_id, now).await
    }
}
