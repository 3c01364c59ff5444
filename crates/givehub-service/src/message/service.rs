//! Messaging between users.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::warn;
use uuid::Uuid;

use givehub_core::error::AppError;
use givehub_core::result::AppResult;
use givehub_entity::message::{Message, MAX_CONTENT_LEN};

use crate::notification::NotificationDispatcher;
use crate::stores::{ListingStore, MessageStore, UserStore};

use super::conversation::{self, Conversation};

/// Sends messages and serves the conversation view.
#[derive(Clone)]
pub struct MessageService {
    messages: Arc<dyn MessageStore>,
    users: Arc<dyn UserStore>,
    listings: Arc<dyn ListingStore>,
    dispatcher: NotificationDispatcher,
}

impl std::fmt::Debug for MessageService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageService").finish()
    }
}

impl MessageService {
    /// Create a new message service.
    pub fn new(
        messages: Arc<dyn MessageStore>,
        users: Arc<dyn UserStore>,
        listings: Arc<dyn ListingStore>,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            messages,
            users,
            listings,
            dispatcher,
        }
    }

    /// Send a message, optionally in the context of a listing.
    ///
    /// The recipient notification is best effort: a dispatch failure is
    /// logged and the already persisted message is still returned.
    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        listing_id: Option<Uuid>,
        content: &str,
        now: DateTime<Utc>,
    ) -> AppResult<Message> {
        if sender_id == receiver_id {
            return Err(AppError::validation("cannot send a message to yourself"));
        }
        let content = content.trim();
        if content.is_empty() {
            return Err(AppError::validation("message content must not be empty"));
        }
        // character count, not byte length
        if content.chars().count() > MAX_CONTENT_LEN {
            return Err(AppError::validation(format!(
                "message content exceeds {MAX_CONTENT_LEN} characters"
            )));
        }

        let sender = self
            .users
            .find_by_id(sender_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {sender_id} not found")))?;
        self.users
            .find_by_id(receiver_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("user {receiver_id} not found")))?;

        let listing = match listing_id {
            Some(id) => Some(
                self.listings
                    .find_by_id(id)
                    .await?
                    .ok_or_else(|| AppError::not_found(format!("listing {id} not found")))?,
            ),
            None => None,
        };

        let message = Message {
            id: Uuid::new_v4(),
            sender_id,
            receiver_id,
            listing_id,
            content: content.to_string(),
            sent_at: now,
            read: false,
            read_at: None,
        };
        let message = self.messages.create(&message).await?;

        if let Err(err) = self
            .dispatcher
            .notify_new_message(receiver_id, &sender, &message, listing.as_ref(), now)
            .await
        {
            warn!(
                message_id = %message.id,
                receiver_id = %receiver_id,
                error = %err,
                "failed to dispatch new-message notification"
            );
        }

        Ok(message)
    }

    /// The user's conversations, most recently active first.
    pub async fn conversations(&self, user_id: Uuid) -> AppResult<Vec<Conversation>> {
        let messages = self.messages.find_all_for_user(user_id).await?;
        Ok(conversation::aggregate(user_id, messages))
    }

    /// Count of unread messages addressed to the user.
    pub async fn unread_count(&self, user_id: Uuid) -> AppResult<i64> {
        self.messages.count_unread(user_id).await
    }

    /// Mark one received message as read. Only the receiver may do so.
    pub async fn mark_read(
        &self,
        message_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> AppResult<()> {
        let message = self
            .messages
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("message {message_id} not found")))?;
        if message.receiver_id != user_id {
            return Err(AppError::authorization(
                "only the receiver may mark a message read",
            ));
        }
        self.messages.mark_read(message_id, now).await
    }

    /// Mark every unread message of one thread addressed to the user as
    /// read. Idempotent; a second call affects nothing and returns 0.
    pub async fn mark_thread_read(
        &self,
        user_id: Uuid,
        partner_id: Uuid,
        listing_id: Option<Uuid>,
        now: DateTime<Utc>,
    ) -> AppResult<u64> {
        self.messages
            .mark_conversation_read(user_id, partner_id, listing_id, now)
            .await
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use tokio::sync::Mutex;

    use givehub_core::error::ErrorKind;
    use givehub_core::types::pagination::{PageRequest, PageResponse};
    use givehub_entity::listing::Listing;
    use givehub_entity::notification::Notification;
    use givehub_entity::user::User;

    use crate::stores::NotificationStore;

    use super::*;

    #[derive(Default)]
    struct FakeMessageStore {
        messages: Mutex<Vec<Message>>,
    }

    #[async_trait]
    impl MessageStore for FakeMessageStore {
        async fn create(&self, message: &Message) -> AppResult<Message> {
            self.messages.lock().await.push(message.clone());
            Ok(message.clone())
        }

        async fn find_by_id(&self, message_id: Uuid) -> AppResult<Option<Message>> {
            Ok(self
                .messages
                .lock()
                .await
                .iter()
                .find(|m| m.id == message_id)
                .cloned())
        }

        async fn find_all_for_user(&self, user_id: Uuid) -> AppResult<Vec<Message>> {
            Ok(self
                .messages
                .lock()
                .await
                .iter()
                .filter(|m| m.sender_id == user_id || m.receiver_id == user_id)
                .cloned()
                .collect())
        }

        async fn count_unread(&self, user_id: Uuid) -> AppResult<i64> {
            Ok(self
                .messages
                .lock()
                .await
                .iter()
                .filter(|m| m.is_unread_for(user_id))
                .count() as i64)
        }

        async fn mark_read(&self, message_id: Uuid, at: DateTime<Utc>) -> AppResult<()> {
            let mut messages = self.messages.lock().await;
            if let Some(m) = messages.iter_mut().find(|m| m.id == message_id && !m.read) {
                m.read = true;
                m.read_at = Some(at);
            }
            Ok(())
        }

        async fn mark_conversation_read(
            &self,
            user_id: Uuid,
            partner_id: Uuid,
            listing_id: Option<Uuid>,
            at: DateTime<Utc>,
        ) -> AppResult<u64> {
            let mut messages = self.messages.lock().await;
            let mut affected = 0;
            for m in messages.iter_mut() {
                if m.receiver_id == user_id
                    && m.sender_id == partner_id
                    && m.listing_id == listing_id
                    && !m.read
                {
                    m.read = true;
                    m.read_at = Some(at);
                    affected += 1;
                }
            }
            Ok(affected)
        }
    }

    #[derive(Default)]
    struct FakeUserStore {
        users: Mutex<Vec<User>>,
    }

    #[async_trait]
    impl UserStore for FakeUserStore {
        async fn find_by_id(&self, user_id: Uuid) -> AppResult<Option<User>> {
            Ok(self
                .users
                .lock()
                .await
                .iter()
                .find(|u| u.id == user_id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct FakeListingStore {
        listings: Mutex<Vec<Listing>>,
    }

    #[async_trait]
    impl ListingStore for FakeListingStore {
        async fn find_active(&self) -> AppResult<Vec<Listing>> {
            Ok(self.listings.lock().await.clone())
        }

        async fn find_active_published_after(
            &self,
            _since: DateTime<Utc>,
        ) -> AppResult<Vec<Listing>> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
            Ok(self
                .listings
                .lock()
                .await
                .iter()
                .find(|l| l.id == listing_id)
                .cloned())
        }
    }

    #[derive(Default)]
    struct FakeNotificationStore {
        created: Mutex<Vec<Notification>>,
        fail: bool,
    }

    #[async_trait]
    impl NotificationStore for FakeNotificationStore {
        async fn create(&self, notification: &Notification) -> AppResult<Notification> {
            if self.fail {
                return Err(AppError::database("notification store down"));
            }
            self.created.lock().await.push(notification.clone());
            Ok(notification.clone())
        }

        async fn find_for_user(
            &self,
            _user_id: Uuid,
            page: &PageRequest,
        ) -> AppResult<PageResponse<Notification>> {
            Ok(PageResponse::new(Vec::new(), page.page, page.page_size, 0))
        }

        async fn count_unread(&self, _user_id: Uuid) -> AppResult<i64> {
            Ok(0)
        }

        async fn mark_read(
            &self,
            _notification_id: Uuid,
            _user_id: Uuid,
            _at: DateTime<Utc>,
        ) -> AppResult<()> {
            Ok(())
        }

        async fn mark_all_read(&self, _user_id: Uuid, _at: DateTime<Utc>) -> AppResult<u64> {
            Ok(0)
        }
    }

    fn user(name: &str) -> User {
        User {
            id: Uuid::new_v4(),
            username: name.to_string(),
            email: None,
            created_at: Utc::now(),
        }
    }

    struct Fixture {
        service: MessageService,
        messages: Arc<FakeMessageStore>,
        notifications: Arc<FakeNotificationStore>,
        alice: User,
        bob: User,
    }

    async fn fixture(notifications_fail: bool) -> Fixture {
        let alice = user("alice");
        let bob = user("bob");
        let messages = Arc::new(FakeMessageStore::default());
        let users = Arc::new(FakeUserStore {
            users: Mutex::new(vec![alice.clone(), bob.clone()]),
        });
        let listings = Arc::new(FakeListingStore::default());
        let notifications = Arc::new(FakeNotificationStore {
            fail: notifications_fail,
            ..Default::default()
        });
        let service = MessageService::new(
            messages.clone(),
            users,
            listings,
            NotificationDispatcher::new(notifications.clone()),
        );
        Fixture {
            service,
            messages,
            notifications,
            alice,
            bob,
        }
    }

    #[tokio::test]
    async fn test_send_persists_message_and_notifies_receiver() {
        let fx = fixture(false).await;
        let sent = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, "  hello bob  ", Utc::now())
            .await
            .unwrap();

        assert_eq!(sent.content, "hello bob");
        assert!(!sent.read);
        assert_eq!(fx.messages.messages.lock().await.len(), 1);

        let notifications = fx.notifications.created.lock().await;
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].user_id, fx.bob.id);
        assert_eq!(notifications[0].body, "You received a message from alice");
    }

    #[tokio::test]
    async fn test_send_survives_notification_failure() {
        let fx = fixture(true).await;
        let sent = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, "hello", Utc::now())
            .await;
        assert!(sent.is_ok());
        assert_eq!(fx.messages.messages.lock().await.len(), 1);
    }

    #[tokio::test]
    async fn test_send_rejects_self_blank_and_oversize() {
        let fx = fixture(false).await;
        let now = Utc::now();

        let err = fx
            .service
            .send_message(fx.alice.id, fx.alice.id, None, "hi", now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let err = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, "   ", now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);

        let oversize = "x".repeat(MAX_CONTENT_LEN + 1);
        let err = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, &oversize, now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_send_length_limit_counts_characters_not_bytes() {
        let fx = fixture(false).await;
        let now = Utc::now();

        // 1500 characters, 3000 bytes
        let multibyte = "é".repeat(1500);
        let sent = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, &multibyte, now)
            .await;
        assert!(sent.is_ok());

        let too_long = "é".repeat(MAX_CONTENT_LEN + 1);
        let err = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, &too_long, now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[tokio::test]
    async fn test_send_rejects_unknown_receiver_and_listing() {
        let fx = fixture(false).await;
        let now = Utc::now();

        let err = fx
            .service
            .send_message(fx.alice.id, Uuid::new_v4(), None, "hi", now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);

        let err = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, Some(Uuid::new_v4()), "hi", now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_mark_read_is_receiver_only() {
        let fx = fixture(false).await;
        let now = Utc::now();
        let sent = fx
            .service
            .send_message(fx.alice.id, fx.bob.id, None, "hi", now)
            .await
            .unwrap();

        let err = fx
            .service
            .mark_read(sent.id, fx.alice.id, now)
            .await
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::Authorization);

        fx.service.mark_read(sent.id, fx.bob.id, now).await.unwrap();
        assert_eq!(fx.service.unread_count(fx.bob.id).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_mark_thread_read_is_idempotent() {
        let fx = fixture(false).await;
        let now = Utc::now();
        fx.service
            .send_message(fx.alice.id, fx.bob.id, None, "one", now)
            .await
            .unwrap();
        fx.service
            .send_message(fx.alice.id, fx.bob.id, None, "two", now)
            .await
            .unwrap();

        let first = fx
            .service
            .mark_thread_read(fx.bob.id, fx.alice.id, None, now)
            .await
            .unwrap();
        assert_eq!(first, 2);

        let second = fx
            .service
            .mark_thread_read(fx.bob.id, fx.alice.id, None, now)
            .await
            .unwrap();
        assert_eq!(second, 0);
    }
}
