//! Conversation aggregation.
//!
//! A conversation is the set of messages a user exchanged with one
//! partner about one listing (or about no listing at all). Messages
//! with the same partner but a different listing context belong to
//! different conversations.

use std::collections::HashMap;

use uuid::Uuid;

use givehub_entity::message::Message;

/// Identity of a conversation from one user's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConversationKey {
    /// The other participant.
    pub partner_id: Uuid,
    /// The listing the thread is about, if any.
    pub listing_id: Option<Uuid>,
}

/// One message thread, oldest message first.
#[derive(Debug, Clone)]
pub struct Conversation {
    pub key: ConversationKey,
    /// Messages in ascending send order.
    pub messages: Vec<Message>,
    /// Messages addressed to the viewing user that are still unread.
    pub unread_count: u64,
}

impl Conversation {
    /// The most recent message of the thread. Never `None` for a
    /// conversation produced by [`aggregate`].
    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

/// Group a user's messages into conversations.
///
/// Threads come back ordered by most recent activity, newest first.
/// Within a thread messages ascend by send time, breaking exact-time
/// ties by message id so ordering is deterministic.
pub fn aggregate(user_id: Uuid, messages: Vec<Message>) -> Vec<Conversation> {
    let mut groups: HashMap<ConversationKey, Vec<Message>> = HashMap::new();
    for message in messages {
        let key = ConversationKey {
            partner_id: message.partner_of(user_id),
            listing_id: message.listing_id,
        };
        groups.entry(key).or_default().push(message);
    }

    let mut conversations: Vec<Conversation> = groups
        .into_iter()
        .map(|(key, mut messages)| {
            messages.sort_by(|a, b| a.sent_at.cmp(&b.sent_at).then(a.id.cmp(&b.id)));
            let unread_count = messages.iter().filter(|m| m.is_unread_for(user_id)).count() as u64;
            Conversation {
                key,
                messages,
                unread_count,
            }
        })
        .collect();

    conversations.sort_by(|a, b| {
        let a_last = a.messages.last().map(|m| (m.sent_at, m.id));
        let b_last = b.messages.last().map(|m| (m.sent_at, m.id));
        b_last.cmp(&a_last)
    });
    conversations
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Duration, Utc};

    use super::*;

    fn message(
        sender: Uuid,
        receiver: Uuid,
        listing: Option<Uuid>,
        sent_at: DateTime<Utc>,
        read: bool,
    ) -> Message {
        Message {
            id: Uuid::new_v4(),
            sender_id: sender,
            receiver_id: receiver,
            listing_id: listing,
            content: "hello".to_string(),
            sent_at,
            read,
            read_at: if read { Some(sent_at) } else { None },
        }
    }

    #[test]
    fn test_same_partner_different_listing_is_two_conversations() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let listing = Uuid::new_v4();
        let t0 = Utc::now();

        let conversations = aggregate(
            alice,
            vec![
                message(alice, bob, Some(listing), t0, true),
                message(bob, alice, Some(listing), t0 + Duration::minutes(1), false),
                message(bob, alice, None, t0 + Duration::minutes(2), false),
            ],
        );

        assert_eq!(conversations.len(), 2);
        let keys: Vec<ConversationKey> = conversations.iter().map(|c| c.key).collect();
        assert!(keys.contains(&ConversationKey {
            partner_id: bob,
            listing_id: Some(listing),
        }));
        assert!(keys.contains(&ConversationKey {
            partner_id: bob,
            listing_id: None,
        }));
    }

    #[test]
    fn test_partner_is_the_other_participant_regardless_of_direction() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t0 = Utc::now();

        let conversations = aggregate(
            alice,
            vec![
                message(alice, bob, None, t0, true),
                message(bob, alice, None, t0 + Duration::minutes(1), false),
            ],
        );

        assert_eq!(conversations.len(), 1);
        assert_eq!(conversations[0].key.partner_id, bob);
        assert_eq!(conversations[0].messages.len(), 2);
    }

    #[test]
    fn test_messages_ascend_and_last_message_is_most_recent() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t0 = Utc::now();

        let newest = message(bob, alice, None, t0 + Duration::minutes(5), false);
        let conversations = aggregate(
            alice,
            vec![
                newest.clone(),
                message(alice, bob, None, t0, true),
                message(bob, alice, None, t0 + Duration::minutes(2), true),
            ],
        );

        let thread = &conversations[0];
        assert!(thread
            .messages
            .windows(2)
            .all(|w| w[0].sent_at <= w[1].sent_at));
        assert_eq!(thread.last_message().map(|m| m.id), Some(newest.id));
    }

    #[test]
    fn test_unread_counts_only_messages_addressed_to_viewer() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let t0 = Utc::now();

        let conversations = aggregate(
            alice,
            vec![
                // unread but sent BY alice, does not count
                message(alice, bob, None, t0, false),
                message(bob, alice, None, t0 + Duration::minutes(1), false),
                message(bob, alice, None, t0 + Duration::minutes(2), false),
                message(bob, alice, None, t0 + Duration::minutes(3), true),
            ],
        );

        assert_eq!(conversations[0].unread_count, 2);
    }

    #[test]
    fn test_conversations_ordered_by_latest_activity() {
        let alice = Uuid::new_v4();
        let bob = Uuid::new_v4();
        let carol = Uuid::new_v4();
        let t0 = Utc::now();

        let conversations = aggregate(
            alice,
            vec![
                message(bob, alice, None, t0 + Duration::minutes(10), false),
                message(carol, alice, None, t0, false),
                message(carol, alice, None, t0 + Duration::minutes(20), false),
            ],
        );

        assert_eq!(conversations[0].key.partner_id, carol);
        assert_eq!(conversations[1].key.partner_id, bob);
    }

    #[test]
    fn test_no_messages_yields_no_conversations() {
        assert!(aggregate(Uuid::new_v4(), Vec::new()).is_empty());
    }
}
