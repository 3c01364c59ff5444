//! Direct messaging and conversation threading.

pub mod conversation;
pub mod service;

pub use conversation::{Conversation, ConversationKey};
pub use service::MessageService;
