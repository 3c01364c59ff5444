//! Notification dispatch and read path.

pub mod dispatcher;
pub mod service;

pub use dispatcher::{NotificationDispatcher, StateChange};
pub use service::NotificationService;
