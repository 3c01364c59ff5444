//! Saved-search entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::listing::{Condition, DeliveryMode};

/// A persisted search filter with notification preference and watermark.
///
/// Every filter field is optional; an unset field contributes no
/// constraint. Keywords are stored as one comma-joined string and split
/// into a normalized list when the filter is evaluated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct SavedSearch {
    /// Unique saved-search identifier.
    pub id: Uuid,
    /// The owning user.
    pub user_id: Uuid,
    /// User-chosen name for the search.
    pub name: String,
    /// Optional free-text query against title and description.
    pub query: Option<String>,
    /// Optional zone substring filter.
    pub zone: Option<String>,
    /// Optional condition filter.
    pub condition: Option<Condition>,
    /// Optional delivery mode filter.
    pub delivery_mode: Option<DeliveryMode>,
    /// Comma-joined keyword filter.
    pub keywords: Option<String>,
    /// Whether the matching cycle notifies this search.
    pub notifications_enabled: bool,
    /// Watermark: listings published at or before this instant have
    /// already been notified. Monotonically non-decreasing.
    pub last_notification_at: Option<DateTime<Utc>>,
    /// When the search was created.
    pub created_at: DateTime<Utc>,
    /// When the search was last updated.
    pub updated_at: DateTime<Utc>,
}

impl SavedSearch {
    /// The lower bound for new-listing matching: the watermark, falling
    /// back to the creation time when no cycle has notified yet.
    pub fn match_since(&self) -> DateTime<Utc> {
        self.last_notification_at.unwrap_or(self.created_at)
    }

    /// Split the stored comma-joined keyword string into trimmed,
    /// lowercased, non-empty keywords.
    pub fn keyword_list(&self) -> Vec<String> {
        match &self.keywords {
            Some(raw) => raw
                .split(',')
                .map(|k| k.trim().to_lowercase())
                .filter(|k| !k.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }
}
