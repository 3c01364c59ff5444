//! Listing entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::condition::Condition;
use super::delivery::DeliveryMode;

/// An item offered by a user on the platform.
///
/// Listings are mutated only by their owner through listing-management
/// operations; the matching pipeline reads them. A listing is eligible
/// for matching iff `active` is true; `given` implies not active.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Listing {
    /// Unique listing identifier.
    pub id: Uuid,
    /// Listing title.
    pub title: String,
    /// Full description text.
    pub description: String,
    /// Condition of the offered item.
    pub condition: Condition,
    /// How the item can be handed over.
    pub delivery_mode: DeliveryMode,
    /// Free-text geographic zone.
    pub zone: String,
    /// Normalized lowercase keywords.
    pub keywords: Vec<String>,
    /// The user offering the item.
    pub owner_id: Uuid,
    /// When the listing was published. Set once, immutable.
    pub published_at: DateTime<Utc>,
    /// Whether the listing is visible and eligible for matching.
    pub active: bool,
    /// Whether the item is reserved for a recipient.
    pub reserved: bool,
    /// Whether the item has been given away.
    pub given: bool,
}

impl Listing {
    /// Whether this listing can appear in search and match results.
    pub fn is_matchable(&self) -> bool {
        self.active
    }
}
