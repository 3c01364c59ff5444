//! Notification kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of a notification, determining its title and which entity
/// references it carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A newly published listing matched a saved search.
    NewListingMatch,
    /// A message was received.
    NewMessage,
    /// A listing the user is involved with was reserved.
    ListingReserved,
    /// A listing the user is involved with was given away.
    ListingGiven,
}

impl NotificationKind {
    /// Return the kind as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::NewListingMatch => "new_listing_match",
            Self::NewMessage => "new_message",
            Self::ListingReserved => "listing_reserved",
            Self::ListingGiven => "listing_given",
        }
    }

    /// Default notification title for this kind.
    pub fn title(&self) -> &'static str {
        match self {
            Self::NewListingMatch => "New matching listing",
            Self::NewMessage => "New message",
            Self::ListingReserved => "Listing reserved",
            Self::ListingGiven => "Item given away",
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
