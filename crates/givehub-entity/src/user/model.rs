//! User entity model.
//!
//! Identity management is owned by an external collaborator; this is the
//! minimal record the rest of the domain references (message partners,
//! notification senders, listing owners).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A registered user in the GiveHub system.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    /// Unique user identifier.
    pub id: Uuid,
    /// Unique login name.
    pub username: String,
    /// Email address (optional).
    pub email: Option<String>,
    /// When the user was created.
    pub created_at: DateTime<Utc>,
}
