//! Item condition enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical condition of the item offered in a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "listing_condition", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    /// Never used.
    New,
    /// Lightly used, no visible wear.
    VeryGood,
    /// Used with normal wear.
    Good,
    /// Functional but worn.
    Acceptable,
    /// Broken or incomplete, useful for spare parts.
    ForParts,
}

impl Condition {
    /// Return the condition as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::VeryGood => "very_good",
            Self::Good => "good",
            Self::Acceptable => "acceptable",
            Self::ForParts => "for_parts",
        }
    }

    /// Human-readable label for display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::New => "New",
            Self::VeryGood => "Very good",
            Self::Good => "Good",
            Self::Acceptable => "Acceptable",
            Self::ForParts => "For parts",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Condition {
    type Err = givehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "new" => Ok(Self::New),
            "very_good" => Ok(Self::VeryGood),
            "good" => Ok(Self::Good),
            "acceptable" => Ok(Self::Acceptable),
            "for_parts" => Ok(Self::ForParts),
            _ => Err(givehub_core::AppError::validation(format!(
                "Invalid condition: '{s}'. Expected one of: new, very_good, good, acceptable, for_parts"
            ))),
        }
    }
}
