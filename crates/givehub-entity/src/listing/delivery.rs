//! Delivery mode enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the item can be handed over to the recipient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "delivery_mode", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryMode {
    /// Hand-over in person only.
    InPerson,
    /// Shipping only.
    Shipping,
    /// In person or shipped, whichever suits.
    Either,
}

impl DeliveryMode {
    /// Return the delivery mode as a lowercase string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::InPerson => "in_person",
            Self::Shipping => "shipping",
            Self::Either => "either",
        }
    }
}

impl fmt::Display for DeliveryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for DeliveryMode {
    type Err = givehub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "in_person" => Ok(Self::InPerson),
            "shipping" => Ok(Self::Shipping),
            "either" => Ok(Self::Either),
            _ => Err(givehub_core::AppError::validation(format!(
                "Invalid delivery mode: '{s}'. Expected one of: in_person, shipping, either"
            ))),
        }
    }
}
