//! Listing domain entities.

pub mod condition;
pub mod delivery;
pub mod model;

pub use condition::Condition;
pub use delivery::DeliveryMode;
pub use model::Listing;
