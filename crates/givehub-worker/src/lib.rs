//! # givehub-worker
//!
//! Background processing for GiveHub: the periodic matching cycle that
//! evaluates saved searches against newly published listings, and the
//! scheduler that drives it.

pub mod cycle;
pub mod scheduler;

pub use cycle::{CycleOutcome, MatchCycle};
pub use scheduler::MatchScheduler;
