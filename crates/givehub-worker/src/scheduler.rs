//! Fixed-interval driver for the matching cycle.

use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tokio::time::{self, MissedTickBehavior};
use tracing::{error, info};

use givehub_core::config::WorkerConfig;

use crate::cycle::MatchCycle;

/// Runs the matching cycle on a fixed interval until shutdown.
///
/// Firings never overlap: each tick awaits the cycle to completion
/// before the next one can fire, and ticks that come due while a cycle
/// is still running are skipped rather than queued.
#[derive(Debug)]
pub struct MatchScheduler {
    cycle: MatchCycle,
    config: WorkerConfig,
}

impl MatchScheduler {
    /// Create a new scheduler.
    pub fn new(cycle: MatchCycle, config: WorkerConfig) -> Self {
        Self { cycle, config }
    }

    /// Run until the shutdown signal flips to `true`. The first cycle
    /// fires one full interval after startup.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let period = Duration::from_secs(self.config.match_interval_minutes * 60);
        let mut interval = time::interval(period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // the first tick of tokio's interval completes immediately
        interval.tick().await;

        info!(
            interval_minutes = self.config.match_interval_minutes,
            "match scheduler started"
        );

        loop {
            tokio::select! {
                changed = shutdown.changed() => {
                    // a dropped sender counts as shutdown
                    if changed.is_err() || *shutdown.borrow() {
                        info!("match scheduler received shutdown signal");
                        break;
                    }
                }
                _ = interval.tick() => {
                    if let Err(err) = self.cycle.run(Utc::now()).await {
                        error!(error = %err, "matching cycle failed");
                    }
                }
            }
        }

        info!("match scheduler stopped");
    }
}
