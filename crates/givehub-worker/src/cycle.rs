//! One pass of the saved-search matching cycle.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use givehub_core::result::AppResult;
use givehub_entity::saved_search::SavedSearch;
use givehub_service::{MatchEngine, NotificationDispatcher, SavedSearchStore};

/// Counters from one cycle run, for logging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleOutcome {
    /// Enabled saved searches evaluated.
    pub searches_examined: u64,
    /// Searches with at least one new match.
    pub searches_matched: u64,
    /// Match notifications persisted.
    pub notifications_created: u64,
    /// Searches that errored and were skipped.
    pub failures: u64,
}

/// Evaluates every notification-enabled saved search against listings
/// published since its watermark, notifies the owners, then advances
/// the watermarks.
///
/// A search with no new matches keeps its watermark untouched. One
/// failing search never prevents the rest of the batch from being
/// processed.
#[derive(Clone)]
pub struct MatchCycle {
    searches: Arc<dyn SavedSearchStore>,
    engine: MatchEngine,
    dispatcher: NotificationDispatcher,
}

impl std::fmt::Debug for MatchCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchCycle").finish()
    }
}

impl MatchCycle {
    /// Create a new matching cycle.
    pub fn new(
        searches: Arc<dyn SavedSearchStore>,
        engine: MatchEngine,
        dispatcher: NotificationDispatcher,
    ) -> Self {
        Self {
            searches,
            engine,
            dispatcher,
        }
    }

    /// Run one cycle at instant `now`.
    ///
    /// Only loading the saved-search batch can fail the whole run;
    /// per-search errors are logged, counted, and skipped.
    pub async fn run(&self, now: DateTime<Utc>) -> AppResult<CycleOutcome> {
        let searches = self.searches.find_enabled().await?;
        let mut outcome = CycleOutcome::default();

        for search in &searches {
            outcome.searches_examined += 1;
            match self.process_search(search, now).await {
                Ok(0) => {}
                Ok(notified) => {
                    outcome.searches_matched += 1;
                    outcome.notifications_created += notified;
                }
                Err(err) => {
                    outcome.failures += 1;
                    warn!(
                        search_id = %search.id,
                        user_id = %search.user_id,
                        error = %err,
                        "matching failed for saved search, skipping"
                    );
                }
            }
        }

        info!(
            searches_examined = outcome.searches_examined,
            searches_matched = outcome.searches_matched,
            notifications_created = outcome.notifications_created,
            failures = outcome.failures,
            "matching cycle complete"
        );
        Ok(outcome)
    }

    /// Notify the owner of every new match, then advance the watermark
    /// to `now`. Returns the number of notifications persisted.
    ///
    /// Notifications are persisted before the watermark moves: a crash
    /// in between re-notifies on the next cycle rather than silently
    /// dropping matches.
    async fn process_search(&self, search: &SavedSearch, now: DateTime<Utc>) -> AppResult<u64> {
        let matches = self.engine.find_new_matches(search, now).await?;
        if matches.is_empty() {
            debug!(search_id = %search.id, "no new matches");
            return Ok(0);
        }

        let mut notified = 0;
        for listing in &matches {
            self.dispatcher
                .notify_new_match(search.user_id, listing, search, now)
                .await?;
            notified += 1;
        }

        self.searches.advance_watermark(search.id, now).await?;
        debug!(
            search_id = %search.id,
            matches = notified,
            "notified saved-search owner"
        );
        Ok(notified)
    }
}
