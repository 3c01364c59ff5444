//! Match engine — evaluates a saved search against newly published
//! listings.

use std::sync::Arc;

use chrono::{DateTime, Utc};

use givehub_core::result::AppResult;
use givehub_entity::listing::Listing;
use givehub_entity::saved_search::SavedSearch;

use crate::stores::ListingStore;

use super::criteria::SearchCriteria;
use super::filter;

/// Finds listings published since a saved search's watermark that
/// satisfy its filter.
///
/// Matching is re-derived fresh on every call from current listing
/// state: a listing deactivated between publication and the next cycle
/// simply does not match. `now` is always an explicit parameter, never
/// an ambient clock.
#[derive(Clone)]
pub struct MatchEngine {
    listings: Arc<dyn ListingStore>,
}

impl std::fmt::Debug for MatchEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MatchEngine").finish()
    }
}

impl MatchEngine {
    /// Create a new match engine.
    pub fn new(listings: Arc<dyn ListingStore>) -> Self {
        Self { listings }
    }

    /// Active listings published after the search's watermark (its
    /// creation time when no cycle has notified yet) and no later than
    /// `now`, matching the search's filter. No ordering guarantee.
    ///
    /// The `published_at <= now` bound keeps a listing that lands
    /// between this query and the watermark advance reachable on the
    /// next cycle instead of being skipped forever.
    pub async fn find_new_matches(
        &self,
        search: &SavedSearch,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<Listing>> {
        let since = search.match_since();
        let criteria = SearchCriteria::from_saved_search(search);
        let predicate = filter::compose(&criteria);

        let candidates = self.listings.find_active_published_after(since).await?;

        Ok(candidates
            .into_iter()
            .filter(|l| l.active && l.published_at > since && l.published_at <= now)
            .filter(|l| predicate.matches(l))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use async_trait::async_trait;
    use chrono::Duration;
    use tokio::sync::Mutex;
    use uuid::Uuid;

    use givehub_entity::listing::{Condition, DeliveryMode};

    use super::*;

    struct FakeListingStore {
        listings: Mutex<Vec<Listing>>,
    }

    #[async_trait]
    impl ListingStore for FakeListingStore {
        async fn find_active(&self) -> AppResult<Vec<Listing>> {
            Ok(self
                .listings
                .lock()
                .await
                .iter()
                .filter(|l| l.active)
                .cloned()
                .collect())
        }

        async fn find_active_published_after(
            &self,
            since: DateTime<Utc>,
        ) -> AppResult<Vec<Listing>> {
            Ok(self
                .listings
                .lock()
                .await
                .iter()
                .filter(|l| l.active && l.published_at > since)
                .cloned()
                .collect())
        }

        async fn find_by_id(&self, listing_id: Uuid) -> AppResult<Option<Listing>> {
            Ok(self
                .listings
                .lock()
                .await
                .iter()
                .find(|l| l.id == listing_id)
                .cloned())
        }
    }

    fn listing(zone: &str, published_at: DateTime<Utc>, active: bool) -> Listing {
        Listing {
            id: Uuid::new_v4(),
            title: "Bookshelf".to_string(),
            description: "three shelves, solid pine".to_string(),
            condition: Condition::Good,
            delivery_mode: DeliveryMode::InPerson,
            zone: zone.to_string(),
            keywords: vec!["bookshelf".to_string()],
            owner_id: Uuid::new_v4(),
            published_at,
            active,
            reserved: false,
            given: false,
        }
    }

    fn search_with_zone(zone: &str, created_at: DateTime<Utc>) -> SavedSearch {
        SavedSearch {
            id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            name: "zone watch".to_string(),
            query: None,
            zone: Some(zone.to_string()),
            condition: None,
            delivery_mode: None,
            keywords: None,
            notifications_enabled: true,
            last_notification_at: None,
            created_at,
            updated_at: created_at,
        }
    }

    #[tokio::test]
    async fn test_matches_only_after_watermark() {
        let t0 = Utc::now();
        let store = Arc::new(FakeListingStore {
            listings: Mutex::new(vec![
                listing("Paris 15e", t0 - Duration::minutes(10), true),
                listing("Paris 11e", t0 + Duration::minutes(1), true),
            ]),
        });
        let engine = MatchEngine::new(store);

        let search = search_with_zone("Paris", t0);
        let matches = engine
            .find_new_matches(&search, t0 + Duration::minutes(5))
            .await
            .unwrap();

        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].zone, "Paris 11e");
    }

    #[tokio::test]
    async fn test_inactive_listings_never_match() {
        let t0 = Utc::now();
        let store = Arc::new(FakeListingStore {
            listings: Mutex::new(vec![listing("Paris", t0 + Duration::minutes(1), false)]),
        });
        let engine = MatchEngine::new(store);

        let search = search_with_zone("Paris", t0);
        let matches = engine
            .find_new_matches(&search, t0 + Duration::minutes(5))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_listings_published_after_now_wait_for_next_cycle() {
        let t0 = Utc::now();
        let store = Arc::new(FakeListingStore {
            listings: Mutex::new(vec![listing("Paris", t0 + Duration::minutes(10), true)]),
        });
        let engine = MatchEngine::new(store);

        let search = search_with_zone("Paris", t0);
        let matches = engine
            .find_new_matches(&search, t0 + Duration::minutes(5))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }

    #[tokio::test]
    async fn test_watermark_takes_precedence_over_creation_time() {
        let t0 = Utc::now();
        let store = Arc::new(FakeListingStore {
            listings: Mutex::new(vec![listing("Paris", t0 + Duration::minutes(1), true)]),
        });
        let engine = MatchEngine::new(store);

        let mut search = search_with_zone("Paris", t0);
        search.last_notification_at = Some(t0 + Duration::minutes(2));

        let matches = engine
            .find_new_matches(&search, t0 + Duration::minutes(5))
            .await
            .unwrap();
        assert!(matches.is_empty());
    }
}
