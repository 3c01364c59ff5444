//! Foreground listing search.

use std::sync::Arc;

use givehub_core::result::AppResult;
use givehub_core::types::pagination::{PageRequest, PageResponse};
use givehub_entity::listing::Listing;

use crate::stores::ListingStore;

use super::criteria::SearchCriteria;
use super::filter;

/// Browse/search over active listings using the same composed predicate
/// the matching pipeline uses.
#[derive(Clone)]
pub struct SearchService {
    listings: Arc<dyn ListingStore>,
}

impl std::fmt::Debug for SearchService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchService").finish()
    }
}

impl SearchService {
    /// Create a new search service.
    pub fn new(listings: Arc<dyn ListingStore>) -> Self {
        Self { listings }
    }

    /// Active listings satisfying the criteria, newest first, paginated.
    /// An all-unset criteria returns every active listing.
    pub async fn search(
        &self,
        criteria: &SearchCriteria,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Listing>> {
        let predicate = filter::compose(criteria);
        let mut matched = predicate.filter(self.listings.find_active().await?);
        matched.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        let total = matched.len() as u64;
        let items = matched
            .into_iter()
            .skip(page.offset() as usize)
            .take(page.limit() as usize)
            .collect();

        Ok(PageResponse::new(items, page.page, page.page_size, total))
    }
}
