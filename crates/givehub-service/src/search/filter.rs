//! Predicate composition over search criteria.
//!
//! Every present criteria field becomes one boolean clause; the composed
//! predicate is the AND of all clauses. Evaluation is a single pass per
//! listing, so a listing can never appear twice in a filtered result
//! even when several of its keywords overlap the keyword filter.

use std::collections::HashSet;

use givehub_entity::listing::Listing;

use super::criteria::SearchCriteria;

/// A composed boolean predicate over listings.
pub struct Predicate {
    clauses: Vec<Box<dyn Fn(&Listing) -> bool + Send + Sync>>,
}

impl Predicate {
    /// Whether the listing satisfies every clause. An empty clause list
    /// is the universal predicate.
    pub fn matches(&self, listing: &Listing) -> bool {
        self.clauses.iter().all(|clause| clause(listing))
    }

    /// Filter a listing collection, preserving input order.
    pub fn filter(&self, listings: Vec<Listing>) -> Vec<Listing> {
        listings.into_iter().filter(|l| self.matches(l)).collect()
    }
}

impl std::fmt::Debug for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Predicate")
            .field("clauses", &self.clauses.len())
            .finish()
    }
}

/// Compose a criteria struct into a predicate.
pub fn compose(criteria: &SearchCriteria) -> Predicate {
    let mut clauses: Vec<Box<dyn Fn(&Listing) -> bool + Send + Sync>> = Vec::new();

    if let Some(query) = &criteria.query {
        let needle = query.to_lowercase();
        clauses.push(Box::new(move |l| {
            l.title.to_lowercase().contains(&needle)
                || l.description.to_lowercase().contains(&needle)
        }));
    }

    if let Some(zone) = &criteria.zone {
        let needle = zone.to_lowercase();
        clauses.push(Box::new(move |l| l.zone.to_lowercase().contains(&needle)));
    }

    if let Some(condition) = criteria.condition {
        clauses.push(Box::new(move |l| l.condition == condition));
    }

    if let Some(delivery_mode) = criteria.delivery_mode {
        clauses.push(Box::new(move |l| l.delivery_mode == delivery_mode));
    }

    if !criteria.keywords.is_empty() {
        let wanted: HashSet<String> =
            SearchCriteria::normalize_keywords(&criteria.keywords).into_iter().collect();
        clauses.push(Box::new(move |l| {
            l.keywords
                .iter()
                .any(|k| wanted.contains(&k.trim().to_lowercase()))
        }));
    }

    Predicate { clauses }
}
