//! Search criteria — a plain struct of optional filter fields.

use serde::{Deserialize, Serialize};

use givehub_entity::listing::{Condition, DeliveryMode};
use givehub_entity::saved_search::SavedSearch;

/// A combination of optional listing filters.
///
/// Any unset field contributes no constraint; a criteria with every
/// field unset matches every active listing (the "browse all" case).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchCriteria {
    /// Free-text query matched against title or description.
    pub query: Option<String>,
    /// Substring matched against the geographic zone.
    pub zone: Option<String>,
    /// Exact condition filter.
    pub condition: Option<Condition>,
    /// Exact delivery mode filter.
    pub delivery_mode: Option<DeliveryMode>,
    /// Keyword filter: a listing matches when it carries at least one
    /// of these keywords (normalized comparison).
    pub keywords: Vec<String>,
}

impl SearchCriteria {
    /// Build criteria from a saved search, splitting its stored
    /// comma-joined keyword string into a normalized list. Blank text
    /// fields are treated as unset.
    pub fn from_saved_search(search: &SavedSearch) -> Self {
        Self {
            query: non_blank(search.query.as_deref()),
            zone: non_blank(search.zone.as_deref()),
            condition: search.condition,
            delivery_mode: search.delivery_mode,
            keywords: search.keyword_list(),
        }
    }

    /// Whether no field constrains the result.
    pub fn is_unconstrained(&self) -> bool {
        self.query.is_none()
            && self.zone.is_none()
            && self.condition.is_none()
            && self.delivery_mode.is_none()
            && self.keywords.is_empty()
    }

    /// Normalize a raw keyword list: trim, lowercase, drop empties,
    /// dedupe while preserving order.
    pub fn normalize_keywords<I, S>(raw: I) -> Vec<String>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = std::collections::HashSet::new();
        raw.into_iter()
            .map(|k| k.as_ref().trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .filter(|k| seen.insert(k.clone()))
            .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(String::from)
}
