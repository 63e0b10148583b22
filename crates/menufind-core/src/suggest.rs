//! Restaurant suggestions from partial input.
//!
//! Matching is a case-insensitive substring test of the trimmed query against
//! display names. Results keep catalog order; there is no scoring.
//!
//! Typing and focusing are separate entry points because they disagree on
//! empty input: typing an empty query hides the list, focusing the field with
//! an empty query lists every restaurant.

use crate::catalog::{Catalog, Restaurant, RestaurantId};

/// Candidate list for the current restaurant query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Suggestions {
    /// Nothing searched yet, or the list was dismissed.
    #[default]
    Idle,
    /// A query was evaluated and nothing matched.
    NoResults,
    /// Matching restaurants in catalog order. Never empty.
    Matches(Vec<RestaurantId>),
}

impl Suggestions {
    fn from_matches(ids: Vec<RestaurantId>) -> Self {
        if ids.is_empty() {
            Suggestions::NoResults
        } else {
            Suggestions::Matches(ids)
        }
    }

    pub fn ids(&self) -> &[RestaurantId] {
        match self {
            Suggestions::Matches(ids) => ids,
            Suggestions::Idle | Suggestions::NoResults => &[],
        }
    }

    pub fn get(&self, index: usize) -> Option<&RestaurantId> {
        self.ids().get(index)
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids().is_empty()
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, Suggestions::Idle)
    }
}

/// Trim and lowercase a query so it can be compared against lowercased text.
pub(crate) fn normalize(query: &str) -> String {
    query.trim().to_lowercase()
}

pub(crate) fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

fn matching<'a>(catalog: &'a Catalog, needle: &'a str) -> impl Iterator<Item = &'a Restaurant> {
    catalog
        .all()
        .iter()
        .filter(move |restaurant| contains_folded(&restaurant.name, needle))
}

/// Suggestions while the user types. Empty input yields [`Suggestions::Idle`].
#[tracing::instrument(skip(catalog))]
pub fn suggest_typing(query: &str, catalog: &Catalog) -> Suggestions {
    let needle = normalize(query);
    if needle.is_empty() {
        return Suggestions::Idle;
    }
    Suggestions::from_matches(matching(catalog, &needle).map(|r| r.id.clone()).collect())
}

/// Suggestions when the search field gains focus. Empty input lists the
/// whole catalog.
#[tracing::instrument(skip(catalog))]
pub fn suggest_focus(query: &str, catalog: &Catalog) -> Suggestions {
    let needle = normalize(query);
    Suggestions::from_matches(matching(catalog, &needle).map(|r| r.id.clone()).collect())
}

/// First restaurant, in catalog order, whose name contains `query`.
/// Blank queries match nothing.
pub fn best_match<'a>(query: &str, catalog: &'a Catalog) -> Option<&'a Restaurant> {
    let needle = normalize(query);
    if needle.is_empty() {
        return None;
    }
    catalog
        .all()
        .iter()
        .find(|restaurant| contains_folded(&restaurant.name, &needle))
}
