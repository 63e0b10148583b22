//! Which restaurant a commit gesture lands on.

use crate::catalog::{Catalog, Restaurant, RestaurantId};
use crate::navigation::Navigator;
use crate::suggest::{Suggestions, best_match};

/// Restaurant that became current as the result of an event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommittedSelection {
    pub id: RestaurantId,
    pub name: String,
}

impl From<&Restaurant> for CommittedSelection {
    fn from(restaurant: &Restaurant) -> Self {
        Self {
            id: restaurant.id.clone(),
            name: restaurant.name.clone(),
        }
    }
}

/// The highlighted candidate if there is one, otherwise the first catalog
/// restaurant whose name contains `query`.
pub fn commit_target<'a>(
    suggestions: &'a Suggestions,
    navigator: &Navigator,
    query: &str,
    catalog: &'a Catalog,
) -> Option<&'a RestaurantId> {
    navigator
        .current(suggestions)
        .or_else(|| best_match(query, catalog).map(|restaurant| &restaurant.id))
}
