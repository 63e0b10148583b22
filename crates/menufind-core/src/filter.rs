//! Menu filtering by item name/category and by ingredient.

use crate::catalog::{ItemKey, MenuItem, Restaurant};
use crate::suggest::{contains_folded, normalize};

/// Both menu filters, normalised once per evaluation.
///
/// An item passes when every non-blank axis matches:
/// - name axis: the item name or its category contains the query
/// - ingredient axis: at least one ingredient contains the query
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuQuery {
    name: String,
    ingredient: String,
}

impl MenuQuery {
    pub fn new(name: &str, ingredient: &str) -> Self {
        Self {
            name: normalize(name),
            ingredient: normalize(ingredient),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.ingredient.is_empty()
    }

    pub fn matches(&self, item: &MenuItem) -> bool {
        self.matches_name(item) && self.matches_ingredient(item)
    }

    fn matches_name(&self, item: &MenuItem) -> bool {
        self.name.is_empty()
            || contains_folded(&item.name, &self.name)
            || item
                .category
                .as_deref()
                .is_some_and(|category| contains_folded(category, &self.name))
    }

    // An item with no ingredients never satisfies a non-blank query.
    fn matches_ingredient(&self, item: &MenuItem) -> bool {
        self.ingredient.is_empty()
            || item
                .ingredients
                .iter()
                .any(|ingredient| contains_folded(ingredient, &self.ingredient))
    }
}

/// A displayed menu row: the item and the key it is tracked under.
#[derive(Debug, Clone, PartialEq)]
pub struct MenuEntry<'a> {
    pub key: ItemKey,
    pub item: &'a MenuItem,
}

/// Items of `restaurant` that pass both filters, in menu order.
#[tracing::instrument(skip(restaurant), fields(restaurant_id = %restaurant.id))]
pub fn filter_menu<'a>(
    restaurant: &'a Restaurant,
    name_query: &str,
    ingredient_query: &str,
) -> Vec<MenuEntry<'a>> {
    let query = MenuQuery::new(name_query, ingredient_query);
    let unfiltered = query.is_empty();
    restaurant
        .menu
        .iter()
        .enumerate()
        .filter(|(_, item)| unfiltered || query.matches(item))
        .map(|(ordinal, item)| MenuEntry {
            key: restaurant.key(ordinal),
            item,
        })
        .collect()
}

/// What the menu area shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MenuView {
    /// No restaurant is selected.
    #[default]
    NoRestaurant,
    /// A restaurant is selected but the filters exclude every item.
    NoMatchingItems,
    /// Keys of the visible items, in menu order. Never empty.
    Items(Vec<ItemKey>),
}

impl MenuView {
    pub fn compute(
        restaurant: Option<&Restaurant>,
        name_query: &str,
        ingredient_query: &str,
    ) -> Self {
        let Some(restaurant) = restaurant else {
            return MenuView::NoRestaurant;
        };
        let keys: Vec<ItemKey> = filter_menu(restaurant, name_query, ingredient_query)
            .into_iter()
            .map(|entry| entry.key)
            .collect();
        if keys.is_empty() {
            MenuView::NoMatchingItems
        } else {
            MenuView::Items(keys)
        }
    }

    pub fn keys(&self) -> &[ItemKey] {
        match self {
            MenuView::Items(keys) => keys,
            MenuView::NoRestaurant | MenuView::NoMatchingItems => &[],
        }
    }
}
