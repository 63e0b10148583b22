//! Event-driven session state.
//!
//! A [`Session`] owns the query text, candidate list, keyboard highlight,
//! current restaurant, visible menu, and panel state. Each [`Event`] is
//! applied as one `&mut self` transition, so dependent pieces of state (for
//! example selection, ingredient filter, and panels) always change together.

use std::sync::Arc;

use log::{debug, warn};

use crate::catalog::{Catalog, ItemKey, MenuItem, Restaurant, RestaurantId};
use crate::filter::MenuView;
use crate::navigation::Navigator;
use crate::panels::{Panel, PanelState};
use crate::selection::{CommittedSelection, commit_target};
use crate::suggest::{Suggestions, suggest_focus, suggest_typing};

/// User input reported by the view layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// The restaurant search text changed.
    RestaurantQueryChanged(String),
    /// The restaurant search field gained focus.
    RestaurantFieldFocused,
    /// The item name/category filter changed.
    NameQueryChanged(String),
    /// The ingredient filter changed.
    IngredientQueryChanged(String),
    NavigateNext,
    NavigatePrevious,
    /// Select the highlighted candidate, or the best match for the query.
    Commit,
    /// Pointer choice of the candidate at this position.
    Choose(usize),
    TogglePanel(ItemKey),
    ExpandAll,
    CollapseAll,
}

/// One visible menu row together with its panel state.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayedItem<'a> {
    pub key: ItemKey,
    pub item: &'a MenuItem,
    pub panel: Panel,
}

#[derive(Debug, Clone)]
pub struct Session {
    catalog: Arc<Catalog>,
    restaurant_query: String,
    name_query: String,
    ingredient_query: String,
    suggestions: Suggestions,
    navigator: Navigator,
    current: Option<RestaurantId>,
    menu: MenuView,
    panels: PanelState,
}

impl Session {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            restaurant_query: String::new(),
            name_query: String::new(),
            ingredient_query: String::new(),
            suggestions: Suggestions::Idle,
            navigator: Navigator::default(),
            current: None,
            menu: MenuView::NoRestaurant,
            panels: PanelState::default(),
        }
    }

    /// Apply one event. Returns the selection if the event committed one.
    pub fn handle(&mut self, event: Event) -> Option<CommittedSelection> {
        debug!("Session event: {event:?}");
        match event {
            Event::RestaurantQueryChanged(text) => self.set_restaurant_query(text),
            Event::RestaurantFieldFocused => self.focus_restaurant_field(),
            Event::NameQueryChanged(text) => {
                self.name_query = text;
                self.refresh_menu();
            }
            Event::IngredientQueryChanged(text) => {
                self.ingredient_query = text;
                self.refresh_menu();
            }
            Event::NavigateNext => self.navigator.move_next(),
            Event::NavigatePrevious => self.navigator.move_previous(),
            Event::Commit => return self.commit(),
            Event::Choose(index) => return self.choose(index),
            Event::TogglePanel(key) => {
                self.panels.toggle(&key);
            }
            Event::ExpandAll => self.panels.expand_all(self.menu.keys()),
            Event::CollapseAll => self.panels.collapse_all(self.menu.keys()),
        }
        None
    }

    /// Consuming form of [`Session::handle`], for `(state, event) -> state`
    /// chains.
    pub fn with(mut self, event: Event) -> Self {
        self.handle(event);
        self
    }

    fn set_restaurant_query(&mut self, text: String) {
        self.restaurant_query = text;
        let suggestions = suggest_typing(&self.restaurant_query, &self.catalog);
        if suggestions.is_idle() {
            // Nothing searched: the menu area goes blank along with the list.
            self.clear_selection();
        }
        self.set_suggestions(suggestions);
    }

    fn focus_restaurant_field(&mut self) {
        let suggestions = suggest_focus(&self.restaurant_query, &self.catalog);
        self.set_suggestions(suggestions);
    }

    // Every candidate list change goes through here so the highlight is reset.
    fn set_suggestions(&mut self, suggestions: Suggestions) {
        self.navigator.reset(suggestions.len());
        self.suggestions = suggestions;
    }

    fn commit(&mut self) -> Option<CommittedSelection> {
        let target = commit_target(
            &self.suggestions,
            &self.navigator,
            &self.restaurant_query,
            &self.catalog,
        )?
        .clone();
        self.select(&target)
    }

    fn choose(&mut self, index: usize) -> Option<CommittedSelection> {
        let target = self.suggestions.get(index)?.clone();
        self.select(&target)
    }

    /// Make `id` the current restaurant.
    ///
    /// Clears the candidate list and the ingredient filter, echoes the name
    /// into the search text, keeps the name filter, and starts the
    /// restaurant's panels collapsed.
    pub fn select(&mut self, id: &RestaurantId) -> Option<CommittedSelection> {
        let selection = match self.catalog.get(id) {
            Ok(restaurant) => CommittedSelection::from(restaurant),
            Err(err) => {
                warn!("Ignoring selection: {err}");
                return None;
            }
        };

        self.current = Some(selection.id.clone());
        self.restaurant_query = selection.name.clone();
        self.ingredient_query.clear();
        self.set_suggestions(Suggestions::Idle);
        self.panels = PanelState::for_restaurant(selection.id.clone());
        self.refresh_menu();

        debug!("Selected restaurant {}", selection.id);
        Some(selection)
    }

    fn clear_selection(&mut self) {
        self.current = None;
        self.panels = PanelState::default();
        self.menu = MenuView::NoRestaurant;
    }

    fn refresh_menu(&mut self) {
        let restaurant = match &self.current {
            Some(id) => match self.catalog.get(id) {
                Ok(restaurant) => Some(restaurant),
                Err(err) => {
                    warn!("Dropping selection: {err}");
                    None
                }
            },
            None => None,
        };
        let stale = self.current.is_some() && restaurant.is_none();
        self.menu = MenuView::compute(restaurant, &self.name_query, &self.ingredient_query);
        if stale {
            self.clear_selection();
        }
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }

    pub fn restaurant_query(&self) -> &str {
        &self.restaurant_query
    }

    pub fn name_query(&self) -> &str {
        &self.name_query
    }

    pub fn ingredient_query(&self) -> &str {
        &self.ingredient_query
    }

    pub fn suggestions(&self) -> &Suggestions {
        &self.suggestions
    }

    /// Candidate restaurants in display order.
    pub fn candidates(&self) -> impl Iterator<Item = &Restaurant> {
        self.suggestions
            .ids()
            .iter()
            .filter_map(|id| self.catalog.by_id(id.as_str()))
    }

    pub fn navigator(&self) -> &Navigator {
        &self.navigator
    }

    /// Highlighted candidate position, `-1` for none.
    pub fn active_index(&self) -> isize {
        self.navigator.active_index()
    }

    pub fn active_candidate(&self) -> Option<&Restaurant> {
        let id = self.navigator.current(&self.suggestions)?;
        self.catalog.by_id(id.as_str())
    }

    pub fn current_restaurant(&self) -> Option<&Restaurant> {
        self.catalog.by_id(self.current.as_ref()?.as_str())
    }

    pub fn menu(&self) -> &MenuView {
        &self.menu
    }

    pub fn panels(&self) -> &PanelState {
        &self.panels
    }

    /// Visible menu rows with their reconciled panel state.
    pub fn displayed_items(&self) -> Vec<DisplayedItem<'_>> {
        let Some(restaurant) = self.current_restaurant() else {
            return Vec::new();
        };
        self.panels
            .reconcile(self.menu.keys())
            .into_iter()
            .filter_map(|view| {
                let item = restaurant.item(&view.key)?;
                Some(DisplayedItem {
                    key: view.key,
                    item,
                    panel: view.panel,
                })
            })
            .collect()
    }
}
