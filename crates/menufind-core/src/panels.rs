//! Expanded/collapsed ingredient panels, keyed by item identity.
//!
//! Every filter keystroke recomputes the displayed list, so panel state
//! cannot live on the rendered rows. It is stored per [`ItemKey`] and
//! reconciled against whatever is displayed next. Entries for items that are
//! currently filtered out are kept, so an item that disappears and comes back
//! still has its panel the way the user left it.

use std::collections::HashMap;

use log::warn;

use crate::catalog::{ItemKey, RestaurantId};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Panel {
    #[default]
    Collapsed,
    Expanded,
}

impl Panel {
    pub fn toggled(self) -> Self {
        match self {
            Panel::Collapsed => Panel::Expanded,
            Panel::Expanded => Panel::Collapsed,
        }
    }

    pub fn is_expanded(self) -> bool {
        self == Panel::Expanded
    }
}

/// Panel of one displayed item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelView {
    pub key: ItemKey,
    pub panel: Panel,
}

/// Panel state for a single restaurant. Keys belonging to any other
/// restaurant are ignored, so panels never leak across selections.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PanelState {
    restaurant: Option<RestaurantId>,
    panels: HashMap<ItemKey, Panel>,
}

impl PanelState {
    /// Fresh state with every panel collapsed.
    pub fn for_restaurant(restaurant: RestaurantId) -> Self {
        Self {
            restaurant: Some(restaurant),
            panels: HashMap::new(),
        }
    }

    pub fn restaurant(&self) -> Option<&RestaurantId> {
        self.restaurant.as_ref()
    }

    fn owns(&self, key: &ItemKey) -> bool {
        self.restaurant.as_ref() == Some(&key.restaurant)
    }

    pub fn panel(&self, key: &ItemKey) -> Panel {
        if !self.owns(key) {
            return Panel::Collapsed;
        }
        self.panels.get(key).copied().unwrap_or_default()
    }

    pub fn is_expanded(&self, key: &ItemKey) -> bool {
        self.panel(key).is_expanded()
    }

    /// Flip one panel. Returns the new state, or `None` for a foreign key.
    pub fn toggle(&mut self, key: &ItemKey) -> Option<Panel> {
        if !self.owns(key) {
            warn!(
                "Ignoring panel toggle for {}#{} while showing {:?}",
                key.restaurant, key.ordinal, self.restaurant
            );
            return None;
        }
        let panel = self.panels.entry(key.clone()).or_default();
        *panel = panel.toggled();
        Some(*panel)
    }

    /// Force every displayed panel open.
    pub fn expand_all(&mut self, displayed: &[ItemKey]) {
        self.set_all(displayed, Panel::Expanded);
    }

    /// Force every displayed panel closed.
    pub fn collapse_all(&mut self, displayed: &[ItemKey]) {
        self.set_all(displayed, Panel::Collapsed);
    }

    fn set_all(&mut self, displayed: &[ItemKey], panel: Panel) {
        for key in displayed {
            if self.owns(key) {
                self.panels.insert(key.clone(), panel);
            }
        }
    }

    /// Panel for each displayed item: the stored state when there is one,
    /// collapsed otherwise.
    pub fn reconcile(&self, displayed: &[ItemKey]) -> Vec<PanelView> {
        displayed
            .iter()
            .map(|key| PanelView {
                key: key.clone(),
                panel: self.panel(key),
            })
            .collect()
    }
}
