//! # menufind-core
//!
//! Incremental restaurant search and menu filtering, with no terminal or
//! rendering dependencies.
//!
//! Input flows one way through the engine:
//!
//! ```text
//! text input ─▶ suggest ─▶ navigation ─▶ selection ─▶ filter ─▶ panels ─▶ view
//!                  ▲                                                  │
//!                  └────────────── Event (key, click, focus) ◀────────┘
//! ```
//!
//! [`Session`] owns every piece of mutable state and applies one [`Event`] at a
//! time, so selection, filter reset, and panel reset are never observed half
//! done. The [`Catalog`] is loaded once and shared read-only.
//!
//! ## Example
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use menufind_core::{Catalog, Event, Session};
//!
//! let catalog = Catalog::from_dir("data").expect("catalog");
//! let session = Session::new(Arc::new(catalog))
//!     .with(Event::RestaurantQueryChanged("kitchen".into()))
//!     .with(Event::Commit)
//!     .with(Event::IngredientQueryChanged("basil".into()));
//!
//! for row in session.displayed_items() {
//!     println!("{}", row.item.name);
//! }
//! ```

mod catalog;
mod error;
mod filter;
mod navigation;
mod panels;
mod selection;
mod session;
mod suggest;

pub use catalog::{
    Catalog, CatalogSource, DirSource, ItemKey, MenuItem, Price, Restaurant, RestaurantId,
};
pub use error::{LoadError, StaleReference};
pub use filter::{MenuEntry, MenuQuery, MenuView, filter_menu};
pub use navigation::Navigator;
pub use panels::{Panel, PanelState, PanelView};
pub use selection::{CommittedSelection, commit_target};
pub use session::{DisplayedItem, Event, Session};
pub use suggest::{Suggestions, best_match, suggest_focus, suggest_typing};

/// File name of the catalog manifest inside a data directory.
pub const MANIFEST_FILE: &str = "index.json";
