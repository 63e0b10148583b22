//! Restaurant catalog: data model and the one-shot loader.
//!
//! A catalog directory holds an `index.json` manifest (a JSON array of file
//! names) and one JSON file per restaurant:
//!
//! ```json
//! {
//!   "id": "liberty",
//!   "name": "Liberty Kitchen",
//!   "image": "liberty.jpg",
//!   "menu": [
//!     { "name": "Burger", "category": "Mains", "price": 14.5,
//!       "ingredients": ["Beef", "Cheddar"] }
//!   ]
//! }
//! ```

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::PathBuf;

use log::{debug, info};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::MANIFEST_FILE;
use crate::error::{LoadError, StaleReference};

/// Stable restaurant identifier from the data file.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RestaurantId(String);

impl RestaurantId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RestaurantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RestaurantId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RestaurantId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// Menu price. Data files use plain numbers for most items and free text
/// ("market price") for the rest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Price {
    Amount(Decimal),
    Label(String),
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Price::Amount(amount) => write!(f, "{:.2}", amount),
            Price::Label(label) => f.write_str(label),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default)]
    pub ingredients: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub menu: Vec<MenuItem>,
}

impl Restaurant {
    /// Look up a menu item by its stable key. Keys minted for another
    /// restaurant never resolve here.
    pub fn item(&self, key: &ItemKey) -> Option<&MenuItem> {
        if key.restaurant != self.id {
            return None;
        }
        self.menu.get(key.ordinal)
    }

    /// Stable key for the item at `ordinal` in the full, unfiltered menu.
    pub fn key(&self, ordinal: usize) -> ItemKey {
        ItemKey {
            restaurant: self.id.clone(),
            ordinal,
        }
    }
}

/// Identity of a menu item that survives filtering.
///
/// Menus are immutable after load, so the item's position in the
/// *unfiltered* menu never changes, unlike its position in a filtered list.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub restaurant: RestaurantId,
    pub ordinal: usize,
}

/// Where catalog bytes come from.
pub trait CatalogSource {
    /// Human readable manifest location, used in errors.
    fn manifest_location(&self) -> String;

    fn read_manifest(&self) -> io::Result<String>;

    /// Read one restaurant file named by the manifest.
    fn read_restaurant(&self, file: &str) -> io::Result<String>;
}

/// Catalog laid out on disk as `<root>/index.json` plus sibling data files.
#[derive(Debug, Clone)]
pub struct DirSource {
    root: PathBuf,
}

impl DirSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl CatalogSource for DirSource {
    fn manifest_location(&self) -> String {
        self.root.join(MANIFEST_FILE).display().to_string()
    }

    fn read_manifest(&self) -> io::Result<String> {
        fs::read_to_string(self.root.join(MANIFEST_FILE))
    }

    fn read_restaurant(&self, file: &str) -> io::Result<String> {
        fs::read_to_string(self.root.join(file))
    }
}

/// In-memory set of restaurants, in manifest order. Read-only after load.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    restaurants: Vec<Restaurant>,
    index: HashMap<RestaurantId, usize>,
}

impl Catalog {
    /// Load every restaurant listed in the manifest. Any unreadable or
    /// malformed file fails the whole load.
    #[tracing::instrument(name = "catalog_load", skip_all)]
    pub fn load(source: &impl CatalogSource) -> Result<Self, LoadError> {
        let path = source.manifest_location();
        let manifest = source
            .read_manifest()
            .map_err(|source| LoadError::ManifestMissing {
                path: path.clone(),
                source,
            })?;
        let files: Vec<String> = serde_json::from_str(&manifest)
            .map_err(|source| LoadError::ManifestMalformed { path, source })?;

        let mut restaurants = Vec::with_capacity(files.len());
        for file in files {
            let contents =
                source
                    .read_restaurant(&file)
                    .map_err(|source| LoadError::RestaurantMissing {
                        file: file.clone(),
                        source,
                    })?;
            let restaurant: Restaurant = serde_json::from_str(&contents)
                .map_err(|source| LoadError::RestaurantMalformed {
                    file: file.clone(),
                    source,
                })?;
            debug!(
                "Loaded {} ({} menu items) from {file}",
                restaurant.id,
                restaurant.menu.len()
            );
            restaurants.push(restaurant);
        }

        let catalog = Self::from_restaurants(restaurants)?;
        info!("Catalog ready: {} restaurants", catalog.len());
        Ok(catalog)
    }

    pub fn from_dir(root: impl Into<PathBuf>) -> Result<Self, LoadError> {
        Self::load(&DirSource::new(root))
    }

    pub fn from_restaurants(restaurants: Vec<Restaurant>) -> Result<Self, LoadError> {
        let mut index = HashMap::with_capacity(restaurants.len());
        for (position, restaurant) in restaurants.iter().enumerate() {
            if index.insert(restaurant.id.clone(), position).is_some() {
                return Err(LoadError::DuplicateId {
                    id: restaurant.id.clone(),
                });
            }
        }
        Ok(Self { restaurants, index })
    }

    /// Every restaurant in load order.
    pub fn all(&self) -> &[Restaurant] {
        &self.restaurants
    }

    pub fn by_id(&self, id: &str) -> Option<&Restaurant> {
        self.index.get(id).map(|&position| &self.restaurants[position])
    }

    /// Like [`Catalog::by_id`], but a miss is reported as a stale reference.
    pub fn get(&self, id: &RestaurantId) -> Result<&Restaurant, StaleReference> {
        self.by_id(id.as_str())
            .ok_or_else(|| StaleReference { id: id.clone() })
    }

    pub fn len(&self) -> usize {
        self.restaurants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.restaurants.is_empty()
    }

    /// Total number of menu items across all restaurants.
    pub fn item_count(&self) -> usize {
        self.restaurants.iter().map(|r| r.menu.len()).sum()
    }
}
