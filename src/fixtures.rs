//! Fixtures
//!
//! Named YAML fixture sets provide catalogs and shopping lists for the demo
//! binary and integration tests. A set `NAME` consists of
//! `fixtures/items/NAME.yml`, `fixtures/stores/NAME.yml`,
//! `fixtures/offers/NAME.yml` and `fixtures/lists/NAME.yml`.

use std::{fs, path::PathBuf};

use thiserror::Error;

use crate::{
    catalog::{Catalog, CatalogError, Offer, normalize::ItemNormalizer},
    coords::Coordinate,
    shopping_list::ShoppingList,
};

pub mod items;
pub mod lists;
pub mod offers;
pub mod stores;

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Invalid price format
    #[error("Invalid price format: {0}")]
    InvalidPrice(String),

    /// Unknown currency code
    #[error("Unknown currency code: {0}")]
    UnknownCurrency(String),

    /// Store not found
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    /// Item not found
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    /// Catalog construction error
    #[error("Failed to build catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// A fixture set loaded into planner inputs.
#[derive(Debug)]
pub struct Fixture<'a> {
    /// Base path for fixture files
    base_path: PathBuf,

    /// Catalog built from the stores, items and offers files
    catalog: Catalog<'a>,

    /// Alias table built from the items file
    normalizer: ItemNormalizer,

    /// Demand built from the shopping list file
    shopping_list: ShoppingList,
}

impl<'a> Fixture<'a> {
    /// Create a new empty fixture with default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a new empty fixture with custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            catalog: Catalog::new(),
            normalizer: ItemNormalizer::new(),
            shopping_list: ShoppingList::new(),
        }
    }

    /// Load the complete fixture set with the given name
    ///
    /// # Errors
    ///
    /// Returns a [`FixtureError`] if any of the set's files cannot be read or
    /// parsed, or if offers reference unknown stores or items.
    pub fn from_set(name: &str) -> Result<Self, FixtureError> {
        let mut fixture = Self::new();

        fixture
            .load_items(name)?
            .load_stores(name)?
            .load_offers(name)?
            .load_shopping_list(name)?;

        Ok(fixture)
    }

    /// Load canonical items (and their aliases) from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_items(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("items").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: items::ItemsFixture = serde_norway::from_str(&contents)?;

        // Stable registration order, so alias precedence does not depend on
        // map iteration order.
        let mut entries: Vec<_> = fixture.items.into_iter().collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        for (item_name, item_fixture) in entries {
            let key = self.catalog.add_item(item_name);

            self.normalizer.insert(key, item_fixture.aliases);
        }

        Ok(self)
    }

    /// Load stores from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_stores(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("stores").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: stores::StoresFixture = serde_norway::from_str(&contents)?;

        for store in fixture.stores {
            let coordinate = Coordinate::new(store.latitude, store.longitude);

            self.catalog.add_store(store.name, coordinate);
        }

        Ok(self)
    }

    /// Load offers from a YAML fixture file
    ///
    /// Offer item names are free text; each is resolved to a canonical item
    /// through the alias table before the offer is added.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, if a store or
    /// item cannot be resolved, or if a price is malformed.
    pub fn load_offers(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("offers").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: offers::OffersFixture = serde_norway::from_str(&contents)?;

        for offer in fixture.offers {
            let store = self
                .catalog
                .store_key(&offer.store)
                .ok_or_else(|| FixtureError::StoreNotFound(offer.store.clone()))?;

            let item = self
                .normalizer
                .normalize(&offer.item)
                .ok_or_else(|| FixtureError::ItemNotFound(offer.item.clone()))?;

            let price = offers::parse_price(&offer.price)?;

            self.catalog
                .add_offer(store, item, Offer::new(price, offer.inventory))?;
        }

        Ok(self)
    }

    /// Load the shopping list from a YAML fixture file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if a list
    /// entry names an item the items file does not define.
    pub fn load_shopping_list(&mut self, name: &str) -> Result<&mut Self, FixtureError> {
        let file_path = self.base_path.join("lists").join(format!("{name}.yml"));
        let contents = fs::read_to_string(&file_path)?;
        let fixture: lists::ShoppingListFixture = serde_norway::from_str(&contents)?;

        for entry in fixture.required {
            let item = self
                .catalog
                .item_key(&entry.item)
                .ok_or_else(|| FixtureError::ItemNotFound(entry.item.clone()))?;

            self.shopping_list.require(item, entry.quantity);
        }

        Ok(self)
    }

    /// The catalog built from this fixture set.
    pub fn catalog(&self) -> &Catalog<'a> {
        &self.catalog
    }

    /// Mutable access to the catalog, e.g. for radius filtering.
    pub fn catalog_mut(&mut self) -> &mut Catalog<'a> {
        &mut self.catalog
    }

    /// The shopping list built from this fixture set.
    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    /// The item alias table built from this fixture set.
    pub fn normalizer(&self) -> &ItemNormalizer {
        &self.normalizer
    }
}

impl Default for Fixture<'_> {
    fn default() -> Self {
        Self::new()
    }
}
