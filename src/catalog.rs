//! Catalog
//!
//! The catalog is the in-memory join of stores, items and offers the planner
//! consumes. An offer is the only channel connecting an item to a store: a
//! (store, item) pair with no offer, or with zero inventory, can never
//! contribute to a purchase plan.

use rustc_hash::FxHashMap;
use rusty_money::{Money, iso::Currency};
use slotmap::{SlotMap, new_key_type};
use thiserror::Error;

use crate::coords::Coordinate;

pub mod normalize;

new_key_type! {
    /// Store Key
    pub struct StoreKey;
}

new_key_type! {
    /// Item Key
    pub struct ItemKey;
}

/// A candidate store with a fixed geographic location.
#[derive(Debug, Clone)]
pub struct Store {
    /// Store name
    pub name: String,

    /// Store location
    pub coordinate: Coordinate,
}

/// A canonical shopping item.
#[derive(Debug, Clone)]
pub struct Item {
    /// Canonical item name
    pub name: String,
}

/// A priced, inventory-limited availability of one item at one store.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offer<'a> {
    price: Money<'a, Currency>,
    inventory: u32,
}

impl<'a> Offer<'a> {
    /// Creates a new offer with the given unit price and available inventory.
    pub fn new(price: Money<'a, Currency>, inventory: u32) -> Self {
        Self { price, inventory }
    }

    /// Unit price of the offered item.
    pub fn price(&self) -> &Money<'a, Currency> {
        &self.price
    }

    /// Units available at this store.
    pub fn inventory(&self) -> u32 {
        self.inventory
    }

    /// Whether the offer has any stock at all.
    pub fn is_in_stock(&self) -> bool {
        self.inventory > 0
    }
}

/// Errors related to catalog construction.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// An offer references a store key the catalog does not contain.
    #[error("offer references an unknown store")]
    UnknownStore,

    /// An offer references an item key the catalog does not contain.
    #[error("offer references an unknown item")]
    UnknownItem,

    /// An offer carries a negative unit price.
    #[error("offer has a negative price: {0} minor units")]
    NegativePrice(i64),

    /// An offer's currency differs from the catalog currency.
    #[error("currency mismatch: expected {0}, found {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

/// In-memory store/item/offer tables with keyed lookups.
#[derive(Debug, Default)]
pub struct Catalog<'a> {
    stores: SlotMap<StoreKey, Store>,
    items: SlotMap<ItemKey, Item>,
    offers: FxHashMap<(StoreKey, ItemKey), Offer<'a>>,

    store_keys: FxHashMap<String, StoreKey>,
    item_keys: FxHashMap<String, ItemKey>,

    /// Currency shared by every offer; set by the first offer added.
    currency: Option<&'a Currency>,
}

impl<'a> Catalog<'a> {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a store and returns its key.
    pub fn add_store(&mut self, name: impl Into<String>, coordinate: Coordinate) -> StoreKey {
        let name = name.into();
        let key = self.stores.insert(Store {
            name: name.clone(),
            coordinate,
        });

        self.store_keys.insert(name, key);

        key
    }

    /// Adds a canonical item and returns its key.
    pub fn add_item(&mut self, name: impl Into<String>) -> ItemKey {
        let name = name.into();
        let key = self.items.insert(Item { name: name.clone() });

        self.item_keys.insert(name, key);

        key
    }

    /// Adds an offer for the given (store, item) pair, replacing any previous
    /// offer for the pair.
    ///
    /// # Errors
    ///
    /// Returns a [`CatalogError`] if the store or item key is unknown, the
    /// price is negative, or the currency differs from the catalog currency.
    pub fn add_offer(
        &mut self,
        store: StoreKey,
        item: ItemKey,
        offer: Offer<'a>,
    ) -> Result<(), CatalogError> {
        if !self.stores.contains_key(store) {
            return Err(CatalogError::UnknownStore);
        }

        if !self.items.contains_key(item) {
            return Err(CatalogError::UnknownItem);
        }

        let minor_units = offer.price().to_minor_units();
        if minor_units < 0 {
            return Err(CatalogError::NegativePrice(minor_units));
        }

        let offer_currency = offer.price().currency();
        match self.currency {
            Some(currency) if currency != offer_currency => {
                return Err(CatalogError::CurrencyMismatch(
                    currency.iso_alpha_code,
                    offer_currency.iso_alpha_code,
                ));
            }
            Some(_) => {}
            None => self.currency = Some(offer_currency),
        }

        self.offers.insert((store, item), offer);

        Ok(())
    }

    /// Looks up a store by key.
    pub fn store(&self, key: StoreKey) -> Option<&Store> {
        self.stores.get(key)
    }

    /// Looks up an item by key.
    pub fn item(&self, key: ItemKey) -> Option<&Item> {
        self.items.get(key)
    }

    /// Looks up a store key by name.
    pub fn store_key(&self, name: &str) -> Option<StoreKey> {
        self.store_keys.get(name).copied()
    }

    /// Looks up an item key by name.
    pub fn item_key(&self, name: &str) -> Option<ItemKey> {
        self.item_keys.get(name).copied()
    }

    /// The offer for a (store, item) pair, if one exists.
    pub fn offer(&self, store: StoreKey, item: ItemKey) -> Option<&Offer<'a>> {
        self.offers.get(&(store, item))
    }

    /// All offers for the given item, across stores.
    pub fn offers_for_item(
        &self,
        item: ItemKey,
    ) -> impl Iterator<Item = (StoreKey, &Offer<'a>)> + '_ {
        self.offers
            .iter()
            .filter(move |((_, offer_item), _)| *offer_item == item)
            .map(|((store, _), offer)| (*store, offer))
    }

    /// Iterates over all stores.
    pub fn stores(&self) -> impl Iterator<Item = (StoreKey, &Store)> + '_ {
        self.stores.iter()
    }

    /// Iterates over all items.
    pub fn items(&self) -> impl Iterator<Item = (ItemKey, &Item)> + '_ {
        self.items.iter()
    }

    /// Number of stores in the catalog.
    pub fn store_count(&self) -> usize {
        self.stores.len()
    }

    /// Number of items in the catalog.
    pub fn item_count(&self) -> usize {
        self.items.len()
    }

    /// Currency shared by all offers, if any offer has been added.
    pub fn currency(&self) -> Option<&'a Currency> {
        self.currency
    }

    /// Keys of stores within `radius_km` of `start`, nearest first.
    pub fn stores_within(&self, start: Coordinate, radius_km: f64) -> Vec<StoreKey> {
        let mut nearby: Vec<(StoreKey, f64)> = self
            .stores
            .iter()
            .map(|(key, store)| (key, start.distance_km(store.coordinate)))
            .filter(|(_, distance)| *distance <= radius_km)
            .collect();

        nearby.sort_by(|a, b| a.1.total_cmp(&b.1));

        nearby.into_iter().map(|(key, _)| key).collect()
    }

    /// Drops every store farther than `radius_km` from `start`, along with its
    /// offers. Used to narrow the candidate set before solving.
    pub fn retain_within(&mut self, start: Coordinate, radius_km: f64) {
        self.stores
            .retain(|_, store| start.distance_km(store.coordinate) <= radius_km);

        let stores = &self.stores;
        self.offers.retain(|(store, _), _| stores.contains_key(*store));
        self.store_keys.retain(|_, key| stores.contains_key(*key));
    }
}
