//! Shopping List

use rustc_hash::FxHashMap;

use crate::catalog::ItemKey;

/// Required item quantities for one trip.
///
/// Entries with a zero quantity are never stored: a requirement of zero means
/// the item places no constraint on the plan at all.
#[derive(Debug, Clone, Default)]
pub struct ShoppingList {
    required: FxHashMap<ItemKey, u32>,
}

impl ShoppingList {
    /// Creates an empty shopping list.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the required quantity for an item. A quantity of zero removes the
    /// requirement.
    pub fn require(&mut self, item: ItemKey, quantity: u32) {
        if quantity == 0 {
            self.required.remove(&item);
        } else {
            self.required.insert(item, quantity);
        }
    }

    /// Required quantity for an item, if the list contains it.
    pub fn quantity(&self, item: ItemKey) -> Option<u32> {
        self.required.get(&item).copied()
    }

    /// Iterates over (item, required quantity) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (ItemKey, u32)> + '_ {
        self.required.iter().map(|(item, quantity)| (*item, *quantity))
    }

    /// Number of required items.
    pub fn len(&self) -> usize {
        self.required.len()
    }

    /// Whether the list has no requirements.
    pub fn is_empty(&self) -> bool {
        self.required.is_empty()
    }
}
