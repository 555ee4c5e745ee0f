//! Purchase Plan

use rustc_hash::FxHashSet;
use rusty_money::{Money, MoneyError, iso::Currency};

use crate::catalog::{ItemKey, StoreKey};

/// One (store, item, quantity) decision in a purchase plan.
///
/// Quantity is always positive; zero-quantity allocations never appear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Allocation<'a> {
    store: StoreKey,
    item: ItemKey,
    quantity: u32,
    unit_price: Money<'a, Currency>,
}

impl<'a> Allocation<'a> {
    pub(crate) fn new(
        store: StoreKey,
        item: ItemKey,
        quantity: u32,
        unit_price: Money<'a, Currency>,
    ) -> Self {
        Self {
            store,
            item,
            quantity,
            unit_price,
        }
    }

    /// Store to buy at.
    pub fn store(&self) -> StoreKey {
        self.store
    }

    /// Item to buy.
    pub fn item(&self) -> ItemKey {
        self.item
    }

    /// Units to buy.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Unit price at this store.
    pub fn unit_price(&self) -> &Money<'a, Currency> {
        &self.unit_price
    }

    /// Cost of this allocation (unit price times quantity).
    pub fn line_total(&self) -> Money<'a, Currency> {
        let minor_units = self.unit_price.to_minor_units() * i64::from(self.quantity);

        Money::from_minor(minor_units, self.unit_price.currency())
    }
}

/// The outcome of an optimal assignment solve: which items to buy where, in
/// what quantities. Immutable once produced.
#[derive(Debug, Clone)]
pub struct PurchasePlan<'a> {
    allocations: Vec<Allocation<'a>>,
    currency: &'a Currency,
}

impl<'a> PurchasePlan<'a> {
    pub(crate) fn new(allocations: Vec<Allocation<'a>>, currency: &'a Currency) -> Self {
        Self {
            allocations,
            currency,
        }
    }

    /// All allocations in the plan.
    pub fn allocations(&self) -> &[Allocation<'a>] {
        &self.allocations
    }

    /// Allocations to pick up at one store.
    pub fn allocations_at(&self, store: StoreKey) -> impl Iterator<Item = &Allocation<'a>> + '_ {
        self.allocations
            .iter()
            .filter(move |allocation| allocation.store() == store)
    }

    /// Distinct stores with at least one allocation, in first-seen order.
    pub fn visited_stores(&self) -> Vec<StoreKey> {
        let mut seen = FxHashSet::default();

        self.allocations
            .iter()
            .map(Allocation::store)
            .filter(|store| seen.insert(*store))
            .collect()
    }

    /// Number of distinct stores visited.
    pub fn store_count(&self) -> usize {
        self.visited_stores().len()
    }

    /// Total units allocated for one item across all stores.
    pub fn quantity_of(&self, item: ItemKey) -> u32 {
        self.allocations
            .iter()
            .filter(|allocation| allocation.item() == item)
            .map(Allocation::quantity)
            .sum()
    }

    /// Total cost of the plan.
    ///
    /// # Errors
    ///
    /// Returns a [`MoneyError`] on money arithmetic or currency mismatch.
    pub fn total_cost(&self) -> Result<Money<'a, Currency>, MoneyError> {
        let mut total = Money::from_minor(0, self.currency);

        for allocation in &self.allocations {
            total = total.add(allocation.line_total())?;
        }

        Ok(total)
    }

    /// Currency shared by every allocation.
    pub fn currency(&self) -> &'a Currency {
        self.currency
    }

    /// Number of allocations.
    pub fn len(&self) -> usize {
        self.allocations.len()
    }

    /// Whether the plan has no allocations.
    pub fn is_empty(&self) -> bool {
        self.allocations.is_empty()
    }
}
