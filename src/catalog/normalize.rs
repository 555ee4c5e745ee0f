//! Item Name Normalisation
//!
//! Store inventories describe products in free text ("2% milk", "shredded
//! mozzarella"). The normaliser maps those names onto canonical catalog items
//! through a per-item alias table, so offers from different stores line up
//! under one item key.

use crate::catalog::ItemKey;

/// Maps free-text product names onto canonical catalog items.
#[derive(Debug, Default)]
pub struct ItemNormalizer {
    entries: Vec<(ItemKey, Vec<String>)>,
}

impl ItemNormalizer {
    /// Creates an empty normaliser.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers aliases for a canonical item. Aliases are matched
    /// case-insensitively as substrings of the raw product name.
    pub fn insert(&mut self, item: ItemKey, aliases: impl IntoIterator<Item = String>) {
        let aliases = aliases
            .into_iter()
            .map(|alias| alias.to_lowercase())
            .collect();

        self.entries.push((item, aliases));
    }

    /// Resolves a raw product name to a canonical item, if any alias matches.
    ///
    /// Entries are checked in registration order; the first matching alias
    /// wins.
    pub fn normalize(&self, raw_name: &str) -> Option<ItemKey> {
        let name = raw_name.to_lowercase();

        self.entries
            .iter()
            .find(|(_, aliases)| aliases.iter().any(|alias| name.contains(alias)))
            .map(|(item, _)| *item)
    }

    /// Number of canonical items with registered aliases.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no aliases have been registered.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use crate::catalog::Catalog;

    use super::*;

    fn keys() -> (ItemKey, ItemKey) {
        let mut catalog: Catalog<'_> = Catalog::new();

        (catalog.add_item("milk"), catalog.add_item("mozzarella"))
    }

    #[test]
    fn matches_alias_as_substring() {
        let (milk, mozzarella) = keys();
        let mut normalizer = ItemNormalizer::new();

        normalizer.insert(milk, ["whole milk".to_string(), "skim milk".to_string()]);
        normalizer.insert(
            mozzarella,
            ["mozzarella".to_string(), "shredded mozzarella".to_string()],
        );

        assert_eq!(normalizer.normalize("Organic Whole Milk 1gal"), Some(milk));
        assert_eq!(
            normalizer.normalize("Shredded Mozzarella Cheese"),
            Some(mozzarella)
        );
    }

    #[test]
    fn match_is_case_insensitive() {
        let (milk, _) = keys();
        let mut normalizer = ItemNormalizer::new();

        normalizer.insert(milk, ["Whole Milk".to_string()]);

        assert_eq!(normalizer.normalize("WHOLE MILK"), Some(milk));
    }

    #[test]
    fn unmatched_name_is_none() {
        let (milk, _) = keys();
        let mut normalizer = ItemNormalizer::new();

        normalizer.insert(milk, ["milk".to_string()]);

        assert_eq!(normalizer.normalize("sourdough bread"), None);
    }

    #[test]
    fn first_registered_match_wins() {
        let (first, second) = keys();
        let mut normalizer = ItemNormalizer::new();

        normalizer.insert(first, ["cheese".to_string()]);
        normalizer.insert(second, ["mozzarella cheese".to_string()]);

        assert_eq!(normalizer.normalize("mozzarella cheese"), Some(first));
    }
}
