//! Item Fixtures

use rustc_hash::FxHashMap;
use serde::Deserialize;

/// Wrapper for canonical items in YAML
#[derive(Debug, Deserialize)]
pub struct ItemsFixture {
    /// Map of canonical item name -> item fixture
    pub items: FxHashMap<String, ItemFixture>,
}

/// Item Fixture
#[derive(Debug, Deserialize)]
pub struct ItemFixture {
    /// Free-text names that resolve to this item
    #[serde(default)]
    pub aliases: Vec<String>,
}
