//! Shopping List Fixtures

use serde::Deserialize;

/// Wrapper for the required items in YAML
#[derive(Debug, Deserialize)]
pub struct ShoppingListFixture {
    /// Vector of requirement fixtures
    pub required: Vec<RequirementFixture>,
}

/// Requirement Fixture
#[derive(Debug, Deserialize)]
pub struct RequirementFixture {
    /// Canonical item name, as defined in the items file
    pub item: String,

    /// Units required
    pub quantity: u32,
}
