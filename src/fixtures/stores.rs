//! Store Fixtures

use serde::Deserialize;

/// Wrapper for stores in YAML
#[derive(Debug, Deserialize)]
pub struct StoresFixture {
    /// Vector of store fixtures
    pub stores: Vec<StoreFixture>,
}

/// Store Fixture
#[derive(Debug, Deserialize)]
pub struct StoreFixture {
    /// Store name
    pub name: String,

    /// Latitude in decimal degrees
    pub latitude: f64,

    /// Longitude in decimal degrees
    pub longitude: f64,
}
