//! Itinerary

use crate::catalog::StoreKey;

/// An ordered sequence of store visits, starting from the trip's start point
/// and never returning to it.
///
/// Derived strictly after the purchase plan is finalised; contains exactly the
/// plan's visited stores, each once.
#[derive(Debug, Clone, PartialEq)]
pub struct Itinerary {
    stops: Vec<StoreKey>,
    total_distance_km: f64,
}

impl Itinerary {
    pub(crate) fn new(stops: Vec<StoreKey>, total_distance_km: f64) -> Self {
        Self {
            stops,
            total_distance_km,
        }
    }

    /// An itinerary with no stops and zero distance.
    pub(crate) fn empty() -> Self {
        Self::new(Vec::new(), 0.0)
    }

    /// The stores to visit, in order.
    pub fn stops(&self) -> &[StoreKey] {
        &self.stops
    }

    /// Total travel distance along the path, in kilometres.
    pub fn total_distance_km(&self) -> f64 {
        self.total_distance_km
    }

    /// Number of stops.
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    /// Whether there are no stops.
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}
