//! Forager prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    catalog::{
        Catalog, CatalogError, Item, ItemKey, Offer, Store, StoreKey, normalize::ItemNormalizer,
    },
    config::{DEFAULT_MAX_STORES, ObjectiveMode, TripConfig},
    coords::{Coordinate, CoordinateParseError, distance_km},
    fixtures::{Fixture, FixtureError},
    itinerary::Itinerary,
    plan::{Allocation, PurchasePlan},
    report::{ReportError, write_comparison, write_trip},
    shopping_list::ShoppingList,
    solvers::{
        SolveOutcome, SolverError,
        assignment::{AssignmentSolution, AssignmentSolver, ObjectiveValue},
        route::{RouteSolver, RouteStop},
    },
    trip::{ObjectiveComparison, TripPlan, TripPlanner},
};
