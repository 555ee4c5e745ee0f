//! Integration tests for the open-path route sequencer.
//!
//! The route model starts at a fixed point, visits every store exactly once
//! and never returns. For small instances the optimum is verified against an
//! exhaustive permutation check.

use testresult::TestResult;

use forager::{
    catalog::{Catalog, StoreKey},
    coords::{Coordinate, distance_km},
    itinerary::Itinerary,
    solvers::{
        SolveOutcome,
        route::{RouteSolver, RouteStop},
    },
};

fn sequenced(outcome: SolveOutcome<Itinerary>) -> Itinerary {
    match outcome {
        SolveOutcome::Optimal(itinerary) => itinerary,
        SolveOutcome::Infeasible => panic!("expected an optimal outcome"),
    }
}

fn keys_for(coordinates: &[Coordinate]) -> Vec<StoreKey> {
    let mut catalog: Catalog<'_> = Catalog::new();

    coordinates
        .iter()
        .enumerate()
        .map(|(i, coordinate)| catalog.add_store(format!("store-{i}"), *coordinate))
        .collect()
}

fn stops_for(coordinates: &[Coordinate]) -> Vec<RouteStop> {
    keys_for(coordinates)
        .into_iter()
        .zip(coordinates.iter().copied())
        .map(|(key, coordinate)| RouteStop::new(key, coordinate))
        .collect()
}

/// Open-path length of one visiting order.
fn path_length(start: Coordinate, stops: &[RouteStop], order: &[usize]) -> f64 {
    let mut previous = start;
    let mut total = 0.0;

    for &index in order {
        let stop = stops.get(index).map(|stop| stop.coordinate);
        let coordinate = stop.unwrap_or(previous);

        total += distance_km(previous, coordinate);
        previous = coordinate;
    }

    total
}

#[test]
fn itinerary_is_a_permutation_of_the_input_stores() -> TestResult {
    let start = Coordinate::new(40.75, -73.98);
    let coordinates = [
        Coordinate::new(40.77, -73.96),
        Coordinate::new(40.73, -74.00),
        Coordinate::new(40.79, -73.95),
        Coordinate::new(40.71, -74.01),
    ];

    let stops = stops_for(&coordinates);

    let itinerary = sequenced(RouteSolver::sequence(start, &stops)?);

    assert_eq!(itinerary.len(), stops.len());

    let mut visited: Vec<StoreKey> = itinerary.stops().to_vec();
    let mut expected: Vec<StoreKey> = stops.iter().map(|stop| stop.store).collect();
    visited.sort_unstable();
    expected.sort_unstable();

    assert_eq!(visited, expected, "itinerary is not a permutation");

    Ok(())
}

#[test]
fn reported_distance_equals_the_sum_of_consecutive_legs() -> TestResult {
    let start = Coordinate::new(40.75, -73.98);
    let coordinates = [
        Coordinate::new(40.77, -73.96),
        Coordinate::new(40.73, -74.00),
        Coordinate::new(40.79, -73.95),
    ];

    let stops = stops_for(&coordinates);

    let itinerary = sequenced(RouteSolver::sequence(start, &stops)?);

    let mut previous = start;
    let mut total = 0.0;

    for store in itinerary.stops() {
        let Some(stop) = stops.iter().find(|stop| stop.store == *store) else {
            panic!("itinerary visits an unknown store");
        };

        total += distance_km(previous, stop.coordinate);
        previous = stop.coordinate;
    }

    assert!(
        (itinerary.total_distance_km() - total).abs() < 1e-6,
        "reported {} km, legs sum to {} km",
        itinerary.total_distance_km(),
        total
    );

    Ok(())
}

#[test]
fn single_store_distance_is_start_to_store() -> TestResult {
    let start = Coordinate::new(40.75, -73.98);
    let coordinate = Coordinate::new(40.80, -73.95);

    let stops = stops_for(&[coordinate]);

    let itinerary = sequenced(RouteSolver::sequence(start, &stops)?);

    assert_eq!(itinerary.len(), 1);

    let expected = distance_km(start, coordinate);
    assert!((itinerary.total_distance_km() - expected).abs() < 1e-9);

    Ok(())
}

#[test]
fn triangle_optimum_matches_exhaustive_permutation_check() -> TestResult {
    // Start point outside a triangle of stores: two near, one far.
    let start = Coordinate::new(40.70, -74.00);
    let coordinates = [
        Coordinate::new(40.72, -73.99),
        Coordinate::new(40.73, -74.01),
        Coordinate::new(40.80, -73.95),
    ];

    let stops = stops_for(&coordinates);

    let itinerary = sequenced(RouteSolver::sequence(start, &stops)?);

    let permutations: [[usize; 3]; 6] = [
        [0, 1, 2],
        [0, 2, 1],
        [1, 0, 2],
        [1, 2, 0],
        [2, 0, 1],
        [2, 1, 0],
    ];

    let best = permutations
        .iter()
        .map(|order| path_length(start, &stops, order))
        .fold(f64::INFINITY, f64::min);

    // No visiting order may beat the reported optimum.
    assert!(
        itinerary.total_distance_km() <= best + 1e-6,
        "solver reported {} km but a permutation achieves {} km",
        itinerary.total_distance_km(),
        best
    );

    // And the reported optimum is achievable by some permutation.
    assert!(
        (itinerary.total_distance_km() - best).abs() < 1e-6,
        "reported optimum does not match the best permutation"
    );

    // The far store is visited last whenever that is strictly shorter.
    let far_key = stops[2].store;
    assert_eq!(itinerary.stops().last(), Some(&far_key));

    Ok(())
}
