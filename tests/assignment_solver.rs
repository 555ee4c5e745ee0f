//! Integration tests for the item-to-store assignment solver.
//!
//! The scenarios here pin down the solver's contract: demand coverage,
//! inventory caps, the store-count bound, infeasibility detection, and the
//! behaviour of the three objective modes over one shared catalog.

use rusty_money::{Money, iso};
use testresult::TestResult;

use forager::{
    catalog::{Catalog, ItemKey, Offer, StoreKey},
    config::{ObjectiveMode, TripConfig},
    coords::Coordinate,
    shopping_list::ShoppingList,
    solvers::{
        SolveOutcome,
        assignment::{AssignmentSolver, ObjectiveValue},
    },
};

fn start() -> Coordinate {
    Coordinate::new(40.7580, -73.9855)
}

fn offer<'a>(minor_units: i64, inventory: u32) -> Offer<'a> {
    Offer::new(Money::from_minor(minor_units, iso::USD), inventory)
}

fn planned<T>(outcome: SolveOutcome<T>) -> T {
    match outcome {
        SolveOutcome::Optimal(value) => value,
        SolveOutcome::Infeasible => panic!("expected an optimal outcome"),
    }
}

/// Apples stocked at two stores, milk at one.
fn apples_and_milk<'a>() -> TestResult<(Catalog<'a>, ShoppingList, StoreKey, StoreKey, ItemKey, ItemKey)>
{
    let mut catalog = Catalog::new();

    let store_a = catalog.add_store("Store A", Coordinate::new(40.76, -73.98));
    let store_b = catalog.add_store("Store B", Coordinate::new(40.74, -73.99));
    let apples = catalog.add_item("apples");
    let milk = catalog.add_item("milk");

    catalog.add_offer(store_a, apples, offer(100, 5))?;
    catalog.add_offer(store_b, apples, offer(200, 5))?;
    catalog.add_offer(store_a, milk, offer(300, 2))?;

    let mut list = ShoppingList::new();
    list.require(apples, 3);
    list.require(milk, 1);

    Ok((catalog, list, store_a, store_b, apples, milk))
}

#[test]
fn minimum_cost_plan_buys_everything_at_store_a() -> TestResult {
    let (catalog, list, store_a, _, apples, milk) = apples_and_milk()?;

    let config = TripConfig::with_max_stores(2);
    let outcome = AssignmentSolver::solve(&catalog, &list, start(), &config)?;
    let solution = planned(outcome);

    // 3 apples at $1 plus 1 milk at $3: $6 total, one store.
    assert_eq!(solution.plan.visited_stores(), vec![store_a]);
    assert_eq!(solution.plan.quantity_of(apples), 3);
    assert_eq!(solution.plan.quantity_of(milk), 1);
    assert_eq!(solution.plan.total_cost()?.to_minor_units(), 600);
    assert_eq!(
        solution.objective,
        ObjectiveValue::Cost(Money::from_minor(600, iso::USD))
    );

    Ok(())
}

#[test]
fn optimal_plans_respect_coverage_inventory_and_store_cap() -> TestResult {
    let mut catalog = Catalog::new();

    let stores = [
        catalog.add_store("North", Coordinate::new(40.80, -73.96)),
        catalog.add_store("Mid", Coordinate::new(40.76, -73.98)),
        catalog.add_store("South", Coordinate::new(40.72, -74.00)),
    ];
    let eggs = catalog.add_item("eggs");
    let bread = catalog.add_item("bread");

    catalog.add_offer(stores[0], eggs, offer(250, 2))?;
    catalog.add_offer(stores[1], eggs, offer(300, 4))?;
    catalog.add_offer(stores[2], eggs, offer(200, 1))?;
    catalog.add_offer(stores[1], bread, offer(350, 3))?;
    catalog.add_offer(stores[2], bread, offer(400, 3))?;

    let mut list = ShoppingList::new();
    list.require(eggs, 6);
    list.require(bread, 2);

    let config = TripConfig::with_max_stores(3);
    let outcome = AssignmentSolver::solve(&catalog, &list, start(), &config)?;
    let solution = planned(outcome);

    // Coverage: every item's allocations meet its requirement.
    assert!(solution.plan.quantity_of(eggs) >= 6, "eggs under-covered");
    assert!(solution.plan.quantity_of(bread) >= 2, "bread under-covered");

    // Inventory: no allocation exceeds its offer's stock.
    for allocation in solution.plan.allocations() {
        let Some(offered) = catalog.offer(allocation.store(), allocation.item()) else {
            panic!("allocation without an offer");
        };

        assert!(
            allocation.quantity() <= offered.inventory(),
            "allocation exceeds inventory"
        );
    }

    // Store cap.
    assert!(solution.plan.store_count() <= 3, "store cap violated");

    Ok(())
}

#[test]
fn demand_above_total_inventory_is_infeasible() -> TestResult {
    let (catalog, _, _, _, apples, _) = apples_and_milk()?;

    // 11 apples required, 10 available across both stores.
    let mut list = ShoppingList::new();
    list.require(apples, 11);

    let outcome = AssignmentSolver::solve(&catalog, &list, start(), &TripConfig::with_max_stores(2))?;

    assert!(outcome.is_infeasible(), "got {outcome:?}");

    Ok(())
}

#[test]
fn store_cap_can_make_demand_infeasible() -> TestResult {
    let (catalog, _, _, _, apples, _) = apples_and_milk()?;

    // 8 apples fit in two stores (5 + 5) but not in one.
    let mut list = ShoppingList::new();
    list.require(apples, 8);

    let capped = AssignmentSolver::solve(&catalog, &list, start(), &TripConfig::with_max_stores(1))?;
    assert!(capped.is_infeasible(), "got {capped:?}");

    let relaxed =
        AssignmentSolver::solve(&catalog, &list, start(), &TripConfig::with_max_stores(2))?;
    assert!(!relaxed.is_infeasible(), "two stores should suffice");

    Ok(())
}

#[test]
fn min_stores_forces_an_extra_visit() -> TestResult {
    let (catalog, list, _, _, _, _) = apples_and_milk()?;

    let config = TripConfig {
        max_stores: 2,
        min_stores: Some(2),
        objective: ObjectiveMode::MinimizeCost,
    };

    let outcome = AssignmentSolver::solve(&catalog, &list, start(), &config)?;
    let solution = planned(outcome);

    assert_eq!(solution.plan.store_count(), 2);

    Ok(())
}

#[test]
fn store_count_objective_prefers_one_covering_store() -> TestResult {
    let (catalog, list, store_a, _, _, _) = apples_and_milk()?;

    let config = TripConfig::with_max_stores(2).with_objective(ObjectiveMode::MinimizeStoreCount);

    let outcome = AssignmentSolver::solve(&catalog, &list, start(), &config)?;
    let solution = planned(outcome);

    assert_eq!(solution.plan.visited_stores(), vec![store_a]);
    assert_eq!(solution.objective, ObjectiveValue::StoreCount(1));

    Ok(())
}

#[test]
fn distance_objective_prefers_the_nearest_covering_store() -> TestResult {
    let mut catalog = Catalog::new();
    let reference = Coordinate::new(40.0, -73.0);

    let near = catalog.add_store("Near", Coordinate::new(40.01, -73.0));
    let far = catalog.add_store("Far", Coordinate::new(40.5, -73.0));
    let item = catalog.add_item("milk");

    // The far store is cheaper; the distance objective must still pick near.
    catalog.add_offer(near, item, offer(500, 5))?;
    catalog.add_offer(far, item, offer(100, 5))?;

    let mut list = ShoppingList::new();
    list.require(item, 1);

    let config = TripConfig::with_max_stores(2).with_objective(ObjectiveMode::MinimizeTravelDistance);

    let outcome = AssignmentSolver::solve(&catalog, &list, reference, &config)?;
    let solution = planned(outcome);

    assert_eq!(solution.plan.visited_stores(), vec![near]);

    match solution.objective {
        ObjectiveValue::DistanceKm(km) => {
            let expected = reference.distance_km(Coordinate::new(40.01, -73.0));
            assert!((km - expected).abs() < 1e-6, "got {km} km");
        }
        other => panic!("expected a distance objective, got {other:?}"),
    }

    Ok(())
}

#[test]
fn solving_twice_yields_the_same_objective_value() -> TestResult {
    let (catalog, list, _, _, _, _) = apples_and_milk()?;
    let config = TripConfig::with_max_stores(2);

    let first = planned(AssignmentSolver::solve(&catalog, &list, start(), &config)?);
    let second = planned(AssignmentSolver::solve(&catalog, &list, start(), &config)?);

    assert_eq!(
        first.plan.total_cost()?.to_minor_units(),
        second.plan.total_cost()?.to_minor_units()
    );

    Ok(())
}
