//! Trip Planning
//!
//! Composes the two solvers: demand and catalog flow into the assignment
//! solver, its visited stores flow into the route sequencer, and the combined
//! result is returned through the call chain. The sequencer is never invoked
//! when the assignment is infeasible, and it never feeds back into item
//! assignment.

use rusty_money::{Money, iso::Currency};

use crate::{
    catalog::Catalog,
    config::{ObjectiveMode, TripConfig},
    coords::Coordinate,
    itinerary::Itinerary,
    plan::PurchasePlan,
    shopping_list::ShoppingList,
    solvers::{
        SolveOutcome, SolverError,
        assignment::{AssignmentSolution, AssignmentSolver},
        route::{RouteSolver, RouteStop},
    },
};

/// A complete trip: what to buy where, and the order to visit the stores.
#[derive(Debug, Clone)]
pub struct TripPlan<'a> {
    /// The assignment solve result: purchase plan plus objective value.
    pub assignment: AssignmentSolution<'a>,

    /// Visiting order over the plan's stores, with total travel distance.
    pub itinerary: Itinerary,
}

impl<'a> TripPlan<'a> {
    /// The purchase plan.
    pub fn plan(&self) -> &PurchasePlan<'a> {
        &self.assignment.plan
    }

    /// Total purchase cost across all allocations.
    ///
    /// # Errors
    ///
    /// Returns a [`rusty_money::MoneyError`] on money arithmetic failure.
    pub fn total_cost(&self) -> Result<Money<'a, Currency>, rusty_money::MoneyError> {
        self.assignment.plan.total_cost()
    }

    /// Number of distinct stores visited.
    pub fn store_count(&self) -> usize {
        self.assignment.plan.store_count()
    }

    /// Total travel distance along the itinerary, in kilometres.
    pub fn total_distance_km(&self) -> f64 {
        self.itinerary.total_distance_km()
    }
}

/// The three single-objective solves, reported side by side.
///
/// Each field is an independent solve of the same inputs under one objective
/// mode; this is not a joint multi-objective optimisation.
#[derive(Debug, Clone)]
pub struct ObjectiveComparison<'a> {
    /// Trip minimising total purchase cost.
    pub min_cost: SolveOutcome<TripPlan<'a>>,

    /// Trip minimising the number of stores visited.
    pub min_stores: SolveOutcome<TripPlan<'a>>,

    /// Trip minimising summed start-to-store distance.
    pub min_distance: SolveOutcome<TripPlan<'a>>,
}

/// Plans trips by running the assignment solver and then the route sequencer.
#[derive(Debug)]
pub struct TripPlanner;

impl TripPlanner {
    /// Plans one trip under the configured objective.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] on invalid input or a backend failure.
    pub fn plan<'a>(
        catalog: &Catalog<'a>,
        shopping_list: &ShoppingList,
        start: Coordinate,
        config: &TripConfig,
    ) -> Result<SolveOutcome<TripPlan<'a>>, SolverError> {
        let assignment = match AssignmentSolver::solve(catalog, shopping_list, start, config)? {
            SolveOutcome::Optimal(solution) => solution,
            SolveOutcome::Infeasible => return Ok(SolveOutcome::Infeasible),
        };

        let stops = route_stops(catalog, &assignment.plan)?;

        // A complete arc set over a non-empty store set is always sequencable;
        // an infeasible status here indicates a backend defect, not a
        // plannable outcome.
        let itinerary = match RouteSolver::sequence(start, &stops)? {
            SolveOutcome::Optimal(itinerary) => itinerary,
            SolveOutcome::Infeasible => {
                return Err(SolverError::InvariantViolation {
                    message: "route sequencing reported infeasible for a reachable store set",
                });
            }
        };

        Ok(SolveOutcome::Optimal(TripPlan {
            assignment,
            itinerary,
        }))
    }

    /// Runs the three objective modes independently over the same inputs.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] on invalid input or a backend failure in any
    /// of the three solves.
    pub fn compare<'a>(
        catalog: &Catalog<'a>,
        shopping_list: &ShoppingList,
        start: Coordinate,
        config: &TripConfig,
    ) -> Result<ObjectiveComparison<'a>, SolverError> {
        let min_cost = Self::plan(
            catalog,
            shopping_list,
            start,
            &config.with_objective(ObjectiveMode::MinimizeCost),
        )?;

        let min_stores = Self::plan(
            catalog,
            shopping_list,
            start,
            &config.with_objective(ObjectiveMode::MinimizeStoreCount),
        )?;

        let min_distance = Self::plan(
            catalog,
            shopping_list,
            start,
            &config.with_objective(ObjectiveMode::MinimizeTravelDistance),
        )?;

        Ok(ObjectiveComparison {
            min_cost,
            min_stores,
            min_distance,
        })
    }
}

/// Maps the plan's visited stores to route stops with coordinates.
fn route_stops<'a>(
    catalog: &Catalog<'a>,
    plan: &PurchasePlan<'a>,
) -> Result<Vec<RouteStop>, SolverError> {
    plan.visited_stores()
        .into_iter()
        .map(|store| {
            catalog
                .store(store)
                .map(|details| RouteStop::new(store, details.coordinate))
                .ok_or(SolverError::UnknownStore)
        })
        .collect()
}
