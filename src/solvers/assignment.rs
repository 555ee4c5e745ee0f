//! Assignment Solver
//!
//! Decides, for every in-stock (store, item) offer, how many units to buy,
//! subject to demand coverage, inventory caps and the store-count bound.
//! One non-negative integer quantity variable exists per offer and one binary
//! "visit" indicator per candidate store; the selected objective is minimised
//! over that variable set.

use good_lp::{Expression, ProblemVariables, Solution, SolverModel, Variable, variable};
use rusty_money::{Money, iso::Currency};
use smallvec::SmallVec;

#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;

use crate::{
    catalog::{Catalog, ItemKey, Offer, StoreKey},
    config::{ObjectiveMode, TripConfig},
    coords::{Coordinate, distance_km},
    plan::{Allocation, PurchasePlan},
    shopping_list::ShoppingList,
    solvers::{SolveOutcome, SolverError, i64_to_f64_exact, resolve},
};

/// Realized objective value of an optimal assignment.
#[derive(Debug, Clone, PartialEq)]
pub enum ObjectiveValue<'a> {
    /// Total purchase cost.
    Cost(Money<'a, Currency>),

    /// Number of distinct stores visited.
    StoreCount(usize),

    /// Summed start-to-store distance over visited stores, in kilometres.
    DistanceKm(f64),
}

/// An optimal purchase plan together with its realized objective value.
#[derive(Debug, Clone)]
pub struct AssignmentSolution<'a> {
    /// The purchase plan satisfying every constraint.
    pub plan: PurchasePlan<'a>,

    /// Value of the minimised objective for this plan.
    pub objective: ObjectiveValue<'a>,
}

/// Demand for one item and the in-stock offers that can cover it.
struct ItemDemand<'a> {
    item: ItemKey,
    required: u32,
    offers: SmallVec<[(StoreKey, Offer<'a>); 4]>,
}

/// One quantity decision: how many units of `item` to buy at `store`.
struct QuantityVar<'a> {
    store: StoreKey,
    item: ItemKey,
    var: Variable,
    offer: Offer<'a>,

    /// Linking bound for this variable: `min(requirement, inventory)`, the
    /// tightest value that still permits every feasible quantity.
    big_m: u32,
}

/// Solver for the item-to-store assignment problem.
#[derive(Debug)]
pub struct AssignmentSolver;

impl AssignmentSolver {
    /// Solves the assignment problem for the given catalog and demand.
    ///
    /// Returns [`SolveOutcome::Infeasible`] when no plan can satisfy the
    /// demand under the configured store cap — including when an item has no
    /// in-stock offer at all.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] on invalid input or a backend failure.
    pub fn solve<'a>(
        catalog: &Catalog<'a>,
        shopping_list: &ShoppingList,
        start: Coordinate,
        config: &TripConfig,
    ) -> Result<SolveOutcome<AssignmentSolution<'a>>, SolverError> {
        validate(shopping_list, config)?;

        // Without any offer there is no currency and nothing to buy.
        let Some(currency) = catalog.currency() else {
            return Ok(SolveOutcome::Infeasible);
        };

        // Zero-inventory offers are excluded up front, so an item whose total
        // reachable stock is below its requirement short-circuits the solve.
        let Some(demand) = collect_demand(catalog, shopping_list)? else {
            return Ok(SolveOutcome::Infeasible);
        };

        let mut pb = ProblemVariables::new();

        let store_vars = build_store_variables(&demand, &mut pb);
        let quantity_vars = build_quantity_variables(&demand, &mut pb);

        let objective = build_objective(
            catalog,
            &store_vars,
            &quantity_vars,
            start,
            config.objective,
        )?;

        let mut model = pb.minimise(objective).using(default_solver);

        // Demand coverage: each item's allocations must add up to at least
        // its required quantity.
        for entry in &demand {
            let mut covered = Expression::default();

            for quantity in quantity_vars.iter().filter(|qv| qv.item == entry.item) {
                covered += Expression::from(quantity.var);
            }

            model = model.with(covered.geq(f64::from(entry.required)));
        }

        // Linking: units may only be bought at a store the plan visits.
        // qty <= M * visited, with M = min(requirement, inventory).
        for quantity in &quantity_vars {
            let used = store_var(&store_vars, quantity.store)?;

            model = model
                .with((Expression::from(quantity.var) - used * f64::from(quantity.big_m)).leq(0));
        }

        // Store-count bounds.
        let mut visit_count = Expression::default();
        for (_, used) in &store_vars {
            visit_count += Expression::from(*used);
        }

        model = model.with(visit_count.clone().leq(count_to_f64(config.max_stores)));

        if let Some(min_stores) = config.min_stores {
            model = model.with(visit_count.geq(count_to_f64(min_stores)));
        }

        match resolve(model.solve())? {
            SolveOutcome::Optimal(solution) => Ok(SolveOutcome::Optimal(extract_solution(
                catalog,
                &demand,
                &quantity_vars,
                &solution,
                start,
                config,
                currency,
            )?)),
            SolveOutcome::Infeasible => Ok(SolveOutcome::Infeasible),
        }
    }
}

fn validate(shopping_list: &ShoppingList, config: &TripConfig) -> Result<(), SolverError> {
    if config.max_stores == 0 {
        return Err(SolverError::MaxStoresIsZero);
    }

    if let Some(min_stores) = config.min_stores {
        if min_stores > config.max_stores {
            return Err(SolverError::StoreBoundsInverted {
                min: min_stores,
                max: config.max_stores,
            });
        }
    }

    if shopping_list.is_empty() {
        return Err(SolverError::EmptyShoppingList);
    }

    Ok(())
}

/// Collects per-item demand with its in-stock offers, sorted for stable
/// variable ordering. Returns `None` when some item cannot be covered by the
/// total stock across all stores.
fn collect_demand<'a>(
    catalog: &Catalog<'a>,
    shopping_list: &ShoppingList,
) -> Result<Option<Vec<ItemDemand<'a>>>, SolverError> {
    let mut demand = Vec::with_capacity(shopping_list.len());

    for (item, required) in shopping_list.iter() {
        if catalog.item(item).is_none() {
            return Err(SolverError::UnknownItem);
        }

        let mut offers: SmallVec<[(StoreKey, Offer<'a>); 4]> = catalog
            .offers_for_item(item)
            .filter(|(_, offer)| offer.is_in_stock())
            .map(|(store, offer)| (store, *offer))
            .collect();

        offers.sort_by_key(|(store, _)| *store);

        let reachable: u64 = offers
            .iter()
            .map(|(_, offer)| u64::from(offer.inventory()))
            .sum();

        if reachable < u64::from(required) {
            return Ok(None);
        }

        demand.push(ItemDemand {
            item,
            required,
            offers,
        });
    }

    demand.sort_by_key(|entry| entry.item);

    Ok(Some(demand))
}

/// One binary "visit" indicator per store stocking at least one required item.
fn build_store_variables(
    demand: &[ItemDemand<'_>],
    pb: &mut ProblemVariables,
) -> Vec<(StoreKey, Variable)> {
    let mut stores: Vec<StoreKey> = demand
        .iter()
        .flat_map(|entry| entry.offers.iter().map(|(store, _)| *store))
        .collect();

    stores.sort_unstable();
    stores.dedup();

    stores
        .into_iter()
        .map(|store| (store, pb.add(variable().binary())))
        .collect()
}

/// One bounded integer quantity variable per in-stock offer. The inventory
/// cap is encoded as the variable's upper bound.
fn build_quantity_variables<'a>(
    demand: &[ItemDemand<'a>],
    pb: &mut ProblemVariables,
) -> Vec<QuantityVar<'a>> {
    let mut quantity_vars = Vec::new();

    for entry in demand {
        for (store, offer) in &entry.offers {
            let var = pb.add(
                variable()
                    .integer()
                    .min(0.0)
                    .max(f64::from(offer.inventory())),
            );

            quantity_vars.push(QuantityVar {
                store: *store,
                item: entry.item,
                var,
                offer: *offer,
                big_m: entry.required.min(offer.inventory()),
            });
        }
    }

    quantity_vars
}

fn build_objective(
    catalog: &Catalog<'_>,
    store_vars: &[(StoreKey, Variable)],
    quantity_vars: &[QuantityVar<'_>],
    start: Coordinate,
    objective: ObjectiveMode,
) -> Result<Expression, SolverError> {
    let mut expression = Expression::default();

    match objective {
        ObjectiveMode::MinimizeCost => {
            for quantity in quantity_vars {
                let minor_units = quantity.offer.price().to_minor_units();
                let coeff = i64_to_f64_exact(minor_units)
                    .ok_or(SolverError::MinorUnitsNotRepresentable { minor_units })?;

                expression += quantity.var * coeff;
            }
        }
        ObjectiveMode::MinimizeStoreCount => {
            for (_, used) in store_vars {
                expression += Expression::from(*used);
            }
        }
        ObjectiveMode::MinimizeTravelDistance => {
            for (store, used) in store_vars {
                expression += *used * store_distance(catalog, *store, start)?;
            }
        }
    }

    Ok(expression)
}

fn store_var(store_vars: &[(StoreKey, Variable)], store: StoreKey) -> Result<Variable, SolverError> {
    store_vars
        .iter()
        .find(|(key, _)| *key == store)
        .map(|(_, var)| *var)
        .ok_or(SolverError::InvariantViolation {
            message: "offer references a store without a visit indicator",
        })
}

fn store_distance(
    catalog: &Catalog<'_>,
    store: StoreKey,
    start: Coordinate,
) -> Result<f64, SolverError> {
    catalog
        .store(store)
        .map(|store| distance_km(start, store.coordinate))
        .ok_or(SolverError::UnknownStore)
}

fn extract_solution<'a>(
    catalog: &Catalog<'a>,
    demand: &[ItemDemand<'a>],
    quantity_vars: &[QuantityVar<'a>],
    solution: &impl Solution,
    start: Coordinate,
    config: &TripConfig,
    currency: &'a Currency,
) -> Result<AssignmentSolution<'a>, SolverError> {
    let mut allocations = Vec::new();

    for quantity_var in quantity_vars {
        let quantity = quantity_from(solution.value(quantity_var.var));

        if quantity > 0 {
            allocations.push(Allocation::new(
                quantity_var.store,
                quantity_var.item,
                quantity,
                *quantity_var.offer.price(),
            ));
        }
    }

    let plan = PurchasePlan::new(allocations, currency);

    for entry in demand {
        if plan.quantity_of(entry.item) < entry.required {
            return Err(SolverError::InvariantViolation {
                message: "optimal assignment does not cover demand",
            });
        }
    }

    if plan.store_count() > config.max_stores {
        return Err(SolverError::InvariantViolation {
            message: "optimal assignment exceeds the store cap",
        });
    }

    let objective = realized_objective(catalog, &plan, start, config.objective)?;

    Ok(AssignmentSolution { plan, objective })
}

fn realized_objective<'a>(
    catalog: &Catalog<'_>,
    plan: &PurchasePlan<'a>,
    start: Coordinate,
    objective: ObjectiveMode,
) -> Result<ObjectiveValue<'a>, SolverError> {
    match objective {
        ObjectiveMode::MinimizeCost => Ok(ObjectiveValue::Cost(plan.total_cost()?)),
        ObjectiveMode::MinimizeStoreCount => Ok(ObjectiveValue::StoreCount(plan.store_count())),
        ObjectiveMode::MinimizeTravelDistance => {
            let mut total = 0.0;

            for store in plan.visited_stores() {
                total += store_distance(catalog, store, start)?;
            }

            Ok(ObjectiveValue::DistanceKm(total))
        }
    }
}

/// Read an integer quantity from a solver value, tolerating float noise.
fn quantity_from(value: f64) -> u32 {
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "solver quantities are small non-negative integers after rounding"
    )]
    let quantity = value.round().max(0.0) as u32;

    quantity
}

/// Convert a store count bound to a solver coefficient.
fn count_to_f64(count: usize) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "store counts are far below the f64 mantissa limit"
    )]
    let bound = count as f64;

    bound
}
