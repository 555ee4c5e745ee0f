//! Route Sequencer
//!
//! Orders the stores chosen by the assignment solver into the shortest open
//! path: begin at the trip's start point, visit every store exactly once,
//! never return. Formulated as a MILP with Miller–Tucker–Zemlin subtour
//! elimination over the store nodes.

use good_lp::{Expression, ProblemVariables, Solution, SolverModel, Variable, variable};
use rustc_hash::FxHashMap;

#[cfg(feature = "solver-highs")]
use good_lp::solvers::highs::highs as default_solver;
#[cfg(all(not(feature = "solver-highs"), feature = "solver-microlp"))]
use good_lp::solvers::microlp::microlp as default_solver;

use crate::{
    catalog::StoreKey,
    coords::{Coordinate, distance_km},
    itinerary::Itinerary,
    solvers::{BINARY_THRESHOLD, SolveOutcome, SolverError, resolve},
};

/// A store to visit, with its location.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteStop {
    /// Store to visit
    pub store: StoreKey,

    /// Store location
    pub coordinate: Coordinate,
}

impl RouteStop {
    /// Creates a stop for the given store and location.
    pub fn new(store: StoreKey, coordinate: Coordinate) -> Self {
        Self { store, coordinate }
    }
}

/// Solver for the open-path store visiting order.
#[derive(Debug)]
pub struct RouteSolver;

impl RouteSolver {
    /// Computes the shortest open path from `start` through every stop.
    ///
    /// Node 0 is the start point: exactly one arc leaves it and none return
    /// to it. Every store node is entered exactly once and left at most
    /// once; the store ending the path is left zero times. Zero stops yield
    /// an empty itinerary and one stop a trivial one, neither invoking the
    /// solver.
    ///
    /// # Errors
    ///
    /// Returns a [`SolverError`] on a backend failure, or if the solved arc
    /// set cannot be reconstructed into a path over every store.
    pub fn sequence(
        start: Coordinate,
        stops: &[RouteStop],
    ) -> Result<SolveOutcome<Itinerary>, SolverError> {
        if stops.is_empty() {
            return Ok(SolveOutcome::Optimal(Itinerary::empty()));
        }

        if let [only] = stops {
            return Ok(SolveOutcome::Optimal(Itinerary::new(
                vec![only.store],
                distance_km(start, only.coordinate),
            )));
        }

        // Node 0 is the start; nodes 1..=N are the stores.
        let nodes: Vec<Coordinate> = std::iter::once(start)
            .chain(stops.iter().map(|stop| stop.coordinate))
            .collect();
        let node_count = nodes.len();
        let store_count = stops.len();

        let mut pb = ProblemVariables::new();

        // One binary arc variable per ordered pair of distinct nodes.
        let mut arcs: FxHashMap<(usize, usize), Variable> = FxHashMap::default();
        for from in 0..node_count {
            for to in 0..node_count {
                if from != to {
                    arcs.insert((from, to), pb.add(variable().binary()));
                }
            }
        }

        // One order variable per store node, bounded in [1, N]. These have no
        // physical meaning beyond establishing a strict visiting order.
        let n = count_to_f64(store_count);
        let order: Vec<Variable> = (0..store_count)
            .map(|_| pb.add(variable().min(1.0).max(n)))
            .collect();

        // Objective: total great-circle distance over chosen arcs.
        let mut total = Expression::default();
        for from in 0..node_count {
            for to in 0..node_count {
                if from != to {
                    total += arc(&arcs, from, to)? * leg(&nodes, from, to)?;
                }
            }
        }

        let mut model = pb.minimise(total).using(default_solver);

        // Exactly one arc leaves the start; none return to it.
        let mut leaves_start = Expression::default();
        let mut enters_start = Expression::default();
        for store_node in 1..node_count {
            leaves_start += Expression::from(arc(&arcs, 0, store_node)?);
            enters_start += Expression::from(arc(&arcs, store_node, 0)?);
        }
        model = model.with(leaves_start.eq(1)).with(enters_start.eq(0));

        // Every store is entered exactly once and left at most once.
        for store_node in 1..node_count {
            let mut incoming = Expression::default();
            let mut outgoing = Expression::default();

            for other in 0..node_count {
                if other != store_node {
                    incoming += Expression::from(arc(&arcs, other, store_node)?);
                    outgoing += Expression::from(arc(&arcs, store_node, other)?);
                }
            }

            model = model.with(incoming.eq(1)).with(outgoing.leq(1));
        }

        // Exactly N - 1 arcs originate from store nodes, so the chosen arcs
        // form one path over all stores rather than disjoint fragments.
        let mut store_departures = Expression::default();
        for from in 1..node_count {
            for to in 0..node_count {
                if from != to {
                    store_departures += Expression::from(arc(&arcs, from, to)?);
                }
            }
        }
        model = model.with(store_departures.eq(count_to_f64(store_count - 1)));

        // MTZ subtour elimination among store nodes only:
        // order(i) - order(j) + N * arc(i, j) <= N - 1.
        for from in 1..node_count {
            for to in 1..node_count {
                if from != to {
                    let order_from = order_var(&order, from - 1)?;
                    let order_to = order_var(&order, to - 1)?;
                    let arc_var = arc(&arcs, from, to)?;

                    model = model.with(
                        (Expression::from(order_from) - Expression::from(order_to)
                            + arc_var * n)
                            .leq(n - 1.0),
                    );
                }
            }
        }

        match resolve(model.solve())? {
            SolveOutcome::Optimal(solution) => Ok(SolveOutcome::Optimal(reconstruct(
                stops, &nodes, &arcs, &solution,
            )?)),
            SolveOutcome::Infeasible => Ok(SolveOutcome::Infeasible),
        }
    }
}

/// Follows the unique chosen arc out of each node, starting at the start
/// node, and totals the leg distances along the way.
fn reconstruct(
    stops: &[RouteStop],
    nodes: &[Coordinate],
    arcs: &FxHashMap<(usize, usize), Variable>,
    solution: &impl Solution,
) -> Result<Itinerary, SolverError> {
    let mut successor: FxHashMap<usize, usize> = FxHashMap::default();

    for (&(from, to), var) in arcs {
        if solution.value(*var) > BINARY_THRESHOLD {
            successor.insert(from, to);
        }
    }

    let mut ordered = Vec::with_capacity(stops.len());
    let mut total_distance_km = 0.0;
    let mut current = 0usize;

    // The path has exactly stops.len() arcs; anything beyond that would mean
    // the arc set contains a cycle.
    for _ in 0..stops.len() {
        let Some(next) = successor.get(&current).copied() else {
            break;
        };

        let stop_index = next
            .checked_sub(1)
            .ok_or(SolverError::InvariantViolation {
                message: "path returned to the start node",
            })?;

        let stop = stops
            .get(stop_index)
            .ok_or(SolverError::InvariantViolation {
                message: "arc points at a node with no matching stop",
            })?;

        total_distance_km += leg(nodes, current, next)?;
        ordered.push(stop.store);
        current = next;
    }

    if ordered.len() != stops.len() {
        return Err(SolverError::InvariantViolation {
            message: "route reconstruction did not visit every store",
        });
    }

    Ok(Itinerary::new(ordered, total_distance_km))
}

fn arc(
    arcs: &FxHashMap<(usize, usize), Variable>,
    from: usize,
    to: usize,
) -> Result<Variable, SolverError> {
    arcs.get(&(from, to))
        .copied()
        .ok_or(SolverError::InvariantViolation {
            message: "missing arc variable for node pair",
        })
}

fn order_var(order: &[Variable], index: usize) -> Result<Variable, SolverError> {
    order
        .get(index)
        .copied()
        .ok_or(SolverError::InvariantViolation {
            message: "missing order variable for store node",
        })
}

fn leg(nodes: &[Coordinate], from: usize, to: usize) -> Result<f64, SolverError> {
    let a = nodes.get(from).ok_or(SolverError::InvariantViolation {
        message: "node index out of range",
    })?;
    let b = nodes.get(to).ok_or(SolverError::InvariantViolation {
        message: "node index out of range",
    })?;

    Ok(distance_km(*a, *b))
}

fn count_to_f64(count: usize) -> f64 {
    #[expect(
        clippy::cast_precision_loss,
        reason = "store counts are far below the f64 mantissa limit"
    )]
    let value = count as f64;

    value
}
