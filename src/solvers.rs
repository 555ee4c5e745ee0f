//! Solvers for Trip Planning
//!
//! Both solvers formulate their problem as a mixed-integer linear program and
//! hand it to a generic MILP backend. Each solve call builds an independent
//! model; nothing is shared between invocations.

use good_lp::ResolutionError;
use num_traits::ToPrimitive;
use rusty_money::MoneyError;
use thiserror::Error;

pub mod assignment;
pub mod route;

/// Binary threshold for determining truthiness of solver values.
pub const BINARY_THRESHOLD: f64 = 0.5;

/// Solver Errors
///
/// Invalid inputs are rejected before a model is built; backend failures are
/// wrapped. Infeasibility is not an error — see [`SolveOutcome`].
#[derive(Debug, Error)]
pub enum SolverError {
    /// The shopping list has no items with a positive required quantity.
    #[error("shopping list is empty")]
    EmptyShoppingList,

    /// The store cap does not allow visiting any store.
    #[error("max_stores must be at least 1")]
    MaxStoresIsZero,

    /// The configured lower store bound exceeds the upper bound.
    #[error("min_stores ({min}) exceeds max_stores ({max})")]
    StoreBoundsInverted {
        /// Configured lower bound
        min: usize,
        /// Configured upper bound
        max: usize,
    },

    /// A shopping list entry references an item the catalog does not contain.
    #[error("shopping list references an unknown item")]
    UnknownItem,

    /// A route request references a store the catalog does not contain.
    #[error("route request references an unknown store")]
    UnknownStore,

    /// Money amount in minor units cannot be represented exactly as a solver coefficient.
    #[error(
        "money amount in minor units cannot be represented exactly as a solver coefficient: {minor_units}"
    )]
    MinorUnitsNotRepresentable {
        /// Money amount in minor units
        minor_units: i64,
    },

    /// Wrapped money arithmetic or currency mismatch error.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// The backend failed without a definitive status.
    ///
    /// Deliberately not `#[from]`: [`ResolutionError::Infeasible`] must be
    /// intercepted and turned into [`SolveOutcome::Infeasible`] first.
    #[error(transparent)]
    Resolution(ResolutionError),

    /// Internal solver invariant was violated (this is a bug).
    #[error("solver invariant violated: {message}")]
    InvariantViolation {
        /// What invariant was violated
        message: &'static str,
    },
}

/// Terminal status of a solve call.
///
/// Infeasibility is a first-class outcome, distinct from both an error and an
/// empty result: callers must branch on it before trusting any plan.
#[derive(Debug, Clone, PartialEq)]
pub enum SolveOutcome<T> {
    /// The solver proved optimality; the payload satisfies every constraint.
    Optimal(T),

    /// The solver proved that no solution satisfies all constraints.
    Infeasible,
}

impl<T> SolveOutcome<T> {
    /// Whether the solve proved infeasibility.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, SolveOutcome::Infeasible)
    }

    /// The optimal payload, if any.
    pub fn optimal(self) -> Option<T> {
        match self {
            SolveOutcome::Optimal(value) => Some(value),
            SolveOutcome::Infeasible => None,
        }
    }

    /// A reference to the optimal payload, if any.
    pub fn as_optimal(&self) -> Option<&T> {
        match self {
            SolveOutcome::Optimal(value) => Some(value),
            SolveOutcome::Infeasible => None,
        }
    }

    /// Maps the optimal payload, preserving infeasibility.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> SolveOutcome<U> {
        match self {
            SolveOutcome::Optimal(value) => SolveOutcome::Optimal(f(value)),
            SolveOutcome::Infeasible => SolveOutcome::Infeasible,
        }
    }
}

/// Splits a backend resolution result into outcome and failure.
///
/// A proven-infeasible model is a terminal outcome; everything else the
/// backend reports is a failure to be propagated.
pub(crate) fn resolve<S>(
    result: Result<S, ResolutionError>,
) -> Result<SolveOutcome<S>, SolverError> {
    match result {
        Ok(solution) => Ok(SolveOutcome::Optimal(solution)),
        Err(ResolutionError::Infeasible) => Ok(SolveOutcome::Infeasible),
        Err(error) => Err(SolverError::Resolution(error)),
    }
}

/// Convert an `i64` to an `f64` if it can be represented exactly.
///
/// `good_lp` stores coefficients as `f64`. Only integers with absolute value
/// <= 2^53 can be represented exactly in an IEEE-754 `f64` mantissa; enforce
/// that via a round-trip check so an objective is never silently changed.
pub fn i64_to_f64_exact(v: i64) -> Option<f64> {
    let f = v.to_f64()?;

    (f.to_i64() == Some(v)).then_some(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_passes_solutions_through() {
        let outcome = resolve::<u8>(Ok(7));

        assert!(matches!(outcome, Ok(SolveOutcome::Optimal(7))));
    }

    #[test]
    fn resolve_turns_infeasible_into_outcome() {
        let outcome = resolve::<u8>(Err(ResolutionError::Infeasible));

        assert!(matches!(outcome, Ok(SolveOutcome::Infeasible)));
    }

    #[test]
    fn resolve_propagates_other_failures() {
        let outcome = resolve::<u8>(Err(ResolutionError::Unbounded));

        assert!(matches!(
            outcome,
            Err(SolverError::Resolution(ResolutionError::Unbounded))
        ));
    }

    #[test]
    #[expect(
        clippy::cast_precision_loss,
        reason = "This is a test case for exact conversion"
    )]
    fn i64_to_f64_exact_accepts_exactly_representable_integers() {
        let cases: [i64; 5] = [0, 1, -1, 123, 9_007_199_254_740_992]; // 2^53

        for v in cases {
            assert_eq!(i64_to_f64_exact(v), Some(v as f64));
        }
    }

    #[test]
    fn i64_to_f64_exact_rejects_nonrepresentable_integers() {
        let cases: [i64; 2] = [9_007_199_254_740_993, -9_007_199_254_740_993]; // 2^53 + 1

        for v in cases {
            assert_eq!(i64_to_f64_exact(v), None);
        }
    }

    #[test]
    fn outcome_map_preserves_infeasibility() {
        let optimal = SolveOutcome::Optimal(2).map(|v| v * 2);
        let infeasible = SolveOutcome::<i32>::Infeasible.map(|v| v * 2);

        assert_eq!(optimal, SolveOutcome::Optimal(4));
        assert_eq!(infeasible, SolveOutcome::Infeasible);
    }
}
