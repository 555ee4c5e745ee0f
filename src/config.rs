//! Trip Configuration

use serde::{Deserialize, Serialize};

/// Default cap on distinct stores per trip.
pub const DEFAULT_MAX_STORES: usize = 3;

/// The criterion a single solve call minimises.
///
/// The three modes are three independent single-objective solves, not a joint
/// multi-objective program; [`crate::trip::TripPlanner::compare`] runs them
/// side by side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectiveMode {
    /// Minimise the total purchase cost.
    #[default]
    MinimizeCost,

    /// Minimise the number of distinct stores visited.
    MinimizeStoreCount,

    /// Minimise the summed start-to-store distance over visited stores.
    MinimizeTravelDistance,
}

/// Limits and objective selection for one trip plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripConfig {
    /// Cap on the number of distinct stores visited.
    #[serde(default = "default_max_stores")]
    pub max_stores: usize,

    /// Optional lower bound on the number of distinct stores visited.
    #[serde(default)]
    pub min_stores: Option<usize>,

    /// Objective the assignment solve minimises.
    #[serde(default)]
    pub objective: ObjectiveMode,
}

impl TripConfig {
    /// Creates a config with the given store cap and defaults elsewhere.
    pub fn with_max_stores(max_stores: usize) -> Self {
        Self {
            max_stores,
            ..Self::default()
        }
    }

    /// Returns a copy solving for a different objective.
    pub fn with_objective(&self, objective: ObjectiveMode) -> Self {
        Self {
            objective,
            ..self.clone()
        }
    }
}

impl Default for TripConfig {
    fn default() -> Self {
        Self {
            max_stores: DEFAULT_MAX_STORES,
            min_stores: None,
            objective: ObjectiveMode::default(),
        }
    }
}

fn default_max_stores() -> usize {
    DEFAULT_MAX_STORES
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn default_config() {
        let config = TripConfig::default();

        assert_eq!(config.max_stores, DEFAULT_MAX_STORES);
        assert_eq!(config.min_stores, None);
        assert_eq!(config.objective, ObjectiveMode::MinimizeCost);
    }

    #[test]
    fn deserializes_with_defaults() -> TestResult {
        let config: TripConfig = serde_norway::from_str("max_stores: 5")?;

        assert_eq!(config.max_stores, 5);
        assert_eq!(config.objective, ObjectiveMode::MinimizeCost);

        Ok(())
    }

    #[test]
    fn deserializes_objective_in_snake_case() -> TestResult {
        let config: TripConfig =
            serde_norway::from_str("max_stores: 2\nobjective: minimize_travel_distance")?;

        assert_eq!(config.objective, ObjectiveMode::MinimizeTravelDistance);

        Ok(())
    }

    #[test]
    fn with_objective_only_changes_objective() {
        let config = TripConfig::with_max_stores(4).with_objective(ObjectiveMode::MinimizeStoreCount);

        assert_eq!(config.max_stores, 4);
        assert_eq!(config.objective, ObjectiveMode::MinimizeStoreCount);
    }
}
