//! Utils

use clap::Parser;

use crate::config::ObjectiveMode;

/// Arguments for the trip planner CLI
#[derive(Debug, Parser)]
pub struct TripArgs {
    /// Fixture set to use for the catalog & shopping list
    #[clap(short, long, default_value = "manhattan")]
    pub fixture: String,

    /// Trip starting point as "LAT,LON"
    #[clap(short, long, default_value = "40.7580,-73.9855")]
    pub start: String,

    /// Only consider stores within this radius of the start, in kilometres
    #[clap(short, long)]
    pub radius: Option<f64>,

    /// Maximum number of stores to visit
    #[clap(short, long)]
    pub max_stores: Option<usize>,

    /// Minimum number of stores to visit
    #[clap(long)]
    pub min_stores: Option<usize>,

    /// Objective to minimise: "cost", "stores" or "distance"
    #[clap(short, long, default_value = "cost")]
    pub objective: String,

    /// Solve all three objectives and report them side by side
    #[clap(short, long)]
    pub compare: bool,
}

/// Parse an objective name from the command line.
pub fn parse_objective(name: &str) -> Option<ObjectiveMode> {
    match name {
        "cost" => Some(ObjectiveMode::MinimizeCost),
        "stores" => Some(ObjectiveMode::MinimizeStoreCount),
        "distance" => Some(ObjectiveMode::MinimizeTravelDistance),
        _ => None,
    }
}
