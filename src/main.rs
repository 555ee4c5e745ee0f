//! Trip Planner CLI
//!
//! Use `-f` to load a fixture set by name
//! Use `-s` to set the trip starting point as "LAT,LON"
//! Use `-r` to only consider stores within a radius of the start
//! Use `-o` to choose the objective, or `-c` to compare all three

use std::{error::Error, io, time::Instant};

use clap::Parser;
use humanize_duration::{Truncate, prelude::DurationExt};

use forager::{
    config::{DEFAULT_MAX_STORES, TripConfig},
    coords::Coordinate,
    fixtures::Fixture,
    report,
    solvers::SolveOutcome,
    trip::TripPlanner,
    utils::{TripArgs, parse_objective},
};

/// Trip Planner CLI
#[expect(clippy::print_stdout, reason = "CLI output")]
fn main() -> Result<(), Box<dyn Error>> {
    let args = TripArgs::parse();

    let start: Coordinate = args.start.parse()?;

    let objective = parse_objective(&args.objective)
        .ok_or_else(|| format!("unknown objective: {}", args.objective))?;

    let mut fixture = Fixture::from_set(&args.fixture)?;

    if let Some(radius_km) = args.radius {
        fixture.catalog_mut().retain_within(start, radius_km);
    }

    let config = TripConfig {
        max_stores: args.max_stores.unwrap_or(DEFAULT_MAX_STORES),
        min_stores: args.min_stores,
        objective,
    };

    let solve_started = Instant::now();

    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if args.compare {
        let comparison =
            TripPlanner::compare(fixture.catalog(), fixture.shopping_list(), start, &config)?;

        report::write_comparison(&mut handle, &comparison)?;
    } else {
        match TripPlanner::plan(fixture.catalog(), fixture.shopping_list(), start, &config)? {
            SolveOutcome::Optimal(trip) => {
                report::write_trip(&mut handle, fixture.catalog(), &trip, start)?;
            }
            SolveOutcome::Infeasible => {
                println!("No plan satisfies the shopping list under the configured store cap.");
            }
        }
    }

    println!(
        "Solved in {}",
        solve_started.elapsed().human(Truncate::Millis)
    );

    Ok(())
}
