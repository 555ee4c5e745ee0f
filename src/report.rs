//! Trip Report
//!
//! Renders a planned trip as terminal tables: the purchase plan grouped by
//! visiting order, the itinerary with leg distances, and a closing summary.

use std::io;

use rusty_money::MoneyError;
use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};
use thiserror::Error;

use crate::{
    catalog::{Catalog, ItemKey, StoreKey},
    coords::Coordinate,
    solvers::{SolveOutcome, assignment::ObjectiveValue},
    trip::{ObjectiveComparison, TripPlan},
};

/// Errors that can occur when writing a trip report.
#[derive(Debug, Error)]
pub enum ReportError {
    /// Wrapper for money errors.
    #[error(transparent)]
    Money(#[from] MoneyError),

    /// A plan allocation references a store missing from the catalog.
    #[error("missing store")]
    MissingStore(StoreKey),

    /// A plan allocation references an item missing from the catalog.
    #[error("missing item")]
    MissingItem(ItemKey),

    /// IO error
    #[error("IO error")]
    Io,
}

/// Writes the purchase plan, itinerary and summary for one trip.
///
/// # Errors
///
/// Returns a [`ReportError`] if a catalog lookup fails or the writer errors.
pub fn write_trip(
    mut out: impl io::Write,
    catalog: &Catalog<'_>,
    trip: &TripPlan<'_>,
    start: Coordinate,
) -> Result<(), ReportError> {
    write_plan_table(&mut out, catalog, trip)?;
    write_itinerary_table(&mut out, catalog, trip, start)?;
    write_summary(&mut out, trip)?;

    Ok(())
}

/// Writes the three objective modes side by side.
///
/// # Errors
///
/// Returns a [`ReportError`] if a money total fails or the writer errors.
pub fn write_comparison(
    mut out: impl io::Write,
    comparison: &ObjectiveComparison<'_>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Objective", "Status", "Total Cost", "Stores", "Distance (km)"]);

    push_comparison_row(&mut builder, "Minimize Cost", &comparison.min_cost)?;
    push_comparison_row(&mut builder, "Minimize Stores", &comparison.min_stores)?;
    push_comparison_row(&mut builder, "Minimize Distance", &comparison.min_distance)?;

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::Io)
}

fn push_comparison_row(
    builder: &mut Builder,
    label: &str,
    outcome: &SolveOutcome<TripPlan<'_>>,
) -> Result<(), ReportError> {
    let record = match outcome.as_optimal() {
        Some(trip) => [
            label.to_string(),
            "Optimal".to_string(),
            trip.total_cost()?.to_string(),
            trip.store_count().to_string(),
            format!("{:.2}", trip.total_distance_km()),
        ],
        None => [
            label.to_string(),
            "Infeasible".to_string(),
            "-".to_string(),
            "-".to_string(),
            "-".to_string(),
        ],
    };

    builder.push_record(record);

    Ok(())
}

fn write_plan_table(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    trip: &TripPlan<'_>,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["Store", "Item", "Qty", "Unit Price", "Line Total"]);

    // Group allocations by the itinerary's visiting order.
    for stop in trip.itinerary.stops() {
        let store = catalog
            .store(*stop)
            .ok_or(ReportError::MissingStore(*stop))?;

        for allocation in trip.plan().allocations_at(*stop) {
            let item = catalog
                .item(allocation.item())
                .ok_or(ReportError::MissingItem(allocation.item()))?;

            builder.push_record([
                store.name.clone(),
                item.name.clone(),
                allocation.quantity().to_string(),
                allocation.unit_price().to_string(),
                allocation.line_total().to_string(),
            ]);
        }
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::Io)
}

fn write_itinerary_table(
    out: &mut impl io::Write,
    catalog: &Catalog<'_>,
    trip: &TripPlan<'_>,
    start: Coordinate,
) -> Result<(), ReportError> {
    let mut builder = Builder::default();

    builder.push_record(["#", "Store", "Leg (km)"]);

    let mut previous = start;

    for (index, stop) in trip.itinerary.stops().iter().enumerate() {
        let store = catalog
            .store(*stop)
            .ok_or(ReportError::MissingStore(*stop))?;

        let leg = previous.distance_km(store.coordinate);
        previous = store.coordinate;

        builder.push_record([
            (index + 1).to_string(),
            store.name.clone(),
            format!("{leg:.2}"),
        ]);
    }

    let mut table = builder.build();
    table.with(Style::modern_rounded());
    table.modify(Columns::new(2..), Alignment::right());

    writeln!(out, "{table}").map_err(|_err| ReportError::Io)
}

fn write_summary(out: &mut impl io::Write, trip: &TripPlan<'_>) -> Result<(), ReportError> {
    writeln!(out, "Total cost:      {}", trip.total_cost()?).map_err(|_err| ReportError::Io)?;
    writeln!(out, "Stores visited:  {}", trip.store_count()).map_err(|_err| ReportError::Io)?;
    writeln!(out, "Travel distance: {:.2} km", trip.total_distance_km())
        .map_err(|_err| ReportError::Io)?;

    let objective = match &trip.assignment.objective {
        ObjectiveValue::Cost(cost) => format!("cost {cost}"),
        ObjectiveValue::StoreCount(count) => format!("{count} stores"),
        ObjectiveValue::DistanceKm(km) => format!("{km:.2} km"),
    };

    writeln!(out, "Objective value: {objective}").map_err(|_err| ReportError::Io)
}
