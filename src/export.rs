// ABOUTME: CSV export of the full observation history
// ABOUTME: Oldest first, hidden entries included, display values in the unit recorded at entry
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 TrimTally

use chrono::{DateTime, SecondsFormat, Utc};
use std::fmt::Write;
use trimtally_core::models::Observation;
use trimtally_core::Clock;

/// Header row of the export
pub const CSV_HEADER: &str = "id,timestamp,normalizedDate,weight_kg,displayUnitAtEntry,weight_display_value,source,notes,createdAt,updatedAt";

/// Render observations as CSV
///
/// Rows are ordered by timestamp ascending regardless of input order, and
/// `normalizedDate` is recomputed under `clock`.
#[must_use]
pub fn observations_to_csv(observations: &[Observation], clock: &dyn Clock) -> String {
    let mut ordered: Vec<&Observation> = observations.iter().collect();
    ordered.sort_by_key(|o| o.timestamp);

    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + ordered.len() * 160);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for observation in ordered {
        // Writing to a String cannot fail
        let _ = writeln!(
            csv,
            "{id},{timestamp},{day},{kg:.2},{unit},{display:.1},{source},\"{notes}\",{created},{updated}",
            id = observation.id,
            timestamp = iso_instant(observation.timestamp),
            day = observation.local_day(clock).format("%Y-%m-%d"),
            kg = observation.value_kg,
            unit = observation.display_unit_at_entry.symbol(),
            display = observation.display_value(),
            source = observation.source,
            notes = escape_notes(observation.notes.as_deref()),
            created = iso_instant(observation.created_at),
            updated = iso_instant(observation.updated_at),
        );
    }

    csv
}

fn iso_instant(instant: DateTime<Utc>) -> String {
    instant.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn escape_notes(notes: Option<&str>) -> String {
    notes.map_or_else(String::new, |n| n.replace('"', "\"\""))
}
