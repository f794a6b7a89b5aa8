use tracing::debug;

use crate::models::{Metric, ObservationTable, TemperatureBin, TemperatureDistribution};

/// Count temperature readings into right-closed bins delimited by `edges`.
///
/// Readings at or below the first edge, or above the last, land in `out_of_range`.
pub fn bin_temperatures(table: &ObservationTable, edges: &[f64]) -> TemperatureDistribution {
    let mut bins: Vec<TemperatureBin> = edges
        .windows(2)
        .map(|pair| TemperatureBin {
            lower: pair[0],
            upper: pair[1],
            count: 0,
        })
        .collect();
    let mut out_of_range = 0;

    for value in table.values(Metric::Temperature) {
        match bins.iter_mut().find(|bin| bin.contains(value)) {
            Some(bin) => bin.count += 1,
            None => out_of_range += 1,
        }
    }

    for bin in &bins {
        debug!(bin = %bin.label(), count = bin.count, "temperature bin");
    }

    TemperatureDistribution { bins, out_of_range }
}
