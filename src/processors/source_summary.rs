use crate::models::{EnergyDataset, SourceStats, SourceSummary};
use std::collections::BTreeMap;

/// Mean, min, max and sum of kWh per source over the whole dataset.
pub fn summarize_sources(dataset: &EnergyDataset) -> SourceSummary {
    let mut stats: BTreeMap<String, SourceStats> = BTreeMap::new();

    for reading in dataset.iter() {
        match stats.get_mut(&reading.source) {
            Some(entry) => entry.push(reading.kwh),
            None => {
                stats.insert(reading.source.clone(), SourceStats::from_value(reading.kwh));
            }
        }
    }

    SourceSummary::new(stats)
}
