use crate::models::EnergyReading;
use std::collections::BTreeSet;

/// All readings of one run, in ingestion order (file order, then row order).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnergyDataset {
    readings: Vec<EnergyReading>,
}

impl EnergyDataset {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_readings(readings: Vec<EnergyReading>) -> Self {
        Self { readings }
    }

    /// Append one file's readings after everything already ingested
    pub fn extend(&mut self, readings: impl IntoIterator<Item = EnergyReading>) {
        self.readings.extend(readings);
    }

    pub fn readings(&self) -> &[EnergyReading] {
        &self.readings
    }

    pub fn iter(&self) -> impl Iterator<Item = &EnergyReading> {
        self.readings.iter()
    }

    pub fn len(&self) -> usize {
        self.readings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.readings.is_empty()
    }

    /// Distinct source names in lexicographic order
    pub fn sources(&self) -> Vec<String> {
        self.readings
            .iter()
            .map(|r| r.source.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(str::to_string)
            .collect()
    }

    pub fn total_kwh(&self) -> f64 {
        self.readings.iter().map(|r| r.kwh).sum()
    }
}
