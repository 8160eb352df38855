use crate::error::Result;
use crate::models::{EnergyDataset, SourceSummary};
use std::fs;
use std::path::Path;

/// Two-line plain-text digest: total consumption and the top source.
pub fn render_digest(dataset: &EnergyDataset, summary: &SourceSummary) -> String {
    format!(
        "TOTAL CONSUMPTION: {:?}\nHIGHEST SOURCE: {}\n",
        dataset.total_kwh(),
        summary.top_source().unwrap_or("n/a")
    )
}

pub fn write_digest(dataset: &EnergyDataset, summary: &SourceSummary, path: &Path) -> Result<()> {
    fs::write(path, render_digest(dataset, summary))?;
    Ok(())
}
