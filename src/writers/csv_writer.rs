//! CSV export of the cleaned dataset and the per-source summary.

use crate::error::Result;
use crate::models::{EnergyDataset, SourceSummary};
use serde::Serialize;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

#[derive(Serialize)]
struct SummaryRow<'a> {
    source: &'a str,
    mean: f64,
    min: f64,
    max: f64,
    sum: f64,
}

pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write every reading as `timestamp,kwh,source`, in ingestion order
    pub fn write_readings(&self, dataset: &EnergyDataset, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_readings_to(dataset, BufWriter::new(file))
    }

    pub fn write_readings_to(&self, dataset: &EnergyDataset, writer: impl Write) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if dataset.is_empty() {
            wtr.write_record(["timestamp", "kwh", "source"])?;
        }
        for reading in dataset.iter() {
            wtr.serialize(reading)?;
        }
        wtr.flush()?;
        Ok(())
    }

    /// Write one `source,mean,min,max,sum` row per source, in source order
    pub fn write_summary(&self, summary: &SourceSummary, path: &Path) -> Result<()> {
        let file = File::create(path)?;
        self.write_summary_to(summary, BufWriter::new(file))
    }

    pub fn write_summary_to(&self, summary: &SourceSummary, writer: impl Write) -> Result<()> {
        let mut wtr = csv::Writer::from_writer(writer);
        if summary.is_empty() {
            wtr.write_record(["source", "mean", "min", "max", "sum"])?;
        }
        for (source, stats) in summary.iter() {
            wtr.serialize(SummaryRow {
                source,
                mean: stats.mean,
                min: stats.min,
                max: stats.max,
                sum: stats.sum,
            })?;
        }
        wtr.flush()?;
        Ok(())
    }
}

impl Default for CsvWriter {
    fn default() -> Self {
        Self::new()
    }
}
