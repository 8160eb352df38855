//! One end-to-end run: ingest, aggregate, render, write.

use crate::config::PipelineConfig;
use crate::error::Result;
use crate::processors::{summarize_sources, BucketAggregator};
use crate::readers::{DirectoryReader, IngestionReport};
use crate::utils::constants::{CLEANED_DATA_FILE, DASHBOARD_FILE, DIGEST_FILE, SUMMARY_FILE};
use crate::writers::{write_digest, CsvWriter, DashboardRenderer};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Artifacts produced by a completed run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub cleaned_data: PathBuf,
    pub summary: PathBuf,
    pub dashboard: PathBuf,
    pub digest: PathBuf,
}

impl OutputPaths {
    pub fn in_dir(dir: &Path) -> Self {
        Self {
            cleaned_data: dir.join(CLEANED_DATA_FILE),
            summary: dir.join(SUMMARY_FILE),
            dashboard: dir.join(DASHBOARD_FILE),
            digest: dir.join(DIGEST_FILE),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub ingestion: IngestionReport,
    pub readings: usize,
    pub sources: usize,
    pub days: usize,
    pub weeks: usize,
    pub total_kwh: f64,
    pub top_source: Option<String>,
    pub outputs: OutputPaths,
}

impl RunReport {
    pub fn generate_summary(&self) -> String {
        let mut summary = self.ingestion.generate_summary();

        summary.push_str("\n=== Run Summary ===\n");
        summary.push_str(&format!("Readings: {}\n", self.readings));
        summary.push_str(&format!("Sources: {}\n", self.sources));
        summary.push_str(&format!("Days Covered: {}\n", self.days));
        summary.push_str(&format!("Weeks Covered: {}\n", self.weeks));
        summary.push_str(&format!("Total Consumption: {:.2} kWh\n", self.total_kwh));
        if let Some(top) = &self.top_source {
            summary.push_str(&format!("Highest Source: {}\n", top));
        }

        summary.push_str("\nOutputs:\n");
        for path in [
            &self.outputs.cleaned_data,
            &self.outputs.summary,
            &self.outputs.dashboard,
            &self.outputs.digest,
        ] {
            summary.push_str(&format!("  {}\n", path.display()));
        }

        summary
    }
}

#[derive(Debug, Clone)]
pub enum RunOutcome {
    /// No usable readings; nothing was written to the output directory
    NoData(IngestionReport),
    Completed(RunReport),
}

pub struct Pipeline {
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(config: PipelineConfig) -> Self {
        Self { config }
    }

    /// Run every stage in order. A missing or empty data directory is not an
    /// error; any failure after ingestion is.
    pub fn run(&self) -> Result<RunOutcome> {
        let config = &self.config;
        for dir in [&config.data_dir, &config.output_dir, &config.log_dir] {
            fs::create_dir_all(dir)?;
        }
        info!("Starting run in {}", config.base_dir.display());

        let (dataset, ingestion) = DirectoryReader::new()
            .with_progress(!config.quiet)
            .read_directory(&config.data_dir)?;

        if dataset.is_empty() {
            error!("No data loaded from {}", config.data_dir.display());
            return Ok(RunOutcome::NoData(ingestion));
        }
        info!(
            "Loaded {} readings from {} files",
            dataset.len(),
            ingestion.loaded.len()
        );

        let aggregator = BucketAggregator::with_week_anchor(config.week_anchor);
        let daily = aggregator.daily_totals(&dataset);
        let weekly = aggregator.weekly_totals(&dataset);
        let summary = summarize_sources(&dataset);

        let outputs = OutputPaths::in_dir(&config.output_dir);
        let (width, height) = config.chart_size();
        DashboardRenderer::with_size(width, height).render(
            &daily,
            &weekly,
            &dataset,
            &outputs.dashboard,
        )?;

        let writer = CsvWriter::new();
        writer.write_readings(&dataset, &outputs.cleaned_data)?;
        writer.write_summary(&summary, &outputs.summary)?;
        write_digest(&dataset, &summary, &outputs.digest)?;
        info!("Outputs written to {}", config.output_dir.display());

        Ok(RunOutcome::Completed(RunReport {
            readings: dataset.len(),
            sources: summary.len(),
            days: daily.buckets().len(),
            weeks: weekly.buckets().len(),
            total_kwh: dataset.total_kwh(),
            top_source: summary.top_source().map(str::to_string),
            ingestion,
            outputs,
        }))
    }
}
