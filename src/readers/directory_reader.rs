use crate::error::Result;
use crate::models::EnergyDataset;
use crate::readers::energy_reader::{EnergyReader, LoadStats};
use crate::utils::filename::{is_input_file, source_from_path};
use crate::utils::progress::ProgressReporter;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};

#[derive(Debug, Clone)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub reason: String,
}

#[derive(Debug, Clone)]
pub struct LoadedSource {
    pub path: PathBuf,
    pub source: String,
    pub stats: LoadStats,
}

/// What happened to each input file during ingestion
#[derive(Debug, Clone, Default)]
pub struct IngestionReport {
    pub files_found: usize,
    pub loaded: Vec<LoadedSource>,
    pub skipped: Vec<SkippedFile>,
}

impl IngestionReport {
    pub fn rows_kept(&self) -> usize {
        self.loaded.iter().map(|f| f.stats.rows_kept).sum()
    }

    pub fn rows_discarded(&self) -> usize {
        self.loaded
            .iter()
            .map(|f| f.stats.rows_dropped + f.stats.rows_malformed)
            .sum()
    }

    pub fn generate_summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Ingestion Report ===\n");
        summary.push_str(&format!("CSV Files Found: {}\n", self.files_found));
        summary.push_str(&format!("Files Loaded: {}\n", self.loaded.len()));
        summary.push_str(&format!("Files Skipped: {}\n", self.skipped.len()));
        summary.push_str(&format!("Rows Kept: {}\n", self.rows_kept()));
        summary.push_str(&format!("Rows Discarded: {}\n", self.rows_discarded()));

        if !self.skipped.is_empty() {
            summary.push_str("\nSkipped Files:\n");
            for (i, skipped) in self.skipped.iter().enumerate() {
                summary.push_str(&format!(
                    "  {}. {}: {}\n",
                    i + 1,
                    skipped.path.display(),
                    skipped.reason
                ));
            }
        }

        summary
    }
}

/// Loads every CSV export in one directory into a single dataset.
pub struct DirectoryReader {
    reader: EnergyReader,
    silent: bool,
}

impl DirectoryReader {
    pub fn new() -> Self {
        Self {
            reader: EnergyReader::new(),
            silent: true,
        }
    }

    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.silent = !show_progress;
        self
    }

    /// Non-recursive listing of input files, sorted by file name
    pub fn list_input_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && is_input_file(&path) {
                files.push(path);
            }
        }

        files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
        Ok(files)
    }

    /// Ingest all input files. Files that fail to load are skipped; an empty
    /// dataset comes back when nothing usable was found.
    pub fn read_directory(&self, dir: &Path) -> Result<(EnergyDataset, IngestionReport)> {
        let files = self.list_input_files(dir)?;
        let mut report = IngestionReport {
            files_found: files.len(),
            ..IngestionReport::default()
        };
        let mut dataset = EnergyDataset::new();

        if files.is_empty() {
            error!("No CSV files found in {}", dir.display());
            return Ok((dataset, report));
        }

        let progress = ProgressReporter::new(files.len() as u64, "Loading CSV files...", self.silent);

        for path in files {
            let file_name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            info!("Reading {}", file_name);
            progress.set_message(&format!("Reading {}", file_name));

            let source = source_from_path(&path);
            match self.reader.read_file(&path, &source) {
                Ok(loaded) => {
                    dataset.extend(loaded.readings);
                    report.loaded.push(LoadedSource {
                        path,
                        source,
                        stats: loaded.stats,
                    });
                }
                Err(e) => report.skipped.push(SkippedFile {
                    path,
                    reason: e.to_string(),
                }),
            }

            progress.increment(1);
        }

        progress.finish_with_message(&format!("Loaded {} readings", dataset.len()));

        Ok((dataset, report))
    }
}

impl Default for DirectoryReader {
    fn default() -> Self {
        Self::new()
    }
}
