//! Log sink for a pipeline run: an append-only file plus an optional
//! console mirror.

use crate::config::PipelineConfig;
use crate::error::Result;
use std::fs::{self, OpenOptions};
use std::sync::Mutex;
use tracing::level_filters::LevelFilter;
use tracing::Subscriber;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;

/// Build the subscriber for a run without installing it.
///
/// Callers scope it with `tracing::subscriber::with_default`, so nothing
/// process-wide is touched and tests can run pipelines side by side.
pub fn build_subscriber(config: &PipelineConfig) -> Result<impl Subscriber + Send + Sync> {
    fs::create_dir_all(&config.log_dir)?;
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(config.log_path())?;

    let level = if config.verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let file_layer = fmt::layer()
        .with_ansi(false)
        .with_target(false)
        .with_writer(Mutex::new(file));

    // Quiet runs keep the file log only
    let console_layer = (!config.quiet).then(|| {
        fmt::layer()
            .with_target(false)
            .without_time()
            .with_writer(std::io::stderr)
    });

    Ok(tracing_subscriber::registry()
        .with(file_layer)
        .with(console_layer)
        .with(level))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_log_file_is_appended() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = PipelineConfig::for_base_dir(temp_dir.path());

        for run in 0..2 {
            let subscriber = build_subscriber(&config)?;
            tracing::subscriber::with_default(subscriber, || {
                tracing::info!("run {} started", run);
            });
        }

        let contents = fs::read_to_string(config.log_path())?;
        assert!(contents.contains("run 0 started"));
        assert!(contents.contains("run 1 started"));
        assert!(contents.contains("INFO"));
        Ok(())
    }
}
