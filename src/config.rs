//! Run configuration.
//!
//! Every directory the pipeline touches, the week boundary policy and the
//! chart size live in [`PipelineConfig`], which is handed to the pipeline
//! explicitly. Values come from defaults, an optional TOML file next to the
//! executable, and `ENERGY_DASHBOARD_*` environment variables, in that order.

use crate::error::{ProcessingError, Result};
use crate::processors::WeekAnchor;
use crate::utils::constants::{
    CONFIG_FILE, DATA_DIR, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH, ENV_PREFIX, LOG_DIR,
    LOG_FILE, OUTPUT_DIR,
};
use chrono::Weekday;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use validator::Validate;

/// Raw settings as read from file and environment, before path resolution.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(default)]
pub struct Settings {
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,

    #[validate(length(min = 1))]
    pub log_file: String,

    pub week_anchor: String,

    #[validate(range(min = 200, max = 8000))]
    pub chart_width: u32,

    #[validate(range(min = 200, max = 8000))]
    pub chart_height: u32,

    pub verbose: bool,
    pub quiet: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DATA_DIR),
            output_dir: PathBuf::from(OUTPUT_DIR),
            log_dir: PathBuf::from(LOG_DIR),
            log_file: LOG_FILE.to_string(),
            week_anchor: "sunday".to_string(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            verbose: false,
            quiet: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PipelineConfig {
    pub base_dir: PathBuf,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    pub log_dir: PathBuf,
    pub log_file: String,
    pub week_anchor: WeekAnchor,
    pub chart_width: u32,
    pub chart_height: u32,
    pub verbose: bool,
    pub quiet: bool,
}

impl PipelineConfig {
    /// Default layout under `base_dir`: `data/`, `output/`, `logs/`.
    pub fn for_base_dir(base_dir: &Path) -> Self {
        Self {
            base_dir: base_dir.to_path_buf(),
            data_dir: base_dir.join(DATA_DIR),
            output_dir: base_dir.join(OUTPUT_DIR),
            log_dir: base_dir.join(LOG_DIR),
            log_file: LOG_FILE.to_string(),
            week_anchor: WeekAnchor::default(),
            chart_width: DEFAULT_CHART_WIDTH,
            chart_height: DEFAULT_CHART_HEIGHT,
            verbose: false,
            quiet: false,
        }
    }

    /// Load settings for `base_dir`. `config_file` overrides the default
    /// `energy-dashboard.toml` lookup; the default file is optional, an
    /// explicit one is required.
    pub fn load(base_dir: &Path, config_file: Option<&Path>) -> Result<Self> {
        let file_source = match config_file {
            Some(path) => config::File::from(path.to_path_buf()).required(true),
            None => config::File::from(base_dir.join(CONFIG_FILE)).required(false),
        };

        let settings: Settings = config::Config::builder()
            .add_source(file_source)
            .add_source(config::Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()?
            .try_deserialize()?;

        Self::from_settings(base_dir, settings)
    }

    pub fn from_settings(base_dir: &Path, settings: Settings) -> Result<Self> {
        settings.validate()?;

        let week_anchor = settings
            .week_anchor
            .parse::<Weekday>()
            .map(WeekAnchor::new)
            .map_err(|_| {
                ProcessingError::Config(format!(
                    "Invalid week_anchor '{}': expected a weekday name",
                    settings.week_anchor
                ))
            })?;

        Ok(Self {
            base_dir: base_dir.to_path_buf(),
            data_dir: base_dir.join(settings.data_dir),
            output_dir: base_dir.join(settings.output_dir),
            log_dir: base_dir.join(settings.log_dir),
            log_file: settings.log_file,
            week_anchor,
            chart_width: settings.chart_width,
            chart_height: settings.chart_height,
            verbose: settings.verbose,
            quiet: settings.quiet,
        })
    }

    /// Directory containing the running executable, the default base
    pub fn executable_dir() -> Result<PathBuf> {
        let exe = std::env::current_exe()?;
        exe.parent().map(Path::to_path_buf).ok_or_else(|| {
            ProcessingError::Config(format!(
                "Executable path has no parent directory: {}",
                exe.display()
            ))
        })
    }

    pub fn log_path(&self) -> PathBuf {
        self.log_dir.join(&self.log_file)
    }

    pub fn chart_size(&self) -> (u32, u32) {
        (self.chart_width, self.chart_height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_default_layout() {
        let config = PipelineConfig::for_base_dir(Path::new("/srv/energy"));

        assert_eq!(config.data_dir, PathBuf::from("/srv/energy/data"));
        assert_eq!(config.output_dir, PathBuf::from("/srv/energy/output"));
        assert_eq!(config.log_path(), PathBuf::from("/srv/energy/logs/ingestion.log"));
        assert_eq!(config.week_anchor.week_end(), Weekday::Sun);
    }

    #[test]
    fn test_load_without_file_uses_defaults() -> Result<()> {
        let temp_dir = TempDir::new()?;
        let config = PipelineConfig::load(temp_dir.path(), None)?;

        assert_eq!(config.data_dir, temp_dir.path().join("data"));
        assert_eq!(config.chart_size(), (1200, 1400));
        Ok(())
    }

    #[test]
    fn test_load_from_toml_file() -> Result<()> {
        let temp_dir = TempDir::new()?;
        fs::write(
            temp_dir.path().join("energy-dashboard.toml"),
            "data_dir = \"exports\"\nweek_anchor = \"Saturday\"\nchart_width = 800\n",
        )?;

        let config = PipelineConfig::load(temp_dir.path(), None)?;

        assert_eq!(config.data_dir, temp_dir.path().join("exports"));
        assert_eq!(config.week_anchor.week_end(), Weekday::Sat);
        assert_eq!(config.chart_width, 800);
        assert_eq!(config.chart_height, 1400);
        Ok(())
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let base = Path::new("/tmp");

        let too_small = Settings {
            chart_width: 10,
            ..Settings::default()
        };
        assert!(matches!(
            PipelineConfig::from_settings(base, too_small),
            Err(ProcessingError::Validation(_))
        ));

        let bad_anchor = Settings {
            week_anchor: "someday".to_string(),
            ..Settings::default()
        };
        assert!(matches!(
            PipelineConfig::from_settings(base, bad_anchor),
            Err(ProcessingError::Config(_))
        ));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("nope.toml");

        assert!(PipelineConfig::load(temp_dir.path(), Some(&missing)).is_err());
    }
}
