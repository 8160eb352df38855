/// Header aliases, in priority order, after trimming and lowercasing
pub const TIMESTAMP_ALIASES: &[&str] = &["timestamp", "time", "datetime", "date"];
pub const KWH_ALIASES: &[&str] = &["kwh", "energy", "value", "consumption"];

/// Directory names under the base directory
pub const DATA_DIR: &str = "data";
pub const OUTPUT_DIR: &str = "output";
pub const LOG_DIR: &str = "logs";

/// File names
pub const LOG_FILE: &str = "ingestion.log";
pub const CONFIG_FILE: &str = "energy-dashboard.toml";
pub const CLEANED_DATA_FILE: &str = "cleaned_energy_data.csv";
pub const SUMMARY_FILE: &str = "source_summary.csv";
pub const DASHBOARD_FILE: &str = "dashboard.png";
pub const DIGEST_FILE: &str = "summary.txt";

pub const INPUT_EXTENSION: &str = "csv";

/// Environment variable prefix for configuration overrides
pub const ENV_PREFIX: &str = "ENERGY_DASHBOARD";

/// Fractional seconds are written only when present
pub const TIMESTAMP_OUTPUT_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.f";

/// Dashboard defaults
pub const DEFAULT_CHART_WIDTH: u32 = 1200;
pub const DEFAULT_CHART_HEIGHT: u32 = 1400;
