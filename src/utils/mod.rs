pub mod constants;
pub mod filename;
pub mod logging;
pub mod progress;
pub mod timestamp;

pub use constants::*;
pub use filename::{is_input_file, source_from_path};
pub use progress::ProgressReporter;
pub use timestamp::{parse_kwh, parse_timestamp};
