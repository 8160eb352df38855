pub mod column_resolver;
pub mod directory_reader;
pub mod energy_reader;

pub use column_resolver::{normalize_header, resolve_columns, ColumnResolution, ResolvedColumn};
pub use directory_reader::{DirectoryReader, IngestionReport, LoadedSource, SkippedFile};
pub use energy_reader::{EnergyReader, LoadStats, LoadedFile};
