pub mod aggregate;
pub mod dataset;
pub mod reading;

pub use aggregate::{BucketTable, SourceStats, SourceSummary};
pub use dataset::EnergyDataset;
pub use reading::EnergyReading;
