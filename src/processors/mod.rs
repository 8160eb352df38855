pub mod bucket_aggregator;
pub mod source_summary;

pub use bucket_aggregator::{BucketAggregator, WeekAnchor};
pub use source_summary::summarize_sources;
