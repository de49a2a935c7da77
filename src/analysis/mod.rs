//! Order aggregation: validation, bucketing, caching and dataset loading.

mod aggregate;
mod cache;
pub mod source;
pub mod validate;


pub use aggregate::{aggregate, AggregationError};
pub use cache::AggregationCache;
pub use source::{analyze_file_async, build_dashboard_async, load_dataset_async, parse_dataset};
