//! # Sales Dashboard Aggregation Library
//!
//! `sales_dashboard` turns a static set of order records into the three
//! chart-ready views of a sales analytics dashboard. Drawing the charts is left
//! to whatever renderer consumes the output.
//!
//! ## Features
//!
//! - Daily revenue trend, ascending by date
//! - Revenue by category, shaped for a treemap
//! - Country comparison of revenue and average delivery time
//! - Per-record validation with a report of rejected records
//! - Content-keyed caching of aggregation results
//! - JSON dataset loading and export
//!
//! ## Example
//!
//! ```
//! use sales_dashboard::{aggregate, OrderRecord};
//!
//! let orders = vec![OrderRecord {
//!     timestamp: "2024-01-01T10:00:00Z".to_string(),
//!     quantity: 2.into(),
//!     unit_price: 10.0,
//!     category: "A".to_string(),
//!     country: "FR".to_string(),
//!     delivery_days: 3.0,
//! }];
//!
//! let views = aggregate(&orders).unwrap();
//! assert_eq!(views.line_data[0].revenue, 20.0);
//! assert_eq!(views.country_data[0].avg_delivery_days, 3.0);
//! ```

pub mod analysis;
pub mod app;
pub mod config;
pub mod error;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use analysis::{aggregate, AggregationCache, AggregationError};
pub use config::{DashboardConfig, OutputFormat};
pub use error::{DashboardError, Result};
pub use types::{
    Aggregation, CacheKey, CountryPoint, Dashboard, Dataset, DatasetMeta, LineSeriesPoint,
    OrderRecord, RejectedRecord, TreemapNode,
};
