//! Error types for loading, configuring and aggregating dashboards.

use std::path::PathBuf;
use thiserror::Error;

use crate::analysis::AggregationError;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Aggregation(#[from] AggregationError),

    #[error("failed to serialize dashboard: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, DashboardError>;
