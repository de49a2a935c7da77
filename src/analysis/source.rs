use std::path::{Path, PathBuf};
use tokio::task::spawn_blocking;

use super::aggregate::aggregate;
use crate::error::{DashboardError, Result};
use crate::types::{Dashboard, Dataset};

/// Parse a dataset from JSON text. `origin` is only used in error messages.
pub fn parse_dataset(json: &str, origin: &Path) -> Result<Dataset> {
    serde_json::from_str(json).map_err(|source| DashboardError::Parse {
        path: origin.to_path_buf(),
        source,
    })
}

/// Read a dataset file asynchronously
pub async fn load_dataset_async(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref().to_path_buf();
    let json = tokio::fs::read_to_string(&path)
        .await
        .map_err(|source| DashboardError::Io {
            path: path.clone(),
            source,
        })?;

    let dataset = parse_dataset(&json, &path)?;
    log::info!(
        "Loaded {} orders from {} ({}, generated {})",
        dataset.orders.len(),
        path.display(),
        dataset.meta.currency,
        dataset.meta.generated_at
    );
    Ok(dataset)
}

/// Build a dashboard from a dataset, running the aggregation off the async
/// runtime.
pub async fn build_dashboard_async(dataset: Dataset) -> Result<Dashboard> {
    spawn_blocking(move || {
        let aggregation = aggregate(&dataset.orders)?;
        Ok::<_, DashboardError>(Dashboard {
            meta: dataset.meta,
            aggregation,
        })
    })
    .await?
}

/// Load a dataset file and aggregate it
pub async fn analyze_file_async(path: PathBuf) -> Result<Dashboard> {
    let dataset = load_dataset_async(&path).await?;
    build_dashboard_async(dataset).await
}
