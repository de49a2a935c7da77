use std::path::PathBuf;

use crate::analysis::{load_dataset_async, AggregationCache};
use crate::config::DashboardConfig;
use crate::error::Result;
use crate::types::{Dashboard, Dataset};

/// A dashboard session: settings, the aggregation cache, and the dashboard
/// currently on display.
pub struct App {
    pub config: DashboardConfig,
    pub cache: AggregationCache,
    pub dashboard: Option<Dashboard>,
    pub data_path: Option<PathBuf>,
    pub error_message: Option<String>,
}

impl App {
    pub fn new(config: DashboardConfig) -> Self {
        let cache = AggregationCache::new(config.cache_capacity);
        Self {
            data_path: config.data_path.clone(),
            config,
            cache,
            dashboard: None,
            error_message: None,
        }
    }

    /// Aggregate a dataset, reusing a cached result when the orders are
    /// unchanged, and make it the current dashboard.
    pub fn update_with_dataset(&mut self, dataset: Dataset) -> Result<&Dashboard> {
        let aggregation = match self.cache.get_or_aggregate(&dataset.orders) {
            Ok(aggregation) => aggregation,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return Err(e.into());
            }
        };

        if !aggregation.rejected.is_empty() {
            log::warn!(
                "{} of {} orders were rejected",
                aggregation.rejected.len(),
                dataset.orders.len()
            );
        }

        self.error_message = None;
        Ok(&*self.dashboard.insert(Dashboard {
            meta: dataset.meta,
            aggregation,
        }))
    }

    /// Load a dataset file and display it
    pub async fn load(&mut self, path: PathBuf) -> Result<&Dashboard> {
        let dataset = match load_dataset_async(&path).await {
            Ok(dataset) => dataset,
            Err(e) => {
                self.error_message = Some(e.to_string());
                return Err(e);
            }
        };
        self.data_path = Some(path);
        self.update_with_dataset(dataset)
    }

    /// Reload the last dataset path, e.g. after the file changed on disk
    pub async fn reload(&mut self) -> Result<Option<&Dashboard>> {
        match self.data_path.clone() {
            Some(path) => self.load(path).await.map(Some),
            None => Ok(None),
        }
    }
}

impl Default for App {
    fn default() -> Self {
        Self::new(DashboardConfig::default())
    }
}
