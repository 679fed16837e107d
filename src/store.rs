use chrono::{DateTime, Utc};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::datasets::{build_catalog, DatasetDescriptor};
use crate::error::NotFound;
use crate::normalize;
use crate::types::{DatasetId, Series};

/// A fetched payload with its extracted primary series, ready to publish
#[derive(Debug, Clone)]
pub struct LoadedDataset {
    pub id: DatasetId,
    pub payload: Value,
    pub series: Series,
    pub fetched_at: DateTime<Utc>,
}

/// Owned collection of every dataset descriptor
///
/// Holds exactly one descriptor per `DatasetId`, created up front. The
/// presentation layer owns the store and passes it into the pipeline.
#[derive(Debug, Clone)]
pub struct ClimateStore {
    descriptors: Vec<DatasetDescriptor>,
}

impl ClimateStore {
    pub fn new(api_base: &str) -> Self {
        Self {
            descriptors: build_catalog(api_base),
        }
    }

    /// Look a dataset up by display name or slug
    pub fn resolve(&self, name: &str) -> Result<&DatasetDescriptor, NotFound> {
        let id: DatasetId = name.parse()?;
        Ok(self.get(id))
    }

    pub fn get(&self, id: DatasetId) -> &DatasetDescriptor {
        &self.descriptors[id.index()]
    }

    fn get_mut(&mut self, id: DatasetId) -> &mut DatasetDescriptor {
        &mut self.descriptors[id.index()]
    }

    pub fn descriptors(&self) -> &[DatasetDescriptor] {
        &self.descriptors
    }

    /// Replace a descriptor's payload and primary series wholesale
    ///
    /// The previous anomaly series no longer matches the new data, so it is
    /// cleared until derivation runs again.
    pub fn publish(&mut self, loaded: LoadedDataset) {
        let descriptor = self.get_mut(loaded.id);
        info!(
            dataset = %loaded.id,
            samples = loaded.series.len(),
            "Publishing dataset"
        );
        descriptor.raw_payload = Some(loaded.payload);
        descriptor.primary_series = Some(loaded.series);
        descriptor.anomaly_series = None;
        descriptor.fetched_at = Some(loaded.fetched_at);
    }

    /// Derive and store the anomaly series of a dataset
    ///
    /// Without a primary series this is a no-op that returns an empty list.
    pub fn select_item_anomalies(&mut self, id: DatasetId) -> Vec<f64> {
        let descriptor = self.get_mut(id);
        let Some(series) = descriptor.primary_series.as_ref() else {
            debug!(dataset = %id, "No primary series yet, skipping anomaly derivation");
            return Vec::new();
        };

        let anomalies = normalize::derive_anomalies(id, Some(series));
        let missing = anomalies.iter().filter(|v| v.is_nan()).count();
        if missing > 0 {
            warn!(dataset = %id, missing, "Some samples did not parse as numbers");
        }
        descriptor.anomaly_series = Some(anomalies.clone());
        anomalies
    }

    /// Name-based variant of `select_item_anomalies`
    pub fn select_anomalies_by_name(&mut self, name: &str) -> Result<Vec<f64>, NotFound> {
        let id: DatasetId = name.parse()?;
        Ok(self.select_item_anomalies(id))
    }
}
