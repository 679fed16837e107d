use std::sync::OnceLock;

use serde_json::Value;
use tracing::debug;

use super::normalizers::{
    ArcticIceNormalizer, DatasetNormalizer, GreenhouseGasNormalizer, TemperatureNormalizer,
};
use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

static GLOBAL: OnceLock<NormalizationRegistry> = OnceLock::new();

/// Rule table mapping each dataset to its extraction and derivation rules
///
/// Slots are indexed by `DatasetId::index`, so every dataset always has a rule.
pub struct NormalizationRegistry {
    normalizers: [Box<dyn DatasetNormalizer>; DatasetId::ALL.len()],
}

impl NormalizationRegistry {
    /// Create a registry holding one normalizer per dataset
    pub fn new() -> Self {
        Self {
            normalizers: [
                Box::new(TemperatureNormalizer::new()),
                Box::new(GreenhouseGasNormalizer::co2()),
                Box::new(GreenhouseGasNormalizer::methane()),
                Box::new(GreenhouseGasNormalizer::nitrous()),
                Box::new(ArcticIceNormalizer::new()),
            ],
        }
    }

    /// Shared instance used by the pipeline and the store
    pub fn global() -> &'static NormalizationRegistry {
        GLOBAL.get_or_init(NormalizationRegistry::new)
    }

    /// Replace the normalizer for the dataset it handles
    pub fn register(&mut self, normalizer: Box<dyn DatasetNormalizer>) {
        let index = normalizer.dataset().index();
        self.normalizers[index] = normalizer;
    }

    /// Get the normalizer for a dataset
    pub fn normalizer(&self, id: DatasetId) -> &dyn DatasetNormalizer {
        self.normalizers[id.index()].as_ref()
    }

    pub fn extract_primary(&self, id: DatasetId, payload: &Value) -> Result<Series, ExtractionError> {
        let normalizer = self.normalizer(id);
        let series = normalizer.extract_primary(payload)?;
        debug!(normalizer = normalizer.name(), records = series.len(), "Extracted primary series");
        Ok(series)
    }

    /// Anomalies of a series; an absent series gives an empty result
    pub fn derive_anomalies(&self, id: DatasetId, series: Option<&Series>) -> Vec<f64> {
        series.map_or_else(Vec::new, |series| self.normalizer(id).derive_anomalies(series))
    }

    /// List all registered datasets
    pub fn list_datasets(&self) -> Vec<DatasetId> {
        self.normalizers.iter().map(|n| n.dataset()).collect()
    }
}

impl Default for NormalizationRegistry {
    fn default() -> Self {
        Self::new()
    }
}
