use serde_json::Value;

use super::base::{DatasetNormalizer, NormalizerUtils};
use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

/// Normalizer for the global temperature series
///
/// Payload shape: `{"result": [{"time": "1880.04", "station": "-0.31", "land": "-0.80"}, ...]}`.
/// The chart's anomaly line is the station-adjusted value, so derivation
/// reads `station`, not a field named after anomalies.
pub struct TemperatureNormalizer;

impl TemperatureNormalizer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TemperatureNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetNormalizer for TemperatureNormalizer {
    fn dataset(&self) -> DatasetId {
        DatasetId::Temperature
    }

    fn name(&self) -> &str {
        "Temperature Normalizer"
    }

    fn extract_primary(&self, payload: &Value) -> Result<Series, ExtractionError> {
        NormalizerUtils::sequence_field(DatasetId::Temperature, payload, "result")
    }

    fn derive_anomalies(&self, series: &Series) -> Vec<f64> {
        NormalizerUtils::parse_record_field(series, "station")
    }
}
