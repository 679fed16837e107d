use serde_json::Value;

use super::base::{DatasetNormalizer, NormalizerUtils};
use crate::constants::ARCTIC_MISSING_SENTINEL;
use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

const DATA_PATH: [&str; 2] = ["arcticData", "data"];

/// Normalizer for the arctic sea-ice extent series
///
/// Payload shape: `{"arcticData": {"description": {...}, "data": {"197901": {"value": 15.4, "anom": 0.5, ...}}}}`.
pub struct ArcticIceNormalizer;

impl ArcticIceNormalizer {
    pub fn new() -> Self {
        Self
    }

    /// Only a numeric `anom` equal to the sentinel marks a missing month.
    fn is_missing(anom: &Value) -> bool {
        anom.as_f64() == Some(ARCTIC_MISSING_SENTINEL)
    }
}

impl Default for ArcticIceNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetNormalizer for ArcticIceNormalizer {
    fn dataset(&self) -> DatasetId {
        DatasetId::ArcticIce
    }

    fn name(&self) -> &str {
        "Arctic Ice Normalizer"
    }

    fn extract_primary(&self, payload: &Value) -> Result<Series, ExtractionError> {
        NormalizerUtils::mapping_at(DatasetId::ArcticIce, payload, &DATA_PATH)
    }

    fn derive_anomalies(&self, series: &Series) -> Vec<f64> {
        series
            .records()
            .filter_map(|record| match record.get("anom") {
                Some(anom) if Self::is_missing(anom) => None,
                Some(anom) => Some(NormalizerUtils::parse_float(anom)),
                None => Some(f64::NAN),
            })
            .collect()
    }
}
