//! Normalization of upstream climate payloads
//!
//! Each dataset has one rule for cutting its primary series out of the raw
//! payload and one for reducing that series to anomaly values. The rules
//! live in `NormalizationRegistry`; the free functions here use the shared
//! instance.

pub mod normalizers;
pub mod registry;

pub use normalizers::{DatasetNormalizer, NormalizerUtils};
pub use registry::NormalizationRegistry;

use serde_json::Value;

use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

pub fn extract_primary(id: DatasetId, payload: &Value) -> Result<Series, ExtractionError> {
    NormalizationRegistry::global().extract_primary(id, payload)
}

pub fn derive_anomalies(id: DatasetId, series: Option<&Series>) -> Vec<f64> {
    NormalizationRegistry::global().derive_anomalies(id, series)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_shared_rules_extract_then_derive() {
        let payload = json!({"methane": [{"trend": "1890.1"}, {"trend": "n/a"}, {"trend": 1891.5}]});
        let series = extract_primary(DatasetId::Methane, &payload).unwrap();
        assert_eq!(series.len(), 3);

        let anomalies = derive_anomalies(DatasetId::Methane, Some(&series));
        assert_eq!(anomalies[0], 1890.1);
        assert!(anomalies[1].is_nan());
        assert_eq!(anomalies[2], 1891.5);
    }

    #[test]
    fn test_shared_rules_report_missing_field() {
        let err = extract_primary(DatasetId::No2, &json!({"methane": []})).unwrap_err();
        assert_eq!(err.missing_field(), Some("nitrous"));
        assert!(derive_anomalies(DatasetId::No2, None).is_empty());
    }
}
