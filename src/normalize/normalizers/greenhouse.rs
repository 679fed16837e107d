use serde_json::Value;

use super::base::{DatasetNormalizer, NormalizerUtils};
use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

/// Normalizer for the greenhouse-gas family (CO2, methane, nitrous oxide)
///
/// All three endpoints return an array of samples under a dataset-specific
/// key; the anomaly value of each sample is its `trend`.
pub struct GreenhouseGasNormalizer {
    dataset: DatasetId,
    series_field: &'static str,
    name: &'static str,
}

impl GreenhouseGasNormalizer {
    /// `{"co2": [{"year", "month", "day", "cycle", "trend"}, ...]}`
    pub fn co2() -> Self {
        Self {
            dataset: DatasetId::Co2,
            series_field: "co2",
            name: "CO2 Normalizer",
        }
    }

    /// `{"methane": [{"date", "average", "trend", ...}, ...]}`
    pub fn methane() -> Self {
        Self {
            dataset: DatasetId::Methane,
            series_field: "methane",
            name: "Methane Normalizer",
        }
    }

    /// `{"nitrous": [{"date", "average", "trend", ...}, ...]}`
    pub fn nitrous() -> Self {
        Self {
            dataset: DatasetId::No2,
            series_field: "nitrous",
            name: "NO2 Normalizer",
        }
    }
}

impl DatasetNormalizer for GreenhouseGasNormalizer {
    fn dataset(&self) -> DatasetId {
        self.dataset
    }

    fn name(&self) -> &str {
        self.name
    }

    fn extract_primary(&self, payload: &Value) -> Result<Series, ExtractionError> {
        NormalizerUtils::sequence_field(self.dataset, payload, self.series_field)
    }

    fn derive_anomalies(&self, series: &Series) -> Vec<f64> {
        NormalizerUtils::parse_record_field(series, "trend")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_co2_extracts_series_unchanged() {
        let payload = json!({"co2": [{"trend": "1.5"}, {"trend": "1.6"}]});
        let series = GreenhouseGasNormalizer::co2().extract_primary(&payload).unwrap();
        assert_eq!(
            series,
            Series::Sequence(vec![json!({"trend": "1.5"}), json!({"trend": "1.6"})])
        );
    }

    #[test]
    fn test_co2_missing_key() {
        let err = GreenhouseGasNormalizer::co2().extract_primary(&json!({})).unwrap_err();
        assert_eq!(
            err,
            ExtractionError::MissingField {
                id: DatasetId::Co2,
                missing_field: "co2".to_string(),
            }
        );
    }

    #[test]
    fn test_each_gas_reads_its_own_key() {
        let payload = json!({
            "methane": [{"date": "1983.7", "average": "1625.9", "trend": "1634.9"}],
            "nitrous": [{"date": "2001.1", "average": "316.3", "trend": "316.0"}]
        });
        let methane = GreenhouseGasNormalizer::methane();
        let nitrous = GreenhouseGasNormalizer::nitrous();

        let series = methane.extract_primary(&payload).unwrap();
        assert_eq!(methane.derive_anomalies(&series), vec![1634.9]);

        let series = nitrous.extract_primary(&payload).unwrap();
        assert_eq!(nitrous.derive_anomalies(&series), vec![316.0]);

        assert!(GreenhouseGasNormalizer::co2().extract_primary(&payload).is_err());
    }

    #[test]
    fn test_trend_parse_is_permissive() {
        let series = Series::Sequence(vec![json!({"trend": "1.5"}), json!({"trend": "bad"})]);
        let anomalies = GreenhouseGasNormalizer::co2().derive_anomalies(&series);
        assert_eq!(anomalies.len(), 2);
        assert_eq!(anomalies[0], 1.5);
        assert!(anomalies[1].is_nan());
    }

    #[test]
    fn test_object_instead_of_array_is_unexpected_shape() {
        let err = GreenhouseGasNormalizer::co2()
            .extract_primary(&json!({"co2": {"trend": "1.5"}}))
            .unwrap_err();
        assert!(matches!(err, ExtractionError::UnexpectedShape { .. }));
    }
}
