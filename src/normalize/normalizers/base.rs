use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractionError;
use crate::types::{DatasetId, Series};

/// Base trait for dataset-specific normalizers
///
/// One implementation exists per `DatasetId`. Both operations are pure: they
/// only look at their arguments and never touch a store.
pub trait DatasetNormalizer: Send + Sync {
    /// The dataset this normalizer handles
    fn dataset(&self) -> DatasetId;

    /// Get a human-readable name for this normalizer
    fn name(&self) -> &str;

    /// Cut the primary series out of a raw upstream payload
    fn extract_primary(&self, payload: &Value) -> Result<Series, ExtractionError>;

    /// Reduce a primary series to its anomaly values
    fn derive_anomalies(&self, series: &Series) -> Vec<f64>;
}

/// Shared utilities for normalizers
pub struct NormalizerUtils;

impl NormalizerUtils {
    /// Look up a top-level field; `null` counts as absent
    pub fn require_field<'a>(
        id: DatasetId,
        object: &'a Value,
        field: &str,
    ) -> Result<&'a Value, ExtractionError> {
        match object.get(field) {
            Some(Value::Null) | None => Err(ExtractionError::MissingField {
                id,
                missing_field: field.to_string(),
            }),
            Some(value) => Ok(value),
        }
    }

    /// Extract `payload[field]` as an ordered sequence of records
    pub fn sequence_field(
        id: DatasetId,
        payload: &Value,
        field: &str,
    ) -> Result<Series, ExtractionError> {
        match Self::require_field(id, payload, field)? {
            Value::Array(records) => Ok(Series::Sequence(records.clone())),
            _ => Err(ExtractionError::UnexpectedShape {
                id,
                field: field.to_string(),
                expected: "an array",
            }),
        }
    }

    /// Extract an object found at `path` as an ordered mapping
    pub fn mapping_at(
        id: DatasetId,
        payload: &Value,
        path: &[&str],
    ) -> Result<Series, ExtractionError> {
        let mut current = payload;
        for (depth, field) in path.iter().enumerate() {
            if depth > 0 && !current.is_object() {
                return Err(ExtractionError::UnexpectedShape {
                    id,
                    field: path[..depth].join("."),
                    expected: "an object",
                });
            }
            current = Self::require_field(id, current, field).map_err(|_| {
                ExtractionError::MissingField {
                    id,
                    missing_field: path[..=depth].join("."),
                }
            })?;
        }
        match current {
            Value::Object(periods) => Ok(Series::Mapping(periods.clone())),
            _ => Err(ExtractionError::UnexpectedShape {
                id,
                field: path.join("."),
                expected: "an object",
            }),
        }
    }

    /// Read `field` from every record and parse it leniently
    pub fn parse_record_field(series: &Series, field: &str) -> Vec<f64> {
        series
            .records()
            .map(|record| record.get(field).map_or(f64::NAN, Self::parse_float))
            .collect()
    }

    /// Permissive float conversion
    ///
    /// Numbers pass through. Strings yield their longest leading decimal
    /// literal, so `"412.5"` and `"412.5 ppm"` both give 412.5. Anything
    /// else is NaN rather than an error.
    pub fn parse_float(value: &Value) -> f64 {
        match value {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            Value::String(s) => Self::parse_float_prefix(s),
            _ => f64::NAN,
        }
    }

    pub fn parse_float_prefix(text: &str) -> f64 {
        let text = text.trim_start();
        let Some(literal) = leading_number().and_then(|re| re.find(text)) else {
            return f64::NAN;
        };
        match literal.as_str().trim_start_matches(['+', '-']) {
            "Infinity" if text.starts_with('-') => f64::NEG_INFINITY,
            "Infinity" => f64::INFINITY,
            _ => literal.as_str().parse().unwrap_or(f64::NAN),
        }
    }
}

/// Anchored pattern for the longest decimal literal at the start of a string
fn leading_number() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| {
            Regex::new(r"^[+-]?(?:Infinity|(?:[0-9]+\.?[0-9]*|\.[0-9]+)(?:[eE][+-]?[0-9]+)?)").ok()
        })
        .as_ref()
}
