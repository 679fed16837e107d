//! Static catalog of the supported climate datasets.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::constants::{
    endpoint_url, ARCTIC_PATH, CO2_PATH, METHANE_PATH, NITROUS_OXIDE_PATH, TEMPERATURE_PATH,
};
use crate::types::{DatasetId, DisplayMeta, Series};

/// In-memory record of one climate metric
#[derive(Debug, Clone, Serialize)]
pub struct DatasetDescriptor {
    pub id: DatasetId,
    endpoint: String,
    pub display_meta: DisplayMeta,
    #[serde(skip_serializing)]
    pub raw_payload: Option<Value>,
    pub primary_series: Option<Series>,
    pub anomaly_series: Option<Vec<f64>>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl DatasetDescriptor {
    pub fn new(id: DatasetId, endpoint: String, display_meta: DisplayMeta) -> Self {
        Self {
            id,
            endpoint,
            display_meta,
            raw_payload: None,
            primary_series: None,
            anomaly_series: None,
            fetched_at: None,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn has_data(&self) -> bool {
        self.primary_series.is_some()
    }
}

/// Endpoint path of a dataset, relative to the API base
pub fn endpoint_path(id: DatasetId) -> &'static str {
    match id {
        DatasetId::Temperature => TEMPERATURE_PATH,
        DatasetId::Co2 => CO2_PATH,
        DatasetId::Methane => METHANE_PATH,
        DatasetId::No2 => NITROUS_OXIDE_PATH,
        DatasetId::ArcticIce => ARCTIC_PATH,
    }
}

fn meta(
    label: &str,
    description: &str,
    line_color: &str,
    background: &str,
    causes: &[&str],
) -> DisplayMeta {
    DisplayMeta {
        label: label.to_string(),
        description: description.to_string(),
        line_color: line_color.to_string(),
        background: background.to_string(),
        causes: causes.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn display_meta(id: DatasetId) -> DisplayMeta {
    match id {
        DatasetId::Temperature => meta(
            "Temperature",
            "Global temperature anomalies, in degrees Celsius, relative to each station's \
             historical average. Spikes mark periods of accelerated warming.",
            "#ff6f00",
            "temperature-background.jpg",
            &["Greenhouse gas accumulation"],
        ),
        DatasetId::Co2 => meta(
            "CO2",
            "Atmospheric carbon dioxide concentration in parts per million (ppm). \
             Rising levels track fossil fuel combustion and deforestation.",
            "#8d693f",
            "co2-background.png",
            &["Fossil fuel combustion", "Deforestation", "Industrial processes"],
        ),
        DatasetId::Methane => meta(
            "Methane",
            "Average atmospheric methane (CH4) concentration in parts per billion (ppb). \
             Methane warms far more than CO2 per molecule.",
            "#F5A623",
            "methane-background.png",
            &["Livestock", "Landfills", "Natural gas extraction"],
        ),
        DatasetId::No2 => meta(
            "NO2",
            "Average atmospheric nitrous oxide concentration in parts per billion (ppb), \
             produced mostly by fuel combustion and industry.",
            "#ff9896",
            "no2-background.jpg",
            &["Fossil fuel combustion", "Industrial processes"],
        ),
        DatasetId::ArcticIce => meta(
            "Arctic Ice",
            "Monthly arctic sea-ice extent anomalies. Negative anomalies are months with \
             noticeably less ice than the long-term norm.",
            "#ADD8E6",
            "arctic-background.jpg",
            &["Global warming", "Climate change"],
        ),
    }
}

/// Build one descriptor per dataset, in `DatasetId::ALL` order
pub fn build_catalog(api_base: &str) -> Vec<DatasetDescriptor> {
    DatasetId::ALL
        .into_iter()
        .map(|id| {
            DatasetDescriptor::new(
                id,
                endpoint_url(api_base, endpoint_path(id)),
                display_meta(id),
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_API_BASE;

    #[test]
    fn test_catalog_endpoints() {
        let catalog = build_catalog(DEFAULT_API_BASE);
        let endpoints: Vec<_> = catalog.iter().map(|d| (d.id, d.endpoint())).collect();
        assert_eq!(
            endpoints,
            vec![
                (DatasetId::Temperature, "https://global-warming.org/api/temperature-api"),
                (DatasetId::Co2, "https://global-warming.org/api/co2-api"),
                (DatasetId::Methane, "https://global-warming.org/api/methane-api"),
                (DatasetId::No2, "https://global-warming.org/api/nitrous-oxide-api"),
                (DatasetId::ArcticIce, "https://global-warming.org/api/arctic-api"),
            ]
        );
    }

    #[test]
    fn test_catalog_starts_without_data() {
        for descriptor in build_catalog("http://localhost:9999") {
            assert!(!descriptor.has_data());
            assert!(descriptor.raw_payload.is_none());
            assert!(descriptor.anomaly_series.is_none());
            assert!(descriptor.endpoint().starts_with("http://localhost:9999/"));
        }
    }

    #[test]
    fn test_display_meta_labels_match_names() {
        for id in DatasetId::ALL {
            assert_eq!(display_meta(id).label, id.name());
        }
        assert_eq!(display_meta(DatasetId::ArcticIce).line_color, "#ADD8E6");
    }
}
