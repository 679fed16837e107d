use crate::error::NotFound;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// The fixed set of climate metrics served by the upstream API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DatasetId {
    Temperature,
    #[serde(rename = "CO2")]
    Co2,
    Methane,
    #[serde(rename = "NO2")]
    No2,
    #[serde(rename = "Arctic Ice")]
    ArcticIce,
}

impl DatasetId {
    pub const ALL: [DatasetId; 5] = [
        DatasetId::Temperature,
        DatasetId::Co2,
        DatasetId::Methane,
        DatasetId::No2,
        DatasetId::ArcticIce,
    ];

    /// Display name, as used in routes and on screen
    pub fn name(self) -> &'static str {
        match self {
            DatasetId::Temperature => "Temperature",
            DatasetId::Co2 => "CO2",
            DatasetId::Methane => "Methane",
            DatasetId::No2 => "NO2",
            DatasetId::ArcticIce => "Arctic Ice",
        }
    }

    /// URL- and CLI-friendly form of the name
    pub fn slug(self) -> &'static str {
        match self {
            DatasetId::Temperature => "temperature",
            DatasetId::Co2 => "co2",
            DatasetId::Methane => "methane",
            DatasetId::No2 => "no2",
            DatasetId::ArcticIce => "arctic-ice",
        }
    }

    /// Position in `ALL`
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for DatasetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DatasetId {
    type Err = NotFound;

    /// Accepts the display name or the slug, ignoring case; `Arctic Ice`,
    /// `arctic-ice` and `arctic_ice` are all the same dataset.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace([' ', '_'], "-");
        DatasetId::ALL
            .into_iter()
            .find(|id| id.slug() == key)
            .ok_or_else(|| NotFound(s.to_string()))
    }
}

/// Presentation metadata; the normalization layer never reads it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayMeta {
    pub label: String,
    pub description: String,
    pub line_color: String,
    pub background: String,
    pub causes: Vec<String>,
}

/// A dataset's primary series, as cut out of the upstream payload
///
/// Most endpoints return an ordered array of records. The arctic endpoint
/// returns an object keyed by period, whose document order is kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Series {
    Sequence(Vec<Value>),
    Mapping(Map<String, Value>),
}

impl Series {
    pub fn len(&self) -> usize {
        match self {
            Series::Sequence(records) => records.len(),
            Series::Mapping(periods) => periods.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Records in upstream order, without period keys
    pub fn records(&self) -> Box<dyn Iterator<Item = &Value> + '_> {
        match self {
            Series::Sequence(records) => Box::new(records.iter()),
            Series::Mapping(periods) => Box::new(periods.values()),
        }
    }
}
