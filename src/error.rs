use crate::types::DatasetId;
use thiserror::Error;

/// Why a single outbound request produced no usable JSON
#[derive(Error, Debug)]
pub enum FetchFailure {
    #[error("request timed out")]
    Timeout,

    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("upstream responded with status {status}")]
    Status { status: u16 },

    #[error("response body is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
}

impl FetchFailure {
    /// Short label used for metrics and structured logs
    pub fn kind(&self) -> &'static str {
        match self {
            FetchFailure::Timeout => "timeout",
            FetchFailure::Transport(_) => "transport",
            FetchFailure::Status { .. } => "status",
            FetchFailure::Decode(_) => "decode",
        }
    }
}

#[derive(Error, Debug)]
#[error("failed to fetch {endpoint}: {cause}")]
pub struct FetchError {
    pub endpoint: String,
    #[source]
    pub cause: FetchFailure,
}

impl FetchError {
    pub fn new(endpoint: impl Into<String>, cause: FetchFailure) -> Self {
        Self {
            endpoint: endpoint.into(),
            cause,
        }
    }
}

/// The payload did not have the field a dataset's extraction rule reads
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractionError {
    #[error("{id} payload is missing field `{missing_field}`")]
    MissingField { id: DatasetId, missing_field: String },

    #[error("{id} field `{field}` is not {expected}")]
    UnexpectedShape {
        id: DatasetId,
        field: String,
        expected: &'static str,
    },
}

impl ExtractionError {
    pub fn id(&self) -> DatasetId {
        match self {
            ExtractionError::MissingField { id, .. }
            | ExtractionError::UnexpectedShape { id, .. } => *id,
        }
    }

    pub fn missing_field(&self) -> Option<&str> {
        match self {
            ExtractionError::MissingField { missing_field, .. } => Some(missing_field),
            _ => None,
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("climate dataset `{0}` not found")]
pub struct NotFound(pub String);

#[derive(Error, Debug)]
pub enum ClimateError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    #[error(transparent)]
    NotFound(#[from] NotFound),

    #[error("HTTP client setup failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP server error: {0}")]
    Server(#[from] hyper::Error),

    #[error("TOML deserialization failed: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClimateError>;
