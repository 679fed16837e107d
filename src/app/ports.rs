use async_trait::async_trait;
use serde_json::Value;

use crate::error::FetchError;

/// Outbound side of the pipeline: one GET, parsed as JSON
#[async_trait]
pub trait JsonFetcher: Send + Sync {
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError>;
}
