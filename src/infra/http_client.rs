use crate::app::ports::JsonFetcher;
use crate::error::{FetchError, FetchFailure, Result};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// `JsonFetcher` backed by a shared reqwest client
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// `timeout` of `None` leaves requests unbounded
    pub fn new(timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder()
            .user_agent(concat!("climatrack/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self {
            client: builder.build()?,
        })
    }
}

fn transport_failure(e: reqwest::Error) -> FetchFailure {
    if e.is_timeout() {
        FetchFailure::Timeout
    } else {
        FetchFailure::Transport(e)
    }
}

#[async_trait]
impl JsonFetcher for ReqwestFetcher {
    async fn fetch(&self, endpoint: &str) -> std::result::Result<Value, FetchError> {
        let fail = |cause| FetchError::new(endpoint, cause);

        let resp = self
            .client
            .get(endpoint)
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|e| fail(transport_failure(e)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(fail(FetchFailure::Status {
                status: status.as_u16(),
            }));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| fail(transport_failure(e)))?;
        debug!(endpoint, bytes = bytes.len(), "Received response body");

        serde_json::from_slice(&bytes).map_err(|e| fail(FetchFailure::Decode(e)))
    }
}
