use crate::app::ports::JsonFetcher;
use crate::error::{ClimateError, Result};
use crate::metrics;
use crate::normalize;
use crate::store::{ClimateStore, LoadedDataset};
use crate::types::DatasetId;
use chrono::Utc;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tokio::task::JoinSet;
use tracing::{error, info, instrument, warn};

/// Outcome of refreshing one dataset
#[derive(Debug, Clone, Serialize)]
pub struct RefreshReport {
    pub dataset: DatasetId,
    pub samples: Option<usize>,
    pub error: Option<String>,
}

impl RefreshReport {
    fn from_result(dataset: DatasetId, result: &Result<usize>) -> Self {
        match result {
            Ok(samples) => Self {
                dataset,
                samples: Some(*samples),
                error: None,
            },
            Err(e) => Self {
                dataset,
                samples: None,
                error: Some(e.to_string()),
            },
        }
    }
}

/// Fetch a dataset's endpoint and extract its primary series
///
/// Touches no store; the caller publishes the result. Failures are logged
/// here and returned so the caller can show "no data" for this dataset.
#[instrument(skip(fetcher), fields(dataset = %id))]
pub async fn load_dataset(
    fetcher: &dyn JsonFetcher,
    id: DatasetId,
    endpoint: &str,
) -> Result<LoadedDataset> {
    let started = Instant::now();
    let payload = match fetcher.fetch(endpoint).await {
        Ok(payload) => payload,
        Err(e) => {
            metrics::fetch::record_error(id.slug(), e.cause.kind());
            error!(endpoint, error = %e, "Error fetching data");
            return Err(e.into());
        }
    };
    metrics::fetch::record_success(id.slug(), started.elapsed().as_secs_f64());

    let series = match normalize::extract_primary(id, &payload) {
        Ok(series) => series,
        Err(e) => {
            metrics::normalize::record_extraction_error(id.slug());
            warn!(endpoint, error = %e, "Payload did not contain the expected series");
            return Err(e.into());
        }
    };
    metrics::normalize::record_samples(id.slug(), series.len());

    Ok(LoadedDataset {
        id,
        payload,
        series,
        fetched_at: Utc::now(),
    })
}

/// Fetch, extract and publish one dataset; returns the sample count
pub async fn set_climate_data(
    store: &mut ClimateStore,
    fetcher: &dyn JsonFetcher,
    id: DatasetId,
) -> Result<usize> {
    let endpoint = store.get(id).endpoint().to_string();
    let loaded = load_dataset(fetcher, id, &endpoint).await?;
    let samples = loaded.series.len();
    store.publish(loaded);
    Ok(samples)
}

/// Name-based variant of `set_climate_data`; unknown names are logged
pub async fn set_climate_data_by_name(
    store: &mut ClimateStore,
    fetcher: &dyn JsonFetcher,
    name: &str,
) -> Result<usize> {
    let id = store.resolve(name).map(|d| d.id).map_err(|e| {
        error!("Climate type {} not found", name);
        ClimateError::from(e)
    })?;
    set_climate_data(store, fetcher, id).await
}

/// Refresh every dataset concurrently
///
/// Each dataset is published as soon as its own fetch completes; a failure
/// in one never affects the others.
pub async fn refresh_all(store: &mut ClimateStore, fetcher: Arc<dyn JsonFetcher>) -> Vec<RefreshReport> {
    let mut tasks = JoinSet::new();
    for descriptor in store.descriptors() {
        let fetcher = fetcher.clone();
        let id = descriptor.id;
        let endpoint = descriptor.endpoint().to_string();
        tasks.spawn(async move { (id, load_dataset(fetcher.as_ref(), id, &endpoint).await) });
    }

    let mut reports = Vec::with_capacity(DatasetId::ALL.len());
    while let Some(joined) = tasks.join_next().await {
        let (id, loaded) = match joined {
            Ok(pair) => pair,
            Err(e) => {
                error!("Refresh task failed: {}", e);
                continue;
            }
        };
        let result = loaded.map(|loaded| {
            let samples = loaded.series.len();
            store.publish(loaded);
            samples
        });
        reports.push(RefreshReport::from_result(id, &result));
    }

    reports.sort_by_key(|r| r.dataset);
    let failed = reports.iter().filter(|r| r.error.is_some()).count();
    info!(datasets = reports.len(), failed, "Refresh finished");
    reports
}
