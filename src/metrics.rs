//! Fetch-pipeline metrics
//!
//! Recorded through the `metrics` facade; without an installed recorder
//! every call is a no-op, so the library never requires an exporter.

use std::net::SocketAddr;
use std::sync::Once;
use tracing::{info, warn};

static INIT: Once = Once::new();

pub const FETCH_SUCCESS: &str = "climatrack_fetch_success_total";
pub const FETCH_ERROR: &str = "climatrack_fetch_error_total";
pub const FETCH_DURATION: &str = "climatrack_fetch_duration_seconds";
pub const EXTRACTION_ERROR: &str = "climatrack_extraction_error_total";
pub const SAMPLES_EXTRACTED: &str = "climatrack_samples_extracted";

/// Install the Prometheus exporter on `addr`. Idempotent.
pub fn init_metrics(addr: SocketAddr) {
    INIT.call_once(|| {
        let builder =
            metrics_exporter_prometheus::PrometheusBuilder::new().with_http_listener(addr);
        match builder.install() {
            Ok(()) => info!("Prometheus exporter listening on http://{}/metrics", addr),
            Err(e) => warn!("Prometheus exporter install failed: {}", e),
        }
    });
}

pub mod fetch {
    use super::*;

    pub fn record_success(dataset: &'static str, duration_secs: f64) {
        ::metrics::counter!(FETCH_SUCCESS, "dataset" => dataset).increment(1);
        ::metrics::histogram!(FETCH_DURATION, "dataset" => dataset).record(duration_secs);
    }

    pub fn record_error(dataset: &'static str, error_type: &'static str) {
        ::metrics::counter!(FETCH_ERROR, "dataset" => dataset, "error_type" => error_type)
            .increment(1);
    }
}

pub mod normalize {
    use super::*;

    pub fn record_samples(dataset: &'static str, samples: usize) {
        ::metrics::histogram!(SAMPLES_EXTRACTED, "dataset" => dataset).record(samples as f64);
    }

    pub fn record_extraction_error(dataset: &'static str) {
        ::metrics::counter!(EXTRACTION_ERROR, "dataset" => dataset).increment(1);
    }
}
