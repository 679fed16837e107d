use crate::app::ports::JsonFetcher;
use crate::datasets::DatasetDescriptor;
use crate::error::{ClimateError, NotFound};
use crate::pipeline::load_dataset;
use crate::store::ClimateStore;
use crate::types::DatasetId;
use axum::{
    extract::{Path, State},
    http::{Method, StatusCode},
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use chrono::{DateTime, Utc};
use hyper::Server;
use serde::Serialize;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};

/// Shared state behind every handler
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RwLock<ClimateStore>>,
    pub fetcher: Arc<dyn JsonFetcher>,
}

impl AppState {
    pub fn new(store: ClimateStore, fetcher: Arc<dyn JsonFetcher>) -> Self {
        Self {
            store: Arc::new(RwLock::new(store)),
            fetcher,
        }
    }
}

/// One row of the dataset listing
#[derive(Debug, Serialize)]
pub struct DatasetSummary {
    pub id: DatasetId,
    pub slug: &'static str,
    pub label: String,
    pub line_color: String,
    pub endpoint: String,
    pub samples: Option<usize>,
    pub anomalies: Option<usize>,
    pub fetched_at: Option<DateTime<Utc>>,
}

impl From<&DatasetDescriptor> for DatasetSummary {
    fn from(d: &DatasetDescriptor) -> Self {
        Self {
            id: d.id,
            slug: d.id.slug(),
            label: d.display_meta.label.clone(),
            line_color: d.display_meta.line_color.clone(),
            endpoint: d.endpoint().to_string(),
            samples: d.primary_series.as_ref().map(|s| s.len()),
            anomalies: d.anomaly_series.as_ref().map(Vec::len),
            fetched_at: d.fetched_at,
        }
    }
}

pub enum ApiError {
    NotFound(NotFound),
    Upstream(ClimateError),
}

impl From<NotFound> for ApiError {
    fn from(e: NotFound) -> Self {
        ApiError::NotFound(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::NotFound(e) => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Upstream(e) => (StatusCode::BAD_GATEWAY, e.to_string()),
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Health check endpoint
async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "service": "climatrack",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn list_datasets(State(state): State<AppState>) -> Json<Vec<DatasetSummary>> {
    let store = state.store.read().await;
    Json(store.descriptors().iter().map(DatasetSummary::from).collect())
}

async fn get_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DatasetDescriptor>, ApiError> {
    let store = state.store.read().await;
    Ok(Json(store.resolve(&name)?.clone()))
}

/// The store lock is released while the upstream request is in flight
async fn fetch_dataset(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<DatasetSummary>, ApiError> {
    let (id, endpoint) = {
        let store = state.store.read().await;
        let descriptor = store.resolve(&name)?;
        (descriptor.id, descriptor.endpoint().to_string())
    };

    let loaded = load_dataset(state.fetcher.as_ref(), id, &endpoint)
        .await
        .map_err(ApiError::Upstream)?;

    let mut store = state.store.write().await;
    store.publish(loaded);
    Ok(Json(DatasetSummary::from(store.get(id))))
}

async fn derive_anomalies(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let mut store = state.store.write().await;
    let id = store.resolve(&name)?.id;
    let anomalies = store.select_item_anomalies(id);
    Ok(Json(json!({ "dataset": id, "anomalies": anomalies })))
}

/// Create the HTTP router with all dataset routes
pub fn create_server(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/datasets", get(list_datasets))
        .route("/api/datasets/:name", get(get_dataset))
        .route("/api/datasets/:name/fetch", post(fetch_dataset))
        .route("/api/datasets/:name/anomalies", post(derive_anomalies))
        .with_state(state)
        .layer(ServiceBuilder::new().layer(cors))
}

/// Serve the dataset API until the process is stopped
pub async fn start_server(state: AppState, addr: SocketAddr) -> Result<(), ClimateError> {
    let app = create_server(state);

    info!("HTTP server running on http://{}", addr);
    info!("Datasets: http://{}/api/datasets", addr);

    Server::try_bind(&addr)?
        .serve(app.into_make_service())
        .await
        .map_err(|e| {
            error!("HTTP server failed: {}", e);
            ClimateError::from(e)
        })
}
