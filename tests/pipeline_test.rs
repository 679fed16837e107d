mod common;

use climatrack::error::{ClimateError, FetchFailure};
use climatrack::pipeline::{refresh_all, set_climate_data, set_climate_data_by_name};
use climatrack::store::ClimateStore;
use climatrack::types::DatasetId;
use common::{Canned, FakeFetcher, TEST_API_BASE};
use serde_json::json;
use std::sync::Arc;

fn co2_payload() -> serde_json::Value {
    json!({"co2": [
        {"year": "2024", "month": "1", "day": "1", "cycle": "421.01", "trend": "1.5"},
        {"year": "2024", "month": "1", "day": "2", "cycle": "421.05", "trend": "1.6"}
    ]})
}

#[tokio::test]
async fn test_fetch_extract_and_derive_co2() {
    let fetcher = FakeFetcher::new().respond("co2-api", Canned::Json(co2_payload()));
    let mut store = ClimateStore::new(TEST_API_BASE);

    let samples = set_climate_data(&mut store, &fetcher, DatasetId::Co2).await.unwrap();
    assert_eq!(samples, 2);

    assert_eq!(store.select_item_anomalies(DatasetId::Co2), vec![1.5, 1.6]);
    let descriptor = store.get(DatasetId::Co2);
    assert_eq!(descriptor.raw_payload.as_ref(), Some(&co2_payload()));
    assert_eq!(descriptor.anomaly_series.as_deref(), Some(&[1.5, 1.6][..]));
}

#[tokio::test]
async fn test_server_error_leaves_temperature_empty() {
    let fetcher = FakeFetcher::new().respond("temperature-api", Canned::Status(500));
    let mut store = ClimateStore::new(TEST_API_BASE);

    let err = set_climate_data(&mut store, &fetcher, DatasetId::Temperature)
        .await
        .unwrap_err();
    match err {
        ClimateError::Fetch(e) => {
            assert!(matches!(e.cause, FetchFailure::Status { status: 500 }));
            assert_eq!(e.endpoint, "http://upstream.test/api/temperature-api");
        }
        other => panic!("expected fetch error, got {other:?}"),
    }

    assert!(store.get(DatasetId::Temperature).primary_series.is_none());
    assert!(store.select_item_anomalies(DatasetId::Temperature).is_empty());
    assert!(store.get(DatasetId::Temperature).anomaly_series.is_none());
}

#[tokio::test]
async fn test_missing_field_leaves_series_null() {
    let fetcher = FakeFetcher::new().respond("co2-api", Canned::Json(json!({})));
    let mut store = ClimateStore::new(TEST_API_BASE);

    let err = set_climate_data(&mut store, &fetcher, DatasetId::Co2).await.unwrap_err();
    match err {
        ClimateError::Extraction(e) => assert_eq!(e.missing_field(), Some("co2")),
        other => panic!("expected extraction error, got {other:?}"),
    }
    let descriptor = store.get(DatasetId::Co2);
    assert!(descriptor.primary_series.is_none());
    assert!(descriptor.raw_payload.is_none());
    assert!(store.select_item_anomalies(DatasetId::Co2).is_empty());
}

#[tokio::test]
async fn test_failed_refetch_keeps_previous_data() {
    let fetcher = FakeFetcher::new().respond("co2-api", Canned::Json(co2_payload()));
    let mut store = ClimateStore::new(TEST_API_BASE);
    set_climate_data(&mut store, &fetcher, DatasetId::Co2).await.unwrap();

    fetcher.set("co2-api", Canned::Status(503));
    assert!(set_climate_data(&mut store, &fetcher, DatasetId::Co2).await.is_err());
    assert_eq!(
        store.get(DatasetId::Co2).primary_series.as_ref().map(|s| s.len()),
        Some(2)
    );
}

#[tokio::test]
async fn test_unknown_name_is_not_fetched() {
    let fetcher = FakeFetcher::new();
    let mut store = ClimateStore::new(TEST_API_BASE);

    let err = set_climate_data_by_name(&mut store, &fetcher, "Ozone").await.unwrap_err();
    assert!(matches!(err, ClimateError::NotFound(_)));
    assert_eq!(fetcher.calls(), 0);
}

#[tokio::test]
async fn test_arctic_sentinel_end_to_end() {
    let fetcher = FakeFetcher::new().respond(
        "arctic-api",
        Canned::Json(json!({"arcticData": {"data": {
            "2020-01": {"value": 13.6, "anom": -0.5},
            "2020-02": {"value": 14.4, "anom": -9999}
        }}})),
    );
    let mut store = ClimateStore::new(TEST_API_BASE);

    let samples = set_climate_data_by_name(&mut store, &fetcher, "Arctic Ice").await.unwrap();
    assert_eq!(samples, 2);
    assert_eq!(store.select_item_anomalies(DatasetId::ArcticIce), vec![-0.5]);
}

#[tokio::test]
async fn test_refresh_all_isolates_failures() {
    let fetcher = FakeFetcher::new()
        .respond("temperature-api", Canned::Status(500))
        .respond("co2-api", Canned::Json(co2_payload()))
        .respond("methane-api", Canned::Json(json!({"methane": [{"trend": "1900.2"}]})))
        .respond("nitrous-oxide-api", Canned::Json(json!({"error": "maintenance"})));
    let fetcher = Arc::new(fetcher);
    let mut store = ClimateStore::new(TEST_API_BASE);

    let reports = refresh_all(&mut store, fetcher.clone()).await;

    let ids: Vec<_> = reports.iter().map(|r| r.dataset).collect();
    assert_eq!(ids, DatasetId::ALL.to_vec());
    assert_eq!(fetcher.calls(), 5);

    let ok: Vec<_> = reports
        .iter()
        .filter_map(|r| r.samples.map(|n| (r.dataset, n)))
        .collect();
    assert_eq!(ok, vec![(DatasetId::Co2, 2), (DatasetId::Methane, 1)]);

    for id in [DatasetId::Temperature, DatasetId::No2, DatasetId::ArcticIce] {
        assert!(!store.get(id).has_data(), "{id} should have no data");
    }
    assert_eq!(store.select_item_anomalies(DatasetId::Methane), vec![1900.2]);
}
