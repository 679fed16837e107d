#![allow(dead_code)]

use async_trait::async_trait;
use climatrack::app::ports::JsonFetcher;
use climatrack::error::{FetchError, FetchFailure};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const TEST_API_BASE: &str = "http://upstream.test/api";

pub fn endpoint(path: &str) -> String {
    format!("{}/{}", TEST_API_BASE, path)
}

#[derive(Clone)]
pub enum Canned {
    Json(Value),
    Status(u16),
}

/// In-memory stand-in for the upstream API
#[derive(Default)]
pub struct FakeFetcher {
    responses: Mutex<HashMap<String, Canned>>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(self, path: &str, canned: Canned) -> Self {
        self.set(path, canned);
        self
    }

    pub fn set(&self, path: &str, canned: Canned) {
        self.responses.lock().unwrap().insert(endpoint(path), canned);
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl JsonFetcher for FakeFetcher {
    async fn fetch(&self, endpoint: &str) -> Result<Value, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let canned = self.responses.lock().unwrap().get(endpoint).cloned();
        match canned {
            Some(Canned::Json(body)) => Ok(body),
            Some(Canned::Status(status)) => Err(FetchError::new(endpoint, FetchFailure::Status { status })),
            None => Err(FetchError::new(endpoint, FetchFailure::Status { status: 404 })),
        }
    }
}
