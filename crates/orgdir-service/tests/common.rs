//! Common test utilities for orgdir integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use axum::Router;
use axum_test::{TestRequest, TestServer};

use orgdir_service::{create_router, AppState, ServiceConfig};
use orgdir_store::MemoryStore;

/// The API key accepted by the harness.
pub const API_KEY: &str = "test-api-key";

/// Header the harness expects the key in.
pub const API_KEY_HEADER: &str = "x-api-key";

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
}

impl TestHarness {
    /// Create a harness over the seeded reference data.
    pub fn new() -> Self {
        let store = MemoryStore::reference().expect("Failed to load reference data");
        Self::with_store(store, Some(API_KEY.to_string()))
    }

    /// Create a harness whose store fails every query.
    pub fn failing() -> Self {
        Self::with_store(
            MemoryStore::failing("connection refused"),
            Some(API_KEY.to_string()),
        )
    }

    /// Create a harness with no API key configured.
    pub fn without_api_key() -> Self {
        let store = MemoryStore::reference().expect("Failed to load reference data");
        Self::with_store(store, None)
    }

    fn with_store(store: MemoryStore, api_key: Option<String>) -> Self {
        let config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            api_key,
            ..ServiceConfig::default()
        };

        let state = AppState::with_store(store, config);
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self { server }
    }

    /// A GET request carrying the valid API key.
    pub fn get(&self, path: &str) -> TestRequest {
        self.server.get(path).add_header(API_KEY_HEADER, API_KEY)
    }
}

impl Default for TestHarness {
    fn default() -> Self {
        Self::new()
    }
}

/// Ids of a JSON list of records, in order.
pub fn ids(body: &serde_json::Value) -> Vec<i64> {
    body.as_array()
        .expect("expected a JSON array")
        .iter()
        .map(|record| record["id"].as_i64().expect("record id"))
        .collect()
}
