//! Application state.

use std::sync::Arc;

use orgdir_store::Storage;

use crate::config::ServiceConfig;
use crate::directory::{DirectoryService, OrganizationService};

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The directory service.
    pub service: Arc<dyn OrganizationService>,

    /// Service configuration.
    pub config: ServiceConfig,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(service: Arc<dyn OrganizationService>, config: ServiceConfig) -> Self {
        if config.api_key.is_none() {
            tracing::warn!("API_KEY not configured - every directory request will be rejected");
        }

        Self { service, config }
    }

    /// Create a state serving a [`DirectoryService`] over `store`.
    #[must_use]
    pub fn with_store<S>(store: S, config: ServiceConfig) -> Self
    where
        S: Storage + 'static,
    {
        Self::new(Arc::new(DirectoryService::new(store)), config)
    }
}
