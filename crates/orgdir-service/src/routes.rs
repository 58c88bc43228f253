//! Router configuration.

use std::sync::Arc;
use std::time::Duration;

use axum::routing::get;
use axum::Router;
use tower::limit::ConcurrencyLimitLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{health, organizations};
use crate::state::AppState;

/// Maximum concurrent requests for directory endpoints.
const DIRECTORY_MAX_CONCURRENT_REQUESTS: usize = 100;

/// Create the service router with all routes and middleware.
///
/// # Routes
///
/// ## Public
/// - `GET /health` - Health check
///
/// ## Directory (API key auth, rate-limited)
/// - `GET /organizations/by-building/` - By building id
/// - `GET /organizations/by-activity/` - By directly linked activity
/// - `GET /organizations/by-name/` - By exact name
/// - `GET /organizations/in-radius/` - Within a radius of a point
/// - `GET /organizations/in-bbox/` - Inside a bounding box
/// - `GET /organizations/by-nested-activity/` - By activity subtree
/// - `GET /organizations/:organization_id` - By id
pub fn create_router(state: AppState) -> Router {
    // Extract config values before moving state
    let cors = build_cors_layer(&state.config.cors_origins);
    let request_timeout_seconds = state.config.request_timeout_seconds;

    let state = Arc::new(state);

    let directory_routes = Router::new()
        .route("/by-building/", get(organizations::by_building))
        .route("/by-activity/", get(organizations::by_activity))
        .route("/by-name/", get(organizations::by_name))
        .route("/in-radius/", get(organizations::in_radius))
        .route("/in-bbox/", get(organizations::in_bbox))
        .route(
            "/by-nested-activity/",
            get(organizations::by_nested_activity),
        )
        .route("/:organization_id", get(organizations::by_id))
        .layer(ConcurrencyLimitLayer::new(DIRECTORY_MAX_CONCURRENT_REQUESTS));

    Router::new()
        .route("/health", get(health::health))
        .nest("/organizations", directory_routes)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(TimeoutLayer::new(Duration::from_secs(
            request_timeout_seconds,
        )))
        .with_state(state)
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|o| o == "*") {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
