//! Organization directory HTTP API service.
//!
//! Read-only queries over organizations, their buildings and the activity
//! hierarchy, served under `/organizations`.
//!
//! # Authentication
//!
//! Directory routes require the configured API key in the configured header
//! (`X-API-Key` by default). Missing or wrong keys get 403.

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
// Allow some pedantic lints that are noisy for Axum handler functions
#![allow(clippy::missing_errors_doc)] // Axum handlers all return Result
#![allow(clippy::unused_async)] // Health handler is async for the router

pub mod auth;
pub mod config;
pub mod directory;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;
pub mod validation;

pub use config::{LogFormat, ServiceConfig};
pub use directory::{DirectoryService, OrganizationService, ServiceError};
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
