//! Core types for the organization directory.
//!
//! This crate provides the foundational types shared by the store, the HTTP
//! service and the client SDK:
//!
//! - **Identifiers**: `OrganizationId`, `BuildingId`, `ActivityId`
//! - **Entities**: `Organization`, `Building`, `Activity`, `ActivityClosure`
//! - **Geometry**: `Coordinates`, `BoundingBox`, great-circle distance
//! - **Hierarchy**: `ClosureTable`, `NESTED_DEPTH`
//! - **Pagination**: `Page`
//! - **Records**: `OrganizationRecord`, the flat shape served over HTTP
//! - **Seed data**: the reference data set provisioned by migrations

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod closure;
pub mod error;
pub mod geo;
pub mod ids;
pub mod model;
pub mod page;
pub mod record;
pub mod seed;

pub use closure::{ClosureTable, NESTED_DEPTH};
pub use error::{CoreError, Result};
pub use geo::{great_circle_distance_km, BoundingBox, Coordinates, EARTH_RADIUS_KM, MAX_RADIUS_KM};
pub use ids::{ActivityId, BuildingId, OrganizationId};
pub use model::{
    Activity, ActivityClosure, Building, Organization, OrganizationActivity, OrganizationEntry,
};
pub use page::{Page, DEFAULT_LIMIT, MAX_LIMIT};
pub use record::OrganizationRecord;
pub use seed::{reference_dataset, Dataset};
