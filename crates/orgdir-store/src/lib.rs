//! Storage layer for the organization directory.
//!
//! This crate answers the seven directory queries against either PostgreSQL
//! ([`PgStore`]) or in-memory tables ([`MemoryStore`]).
//!
//! # Schema
//!
//! - `activities`: activity categories
//! - `activities_closures`: `(ancestor_id, descendant_id, depth)` closure of
//!   the activity hierarchy
//! - `buildings`: addresses with latitude/longitude
//! - `organizations`: organizations, each in one building
//! - `organization_activity`: organization ↔ activity join rows
//!
//! # Example
//!
//! ```no_run
//! use orgdir_core::{BuildingId, Page};
//! use orgdir_store::{PgStore, Storage};
//!
//! # async fn example() -> orgdir_store::Result<()> {
//! let pool = sqlx::PgPool::connect("postgres://localhost/orgdir").await?;
//! let store = PgStore::new(pool);
//! store.migrate().await?;
//!
//! let tenants = store
//!     .organizations_by_building(BuildingId::new(1), Page::new(1, 10))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;
use orgdir_core::{ActivityId, BoundingBox, BuildingId, Coordinates, Organization, OrganizationId, Page};

/// The storage trait defining every directory query.
///
/// Each method returns fully hydrated organizations (building and activity
/// set loaded). "Nothing matched" is `Ok` with an empty `Vec` or `None`;
/// `Err` is reserved for storage failures.
#[async_trait]
pub trait Storage: Send + Sync {
    /// Organizations in a building, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<Organization>>;

    /// Organizations directly associated with an activity, ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>>;

    /// An organization by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organization_by_id(&self, organization_id: OrganizationId)
        -> Result<Option<Organization>>;

    /// An organization by its exact, unique name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organization_by_name(&self, name: &str) -> Result<Option<Organization>>;

    /// Organizations whose building is within `radius_km` of `center`
    /// (boundary included), ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<Organization>>;

    /// Organizations whose building lies inside `bbox` (edges included),
    /// ordered by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<Organization>>;

    /// Organizations associated with `activity_id` or any descendant at most
    /// `NESTED_DEPTH` levels below it.
    ///
    /// The page is cut over the distinct organization ids, so an organization
    /// with several qualifying activities appears exactly once.
    ///
    /// # Errors
    ///
    /// Returns an error if the database operation fails.
    async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>>;
}
