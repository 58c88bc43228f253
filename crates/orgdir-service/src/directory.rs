//! Directory service.
//!
//! Sits between the HTTP handlers and [`Storage`]: it turns empty results
//! into [`ServiceError::NotFound`], logs and wraps storage faults, and
//! flattens organizations into [`OrganizationRecord`]s.

use async_trait::async_trait;

use orgdir_core::{
    ActivityId, BoundingBox, BuildingId, Coordinates, Organization, OrganizationId,
    OrganizationRecord, Page,
};
use orgdir_store::{Storage, StoreError};

/// Errors returned by the directory service.
#[derive(Debug, thiserror::Error)]
pub enum ServiceError {
    /// Nothing matched the query.
    #[error("Organization not found")]
    NotFound,

    /// The store failed; the cause has already been logged.
    #[error("storage error: {0}")]
    Storage(#[from] StoreError),
}

/// Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Directory queries as seen by the API layer.
#[async_trait]
pub trait OrganizationService: Send + Sync {
    /// Organizations in a building.
    ///
    /// # Errors
    ///
    /// `NotFound` when the page is empty, `Storage` on store failure.
    async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>>;

    /// Organizations directly associated with an activity.
    ///
    /// # Errors
    ///
    /// `NotFound` when the page is empty, `Storage` on store failure.
    async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>>;

    /// One organization by id.
    ///
    /// # Errors
    ///
    /// `NotFound` when no such organization exists, `Storage` on store failure.
    async fn organization_by_id(&self, organization_id: OrganizationId)
        -> Result<OrganizationRecord>;

    /// One organization by exact name.
    ///
    /// # Errors
    ///
    /// `NotFound` when no such organization exists, `Storage` on store failure.
    async fn organization_by_name(&self, name: &str) -> Result<OrganizationRecord>;

    /// Organizations within `radius_km` of `center`.
    ///
    /// # Errors
    ///
    /// `NotFound` when the page is empty, `Storage` on store failure.
    async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>>;

    /// Organizations inside a bounding box.
    ///
    /// # Errors
    ///
    /// `NotFound` when the page is empty, `Storage` on store failure.
    async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>>;

    /// Organizations under an activity, descendants included.
    ///
    /// # Errors
    ///
    /// `NotFound` when the page is empty, `Storage` on store failure.
    async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>>;
}

/// [`OrganizationService`] over any [`Storage`] backend.
#[derive(Debug, Clone)]
pub struct DirectoryService<S> {
    store: S,
}

impl<S: Storage> DirectoryService<S> {
    /// Create a service over `store`.
    #[must_use]
    pub fn new(store: S) -> Self {
        Self { store }
    }
}

fn records(organizations: Vec<Organization>) -> Result<Vec<OrganizationRecord>> {
    if organizations.is_empty() {
        return Err(ServiceError::NotFound);
    }
    Ok(organizations.into_iter().map(OrganizationRecord::from).collect())
}

fn record(organization: Option<Organization>) -> Result<OrganizationRecord> {
    organization
        .map(OrganizationRecord::from)
        .ok_or(ServiceError::NotFound)
}

#[async_trait]
impl<S: Storage> OrganizationService for DirectoryService<S> {
    async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>> {
        let found = self
            .store
            .organizations_by_building(building_id, page)
            .await
            .map_err(|e| {
                tracing::error!(
                    %building_id,
                    page = page.page,
                    limit = page.limit,
                    error = %e,
                    "Failed to load organizations by building"
                );
                ServiceError::Storage(e)
            })?;
        records(found)
    }

    async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>> {
        let found = self
            .store
            .organizations_by_activity(activity_id, page)
            .await
            .map_err(|e| {
                tracing::error!(
                    %activity_id,
                    page = page.page,
                    limit = page.limit,
                    error = %e,
                    "Failed to load organizations by activity"
                );
                ServiceError::Storage(e)
            })?;
        records(found)
    }

    async fn organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<OrganizationRecord> {
        let found = self
            .store
            .organization_by_id(organization_id)
            .await
            .map_err(|e| {
                tracing::error!(%organization_id, error = %e, "Failed to load organization by id");
                ServiceError::Storage(e)
            })?;
        record(found)
    }

    async fn organization_by_name(&self, name: &str) -> Result<OrganizationRecord> {
        let found = self
            .store
            .organization_by_name(name)
            .await
            .map_err(|e| {
                tracing::error!(name, error = %e, "Failed to load organization by name");
                ServiceError::Storage(e)
            })?;
        record(found)
    }

    async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>> {
        let found = self
            .store
            .organizations_in_radius(center, radius_km, page)
            .await
            .map_err(|e| {
                tracing::error!(
                    latitude = center.latitude(),
                    longitude = center.longitude(),
                    radius_km,
                    page = page.page,
                    limit = page.limit,
                    error = %e,
                    "Failed to load organizations in radius"
                );
                ServiceError::Storage(e)
            })?;
        records(found)
    }

    async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>> {
        let found = self
            .store
            .organizations_in_bbox(bbox, page)
            .await
            .map_err(|e| {
                tracing::error!(
                    ?bbox,
                    page = page.page,
                    limit = page.limit,
                    error = %e,
                    "Failed to load organizations in bounding box"
                );
                ServiceError::Storage(e)
            })?;
        records(found)
    }

    async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>> {
        let found = self
            .store
            .organizations_by_nested_activity(activity_id, page)
            .await
            .map_err(|e| {
                tracing::error!(
                    %activity_id,
                    page = page.page,
                    limit = page.limit,
                    error = %e,
                    "Failed to load organizations by nested activity"
                );
                ServiceError::Storage(e)
            })?;
        records(found)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orgdir_store::MemoryStore;

    fn service() -> DirectoryService<MemoryStore> {
        DirectoryService::new(MemoryStore::reference().unwrap())
    }

    #[tokio::test]
    async fn flattens_records() {
        let record = service()
            .organization_by_id(OrganizationId::new(9))
            .await
            .unwrap();

        assert_eq!(record.id, 9);
        assert_eq!(record.name, "ООО Еда");
        assert_eq!(record.building_address, "г. Москва, ул. Ленина 65, офис 65");
        assert_eq!(
            record.activities,
            vec!["Еда", "Мясная продукция", "Молочная продукция"]
        );
    }

    #[tokio::test]
    async fn empty_page_is_not_found() {
        let result = service()
            .organizations_by_building(BuildingId::new(1), Page::new(5, 10))
            .await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn missing_name_is_not_found() {
        let result = service().organization_by_name("nobody").await;
        assert!(matches!(result, Err(ServiceError::NotFound)));
    }

    #[tokio::test]
    async fn storage_faults_are_wrapped() {
        let service = DirectoryService::new(MemoryStore::failing("disk on fire"));
        let result = service
            .organizations_by_nested_activity(ActivityId::new(1), Page::default())
            .await;
        assert!(matches!(
            result,
            Err(ServiceError::Storage(StoreError::Unavailable(_)))
        ));
    }
}
