//! In-memory storage implementation.
//!
//! Holds the directory tables in ordered maps and answers every query with
//! the same ordering and paging rules as [`crate::PgStore`]. Used by the
//! service tests and for running the API without a database.

use std::collections::{BTreeMap, BTreeSet};

use async_trait::async_trait;

use orgdir_core::{
    reference_dataset, Activity, ActivityId, BoundingBox, Building, BuildingId, ClosureTable,
    Coordinates, Dataset, Organization, OrganizationEntry, OrganizationId, Page, NESTED_DEPTH,
};

use crate::error::{Result, StoreError};
use crate::Storage;

/// In-memory storage.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    activities: BTreeMap<ActivityId, Activity>,
    buildings: BTreeMap<BuildingId, Building>,
    organizations: BTreeMap<OrganizationId, OrganizationEntry>,
    links: BTreeSet<(OrganizationId, ActivityId)>,
    closure: ClosureTable,
    failure: Option<String>,
}

impl MemoryStore {
    /// Load a data set, checking its foreign keys.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Integrity` if an organization references a missing
    /// building or an association references a missing row.
    pub fn new(dataset: Dataset) -> Result<Self> {
        let activities: BTreeMap<_, _> = dataset
            .activities
            .into_iter()
            .map(|activity| (activity.id, activity))
            .collect();
        let buildings: BTreeMap<_, _> = dataset
            .buildings
            .into_iter()
            .map(|building| (building.id, building))
            .collect();

        let mut organizations = BTreeMap::new();
        for entry in dataset.organizations {
            if !buildings.contains_key(&entry.building_id) {
                return Err(StoreError::Integrity(format!(
                    "organization {} references missing building {}",
                    entry.id, entry.building_id
                )));
            }
            organizations.insert(entry.id, entry);
        }

        let mut links = BTreeSet::new();
        for link in dataset.associations {
            if !organizations.contains_key(&link.organization_id) {
                return Err(StoreError::Integrity(format!(
                    "association references missing organization {}",
                    link.organization_id
                )));
            }
            if !activities.contains_key(&link.activity_id) {
                return Err(StoreError::Integrity(format!(
                    "association references missing activity {}",
                    link.activity_id
                )));
            }
            links.insert((link.organization_id, link.activity_id));
        }

        Ok(Self {
            activities,
            buildings,
            organizations,
            links,
            closure: ClosureTable::from_rows(dataset.closures),
            failure: None,
        })
    }

    /// A store holding the reference data set.
    ///
    /// # Errors
    ///
    /// Returns an error if the reference data fails validation.
    pub fn reference() -> Result<Self> {
        Self::new(reference_dataset()?)
    }

    /// A store whose every query fails with `StoreError::Unavailable`.
    #[must_use]
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Self::default()
        }
    }

    fn check_available(&self) -> Result<()> {
        match &self.failure {
            Some(reason) => Err(StoreError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }

    fn hydrate(&self, entry: &OrganizationEntry) -> Result<Organization> {
        let building = self.buildings.get(&entry.building_id).cloned().ok_or_else(|| {
            StoreError::Integrity(format!("missing building {}", entry.building_id))
        })?;

        let activities = self
            .links
            .range((entry.id, ActivityId::new(i64::MIN))..=(entry.id, ActivityId::new(i64::MAX)))
            .filter_map(|(_, activity_id)| self.activities.get(activity_id).cloned())
            .collect();

        Ok(Organization {
            id: entry.id,
            name: entry.name.clone(),
            phone: entry.phone.clone(),
            building,
            activities,
        })
    }

    /// Page over the organizations accepted by `filter`, in id order.
    fn select<F>(&self, page: Page, filter: F) -> Result<Vec<Organization>>
    where
        F: Fn(&OrganizationEntry) -> bool,
    {
        self.check_available()?;
        page.apply(self.organizations.values().filter(|entry| filter(entry)))
            .into_iter()
            .map(|entry| self.hydrate(entry))
            .collect()
    }

    fn location_of(&self, entry: &OrganizationEntry) -> Option<&Coordinates> {
        self.buildings
            .get(&entry.building_id)
            .map(|building| &building.location)
    }
}

#[async_trait]
impl Storage for MemoryStore {
    async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        self.select(page, |entry| entry.building_id == building_id)
    }

    async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        self.select(page, |entry| self.links.contains(&(entry.id, activity_id)))
    }

    async fn organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<Organization>> {
        self.check_available()?;
        self.organizations
            .get(&organization_id)
            .map(|entry| self.hydrate(entry))
            .transpose()
    }

    async fn organization_by_name(&self, name: &str) -> Result<Option<Organization>> {
        self.check_available()?;
        self.organizations
            .values()
            .find(|entry| entry.name == name)
            .map(|entry| self.hydrate(entry))
            .transpose()
    }

    async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<Organization>> {
        self.select(page, |entry| {
            self.location_of(entry)
                .is_some_and(|location| center.distance_km(location) <= radius_km)
        })
    }

    async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<Organization>> {
        self.select(page, |entry| {
            self.location_of(entry)
                .is_some_and(|location| bbox.contains(location))
        })
    }

    async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let qualifying = self.closure.descendants_within(activity_id, NESTED_DEPTH);
        self.select(page, |entry| {
            qualifying
                .iter()
                .any(|&activity| self.links.contains(&(entry.id, activity)))
        })
    }
}
