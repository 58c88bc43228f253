//! Directory entities.
//!
//! These mirror the persisted tables: `activities`, `activities_closures`,
//! `buildings`, `organizations` and the `organization_activity` join table.
//! An [`Organization`] is always handed out hydrated, carrying its building
//! and full activity set.

use serde::{Deserialize, Serialize};

use crate::geo::Coordinates;
use crate::ids::{ActivityId, BuildingId, OrganizationId};

/// A business activity category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Activity {
    /// Surrogate key.
    pub id: ActivityId,
    /// Display name (at most 50 characters).
    pub name: String,
}

impl Activity {
    /// Create an activity.
    #[must_use]
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id: ActivityId::new(id),
            name: name.into(),
        }
    }
}

/// One row of the activity closure table.
///
/// `depth` is the number of parent→child edges between `ancestor_id` and
/// `descendant_id`; every activity has a self row at depth 0.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ActivityClosure {
    /// The ancestor activity.
    pub ancestor_id: ActivityId,
    /// The descendant activity.
    pub descendant_id: ActivityId,
    /// Edge count from ancestor to descendant.
    pub depth: i32,
}

impl ActivityClosure {
    /// Create a closure row.
    #[must_use]
    pub const fn new(ancestor_id: i64, descendant_id: i64, depth: i32) -> Self {
        Self {
            ancestor_id: ActivityId::new(ancestor_id),
            descendant_id: ActivityId::new(descendant_id),
            depth,
        }
    }
}

/// A building that houses organizations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Building {
    /// Surrogate key.
    pub id: BuildingId,
    /// Postal address.
    pub address: String,
    /// Location.
    pub location: Coordinates,
}

/// An organization with its building and activities loaded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Organization {
    /// Surrogate key.
    pub id: OrganizationId,
    /// Unique name.
    pub name: String,
    /// Free-form phone string; may list several comma-separated numbers.
    pub phone: String,
    /// The building the organization occupies.
    pub building: Building,
    /// Directly associated activities, ordered by id.
    pub activities: Vec<Activity>,
}

/// A row of the `organization_activity` association table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrganizationActivity {
    /// The organization.
    pub organization_id: OrganizationId,
    /// The directly associated activity.
    pub activity_id: ActivityId,
}

impl OrganizationActivity {
    /// Create an association row.
    #[must_use]
    pub const fn new(organization_id: i64, activity_id: i64) -> Self {
        Self {
            organization_id: OrganizationId::new(organization_id),
            activity_id: ActivityId::new(activity_id),
        }
    }
}

/// An organization row before hydration: the building is only referenced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationEntry {
    /// Surrogate key.
    pub id: OrganizationId,
    /// Unique name.
    pub name: String,
    /// Free-form phone string.
    pub phone: String,
    /// Occupied building.
    pub building_id: BuildingId,
}
