//! The externally shaped organization record.

use serde::{Deserialize, Serialize};

use crate::model::Organization;

/// Flat organization record returned by the API.
///
/// The building is reduced to its address and activities to their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganizationRecord {
    /// Organization id.
    pub id: i64,
    /// Unique name.
    pub name: String,
    /// Phone string as stored.
    pub phone: String,
    /// Address of the occupied building.
    pub building_address: String,
    /// Names of directly associated activities.
    pub activities: Vec<String>,
}

impl From<&Organization> for OrganizationRecord {
    fn from(org: &Organization) -> Self {
        Self {
            id: org.id.get(),
            name: org.name.clone(),
            phone: org.phone.clone(),
            building_address: org.building.address.clone(),
            activities: org.activities.iter().map(|a| a.name.clone()).collect(),
        }
    }
}

impl From<Organization> for OrganizationRecord {
    fn from(org: Organization) -> Self {
        Self {
            id: org.id.get(),
            name: org.name,
            phone: org.phone,
            building_address: org.building.address,
            activities: org.activities.into_iter().map(|a| a.name).collect(),
        }
    }
}
