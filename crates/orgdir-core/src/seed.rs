//! Reference data set.
//!
//! The same rows are inserted by the store's seed migration. Keeping them here
//! as values lets the in-memory store and tests run against the exact data a
//! provisioned database holds.

use crate::error::Result;
use crate::geo::Coordinates;
use crate::ids::{ActivityId, BuildingId, OrganizationId};
use crate::model::{Activity, ActivityClosure, Building, OrganizationActivity, OrganizationEntry};

const PHONES: &str = "2-222-222, 3-333-333, 8-923-666-13-13";

/// Parent→child edges of the seeded activity hierarchy.
pub const HIERARCHY_EDGES: [(i64, i64); 6] = [(1, 2), (1, 3), (4, 5), (4, 6), (6, 7), (6, 8)];

/// A complete set of directory tables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Dataset {
    /// `activities` rows.
    pub activities: Vec<Activity>,
    /// `activities_closures` rows.
    pub closures: Vec<ActivityClosure>,
    /// `buildings` rows.
    pub buildings: Vec<Building>,
    /// `organizations` rows.
    pub organizations: Vec<OrganizationEntry>,
    /// `organization_activity` rows.
    pub associations: Vec<OrganizationActivity>,
}

/// The reference data set.
///
/// # Errors
///
/// Fails only if a seeded coordinate is out of range.
pub fn reference_dataset() -> Result<Dataset> {
    let activities = vec![
        Activity::new(1, "Еда"),
        Activity::new(2, "Мясная продукция"),
        Activity::new(3, "Молочная продукция"),
        Activity::new(4, "Автомобили"),
        Activity::new(5, "Грузовые"),
        Activity::new(6, "Легковые"),
        Activity::new(7, "Запчасти"),
        Activity::new(8, "Аксессуары"),
    ];

    let closures = vec![
        ActivityClosure::new(1, 2, 1),
        ActivityClosure::new(1, 3, 1),
        ActivityClosure::new(4, 8, 2),
        ActivityClosure::new(4, 5, 1),
        ActivityClosure::new(4, 6, 1),
        ActivityClosure::new(4, 7, 2),
        ActivityClosure::new(6, 7, 1),
        ActivityClosure::new(6, 8, 1),
        ActivityClosure::new(1, 1, 0),
        ActivityClosure::new(2, 2, 0),
        ActivityClosure::new(3, 3, 0),
        ActivityClosure::new(4, 4, 0),
        ActivityClosure::new(5, 5, 0),
        ActivityClosure::new(6, 6, 0),
        ActivityClosure::new(7, 7, 0),
        ActivityClosure::new(8, 8, 0),
    ];

    let buildings = [
        (1, "г. Москва, ул. Ленина 1, офис 1", 55.75222, 37.62778),
        (2, "г. Москва, ул. Ленина 2, офис 2", 55.76222, 37.63778),
        (3, "г. Москва, ул. Ленина 3, офис 3", 55.77222, 37.64778),
        (4, "г. Москва, ул. Ленина 4, офис 4", 56.76222, 38.63778),
        (5, "г. Москва, ул. Ленина 55, офис 55", 80.76222, 60.63778),
        (6, "г. Москва, ул. Ленина 65, офис 65", 88.76222, 66.63778),
        (7, "г. Москва, ул. Ленина 10, офис 10", 57.76222, 39.63778),
        (8, "г. Москва, ул. Ленина 15, офис 15", 58.76222, 40.63778),
    ]
    .into_iter()
    .map(|(id, address, latitude, longitude)| -> Result<Building> {
        Ok(Building {
            id: BuildingId::new(id),
            address: address.to_string(),
            location: Coordinates::new(latitude, longitude)?,
        })
    })
    .collect::<Result<Vec<_>>>()?;

    let organizations = [
        (1, "ООО Рога и Копыта", PHONES, 1),
        (2, "ООО Рога и Рога", "2-222-222", 1),
        (3, "ООО Копыта и Копыта", "3-333-333", 1),
        (4, "ООО И и И", "8-923-666-13-13", 2),
        (5, "ООО Рог и Копыто", PHONES, 2),
        (6, "ООО Здесь может быть ваша реклама", PHONES, 3),
        (7, "ООО ООО ООО", PHONES, 4),
        (8, "ООО Рога Копыта", PHONES, 5),
        (9, "ООО Еда", PHONES, 6),
        (10, "ООО Автомобили", PHONES, 6),
        (11, "ОООЕда и Автомобили", PHONES, 6),
    ]
    .into_iter()
    .map(|(id, name, phone, building_id)| OrganizationEntry {
        id: OrganizationId::new(id),
        name: name.to_string(),
        phone: phone.to_string(),
        building_id: BuildingId::new(building_id),
    })
    .collect();

    let associations = [
        (1, 1),
        (2, 2),
        (3, 3),
        (4, 4),
        (5, 5),
        (6, 6),
        (7, 7),
        (8, 8),
        (9, 1),
        (9, 2),
        (9, 3),
        (10, 4),
        (10, 5),
        (10, 6),
        (10, 7),
        (10, 8),
        (11, 1),
        (11, 2),
        (11, 3),
        (11, 4),
        (11, 5),
        (11, 6),
        (11, 7),
        (11, 8),
    ]
    .into_iter()
    .map(|(organization_id, activity_id)| OrganizationActivity::new(organization_id, activity_id))
    .collect();

    Ok(Dataset {
        activities,
        closures,
        buildings,
        organizations,
        associations,
    })
}

/// The seeded hierarchy as typed edges.
#[must_use]
pub fn hierarchy_edges() -> Vec<(ActivityId, ActivityId)> {
    HIERARCHY_EDGES
        .iter()
        .map(|&(parent, child)| (ActivityId::new(parent), ActivityId::new(child)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::closure::ClosureTable;

    #[test]
    fn seeded_closure_matches_hierarchy() {
        let dataset = reference_dataset().unwrap();
        let derived = ClosureTable::from_edges(
            dataset.activities.iter().map(|a| a.id),
            &hierarchy_edges(),
        )
        .unwrap();

        assert_eq!(ClosureTable::from_rows(dataset.closures), derived);
    }

    #[test]
    fn organization_nine_sells_food() {
        let dataset = reference_dataset().unwrap();
        let linked: Vec<i64> = dataset
            .associations
            .iter()
            .filter(|a| a.organization_id == OrganizationId::new(9))
            .map(|a| a.activity_id.get())
            .collect();
        assert_eq!(linked, vec![1, 2, 3]);
    }

    #[test]
    fn names_are_unique() {
        let dataset = reference_dataset().unwrap();
        let mut names: Vec<_> = dataset.organizations.iter().map(|o| &o.name).collect();
        names.sort();
        names.dedup();
        assert_eq!(names.len(), dataset.organizations.len());
    }
}
