//! Table names of the persisted schema.
//!
//! The DDL itself lives in `migrations/`.

/// Table names.
pub mod table {
    /// Organizations, keyed by `id`, unique `name`.
    pub const ORGANIZATIONS: &str = "organizations";

    /// Buildings with CHECK-constrained latitude/longitude.
    pub const BUILDINGS: &str = "buildings";

    /// Activity categories.
    pub const ACTIVITIES: &str = "activities";

    /// Closure of the activity hierarchy, unique on `(ancestor_id, descendant_id)`.
    pub const ACTIVITIES_CLOSURES: &str = "activities_closures";

    /// Organization ↔ activity join rows.
    pub const ORGANIZATION_ACTIVITY: &str = "organization_activity";
}

/// Returns all table names, in dependency order.
#[must_use]
pub fn all_tables() -> Vec<&'static str> {
    vec![
        table::ACTIVITIES,
        table::ACTIVITIES_CLOSURES,
        table::BUILDINGS,
        table::ORGANIZATIONS,
        table::ORGANIZATION_ACTIVITY,
    ]
}
