//! PostgreSQL storage implementation.
//!
//! Every query runs in its own read-only transaction taken from the shared
//! pool. The transaction is committed on success; on any early return it is
//! dropped, which rolls it back and hands the connection back to the pool.
//!
//! Organizations are loaded in two statements: one for the organization rows
//! joined to their building, one for the activity links of exactly those
//! organizations.

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool, Postgres, Transaction};

use orgdir_core::{
    Activity, ActivityId, BoundingBox, Building, BuildingId, Coordinates, Organization,
    OrganizationId, Page, EARTH_RADIUS_KM, NESTED_DEPTH,
};

use crate::error::{Result, StoreError};
use crate::schema::all_tables;
use crate::Storage;

/// Prefixes a filter/order tail with the organization + building projection.
macro_rules! select_organizations {
    ($tail:literal) => {
        concat!(
            "SELECT o.id, o.name, o.phone, o.building_id, b.address, b.latitude, b.longitude \
             FROM organizations o \
             JOIN buildings b ON b.id = o.building_id ",
            $tail
        )
    };
}

const ACTIVITY_LINKS_SQL: &str = "SELECT oa.organization_id, a.id AS activity_id, a.name AS activity_name \
     FROM organization_activity oa \
     JOIN activities a ON a.id = oa.activity_id \
     WHERE oa.organization_id = ANY($1) \
     ORDER BY oa.organization_id, a.id";

const NESTED_IDS_SQL: &str = "SELECT DISTINCT oa.organization_id \
     FROM organization_activity oa \
     JOIN activities_closures c ON c.descendant_id = oa.activity_id \
     WHERE c.ancestor_id = $1 AND c.depth <= $2 \
     ORDER BY oa.organization_id \
     LIMIT $3 OFFSET $4";

#[derive(Debug, sqlx::FromRow)]
struct OrganizationRow {
    id: i64,
    name: String,
    phone: String,
    building_id: i64,
    address: String,
    latitude: f64,
    longitude: f64,
}

#[derive(Debug, sqlx::FromRow)]
struct ActivityLinkRow {
    organization_id: i64,
    activity_id: i64,
    activity_name: String,
}

/// PostgreSQL-backed storage implementation.
#[derive(Debug, Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Wrap an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Apply the bundled migrations (schema and reference data).
    ///
    /// # Errors
    ///
    /// Returns an error if a migration fails to apply.
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        tracing::info!("Database migrations applied");
        Ok(())
    }

    /// Verify that every directory table exists.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Integrity` naming the first missing table.
    pub async fn check_schema(&self) -> Result<()> {
        for table in all_tables() {
            let exists = sqlx::query_scalar::<_, bool>("SELECT to_regclass($1) IS NOT NULL")
                .bind(table)
                .fetch_one(&self.pool)
                .await?;

            if !exists {
                return Err(StoreError::Integrity(format!("missing table: {table}")));
            }
        }
        Ok(())
    }

    /// Open the per-call read-only transaction.
    async fn begin_read(&self) -> Result<Transaction<'static, Postgres>> {
        let mut tx = self.pool.begin().await?;
        sqlx::query("SET TRANSACTION READ ONLY")
            .execute(&mut *tx)
            .await?;
        Ok(tx)
    }
}

/// LIMIT and OFFSET as bind values.
fn bounds(page: Page) -> (i64, i64) {
    let limit = i64::try_from(page.limit()).unwrap_or(i64::MAX);
    let offset = i64::try_from(page.offset()).unwrap_or(i64::MAX);
    (limit, offset)
}

/// Attach buildings and activity sets to organization rows, keeping row order.
async fn hydrate(conn: &mut PgConnection, rows: Vec<OrganizationRow>) -> Result<Vec<Organization>> {
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<i64> = rows.iter().map(|row| row.id).collect();
    let links = sqlx::query_as::<_, ActivityLinkRow>(ACTIVITY_LINKS_SQL)
        .bind(&ids)
        .fetch_all(&mut *conn)
        .await?;

    let mut activities: HashMap<i64, Vec<Activity>> = HashMap::new();
    for link in links {
        activities
            .entry(link.organization_id)
            .or_default()
            .push(Activity::new(link.activity_id, link.activity_name));
    }

    rows.into_iter()
        .map(|row| -> Result<Organization> {
            Ok(Organization {
                id: OrganizationId::new(row.id),
                name: row.name,
                phone: row.phone,
                building: Building {
                    id: BuildingId::new(row.building_id),
                    address: row.address,
                    location: Coordinates::new(row.latitude, row.longitude)?,
                },
                activities: activities.remove(&row.id).unwrap_or_default(),
            })
        })
        .collect()
}

#[async_trait]
impl Storage for PgStore {
    async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let (limit, offset) = bounds(page);
        let mut tx = self.begin_read().await?;

        let rows = sqlx::query_as::<_, OrganizationRow>(select_organizations!(
            "WHERE o.building_id = $1 ORDER BY o.id LIMIT $2 OFFSET $3"
        ))
        .bind(building_id.get())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let organizations = hydrate(&mut tx, rows).await?;
        tx.commit().await?;

        tracing::debug!(%building_id, found = organizations.len(), "Organizations by building");
        Ok(organizations)
    }

    async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let (limit, offset) = bounds(page);
        let mut tx = self.begin_read().await?;

        let rows = sqlx::query_as::<_, OrganizationRow>(select_organizations!(
            "JOIN organization_activity oa ON oa.organization_id = o.id \
             WHERE oa.activity_id = $1 ORDER BY o.id LIMIT $2 OFFSET $3"
        ))
        .bind(activity_id.get())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let organizations = hydrate(&mut tx, rows).await?;
        tx.commit().await?;

        tracing::debug!(%activity_id, found = organizations.len(), "Organizations by activity");
        Ok(organizations)
    }

    async fn organization_by_id(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<Organization>> {
        let mut tx = self.begin_read().await?;

        let row = sqlx::query_as::<_, OrganizationRow>(select_organizations!("WHERE o.id = $1"))
            .bind(organization_id.get())
            .fetch_optional(&mut *tx)
            .await?;

        let organization = hydrate(&mut tx, row.into_iter().collect()).await?.pop();
        tx.commit().await?;

        Ok(organization)
    }

    async fn organization_by_name(&self, name: &str) -> Result<Option<Organization>> {
        let mut tx = self.begin_read().await?;

        let row = sqlx::query_as::<_, OrganizationRow>(select_organizations!("WHERE o.name = $1"))
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;

        let organization = hydrate(&mut tx, row.into_iter().collect()).await?.pop();
        tx.commit().await?;

        Ok(organization)
    }

    async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let (limit, offset) = bounds(page);
        let mut tx = self.begin_read().await?;

        // Spherical law of cosines; see orgdir_core::great_circle_distance_km.
        let rows = sqlx::query_as::<_, OrganizationRow>(select_organizations!(
            "WHERE (CASE WHEN b.latitude = $1 AND b.longitude = $2 THEN 0.0 \
                    ELSE $3 * acos(LEAST(1.0, GREATEST(-1.0, \
                        cos(radians($1)) * cos(radians(b.latitude)) \
                        * cos(radians(b.longitude) - radians($2)) \
                        + sin(radians($1)) * sin(radians(b.latitude))))) \
                    END) <= $4 \
             ORDER BY o.id LIMIT $5 OFFSET $6"
        ))
        .bind(center.latitude())
        .bind(center.longitude())
        .bind(EARTH_RADIUS_KM)
        .bind(radius_km)
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let organizations = hydrate(&mut tx, rows).await?;
        tx.commit().await?;

        tracing::debug!(
            latitude = center.latitude(),
            longitude = center.longitude(),
            radius_km,
            found = organizations.len(),
            "Organizations in radius"
        );
        Ok(organizations)
    }

    async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let (limit, offset) = bounds(page);
        let mut tx = self.begin_read().await?;

        let rows = sqlx::query_as::<_, OrganizationRow>(select_organizations!(
            "WHERE b.latitude BETWEEN $1 AND $2 AND b.longitude BETWEEN $3 AND $4 \
             ORDER BY o.id LIMIT $5 OFFSET $6"
        ))
        .bind(bbox.lat_min())
        .bind(bbox.lat_max())
        .bind(bbox.lon_min())
        .bind(bbox.lon_max())
        .bind(limit)
        .bind(offset)
        .fetch_all(&mut *tx)
        .await?;

        let organizations = hydrate(&mut tx, rows).await?;
        tx.commit().await?;

        tracing::debug!(?bbox, found = organizations.len(), "Organizations in bounding box");
        Ok(organizations)
    }

    async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<Organization>> {
        let (limit, offset) = bounds(page);
        let mut tx = self.begin_read().await?;

        // Page over distinct ids first so that organizations linked to several
        // qualifying activities cannot shift page boundaries.
        let ids = sqlx::query_scalar::<_, i64>(NESTED_IDS_SQL)
            .bind(activity_id.get())
            .bind(NESTED_DEPTH)
            .bind(limit)
            .bind(offset)
            .fetch_all(&mut *tx)
            .await?;

        let organizations = if ids.is_empty() {
            Vec::new()
        } else {
            let rows = sqlx::query_as::<_, OrganizationRow>(select_organizations!(
                "WHERE o.id = ANY($1) ORDER BY o.id"
            ))
            .bind(&ids)
            .fetch_all(&mut *tx)
            .await?;

            hydrate(&mut tx, rows).await?
        };
        tx.commit().await?;

        tracing::debug!(
            %activity_id,
            max_depth = NESTED_DEPTH,
            found = organizations.len(),
            "Organizations by nested activity"
        );
        Ok(organizations)
    }
}
