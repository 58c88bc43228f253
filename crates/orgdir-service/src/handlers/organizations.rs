//! Organization directory handlers.
//!
//! Every handler authenticates first, then validates its parameters, then
//! makes exactly one service call.

use std::sync::Arc;

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Deserialize;

use orgdir_core::{ActivityId, BuildingId, OrganizationId, OrganizationRecord, DEFAULT_LIMIT};

use crate::auth::ApiKeyAuth;
use crate::error::ApiError;
use crate::state::AppState;
use crate::validation;

fn default_page() -> i64 {
    1
}

fn default_limit() -> i64 {
    i64::from(DEFAULT_LIMIT)
}

/// Query for `GET /organizations/by-building/`.
#[derive(Debug, Deserialize)]
pub struct ByBuildingQuery {
    /// Building id (>= 1).
    pub building_id: i64,
    /// Page number (default 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size (default 10, at most 20).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Query for `GET /organizations/by-activity/` and `/by-nested-activity/`.
#[derive(Debug, Deserialize)]
pub struct ByActivityQuery {
    /// Activity id (>= 1).
    pub activity_id: i64,
    /// Page number (default 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size (default 10, at most 20).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Query for `GET /organizations/by-name/`.
#[derive(Debug, Deserialize)]
pub struct ByNameQuery {
    /// Exact organization name.
    pub name: String,
}

/// Query for `GET /organizations/in-radius/`.
#[derive(Debug, Deserialize)]
pub struct InRadiusQuery {
    /// Center latitude.
    pub latitude: f64,
    /// Center longitude.
    pub longitude: f64,
    /// Radius in kilometres.
    pub radius: f64,
    /// Page number (default 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size (default 10, at most 20).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Query for `GET /organizations/in-bbox/`.
#[derive(Debug, Deserialize)]
pub struct InBboxQuery {
    /// Southern edge.
    pub lat_min: f64,
    /// Western edge.
    pub lon_min: f64,
    /// Northern edge.
    pub lat_max: f64,
    /// Eastern edge.
    pub lon_max: f64,
    /// Page number (default 1).
    #[serde(default = "default_page")]
    pub page: i64,
    /// Page size (default 10, at most 20).
    #[serde(default = "default_limit")]
    pub limit: i64,
}

/// Organizations located in a building.
pub async fn by_building(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ByBuildingQuery>, QueryRejection>,
) -> Result<Json<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let building_id = validation::positive_id("building_id", query.building_id)?;
    let page = validation::page(query.page, query.limit)?;

    let records = state
        .service
        .organizations_by_building(BuildingId::new(building_id), page)
        .await?;

    Ok(Json(records))
}

/// Organizations directly associated with an activity.
pub async fn by_activity(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ByActivityQuery>, QueryRejection>,
) -> Result<Json<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let activity_id = validation::positive_id("activity_id", query.activity_id)?;
    let page = validation::page(query.page, query.limit)?;

    let records = state
        .service
        .organizations_by_activity(ActivityId::new(activity_id), page)
        .await?;

    Ok(Json(records))
}

/// One organization by id.
pub async fn by_id(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    organization_id: Result<Path<i64>, PathRejection>,
) -> Result<Json<OrganizationRecord>, ApiError> {
    let Path(organization_id) = organization_id?;
    let organization_id = validation::positive_id("organization_id", organization_id)?;

    let record = state
        .service
        .organization_by_id(OrganizationId::new(organization_id))
        .await?;

    Ok(Json(record))
}

/// One organization by exact name.
pub async fn by_name(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ByNameQuery>, QueryRejection>,
) -> Result<Json<OrganizationRecord>, ApiError> {
    let Query(query) = query?;
    let name = validation::name(&query.name)?;

    let record = state.service.organization_by_name(name).await?;

    Ok(Json(record))
}

/// Organizations whose building lies within a radius of a point.
pub async fn in_radius(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<InRadiusQuery>, QueryRejection>,
) -> Result<Json<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let center = validation::center(query.latitude, query.longitude)?;
    let radius_km = validation::radius(query.radius)?;
    let page = validation::page(query.page, query.limit)?;

    let records = state
        .service
        .organizations_in_radius(center, radius_km, page)
        .await?;

    Ok(Json(records))
}

/// Organizations whose building lies inside a bounding box.
pub async fn in_bbox(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<InBboxQuery>, QueryRejection>,
) -> Result<Json<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let bbox = validation::bbox(query.lat_min, query.lon_min, query.lat_max, query.lon_max)?;
    let page = validation::page(query.page, query.limit)?;

    let records = state.service.organizations_in_bbox(bbox, page).await?;

    Ok(Json(records))
}

/// Organizations under an activity or any of its descendants.
pub async fn by_nested_activity(
    _auth: ApiKeyAuth,
    State(state): State<Arc<AppState>>,
    query: Result<Query<ByActivityQuery>, QueryRejection>,
) -> Result<Json<Vec<OrganizationRecord>>, ApiError> {
    let Query(query) = query?;
    let activity_id = validation::positive_id("activity_id", query.activity_id)?;
    let page = validation::page(query.page, query.limit)?;

    let records = state
        .service
        .organizations_by_nested_activity(ActivityId::new(activity_id), page)
        .await?;

    Ok(Json(records))
}
