//! Directory endpoint integration tests.

mod common;

use common::{ids, TestHarness};
use orgdir_core::Coordinates;

// ============================================================================
// By Building
// ============================================================================

#[tokio::test]
async fn by_building_returns_tenants() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 1)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![1, 2, 3]);
    assert_eq!(body[0]["name"], "ООО Рога и Копыта");
    assert_eq!(body[0]["building_address"], "г. Москва, ул. Ленина 1, офис 1");
    assert_eq!(body[0]["activities"], serde_json::json!(["Еда"]));
}

#[tokio::test]
async fn by_building_pages_are_ordered_and_disjoint() {
    let harness = TestHarness::new();

    let first: serde_json::Value = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 6)
        .add_query_param("limit", 2)
        .await
        .json();
    let second: serde_json::Value = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 6)
        .add_query_param("page", 2)
        .add_query_param("limit", 2)
        .await
        .json();

    assert_eq!(ids(&first), vec![9, 10]);
    assert_eq!(ids(&second), vec![11]);
}

#[tokio::test]
async fn by_building_past_last_page_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 1)
        .add_query_param("page", 2)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn by_building_far_page_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 1)
        .add_query_param("page", 5_000_000_000_i64)
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn by_building_unknown_building_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-building/")
        .add_query_param("building_id", 99)
        .await;

    response.assert_status_not_found();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "not_found");
}

// ============================================================================
// By Activity
// ============================================================================

#[tokio::test]
async fn by_activity_includes_direct_links_only() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-activity/")
        .add_query_param("activity_id", 2)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![2, 9, 11]);
}

// ============================================================================
// By Id / By Name
// ============================================================================

#[tokio::test]
async fn by_id_returns_record() {
    let harness = TestHarness::new();

    let response = harness.get("/organizations/10").await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], 10);
    assert_eq!(body["name"], "ООО Автомобили");
    assert_eq!(body["phone"], "2-222-222, 3-333-333, 8-923-666-13-13");
    assert_eq!(body["activities"].as_array().map(Vec::len), Some(5));
}

#[tokio::test]
async fn by_id_missing_is_not_found() {
    let harness = TestHarness::new();

    let response = harness.get("/organizations/500").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn by_name_exact_match() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-name/")
        .add_query_param("name", "ООО Еда")
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["id"], 9);
}

#[tokio::test]
async fn by_name_partial_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-name/")
        .add_query_param("name", "Еда")
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// Geography
// ============================================================================

#[tokio::test]
async fn in_radius_zero_keeps_buildings_at_center() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", 55.75222)
        .add_query_param("longitude", 37.62778)
        .add_query_param("radius", 0)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![1, 2, 3]);
}

#[tokio::test]
async fn in_radius_grows_with_radius() {
    let harness = TestHarness::new();

    let near: serde_json::Value = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", 55.75222)
        .add_query_param("longitude", 37.62778)
        .add_query_param("radius", 5)
        .await
        .json();
    let far: serde_json::Value = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", 55.75222)
        .add_query_param("longitude", 37.62778)
        .add_query_param("radius", 500)
        .add_query_param("limit", 20)
        .await
        .json();

    assert_eq!(ids(&near), vec![1, 2, 3, 4, 5, 6]);
    assert_eq!(ids(&far), vec![1, 2, 3, 4, 5, 6, 7]);
}

#[tokio::test]
async fn in_radius_boundary_is_inclusive() {
    let harness = TestHarness::new();
    let center = Coordinates::new(55.75222, 37.62778).unwrap();
    let distance = center.distance_km(&Coordinates::new(55.76222, 37.63778).unwrap());

    let at: serde_json::Value = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", center.latitude())
        .add_query_param("longitude", center.longitude())
        .add_query_param("radius", distance)
        .await
        .json();
    let short: serde_json::Value = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", center.latitude())
        .add_query_param("longitude", center.longitude())
        .add_query_param("radius", distance - 1e-9)
        .await
        .json();

    assert_eq!(ids(&at), vec![1, 2, 3, 4, 5]);
    assert_eq!(ids(&short), vec![1, 2, 3]);
}

#[tokio::test]
async fn in_radius_far_from_everything_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/in-radius/")
        .add_query_param("latitude", -45.0)
        .add_query_param("longitude", -120.0)
        .add_query_param("radius", 1000)
        .await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn in_bbox_edges_are_inclusive() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/in-bbox/")
        .add_query_param("lat_min", 55.75222)
        .add_query_param("lon_min", 37.62778)
        .add_query_param("lat_max", 55.76222)
        .add_query_param("lon_max", 37.63778)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![1, 2, 3, 4, 5]);
}

#[tokio::test]
async fn in_bbox_inverted_is_not_found() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/in-bbox/")
        .add_query_param("lat_min", 60.0)
        .add_query_param("lon_min", 40.0)
        .add_query_param("lat_max", 50.0)
        .add_query_param("lon_max", 30.0)
        .await;

    response.assert_status_not_found();
}

// ============================================================================
// By Nested Activity
// ============================================================================

#[tokio::test]
async fn nested_activity_includes_descendants() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-nested-activity/")
        .add_query_param("activity_id", 1)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![1, 2, 3, 9, 11]);
}

#[tokio::test]
async fn nested_activity_reaches_grandchildren() {
    let harness = TestHarness::new();

    // 4 -> 6 -> 7: organization 7 is linked only to the grandchild.
    let response = harness
        .get("/organizations/by-nested-activity/")
        .add_query_param("activity_id", 4)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![4, 5, 6, 7, 8, 10, 11]);
}

#[tokio::test]
async fn nested_activity_pages_have_no_duplicates() {
    let harness = TestHarness::new();

    let mut seen = Vec::new();
    for page in 1..=3 {
        let response = harness
            .get("/organizations/by-nested-activity/")
            .add_query_param("activity_id", 4)
            .add_query_param("page", page)
            .add_query_param("limit", 3)
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let page_ids = ids(&body);
        assert!(page_ids.len() <= 3);
        seen.extend(page_ids);
    }

    assert_eq!(seen, vec![4, 5, 6, 7, 8, 10, 11]);
}

#[tokio::test]
async fn nested_activity_leaf_matches_direct_links() {
    let harness = TestHarness::new();

    let response = harness
        .get("/organizations/by-nested-activity/")
        .add_query_param("activity_id", 8)
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(ids(&body), vec![8, 10, 11]);
}
