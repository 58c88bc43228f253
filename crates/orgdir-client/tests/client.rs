//! Client SDK tests against a mocked directory service.

use orgdir_client::{ClientError, DirectoryClient};
use orgdir_core::{ActivityId, BuildingId, Coordinates, OrganizationId, Page};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-api-key";

fn record(id: i64, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "name": name,
        "phone": "2-222-222",
        "building_address": "г. Москва, ул. Ленина 1, офис 1",
        "activities": ["Еда"]
    })
}

async fn client(server: &MockServer) -> DirectoryClient {
    DirectoryClient::new(server.uri(), API_KEY).unwrap()
}

#[tokio::test]
async fn sends_api_key_and_paging() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/by-building/"))
        .and(header("x-api-key", API_KEY))
        .and(query_param("building_id", "1"))
        .and(query_param("page", "2"))
        .and(query_param("limit", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record(6, "six")])))
        .expect(1)
        .mount(&server)
        .await;

    let records = client(&server)
        .await
        .organizations_by_building(BuildingId::new(1), Page::new(2, 5))
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
    assert_eq!(records[0].id, 6);
    assert_eq!(records[0].activities, vec!["Еда"]);
}

#[tokio::test]
async fn fetches_single_record_by_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/9"))
        .respond_with(ResponseTemplate::new(200).set_body_json(record(9, "ООО Еда")))
        .mount(&server)
        .await;

    let record = client(&server)
        .await
        .organization(OrganizationId::new(9))
        .await
        .unwrap();

    assert_eq!(record.name, "ООО Еда");
}

#[tokio::test]
async fn sends_radius_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/in-radius/"))
        .and(query_param("latitude", "55.5"))
        .and(query_param("longitude", "37.25"))
        .and(query_param("radius", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([record(1, "one")])))
        .expect(1)
        .mount(&server)
        .await;

    let center = Coordinates::new(55.5, 37.25).unwrap();
    let records = client(&server)
        .await
        .organizations_in_radius(center, 10.0, Page::default())
        .await
        .unwrap();

    assert_eq!(records.len(), 1);
}

#[tokio::test]
async fn not_found_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/organizations/by-nested-activity/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": {"code": "not_found", "message": "Organization not found"}
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .await
        .organizations_by_nested_activity(ActivityId::new(3), Page::default())
        .await;

    assert!(matches!(result, Err(ClientError::NotFound { .. })));
}

#[tokio::test]
async fn forbidden_maps_to_typed_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": "forbidden", "message": "Invalid API Key"}
        })))
        .mount(&server)
        .await;

    let result = client(&server).await.organization_by_name("x").await;

    assert!(matches!(result, Err(ClientError::Forbidden { .. })));
}

#[tokio::test]
async fn other_errors_keep_status_and_code() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": "bad_request", "message": "limit must be between 1 and 20"}
        })))
        .mount(&server)
        .await;

    let result = client(&server)
        .await
        .organizations_by_activity(ActivityId::new(1), Page::new(1, 20))
        .await;

    match result {
        Err(ClientError::Api { code, status, .. }) => {
            assert_eq!(code, "bad_request");
            assert_eq!(status, 400);
        }
        other => panic!("unexpected result: {other:?}"),
    }
}

#[tokio::test]
async fn unparseable_error_body_is_unknown() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let result = client(&server)
        .await
        .organization(OrganizationId::new(1))
        .await;

    assert!(matches!(
        result,
        Err(ClientError::Api { status: 502, ref code, .. }) if code == "unknown"
    ));
}
