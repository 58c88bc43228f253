//! Directory HTTP client implementation.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;

use orgdir_core::{
    ActivityId, BoundingBox, BuildingId, Coordinates, OrganizationId, OrganizationRecord, Page,
};

use crate::error::ClientError;

/// Error body returned by the service.
#[derive(Debug, Deserialize)]
struct ApiErrorResponse {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    code: String,
    message: String,
}

/// Organization directory API client.
#[derive(Debug, Clone)]
pub struct DirectoryClient {
    client: Client,
    base_url: String,
    api_key: String,
    api_key_header: String,
}

impl DirectoryClient {
    /// Create a new directory client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the directory service (e.g., `"http://orgdir:8000"`)
    /// * `api_key` - API key sent with every directory request
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::with_options(base_url, api_key, ClientOptions::default())
    }

    /// Create a new directory client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            api_key_header: options.api_key_header,
        })
    }

    /// Organizations in a building.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an empty page, or another error if
    /// the request fails.
    pub async fn organizations_by_building(
        &self,
        building_id: BuildingId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>, ClientError> {
        let mut query = vec![("building_id", building_id.to_string())];
        query.extend(page_params(page));
        self.get("/organizations/by-building/", &query).await
    }

    /// Organizations directly associated with an activity.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an empty page, or another error if
    /// the request fails.
    pub async fn organizations_by_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>, ClientError> {
        let mut query = vec![("activity_id", activity_id.to_string())];
        query.extend(page_params(page));
        self.get("/organizations/by-activity/", &query).await
    }

    /// One organization by id.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if it does not exist, or another error
    /// if the request fails.
    pub async fn organization(
        &self,
        organization_id: OrganizationId,
    ) -> Result<OrganizationRecord, ClientError> {
        self.get(&format!("/organizations/{organization_id}"), &[])
            .await
    }

    /// One organization by exact name.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` if it does not exist, or another error
    /// if the request fails.
    pub async fn organization_by_name(&self, name: &str) -> Result<OrganizationRecord, ClientError> {
        self.get("/organizations/by-name/", &[("name", name.to_string())])
            .await
    }

    /// Organizations within `radius_km` of `center`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an empty page, or another error if
    /// the request fails.
    pub async fn organizations_in_radius(
        &self,
        center: Coordinates,
        radius_km: f64,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>, ClientError> {
        let mut query = vec![
            ("latitude", center.latitude().to_string()),
            ("longitude", center.longitude().to_string()),
            ("radius", radius_km.to_string()),
        ];
        query.extend(page_params(page));
        self.get("/organizations/in-radius/", &query).await
    }

    /// Organizations inside a bounding box.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an empty page, or another error if
    /// the request fails.
    pub async fn organizations_in_bbox(
        &self,
        bbox: BoundingBox,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>, ClientError> {
        let mut query = vec![
            ("lat_min", bbox.lat_min().to_string()),
            ("lon_min", bbox.lon_min().to_string()),
            ("lat_max", bbox.lat_max().to_string()),
            ("lon_max", bbox.lon_max().to_string()),
        ];
        query.extend(page_params(page));
        self.get("/organizations/in-bbox/", &query).await
    }

    /// Organizations under an activity, descendants included.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::NotFound` for an empty page, or another error if
    /// the request fails.
    pub async fn organizations_by_nested_activity(
        &self,
        activity_id: ActivityId,
        page: Page,
    ) -> Result<Vec<OrganizationRecord>, ClientError> {
        let mut query = vec![("activity_id", activity_id.to_string())];
        query.extend(page_params(page));
        self.get("/organizations/by-nested-activity/", &query).await
    }

    async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ClientError> {
        let url = format!("{}{path}", self.base_url);
        tracing::debug!(url = %url, "Directory request");

        let response = self
            .client
            .get(&url)
            .header(self.api_key_header.as_str(), &self.api_key)
            .query(query)
            .send()
            .await?;

        self.handle_response(response).await
    }

    /// Handle API response and convert errors.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        &self,
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response.json().await?);
        }

        let error_body: Result<ApiErrorResponse, _> = response.json().await;

        match error_body {
            Ok(api_error) => {
                let message = api_error.error.message;
                match api_error.error.code.as_str() {
                    "not_found" => Err(ClientError::NotFound { message }),
                    "forbidden" => Err(ClientError::Forbidden { message }),
                    code => Err(ClientError::Api {
                        code: code.to_string(),
                        message,
                        status: status.as_u16(),
                    }),
                }
            }
            Err(_) => Err(ClientError::Api {
                code: "unknown".to_string(),
                message: format!("HTTP {status}"),
                status: status.as_u16(),
            }),
        }
    }
}

fn page_params(page: Page) -> [(&'static str, String); 2] {
    [("page", page.page.to_string()), ("limit", page.limit.to_string())]
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
    /// Header carrying the API key (default: `X-API-Key`).
    pub api_key_header: String,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            api_key_header: "X-API-Key".to_string(),
        }
    }
}

impl ClientOptions {
    /// Create options with a custom API key header.
    #[must_use]
    pub fn with_api_key_header(header: impl Into<String>) -> Self {
        Self {
            api_key_header: header.into(),
            ..Self::default()
        }
    }
}
