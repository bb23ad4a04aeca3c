//! Ingestion API client: sources, destinations, transformations and tasks.

use reqwest::Method;
use serde_json::{Map, Value, json};

use super::error::ApiError;
use super::transport::{ApiTransport, Credentials, status_error};
use crate::types::{
    Destination, DestinationCreate, DestinationType, DestinationUpdate, DestinationWriteResponse,
    ListDestinationsResponse, ListSourcesResponse, ListTasksResponse,
    ListTransformationsResponse, SourceType, SourceValidateResponse, Transformation,
    TransformationCreate, TransformationTry, TransformationTryResponse,
    TransformationWriteResponse,
};

/// Page size used by the pickers.
pub const ITEMS_PER_PAGE: u32 = 100;

pub struct IngestionClient {
    transport: ApiTransport,
}

impl IngestionClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        Ok(Self {
            transport: ApiTransport::new(base_url, credentials)?,
        })
    }

    pub async fn list_sources(
        &self,
        types: &[SourceType],
        items_per_page: u32,
    ) -> Result<ListSourcesResponse, ApiError> {
        let types = types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",");
        self.transport
            .get(
                &["1", "sources"],
                &[
                    ("type", types),
                    ("itemsPerPage", items_per_page.to_string()),
                ],
            )
            .await
    }

    /// Runs the source once without pushing anything and returns sampled records.
    pub async fn validate_source(&self, source_id: &str) -> Result<SourceValidateResponse, ApiError> {
        self.transport
            .send_json(
                Method::POST,
                &["1", "sources", source_id, "validate"],
                &json!({}),
            )
            .await
    }

    /// Runs `code` against `sample` in the platform sandbox.
    ///
    /// A failing script is reported in the body of a non-2xx response, so the
    /// status is checked after decoding.
    pub async fn try_transformation(
        &self,
        code: &str,
        sample: &Map<String, Value>,
    ) -> Result<TransformationTryResponse, ApiError> {
        let body = TransformationTry {
            code: code.to_string(),
            sample_record: sample.clone(),
        };
        let raw = self
            .transport
            .send_json_raw(Method::POST, &["1", "transformations", "try"], &body)
            .await?;

        if raw.status.is_success() {
            let res: TransformationTryResponse = serde_json::from_slice(&raw.body)?;
            if let Some(error) = res.error.as_ref().filter(|e| !e.message.is_empty()) {
                return Err(ApiError::Transformation(error.message.clone()));
            }
            return Ok(res);
        }

        match serde_json::from_slice::<TransformationTryResponse>(&raw.body) {
            Ok(TransformationTryResponse {
                error: Some(error), ..
            }) if !error.message.is_empty() => Err(ApiError::Transformation(error.message)),
            _ => Err(status_error(raw.status, &raw.body)),
        }
    }

    pub async fn list_transformations(&self) -> Result<ListTransformationsResponse, ApiError> {
        self.transport
            .get(
                &["1", "transformations"],
                &[("itemsPerPage", ITEMS_PER_PAGE.to_string())],
            )
            .await
    }

    pub async fn get_transformation(&self, id: &str) -> Result<Transformation, ApiError> {
        self.transport.get(&["1", "transformations", id], &[]).await
    }

    pub async fn create_transformation(
        &self,
        create: &TransformationCreate,
    ) -> Result<TransformationWriteResponse, ApiError> {
        self.transport
            .send_json(Method::POST, &["1", "transformations"], create)
            .await
    }

    pub async fn update_transformation(
        &self,
        id: &str,
        create: &TransformationCreate,
    ) -> Result<TransformationWriteResponse, ApiError> {
        self.transport
            .send_json(Method::PUT, &["1", "transformations", id], create)
            .await
    }

    pub async fn list_destinations(
        &self,
        types: &[DestinationType],
        items_per_page: u32,
    ) -> Result<ListDestinationsResponse, ApiError> {
        let types = types.iter().map(|t| t.as_str()).collect::<Vec<_>>().join(",");
        self.transport
            .get(
                &["1", "destinations"],
                &[
                    ("type", types),
                    ("itemsPerPage", items_per_page.to_string()),
                ],
            )
            .await
    }

    pub async fn get_destination(&self, id: &str) -> Result<Destination, ApiError> {
        self.transport.get(&["1", "destinations", id], &[]).await
    }

    pub async fn create_destination(
        &self,
        create: &DestinationCreate,
    ) -> Result<DestinationWriteResponse, ApiError> {
        self.transport
            .send_json(Method::POST, &["1", "destinations"], create)
            .await
    }

    pub async fn update_destination(
        &self,
        id: &str,
        update: &DestinationUpdate,
    ) -> Result<DestinationWriteResponse, ApiError> {
        self.transport
            .send_json(Method::PATCH, &["1", "destinations", id], update)
            .await
    }

    pub async fn list_tasks_for_destination(
        &self,
        destination_id: &str,
    ) -> Result<ListTasksResponse, ApiError> {
        self.transport
            .get(
                &["1", "tasks"],
                &[("destinationID", destination_id.to_string())],
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> IngestionClient {
        IngestionClient::new(&server.uri(), Credentials::new("APPID", "secret")).unwrap()
    }

    #[tokio::test]
    async fn test_list_sources_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1/sources"))
            .and(query_param("type", "json,csv,docker,bigquery"))
            .and(query_param("itemsPerPage", "100"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "sources": [{"sourceID": "s-1", "type": "json", "name": "Products"}],
                "pagination": {"nbPages": 1, "page": 1, "nbItems": 1, "itemsPerPage": 100}
            })))
            .expect(1)
            .mount(&server)
            .await;

        let res = client(&server)
            .list_sources(&SourceType::SAMPLEABLE, ITEMS_PER_PAGE)
            .await
            .unwrap();
        assert_eq!(res.sources[0].name, "Products");
    }

    #[tokio::test]
    async fn test_try_transformation_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/transformations/try"))
            .and(body_json(json!({"code": "function f(r){return r}", "sampleRecord": {"a": 1}})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"payloads": [{"a": 1}]})))
            .mount(&server)
            .await;

        let sample = json!({"a": 1}).as_object().unwrap().clone();
        let res = client(&server)
            .try_transformation("function f(r){return r}", &sample)
            .await
            .unwrap();
        assert_eq!(res.first_payload().unwrap().unwrap(), json!({"a": 1}));
    }

    #[tokio::test]
    async fn test_try_transformation_script_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/transformations/try"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "payloads": [],
                "error": {"code": 400, "message": "ReferenceError: foo is not defined"}
            })))
            .mount(&server)
            .await;

        let err = client(&server)
            .try_transformation("foo()", &Map::new())
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "failed to try transformation: ReferenceError: foo is not defined"
        );
    }

    #[tokio::test]
    async fn test_update_destination_uses_patch() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path("/1/destinations/d-1"))
            .and(body_json(json!({"transformationIDs": ["t-1"]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "destinationID": "d-1", "name": "Movies", "updatedAt": "2024-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let res = client(&server)
            .update_destination(
                "d-1",
                &DestinationUpdate {
                    transformation_ids: Some(vec!["t-1".to_string()]),
                },
            )
            .await
            .unwrap();
        assert_eq!(res.destination_id, "d-1");
    }
}
