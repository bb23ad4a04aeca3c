//! Ingestion API models: sources, destinations, transformations and tasks.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Source types a transformation can be sampled from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceType {
    Json,
    Csv,
    Docker,
    Bigquery,
}

impl SourceType {
    /// Types offered by the source picker.
    pub const SAMPLEABLE: [SourceType; 4] = [
        SourceType::Json,
        SourceType::Csv,
        SourceType::Docker,
        SourceType::Bigquery,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SourceType::Json => "json",
            SourceType::Csv => "csv",
            SourceType::Docker => "docker",
            SourceType::Bigquery => "bigquery",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DestinationType {
    Search,
}

impl DestinationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DestinationType::Search => "search",
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub nb_pages: u32,
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub nb_items: u32,
    #[serde(default)]
    pub items_per_page: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "sourceID")]
    pub source_id: String,
    #[serde(rename = "type")]
    pub source_type: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListSourcesResponse {
    pub sources: Vec<Source>,
    #[serde(default)]
    pub pagination: Pagination,
}

/// `POST /1/sources/{id}/validate`: the sampled records are in `data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SourceValidateResponse {
    #[serde(rename = "runID", default, skip_serializing_if = "Option::is_none")]
    pub run_id: Option<String>,
    #[serde(default)]
    pub data: Option<Vec<Map<String, Value>>>,
    #[serde(default)]
    pub message: String,
}

impl SourceValidateResponse {
    /// The first sampled record, if the source returned any.
    pub fn first_record(&self) -> Option<&Map<String, Value>> {
        self.data.as_ref().and_then(|d| d.first())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transformation {
    #[serde(rename = "transformationID")]
    pub transformation_id: String,
    pub name: String,
    #[serde(default)]
    pub code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTransformationsResponse {
    pub transformations: Vec<Transformation>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformationCreate {
    pub code: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response of both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationWriteResponse {
    #[serde(rename = "transformationID")]
    pub transformation_id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransformationTry {
    pub code: String,
    pub sample_record: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationError {
    #[serde(default)]
    pub code: Option<i64>,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TransformationTryResponse {
    #[serde(default)]
    pub payloads: Vec<Value>,
    #[serde(default)]
    pub error: Option<TransformationError>,
}

impl TransformationTryResponse {
    /// Decodes the first payload, which may be an object or a JSON string.
    pub fn first_payload(&self) -> Option<Result<Value, serde_json::Error>> {
        self.payloads.first().map(|payload| match payload {
            Value::String(raw) => serde_json::from_str(raw),
            other => Ok(other.clone()),
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DestinationInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index_name: Option<String>,
    #[serde(flatten)]
    pub other: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    #[serde(rename = "destinationID")]
    pub destination_id: String,
    #[serde(rename = "type")]
    pub destination_type: String,
    pub name: String,
    pub input: DestinationInput,
    #[serde(rename = "transformationIDs", default)]
    pub transformation_ids: Vec<String>,
    #[serde(rename = "authenticationID", default, skip_serializing_if = "Option::is_none")]
    pub authentication_id: Option<String>,
}

impl Destination {
    pub fn index_name(&self) -> Option<&str> {
        self.input.index_name.as_deref().filter(|n| !n.is_empty())
    }

    pub fn is_linked(&self) -> bool {
        !self.transformation_ids.is_empty()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDestinationsResponse {
    pub destinations: Vec<Destination>,
    #[serde(default)]
    pub pagination: Pagination,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationCreate {
    #[serde(rename = "type")]
    pub destination_type: String,
    pub name: String,
    pub input: DestinationInput,
    #[serde(rename = "authenticationID", default, skip_serializing_if = "Option::is_none")]
    pub authentication_id: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DestinationUpdate {
    #[serde(rename = "transformationIDs", default, skip_serializing_if = "Option::is_none")]
    pub transformation_ids: Option<Vec<String>>,
}

/// Response of both create and update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DestinationWriteResponse {
    #[serde(rename = "destinationID")]
    pub destination_id: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    #[serde(rename = "taskID")]
    pub task_id: String,
    #[serde(rename = "sourceID", default)]
    pub source_id: String,
    #[serde(rename = "destinationID", default)]
    pub destination_id: String,
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListTasksResponse {
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub pagination: Pagination,
}
