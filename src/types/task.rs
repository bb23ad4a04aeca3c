use serde::{Deserialize, Serialize};

pub type TaskId = i64;

/// Publication state of an asynchronous task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TaskStatus {
    Published,
    NotPublished,
}

/// `GET /1/indexes/{index}/task/{id}` and `GET /1/task/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GetTaskResponse {
    pub status: TaskStatus,
}

/// Response of any write that enqueues a task (settings, dictionaries).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatedAtResponse {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// `DELETE /1/indexes/{index}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeletedAtResponse {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    #[serde(default)]
    pub deleted_at: Option<String>,
}

/// `POST /1/indexes/{index}/batch`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchResponse {
    #[serde(rename = "taskID")]
    pub task_id: TaskId,
    #[serde(rename = "objectIDs", default)]
    pub object_ids: Vec<String>,
}
