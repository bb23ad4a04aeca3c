//! API client errors.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message} (HTTP {status})")]
    Status { status: StatusCode, message: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("task {task_id} not published after {attempts} attempts")]
    TaskTimeout { task_id: i64, attempts: u32 },

    #[error("failed to try transformation: {0}")]
    Transformation(String),
}
