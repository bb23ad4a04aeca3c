//! Search API client: indices, records, search and dictionaries.

use std::time::Duration;

use reqwest::Method;
use serde_json::{Map, Value};
use tracing::debug;

use super::error::ApiError;
use super::transport::{ApiTransport, Credentials};
use crate::types::{
    BatchAction, BatchRequest, BatchResponse, BatchWriteParams, DeletedAtResponse,
    DictionaryAction, DictionaryBatchParams, DictionaryBatchRequest, DictionaryEntry,
    DictionarySettings, DictionaryType, GetTaskResponse, IndexListResponse, IndexSettings,
    Record, TaskId, TaskStatus, UpdatedAtResponse,
};

/// Records sent per batch request.
pub const BATCH_SIZE: usize = 1000;

/// How task polling backs off.
#[derive(Debug, Clone, Copy)]
pub struct WaitPolicy {
    pub max_attempts: u32,
    pub step: Duration,
    pub max_delay: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 50,
            step: Duration::from_millis(200),
            max_delay: Duration::from_secs(5),
        }
    }
}

impl WaitPolicy {
    /// Delay after the given (1-based) attempt.
    pub fn delay(&self, attempt: u32) -> Duration {
        self.step.saturating_mul(attempt).min(self.max_delay)
    }
}

pub struct SearchClient {
    transport: ApiTransport,
    wait: WaitPolicy,
}

impl SearchClient {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        Ok(Self {
            transport: ApiTransport::new(base_url, credentials)?,
            wait: WaitPolicy::default(),
        })
    }

    pub fn with_wait_policy(mut self, wait: WaitPolicy) -> Self {
        self.wait = wait;
        self
    }

    pub async fn list_indices(&self) -> Result<IndexListResponse, ApiError> {
        self.transport.get(&["1", "indexes"], &[]).await
    }

    pub async fn get_settings(&self, index: &str) -> Result<IndexSettings, ApiError> {
        self.transport
            .get(&["1", "indexes", index, "settings"], &[])
            .await
    }

    pub async fn set_settings(
        &self,
        index: &str,
        settings: &IndexSettings,
    ) -> Result<UpdatedAtResponse, ApiError> {
        self.transport
            .send_json(Method::PUT, &["1", "indexes", index, "settings"], settings)
            .await
    }

    pub async fn delete_index(&self, index: &str) -> Result<DeletedAtResponse, ApiError> {
        self.transport.delete(&["1", "indexes", index]).await
    }

    pub async fn get_task(&self, index: &str, task_id: TaskId) -> Result<TaskStatus, ApiError> {
        let id = task_id.to_string();
        let res: GetTaskResponse = self
            .transport
            .get(&["1", "indexes", index, "task", &id], &[])
            .await?;
        Ok(res.status)
    }

    pub async fn get_app_task(&self, task_id: TaskId) -> Result<TaskStatus, ApiError> {
        let id = task_id.to_string();
        let res: GetTaskResponse = self.transport.get(&["1", "task", &id], &[]).await?;
        Ok(res.status)
    }

    /// Polls an index task until it is published.
    pub async fn wait_for_task(&self, index: &str, task_id: TaskId) -> Result<(), ApiError> {
        for attempt in 1..=self.wait.max_attempts {
            let status = self.get_task(index, task_id).await?;
            debug!(index, task_id, attempt, ?status, "polled task");
            if status == TaskStatus::Published {
                return Ok(());
            }
            if attempt < self.wait.max_attempts {
                tokio::time::sleep(self.wait.delay(attempt)).await;
            }
        }

        Err(ApiError::TaskTimeout {
            task_id,
            attempts: self.wait.max_attempts,
        })
    }

    /// Polls an application-level task (dictionaries) until it is published.
    pub async fn wait_for_app_task(&self, task_id: TaskId) -> Result<(), ApiError> {
        for attempt in 1..=self.wait.max_attempts {
            let status = self.get_app_task(task_id).await?;
            debug!(task_id, attempt, ?status, "polled app task");
            if status == TaskStatus::Published {
                return Ok(());
            }
            if attempt < self.wait.max_attempts {
                tokio::time::sleep(self.wait.delay(attempt)).await;
            }
        }

        Err(ApiError::TaskTimeout {
            task_id,
            attempts: self.wait.max_attempts,
        })
    }

    /// Sends partial updates in chunks of [`BATCH_SIZE`], one response per chunk.
    pub async fn partial_update_objects(
        &self,
        index: &str,
        objects: &[Record],
        create_if_not_exists: bool,
    ) -> Result<Vec<BatchResponse>, ApiError> {
        let action = if create_if_not_exists {
            BatchAction::PartialUpdateObject
        } else {
            BatchAction::PartialUpdateObjectNoCreate
        };

        let mut responses = Vec::with_capacity(objects.len().div_ceil(BATCH_SIZE));
        for chunk in objects.chunks(BATCH_SIZE) {
            let params = BatchWriteParams {
                requests: chunk
                    .iter()
                    .map(|body| BatchRequest {
                        action,
                        body: body.clone(),
                    })
                    .collect(),
            };

            debug!(index, records = chunk.len(), "sending batch");
            let res: BatchResponse = self
                .transport
                .send_json(Method::POST, &["1", "indexes", index, "batch"], &params)
                .await?;
            responses.push(res);
        }

        Ok(responses)
    }

    pub async fn search_single_index(
        &self,
        index: &str,
        params: &Map<String, Value>,
    ) -> Result<Value, ApiError> {
        self.transport
            .send_json(Method::POST, &["1", "indexes", index, "query"], params)
            .await
    }

    pub async fn get_dictionary_settings(&self) -> Result<DictionarySettings, ApiError> {
        self.transport
            .get(&["1", "dictionaries", "*", "settings"], &[])
            .await
    }

    pub async fn set_dictionary_settings(
        &self,
        settings: &DictionarySettings,
    ) -> Result<UpdatedAtResponse, ApiError> {
        self.transport
            .send_json(
                Method::PUT,
                &["1", "dictionaries", "*", "settings"],
                settings,
            )
            .await
    }

    pub async fn batch_dictionary_entries(
        &self,
        dictionary: DictionaryType,
        entries: &[DictionaryEntry],
        clear_existing: bool,
    ) -> Result<UpdatedAtResponse, ApiError> {
        let params = DictionaryBatchParams {
            clear_existing_dictionary_entries: clear_existing,
            requests: entries
                .iter()
                .map(|body| DictionaryBatchRequest {
                    action: DictionaryAction::AddEntry,
                    body: body.clone(),
                })
                .collect(),
        };

        self.transport
            .send_json(
                Method::POST,
                &["1", "dictionaries", dictionary.as_str(), "batch"],
                &params,
            )
            .await
    }
}
