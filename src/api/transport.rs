//! Shared HTTP transport: base URL, auth headers and JSON handling.

use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::{ParseError, Url};

use super::error::ApiError;

const USER_AGENT: &str = concat!("algolia-cli/", env!("CARGO_PKG_VERSION"));
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const HEADER_APPLICATION_ID: &str = "X-Algolia-Application-Id";
const HEADER_API_KEY: &str = "X-Algolia-API-Key";

/// Application ID and API key sent with every request.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub application_id: String,
    pub api_key: SecretString,
}

impl Credentials {
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: SecretString::from(api_key.into()),
        }
    }
}

/// A raw response, for endpoints whose error bodies carry data.
pub struct RawResponse {
    pub status: StatusCode,
    pub body: Vec<u8>,
}

pub struct ApiTransport {
    client: Client,
    base_url: Url,
    credentials: Credentials,
}

impl ApiTransport {
    pub fn new(base_url: &str, credentials: Credentials) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            base_url: Url::parse(base_url)?,
            credentials,
        })
    }

    /// Builds a URL from path segments. Each segment is percent-encoded, so
    /// index names containing `/` or spaces stay a single segment.
    pub fn url(&self, segments: &[&str], query: &[(&str, String)]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::Url(ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);

        if !query.is_empty() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
        }

        Ok(url)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let url = self.url(segments, query)?;
        let raw = self.send(Method::GET, url, None).await?;
        decode(raw)
    }

    pub async fn delete<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ApiError> {
        let url = self.url(segments, &[])?;
        let raw = self.send(Method::DELETE, url, None).await?;
        decode(raw)
    }

    pub async fn send_json<B: Serialize, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ApiError> {
        let raw = self.send_json_raw(method, segments, body).await?;
        decode(raw)
    }

    /// Sends a JSON body and returns the response without checking its status.
    pub async fn send_json_raw<B: Serialize>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<RawResponse, ApiError> {
        let url = self.url(segments, &[])?;
        let body = serde_json::to_vec(body)?;
        self.send(method, url, Some(body)).await
    }

    async fn send(
        &self,
        method: Method,
        url: Url,
        body: Option<Vec<u8>>,
    ) -> Result<RawResponse, ApiError> {
        debug!(method = %method, url = %url, "sending request");

        let mut request = self
            .client
            .request(method, url)
            .header(HEADER_APPLICATION_ID, &self.credentials.application_id)
            .header(HEADER_API_KEY, self.credentials.api_key.expose_secret())
            .header(reqwest::header::ACCEPT, "application/json");

        if let Some(body) = body {
            request = request
                .header(reqwest::header::CONTENT_TYPE, "application/json")
                .body(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?.to_vec();

        debug!(status = status.as_u16(), bytes = body.len(), "received response");

        Ok(RawResponse { status, body })
    }
}

/// Decodes a successful response or turns the body into an [`ApiError::Status`].
pub fn decode<T: DeserializeOwned>(raw: RawResponse) -> Result<T, ApiError> {
    if !raw.status.is_success() {
        return Err(status_error(raw.status, &raw.body));
    }
    Ok(serde_json::from_slice(&raw.body)?)
}

/// Uses the platform's `message` field when the body is JSON.
pub fn status_error(status: StatusCode, body: &[u8]) -> ApiError {
    let message = serde_json::from_slice::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("message").and_then(|m| m.as_str()).map(str::to_string))
        .unwrap_or_else(|| {
            let text = String::from_utf8_lossy(body).trim().to_string();
            if text.is_empty() {
                status.canonical_reason().unwrap_or("request failed").to_string()
            } else {
                text
            }
        });

    ApiError::Status { status, message }
}
