//! HTTP clients for the Search and Ingestion APIs.
//!
//! Both clients share one transport, which signs requests with the
//! application ID and API key and maps error responses to [`ApiError`].
//!
//! # Example
//!
//! ```ignore
//! use crate::api::{Credentials, SearchClient};
//!
//! let client = SearchClient::new("https://APPID.algolia.net", Credentials::new("APPID", "key"))?;
//! let settings = client.get_settings("MOVIES").await?;
//! ```

mod error;
mod ingestion;
mod search;
mod transport;

pub use ingestion::{ITEMS_PER_PAGE, IngestionClient};
pub use search::{SearchClient, WaitPolicy};
pub use transport::Credentials;

/// Default Search API host for an application.
pub fn default_search_host(application_id: &str) -> String {
    format!("https://{}.algolia.net", application_id.to_lowercase())
}

/// Default Ingestion API host for a region (`us` or `eu`).
pub fn default_ingestion_host(region: &str) -> String {
    format!("https://data.{}.algolia.com", region)
}
