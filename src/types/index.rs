use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Prefix/suffix the platform wraps around virtual replica names.
const VIRTUAL_PREFIX: &str = "virtual(";
const VIRTUAL_SUFFIX: &str = ")";

/// Settings of an index.
///
/// Only the replica topology is typed. Everything else is kept verbatim in
/// `other` so that a `get` followed by a `set` does not drop settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replicas: Option<Vec<String>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl IndexSettings {
    /// Settings that only touch the `replicas` list.
    pub fn with_replicas(replicas: Vec<String>) -> Self {
        Self {
            replicas: Some(replicas),
            ..Self::default()
        }
    }

    pub fn replicas(&self) -> &[String] {
        self.replicas.as_deref().unwrap_or_default()
    }

    pub fn has_replicas(&self) -> bool {
        !self.replicas().is_empty()
    }

    /// A replica index points back to its primary.
    pub fn primary(&self) -> Option<&str> {
        self.primary.as_deref().filter(|p| !p.is_empty())
    }
}

/// Returns the bare name of a `virtual(name)` replica entry.
pub fn unwrap_virtual(replica: &str) -> Option<&str> {
    replica
        .strip_prefix(VIRTUAL_PREFIX)
        .and_then(|rest| rest.strip_suffix(VIRTUAL_SUFFIX))
}

/// Formats a bare replica name as a virtual replica entry.
pub fn virtual_name(replica: &str) -> String {
    format!("{VIRTUAL_PREFIX}{replica}{VIRTUAL_SUFFIX}")
}

/// Checks whether `name` is listed as a virtual replica.
pub fn is_virtual(replicas: &[String], name: &str) -> bool {
    replicas.iter().any(|r| unwrap_virtual(r) == Some(name))
}

/// Returns the replica list without `name`.
pub fn remove_replica(replicas: &[String], name: &str) -> Vec<String> {
    replicas.iter().filter(|r| *r != name).cloned().collect()
}

/// One entry of `GET /1/indexes`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexInfo {
    pub name: String,
    #[serde(default)]
    pub entries: u64,
    #[serde(default)]
    pub data_size: u64,
    #[serde(default)]
    pub file_size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default)]
    pub last_build_time_s: u64,
    #[serde(default)]
    pub pending_task: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub replicas: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexListResponse {
    pub items: Vec<IndexInfo>,
    #[serde(default)]
    pub nb_pages: u32,
}
