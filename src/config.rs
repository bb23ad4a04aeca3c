//! Profile configuration.
//!
//! Config is stored at `~/.config/algolia/config.toml` and contains one
//! table per profile:
//!
//! ```toml
//! [profiles.default]
//! application_id = "ABC123"
//! api_key = "..."
//! default = true
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};

use crate::api::{Credentials, default_ingestion_host, default_search_host};

const CONFIG_DIR: &str = "algolia";
const CONFIG_FILE: &str = "config.toml";

/// Ingestion API region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Region {
    #[default]
    Us,
    Eu,
}

impl Region {
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::Us => "us",
            Region::Eu => "eu",
        }
    }
}

/// A named set of credentials.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub application_id: String,

    pub api_key: String,

    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub default: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<Region>,

    /// Overrides the Search API host (e.g. for a proxy).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_host: Option<String>,

    /// Overrides the Ingestion API host.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ingestion_host: Option<String>,
}

impl Profile {
    pub fn new(application_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            application_id: application_id.into(),
            api_key: api_key.into(),
            default: false,
            region: None,
            search_host: None,
            ingestion_host: None,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

/// Values given on the command line or through the environment. They win
/// over whatever the selected profile holds.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub profile: Option<String>,
    pub application_id: Option<String>,
    pub api_key: Option<String>,
    pub search_host: Option<String>,
    pub ingestion_host: Option<String>,
}

/// Everything needed to build API clients.
#[derive(Debug, Clone)]
pub struct ResolvedProfile {
    pub name: Option<String>,
    pub credentials: Credentials,
    pub search_host: String,
    pub ingestion_host: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Config {
    /// Load config from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load config from `path`, or an empty config if the file is missing.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).context("Failed to read config file")?;

        toml::from_str(&content).context("Failed to parse config file")
    }

    /// Save config to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let content = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, content).context("Failed to write config file")
    }

    /// Get the config file path.
    pub fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir().context("Could not determine config directory")?;

        Ok(config_dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Add a new profile. The first profile added becomes the default.
    pub fn add_profile(&mut self, name: &str, mut profile: Profile) -> Result<()> {
        if self.profiles.contains_key(name) {
            bail!("Profile '{}' already exists", name);
        }

        if self.profiles.is_empty() {
            profile.default = true;
        }
        let make_default = profile.default;

        self.profiles.insert(name.to_string(), profile);

        if make_default {
            self.set_default(name)?;
        }

        Ok(())
    }

    pub fn remove_profile(&mut self, name: &str) -> Result<Profile> {
        self.profiles
            .remove(name)
            .with_context(|| format!("Profile '{}' not found", name))
    }

    /// Mark `name` as the default profile and clear the flag everywhere else.
    pub fn set_default(&mut self, name: &str) -> Result<()> {
        if !self.profiles.contains_key(name) {
            bail!("Profile '{}' not found", name);
        }

        for (profile_name, profile) in self.profiles.iter_mut() {
            profile.default = profile_name == name;
        }

        Ok(())
    }

    pub fn default_profile(&self) -> Option<(&str, &Profile)> {
        self.profiles
            .iter()
            .find(|(_, p)| p.default)
            .map(|(name, p)| (name.as_str(), p))
    }

    /// Combine overrides with the selected (or default) profile.
    pub fn resolve(&self, overrides: &Overrides) -> Result<ResolvedProfile> {
        let selected = match overrides.profile.as_deref() {
            Some(name) => {
                let profile = self
                    .profiles
                    .get(name)
                    .with_context(|| format!("Profile '{}' not found", name))?;
                Some((name, profile))
            }
            None => self.default_profile(),
        };

        let application_id = overrides
            .application_id
            .clone()
            .or_else(|| selected.map(|(_, p)| p.application_id.clone()))
            .filter(|id| !id.is_empty());
        let api_key = overrides
            .api_key
            .clone()
            .or_else(|| selected.map(|(_, p)| p.api_key.clone()))
            .filter(|key| !key.is_empty());

        let (Some(application_id), Some(api_key)) = (application_id, api_key) else {
            bail!(
                "No credentials configured. Run `algolia profile add` or set ALGOLIA_APPLICATION_ID and ALGOLIA_API_KEY"
            );
        };

        let profile = selected.map(|(_, p)| p);
        let region = profile.and_then(|p| p.region).unwrap_or_default();

        let search_host = overrides
            .search_host
            .clone()
            .or_else(|| profile.and_then(|p| p.search_host.clone()))
            .unwrap_or_else(|| default_search_host(&application_id));
        let ingestion_host = overrides
            .ingestion_host
            .clone()
            .or_else(|| profile.and_then(|p| p.ingestion_host.clone()))
            .unwrap_or_else(|| default_ingestion_host(region.as_str()));

        Ok(ResolvedProfile {
            name: selected.map(|(name, _)| name.to_string()),
            credentials: Credentials::new(application_id, api_key),
            search_host,
            ingestion_host,
        })
    }
}
