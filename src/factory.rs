//! Shared dependencies handed to every command.

use std::path::PathBuf;

use anyhow::Result;

use crate::api::{IngestionClient, SearchClient, WaitPolicy};
use crate::config::{Config, Overrides, ResolvedProfile};
use crate::io::{IoStreams, Prompter, TerminalPrompter};

pub struct Factory {
    pub io: IoStreams,
    pub prompter: Box<dyn Prompter>,
    overrides: Overrides,
    config_path: Option<PathBuf>,
    wait: WaitPolicy,
}

impl Factory {
    pub fn new(overrides: Overrides) -> Self {
        Self {
            io: IoStreams::system(),
            prompter: Box::new(TerminalPrompter::new()),
            overrides,
            config_path: None,
            wait: WaitPolicy::default(),
        }
    }

    /// Values from the global flags and environment.
    pub fn overrides(&self) -> &Overrides {
        &self.overrides
    }

    pub fn config_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => Config::config_path(),
        }
    }

    pub fn config(&self) -> Result<Config> {
        match &self.config_path {
            Some(path) => Config::load_from(path),
            None => Config::load(),
        }
    }

    pub fn save_config(&self, config: &Config) -> Result<()> {
        match &self.config_path {
            Some(path) => config.save_to(path),
            None => config.save(),
        }
    }

    fn resolve(&self) -> Result<ResolvedProfile> {
        let resolved = self.config()?.resolve(&self.overrides)?;
        tracing::debug!(
            profile = resolved.name.as_deref().unwrap_or("-"),
            application_id = %resolved.credentials.application_id,
            "resolved credentials"
        );
        Ok(resolved)
    }

    pub fn search_client(&self) -> Result<SearchClient> {
        let profile = self.resolve()?;
        Ok(SearchClient::new(&profile.search_host, profile.credentials)?.with_wait_policy(self.wait))
    }

    pub fn ingestion_client(&self) -> Result<IngestionClient> {
        let profile = self.resolve()?;
        Ok(IngestionClient::new(
            &profile.ingestion_host,
            profile.credentials,
        )?)
    }
}
