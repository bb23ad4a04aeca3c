//! Dictionary command - manage dictionaries and their settings.

mod entries;
mod settings;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::factory::Factory;

pub use entries::EntriesCmd;
pub use settings::SettingsCmd;

#[derive(Args)]
pub struct DictionaryCmd {
    #[command(subcommand)]
    pub command: DictionarySubCmd,
}

#[derive(Subcommand)]
pub enum DictionarySubCmd {
    /// Manage dictionary settings
    Settings(SettingsCmd),

    /// Manage dictionary entries
    Entries(EntriesCmd),
}

impl DictionaryCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            DictionarySubCmd::Settings(cmd) => cmd.run(f).await,
            DictionarySubCmd::Entries(cmd) => cmd.run(f).await,
        }
    }
}
