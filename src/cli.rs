//! CLI argument definitions.

use clap::{Parser, Subcommand};

use crate::commands::{
    DictionaryCmd, IndicesCmd, ObjectsCmd, ProfileCmd, SearchCmd, TransformationsCmd,
};
use crate::config::Overrides;
use crate::factory::Factory;

#[derive(Parser)]
#[command(name = "algolia")]
#[command(about = "Algolia - manage your search indices, dictionaries and transformations")]
#[command(version)]
pub struct Cli {
    /// Profile to use instead of the default one
    #[arg(short, long, global = true, env = "ALGOLIA_PROFILE")]
    pub profile: Option<String>,

    /// Application ID
    #[arg(long, global = true, env = "ALGOLIA_APPLICATION_ID")]
    pub application_id: Option<String>,

    /// API key
    #[arg(long, global = true, env = "ALGOLIA_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Search API host
    #[arg(long, global = true, hide = true, env = "ALGOLIA_SEARCH_HOST")]
    pub search_host: Option<String>,

    /// Ingestion API host
    #[arg(long, global = true, hide = true, env = "ALGOLIA_INGESTION_HOST")]
    pub ingestion_host: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            profile: self.profile.clone(),
            application_id: self.application_id.clone(),
            api_key: self.api_key.clone(),
            search_host: self.search_host.clone(),
            ingestion_host: self.ingestion_host.clone(),
        }
    }
}

#[derive(Subcommand)]
pub enum Command {
    /// Manage indices
    Indices(IndicesCmd),

    /// Manage records
    Objects(ObjectsCmd),

    /// Search an index
    Search(SearchCmd),

    /// Manage dictionaries
    Dictionary(DictionaryCmd),

    /// Scaffold, try, save and link transformations
    #[command(alias = "transfo")]
    Transformations(TransformationsCmd),

    /// Manage credential profiles
    Profile(ProfileCmd),
}

impl Command {
    pub async fn execute(&self, f: &mut Factory) -> anyhow::Result<()> {
        match self {
            Command::Indices(cmd) => cmd.run(f).await,
            Command::Objects(cmd) => cmd.run(f).await,
            Command::Search(cmd) => cmd.run(f).await,
            Command::Dictionary(cmd) => cmd.run(f).await,
            Command::Transformations(cmd) => cmd.run(f).await,
            Command::Profile(cmd) => cmd.run(f).await,
        }
    }
}
