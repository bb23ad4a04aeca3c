//! Transformations command - scaffold, try, save and link transformations.

mod import;
mod link;
mod list;
mod new;
mod pickers;
mod sample;
mod save;
mod try_code;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::factory::Factory;

pub use import::ImportCmd;
pub use link::LinkCmd;
pub use list::ListCmd;
pub use new::NewCmd;
pub use sample::SampleCmd;
pub use save::SaveCmd;
pub use try_code::TryCmd;

#[derive(Args)]
pub struct TransformationsCmd {
    #[command(subcommand)]
    pub command: TransformationsSubCmd,
}

#[derive(Subcommand)]
pub enum TransformationsSubCmd {
    /// List transformations
    List(ListCmd),

    /// Scaffold a new transformation project
    #[command(visible_alias = "n")]
    New(NewCmd),

    /// Refresh the sample of the current project from a source
    Sample(SampleCmd),

    /// Run the transformation against the sample
    Try(TryCmd),

    /// Create or update the transformation from the project
    Save(SaveCmd),

    /// Fetch an existing transformation
    #[command(visible_alias = "i")]
    Import(ImportCmd),

    /// Link the saved transformation to a destination
    #[command(visible_alias = "ln")]
    Link(LinkCmd),
}

impl TransformationsCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            TransformationsSubCmd::List(cmd) => cmd.run(f).await,
            TransformationsSubCmd::New(cmd) => cmd.run(f).await,
            TransformationsSubCmd::Sample(cmd) => cmd.run(f).await,
            TransformationsSubCmd::Try(cmd) => cmd.run(f).await,
            TransformationsSubCmd::Save(cmd) => cmd.run(f).await,
            TransformationsSubCmd::Import(cmd) => cmd.run(f).await,
            TransformationsSubCmd::Link(cmd) => cmd.run(f).await,
        }
    }
}
