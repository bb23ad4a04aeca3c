//! Indices command - manage indices.

mod delete;
mod list;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::factory::Factory;

pub use delete::DeleteCmd;
pub use list::ListCmd;

#[derive(Args)]
pub struct IndicesCmd {
    #[command(subcommand)]
    pub command: IndicesSubCmd,
}

#[derive(Subcommand)]
pub enum IndicesSubCmd {
    /// List indices
    List(ListCmd),

    /// Delete one or more indices
    Delete(DeleteCmd),
}

impl IndicesCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            IndicesSubCmd::List(cmd) => cmd.run(f).await,
            IndicesSubCmd::Delete(cmd) => cmd.run(f).await,
        }
    }
}
