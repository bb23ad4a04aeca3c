use anyhow::Result;
use clap::Args;

use crate::factory::Factory;
use crate::io::PrintFlags;

#[derive(Args)]
pub struct ListCmd {
    #[command(flatten)]
    pub print: PrintFlags,
}

impl ListCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.ingestion_client()?;

        f.io.start_progress("Fetching transformations");
        let res = client.list_transformations().await;
        f.io.stop_progress();

        self.print.print(&mut f.io, &res?)
    }
}
