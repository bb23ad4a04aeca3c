use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use super::new::read_sample;
use crate::factory::Factory;
use crate::io::{self, OutputFormat};

#[derive(Args)]
pub struct TryCmd {
    /// Transformation code
    #[arg(long, default_value = "index.js")]
    pub code: PathBuf,

    /// JSON object to run the code against
    #[arg(long, default_value = "sample.json")]
    pub sample: PathBuf,
}

impl TryCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.ingestion_client()?;

        let code = std::fs::read_to_string(&self.code)
            .with_context(|| format!("failed to read transformation file {}", self.code.display()))?;
        let sample = read_sample(&self.sample)?;

        f.io.start_progress("Trying transformation");
        let res = client.try_transformation(&code, &sample).await;
        f.io.stop_progress();

        let payload = res?
            .first_payload()
            .context("the transformation returned no payload")?
            .context("failed to unmarshal payload")?;

        io::print(&mut f.io, OutputFormat::Json, &payload)
    }
}
