use anyhow::Result;
use clap::Args;

use super::pickers::ensure_uuid;
use crate::factory::Factory;

#[derive(Args)]
pub struct ImportCmd {
    /// Transformation ID (UUID)
    pub transformation_id: String,
}

impl ImportCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        ensure_uuid("transformation", &self.transformation_id)?;
        let client = f.ingestion_client()?;

        f.io.start_progress("Fetching transformation");
        let res = client.get_transformation(&self.transformation_id).await;
        f.io.stop_progress();
        let transformation = res?;

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Successfully fetched {}",
                cs.success_icon(),
                transformation.transformation_id
            )?;
        }
        writeln!(f.io.out(), "{}", transformation.code)?;

        Ok(())
    }
}
