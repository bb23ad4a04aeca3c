use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::Utc;
use clap::Args;
use serde_json::{Map, Value};

use super::pickers::{ensure_uuid, pick_source, sample_source};
use crate::factory::Factory;
use crate::template::PackageTemplate;

const NAME_PLACEHOLDER: &str = "Doing fancy stuff to search FAST";

#[derive(Args)]
pub struct NewCmd {
    /// Transformation name (prompted when omitted)
    pub name: Option<String>,

    /// Source ID (UUID) to sample; your sources are listed when omitted
    #[arg(short, long)]
    pub source: Option<String>,

    /// JSON file holding a sample record, instead of sampling a source
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Start from this transformation code instead of the skeleton
    #[arg(long)]
    pub code: Option<PathBuf>,

    /// Directory projects are created in
    #[arg(long, default_value = "output")]
    pub output_root: PathBuf,
}

/// Parse a file holding one JSON object.
pub(super) fn read_sample(path: &Path) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("unable to open file {}", path.display()))?;

    serde_json::from_str(&raw)
        .context("failed to unmarshal sample file, make sure it's a valid JSON object")
}

/// `root/name`, or `root/name-<unix seconds>` when that already exists.
fn output_directory(root: &Path, name: &str) -> PathBuf {
    let dir = root.join(name);
    if !dir.exists() {
        return dir;
    }
    root.join(format!("{}-{}", name, Utc::now().timestamp()))
}

impl NewCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        if !f.io.can_prompt() {
            if self.name.is_none() {
                bail!("name argument required when non-interactive shell is detected");
            }
            if self.file.is_none() && self.source.is_none() {
                bail!("--source or --file required when non-interactive shell is detected");
            }
        }

        let name = match &self.name {
            Some(name) => name.clone(),
            None => f
                .prompter
                .input("What's your transformation name?", NAME_PLACEHOLDER)?,
        };

        let sample = match &self.file {
            Some(file) => {
                f.io.start_progress("Reading sample from file");
                let sample = read_sample(file);
                f.io.stop_progress();
                sample?
            }
            None => {
                let client = f.ingestion_client()?;
                let source_id = match &self.source {
                    Some(id) => {
                        ensure_uuid("source", id)?;
                        id.clone()
                    }
                    None => pick_source(f, &client).await?,
                };
                sample_source(f, &client, &source_id).await?
            }
        };

        let code = match &self.code {
            Some(path) => Some(std::fs::read_to_string(path).with_context(|| {
                format!("unable to read transformation file '{}'", path.display())
            })?),
            None => None,
        };

        let dir = output_directory(&self.output_root, &name);
        f.io.start_progress(format!(
            "Generating output package folder at path '{}'",
            dir.display()
        ));
        let res = PackageTemplate {
            output_directory: dir.clone(),
            transformation_name: name,
            sample,
            code,
        }
        .generate();
        f.io.stop_progress();
        res?;

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Transformation package created at '{}'",
                cs.success_icon(),
                dir.display()
            )?;
        }

        Ok(())
    }
}
