use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Args;

use super::pickers::{ensure_uuid, pick_source, sample_source};
use crate::factory::Factory;
use crate::template;

#[derive(Args)]
pub struct SampleCmd {
    /// Source ID (UUID); your sources are listed when omitted
    pub source_id: Option<String>,

    /// Transformation project directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

impl SampleCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.ingestion_client()?;

        let source_id = match &self.source_id {
            Some(id) => {
                ensure_uuid("source", id)?;
                id.clone()
            }
            None => {
                if !f.io.can_prompt() {
                    bail!("source ID argument required when non-interactive shell is detected");
                }
                pick_source(f, &client).await?
            }
        };

        let sample = sample_source(f, &client, &source_id).await?;
        template::generate_sample(&self.dir, &sample)?;

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Sample refreshed from source {}",
                cs.success_icon(),
                source_id
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::testing::TestFactory;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const SOURCE: &str = "5a1c0b7e-3d2f-4e6a-9b8c-7d6e5f4a3b2c";

    #[tokio::test]
    async fn test_sample_rewrites_sample_files() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(format!("/1/sources/{}/validate", SOURCE)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "data": [{"objectID": "2", "title": "Heat"}, {"objectID": "3"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.js"), "// user code").unwrap();

        let mut t = TestFactory::new(&server.uri(), true, vec![]);
        SampleCmd {
            source_id: Some(SOURCE.to_string()),
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        let sample: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(dir.path().join("sample.json")).unwrap())
                .unwrap();
        assert_eq!(sample, json!({"objectID": "2", "title": "Heat"}));
        assert!(dir.path().join("sample.js").exists());
        assert_eq!(
            std::fs::read_to_string(dir.path().join("index.js")).unwrap(),
            "// user code"
        );
    }

    #[tokio::test]
    async fn test_non_interactive_needs_source_id() {
        let dir = tempdir().unwrap();
        let mut t = TestFactory::new("http://127.0.0.1:1", false, vec![]);
        let err = SampleCmd {
            source_id: None,
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "source ID argument required when non-interactive shell is detected"
        );
        assert!(t.asked().is_empty());
        assert!(!dir.path().join("sample.json").exists());
    }
}
