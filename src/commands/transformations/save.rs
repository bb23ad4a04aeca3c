use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Args;

use crate::factory::Factory;
use crate::template::{self, CODE_FILE, PackageJson};
use crate::types::TransformationCreate;

const DESCRIPTION: &str = "Transformation created from the Algolia CLI tool";

#[derive(Args)]
pub struct SaveCmd {
    /// Transformation code, next to its package.json
    #[arg(default_value = CODE_FILE)]
    pub path: PathBuf,
}

/// Directory holding `path`, `.` for a bare file name.
fn project_dir(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

impl SaveCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        if self.path.extension().and_then(|e| e.to_str()) != Some("js") {
            bail!(
                "please provide a valid javascript file, '{}' given",
                self.path.display()
            );
        }

        let dir = project_dir(&self.path);
        let code = std::fs::read_to_string(&self.path)
            .with_context(|| format!("unable to read transformation file '{}'", self.path.display()))?;
        let package = PackageJson::read(&dir)?;

        let client = f.ingestion_client()?;
        let body = TransformationCreate {
            code,
            name: package.name.clone(),
            description: Some(DESCRIPTION.to_string()),
        };

        let existing = package.transformation_id().map(str::to_string);
        let res = match &existing {
            None => {
                f.io.start_progress(format!(
                    "Saving transformation at path '{}'",
                    self.path.display()
                ));
                client.create_transformation(&body).await
            }
            Some(id) => {
                f.io.start_progress(format!(
                    "Updating transformation at path '{}'",
                    self.path.display()
                ));
                client.update_transformation(id, &body).await
            }
        };
        f.io.stop_progress();

        let mut id = res?.transformation_id;
        if id.is_empty() {
            id = existing.unwrap_or_default();
        }
        template::refresh_package_json(&dir, &package.name, &id)?;
        tracing::debug!(transformation = %id, "saved transformation");

        if f.io.is_stdout_tty() {
            let cs = f.io.color_scheme();
            writeln!(
                f.io.out(),
                "{} Transformation '{}' saved with ID {}",
                cs.success_icon(),
                package.name,
                id
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
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const ID: &str = "903a251f-1524-4823-8b7e-81a9376fff0e";
    const CODE: &str = "async function transform(record) { return record; }";

    fn project(package: serde_json::Value) -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("index.js"), CODE).unwrap();
        std::fs::write(dir.path().join("package.json"), package.to_string()).unwrap();
        dir
    }

    fn package_json(dir: &Path) -> serde_json::Value {
        serde_json::from_str(&std::fs::read_to_string(dir.join("package.json")).unwrap()).unwrap()
    }

    #[tokio::test]
    async fn test_save_creates_and_records_id() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/transformations"))
            .and(body_json(json!({
                "code": CODE,
                "name": "movies",
                "description": DESCRIPTION
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transformationID": ID,
                "createdAt": "2026-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = project(json!({"name": "movies", "version": "1.0.0", "private": true}));
        let mut t = TestFactory::new(&server.uri(), true, vec![]);
        SaveCmd {
            path: dir.path().join("index.js"),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        let package = package_json(dir.path());
        assert_eq!(package["transformationID"], ID);
        assert_eq!(package["version"], "1.0.0");
        assert_eq!(package["private"], true);
        assert!(t.output().contains(ID));
    }

    #[tokio::test]
    async fn test_save_updates_existing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path(format!("/1/transformations/{}", ID)))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "transformationID": ID,
                "updatedAt": "2026-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let dir = project(json!({"name": "movies", "transformationID": ID}));
        let mut t = TestFactory::new(&server.uri(), false, vec![]);
        SaveCmd {
            path: dir.path().join("index.js"),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        assert_eq!(package_json(dir.path())["transformationID"], ID);
        assert_eq!(t.output(), "");
    }

    #[tokio::test]
    async fn test_save_rejects_non_js() {
        let mut t = TestFactory::new("http://127.0.0.1:1", true, vec![]);
        let err = SaveCmd {
            path: PathBuf::from("index.ts"),
        }
        .run(&mut t.factory)
        .await
        .unwrap_err();
        assert_eq!(
            err.to_string(),
            "please provide a valid javascript file, 'index.ts' given"
        );
    }

    #[test]
    fn test_project_dir() {
        assert_eq!(project_dir(Path::new("index.js")), PathBuf::from("."));
        assert_eq!(
            project_dir(Path::new("output/movies/index.js")),
            PathBuf::from("output/movies")
        );
    }
}
