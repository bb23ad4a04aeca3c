use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Args;

use super::pickers::{ensure_uuid, pick_destination};
use crate::factory::Factory;
use crate::template::PackageJson;
use crate::types::DestinationUpdate;

const NOT_SAVED: &str = "please save your transformation first: algolia transformations save";

#[derive(Args)]
pub struct LinkCmd {
    /// Destination ID (UUID); your search destinations are listed when omitted
    #[arg(short, long)]
    pub destination: Option<String>,

    /// Transformation project directory
    #[arg(long, default_value = ".")]
    pub dir: PathBuf,
}

impl LinkCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let transformation_id = PackageJson::read(&self.dir)
            .ok()
            .and_then(|p| p.transformation_id().map(str::to_string))
            .context(NOT_SAVED)?;

        let client = f.ingestion_client()?;

        let destination_id = match &self.destination {
            Some(id) => {
                ensure_uuid("destination", id)?;
                id.clone()
            }
            None => {
                if !f.io.can_prompt() {
                    bail!("--destination required when non-interactive shell is detected");
                }
                match pick_destination(f, &client).await? {
                    Some(id) => id,
                    None => return Ok(()),
                }
            }
        };

        f.io.start_progress("Linking to destination");
        let res = client
            .update_destination(
                &destination_id,
                &DestinationUpdate {
                    transformation_ids: Some(vec![transformation_id.clone()]),
                },
            )
            .await;
        f.io.stop_progress();
        let updated = res?;

        writeln!(
            f.io.out(),
            "Transformation '{}' linked to destination '{}'",
            transformation_id,
            updated.destination_id
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::testing::TestFactory;
    use crate::io::Answer;
    use serde_json::json;
    use tempfile::tempdir;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const TRANSFO: &str = "903a251f-1524-4823-8b7e-81a9376fff0e";
    const DEST: &str = "6c02aeb1-775e-418e-870b-1faccd4b2c0f";

    fn saved_project() -> tempfile::TempDir {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            json!({"name": "movies", "transformationID": TRANSFO}).to_string(),
        )
        .unwrap();
        dir
    }

    async fn mount_update(server: &MockServer) {
        Mock::given(method("PATCH"))
            .and(path(format!("/1/destinations/{}", DEST)))
            .and(body_json(json!({"transformationIDs": [TRANSFO]})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "destinationID": DEST,
                "name": "movies-index",
                "updatedAt": "2026-01-01T00:00:00Z"
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_link_with_explicit_destination() {
        let server = MockServer::start().await;
        mount_update(&server).await;

        let dir = saved_project();
        let mut t = TestFactory::new(&server.uri(), false, vec![]);
        LinkCmd {
            destination: Some(DEST.to_string()),
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        assert_eq!(
            t.output(),
            format!("Transformation '{}' linked to destination '{}'\n", TRANSFO, DEST)
        );
    }

    #[tokio::test]
    async fn test_link_with_picked_destination() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1/destinations"))
            .and(query_param("type", "search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "destinations": [{
                    "destinationID": DEST,
                    "type": "search",
                    "name": "Movies",
                    "input": {"indexName": "movies"}
                }]
            })))
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/1/tasks"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"tasks": []})))
            .mount(&server)
            .await;
        mount_update(&server).await;

        let dir = saved_project();
        let mut t = TestFactory::new(
            &server.uri(),
            true,
            vec![Answer::Select(Some(DEST.to_string()))],
        );
        LinkCmd {
            destination: None,
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        assert_eq!(t.asked(), vec!["destinations: movies: Movies"]);
    }

    #[tokio::test]
    async fn test_link_backing_out_does_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/1/destinations"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"destinations": []})))
            .mount(&server)
            .await;

        let dir = saved_project();
        let mut t = TestFactory::new(&server.uri(), true, vec![Answer::Select(None)]);
        LinkCmd {
            destination: None,
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap();

        assert_eq!(t.output(), "");
    }

    #[tokio::test]
    async fn test_link_requires_saved_transformation() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), r#"{"name": "movies"}"#).unwrap();

        let mut t = TestFactory::new("http://127.0.0.1:1", true, vec![]);
        let err = LinkCmd {
            destination: Some(DEST.to_string()),
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), NOT_SAVED);
    }

    #[tokio::test]
    async fn test_non_interactive_needs_destination() {
        let server = MockServer::start().await;
        let dir = saved_project();
        let mut t = TestFactory::new(&server.uri(), false, vec![]);
        let err = LinkCmd {
            destination: None,
            dir: dir.path().to_path_buf(),
        }
        .run(&mut t.factory)
        .await
        .unwrap_err();

        assert_eq!(
            err.to_string(),
            "--destination required when non-interactive shell is detected"
        );
        assert!(t.asked().is_empty());
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
