//! Objects command - manage records of an index.

use std::time::Instant;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::factory::Factory;
use crate::ndjson::{self, pluralize};

#[derive(Args)]
pub struct ObjectsCmd {
    #[command(subcommand)]
    pub command: ObjectsSubCmd,
}

#[derive(Subcommand)]
pub enum ObjectsSubCmd {
    /// Partially update records from an NDJSON file
    Update(UpdateCmd),
}

impl ObjectsCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            ObjectsSubCmd::Update(cmd) => cmd.run(f).await,
        }
    }
}

#[derive(Args)]
pub struct UpdateCmd {
    /// Index to update
    pub index: String,

    /// Records to update from file (use "-" to read from standard input)
    #[arg(short = 'F', long)]
    pub file: String,

    /// Create records that don't exist yet
    #[arg(short, long)]
    pub create_if_not_exists: bool,

    /// Wait for the operation to complete before returning
    #[arg(short, long)]
    pub wait: bool,

    /// Continue updating records even if some are invalid
    #[arg(short = 'C', long)]
    pub continue_on_error: bool,
}

impl UpdateCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.search_client()?;
        let cs = f.io.color_scheme();
        let start = Instant::now();

        let content = ndjson::read_input(&self.file, &mut f.io)?;

        f.io.start_progress(format!("Reading objects from {}", self.file));
        let parsed = ndjson::parse_lines(&content, ndjson::validate_update, |total| {
            f.io.update_progress(format!(
                "Read {} from {}",
                pluralize(total, "object"),
                self.file
            ));
        });
        f.io.stop_progress();

        let summary = parsed.summary(&cs, "objects");

        if parsed.records.is_empty() {
            if parsed.has_errors() {
                bail!("{}", summary);
            }
            bail!("{} No objects found in the file", cs.failure_icon());
        }

        if parsed.has_errors() && !self.continue_on_error {
            if !f.io.can_prompt() {
                bail!(
                    "{}--continue-on-error required when non-interactive shell is detected",
                    summary
                );
            }
            write!(f.io.out(), "{}", summary)?;
            if !f.prompter.confirm("Do you want to continue?")? {
                return Ok(());
            }
        }

        let count = parsed.records.len();
        f.io.start_progress(format!(
            "Updating {} objects on {}",
            cs.bold(count),
            cs.bold(&self.index)
        ));

        let result = async {
            let responses = client
                .partial_update_objects(&self.index, &parsed.records, self.create_if_not_exists)
                .await?;

            if self.wait {
                f.io.update_progress("Waiting for operation to complete");
                for res in &responses {
                    client.wait_for_task(&self.index, res.task_id).await?;
                }
            }
            anyhow::Ok(())
        }
        .await;
        f.io.stop_progress();
        result?;

        writeln!(
            f.io.out(),
            "{} Successfully updated {} objects on {} in {:?}",
            cs.success_icon(),
            cs.bold(count),
            cs.bold(&self.index),
            start.elapsed()
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
    use std::io::Write as _;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cmd(file: &str) -> UpdateCmd {
        UpdateCmd {
            index: "MOVIES".to_string(),
            file: file.to_string(),
            create_if_not_exists: false,
            wait: false,
            continue_on_error: false,
        }
    }

    async fn mock_batch(server: &MockServer, expected: serde_json::Value) {
        Mock::given(method("POST"))
            .and(path("/1/indexes/MOVIES/batch"))
            .and(body_json(expected))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({"taskID": 9, "objectIDs": ["1"]})),
            )
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_update_from_stdin() {
        let server = MockServer::start().await;
        mock_batch(
            &server,
            json!({"requests": [{"action": "partialUpdateObjectNoCreate", "body": {"objectID": "1", "title": "Alien"}}]}),
        )
        .await;

        let mut t = TestFactory::with_input(
            &server.uri(),
            true,
            vec![],
            "{\"objectID\":\"1\",\"title\":\"Alien\"}\n",
        );
        cmd("-").run(&mut t.factory).await.unwrap();

        assert!(
            t.output()
                .starts_with("✓ Successfully updated 1 objects on MOVIES in")
        );
    }

    #[tokio::test]
    async fn test_update_from_file_with_wait() {
        let server = MockServer::start().await;
        mock_batch(
            &server,
            json!({"requests": [{"action": "partialUpdateObject", "body": {"objectID": "1", "views": {"_operation": "Increment", "value": 1}}}]}),
        )
        .await;
        Mock::given(method("GET"))
            .and(path("/1/indexes/MOVIES/task/9"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "published"})))
            .expect(1)
            .mount(&server)
            .await;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "{}",
            json!({"objectID": "1", "views": {"_operation": "Increment", "value": 1}})
        )
        .unwrap();

        let mut t = TestFactory::new(&server.uri(), false, vec![]);
        let mut update = cmd(file.path().to_str().unwrap());
        update.create_if_not_exists = true;
        update.wait = true;
        update.run(&mut t.factory).await.unwrap();
    }

    #[tokio::test]
    async fn test_no_objects() {
        let mut t = TestFactory::with_input("http://127.0.0.1:1", true, vec![], "\n\n");
        let err = cmd("-").run(&mut t.factory).await.unwrap_err();
        assert_eq!(err.to_string(), "X No objects found in the file");
    }

    #[tokio::test]
    async fn test_only_invalid_objects() {
        let mut t = TestFactory::with_input("http://127.0.0.1:1", true, vec![], "{\"title\":\"x\"}");
        let err = cmd("-").run(&mut t.factory).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "X Found 1 error (out of 1 objects) while parsing the file:\n  line 1: objectID is required\n"
        );
    }

    #[tokio::test]
    async fn test_declining_after_errors() {
        let server = MockServer::start().await;
        let mut t = TestFactory::with_input(
            &server.uri(),
            true,
            vec![Answer::Confirm(false)],
            "{\"objectID\":\"1\"}\n{\"title\":\"x\"}\n",
        );
        cmd("-").run(&mut t.factory).await.unwrap();

        assert_eq!(t.asked(), vec!["Do you want to continue?"]);
        assert!(t.output().contains("line 2: objectID is required"));
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_errors_without_terminal() {
        let server = MockServer::start().await;
        let mut t = TestFactory::with_input(
            &server.uri(),
            false,
            vec![],
            "{\"objectID\":\"1\"}\n{\"title\":\"x\"}\n",
        );
        let err = cmd("-").run(&mut t.factory).await.unwrap_err();

        assert!(err.to_string().ends_with(
            "  line 2: objectID is required\n--continue-on-error required when non-interactive shell is detected"
        ));
        assert_eq!(t.output(), "");
        assert!(server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_continue_on_error_skips_prompt() {
        let server = MockServer::start().await;
        mock_batch(
            &server,
            json!({"requests": [{"action": "partialUpdateObjectNoCreate", "body": {"objectID": "1"}}]}),
        )
        .await;

        let mut t = TestFactory::with_input(
            &server.uri(),
            true,
            vec![],
            "{\"objectID\":\"1\"}\nnot json\n",
        );
        let mut update = cmd("-");
        update.continue_on_error = true;
        update.run(&mut t.factory).await.unwrap();

        assert!(t.asked().is_empty());
        assert!(t.output().contains("Successfully updated 1 objects"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let mut t = TestFactory::new("http://127.0.0.1:1", true, vec![]);
        let err = cmd("/tmp/does-not-exist.ndjson")
            .run(&mut t.factory)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "open /tmp/does-not-exist.ndjson");
    }
}
