use std::time::Instant;

use anyhow::{Result, bail};
use clap::{Args, Subcommand};

use crate::factory::Factory;
use crate::ndjson;
use crate::types::DictionaryType;

#[derive(Args)]
pub struct EntriesCmd {
    #[command(subcommand)]
    pub command: EntriesSubCmd,
}

#[derive(Subcommand)]
pub enum EntriesSubCmd {
    /// Import entries from an NDJSON file
    Import(ImportCmd),
}

impl EntriesCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        match &self.command {
            EntriesSubCmd::Import(cmd) => cmd.run(f).await,
        }
    }
}

#[derive(Args)]
pub struct ImportCmd {
    /// Dictionary to import into
    #[arg(value_enum)]
    pub dictionary: DictionaryType,

    /// Entries to import from file (use "-" to read from standard input)
    #[arg(short = 'F', long)]
    pub file: String,

    /// Continue importing entries even if some are invalid
    #[arg(short = 'C', long)]
    pub continue_on_error: bool,

    /// Wait for the operation to complete before returning
    #[arg(short, long)]
    pub wait: bool,
}

impl ImportCmd {
    pub async fn run(&self, f: &mut Factory) -> Result<()> {
        let client = f.search_client()?;
        let cs = f.io.color_scheme();
        let start = Instant::now();

        let content = ndjson::read_input(&self.file, &mut f.io)?;
        let parsed = ndjson::parse_lines(&content, ndjson::entry_validator(self.dictionary), |_| {});
        let summary = parsed.summary(&cs, "entries");

        if parsed.records.is_empty() {
            if parsed.has_errors() {
                bail!("{}", summary);
            }
            bail!("{} No entries found in the file", cs.failure_icon());
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
            "Importing {} entries on {}",
            cs.bold(count),
            cs.bold(self.dictionary)
        ));

        let result = async {
            let res = client
                .batch_dictionary_entries(self.dictionary, &parsed.records, false)
                .await?;
            if self.wait {
                f.io.update_progress("Waiting for operation to complete");
                client.wait_for_app_task(res.task_id).await?;
            }
            anyhow::Ok(())
        }
        .await;
        f.io.stop_progress();
        result?;

        writeln!(
            f.io.out(),
            "{} Successfully imported {} entries on {} in {:?}",
            cs.success_icon(),
            cs.bold(count),
            cs.bold(self.dictionary),
            start.elapsed()
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::factory::testing::TestFactory;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn cmd(continue_on_error: bool) -> ImportCmd {
        ImportCmd {
            dictionary: DictionaryType::Stopwords,
            file: "-".to_string(),
            continue_on_error,
            wait: false,
        }
    }

    #[tokio::test]
    async fn test_import_from_stdin() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/1/dictionaries/stopwords/batch"))
            .and(body_json(json!({
                "clearExistingDictionaryEntries": false,
                "requests": [{"action": "addEntry", "body": {"language": "en", "word": "test", "objectID": "test"}}]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"taskID": 1})))
            .expect(1)
            .mount(&server)
            .await;

        let mut t = TestFactory::with_input(
            &server.uri(),
            true,
            vec![],
            r#"{"language":"en","word":"test","objectID":"test"}"#,
        );
        cmd(false).run(&mut t.factory).await.unwrap();

        assert!(
            t.output()
                .starts_with("✓ Successfully imported 1 entries on stopwords in")
        );
    }

    #[tokio::test]
    async fn test_missing_object_id() {
        let mut t = TestFactory::with_input(
            "http://127.0.0.1:1",
            true,
            vec![],
            r#"{"language":"en","word":"test"}"#,
        );
        let err = cmd(false).run(&mut t.factory).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "X Found 1 error (out of 1 entries) while parsing the file:\n  line 1: objectID is missing\n"
        );
    }

    #[tokio::test]
    async fn test_continue_on_error_without_valid_entries() {
        let mut t = TestFactory::with_input(
            "http://127.0.0.1:1",
            true,
            vec![],
            "{\"language\":\"en\",\"objectID\":\"test\"}\n{\"language\":\"en\",\"word\":\"test\"}",
        );
        let err = cmd(true).run(&mut t.factory).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "X Found 2 errors (out of 2 entries) while parsing the file:\n  line 1: word is missing\n  line 2: objectID is missing\n"
        );
    }

    #[tokio::test]
    async fn test_partial_errors_without_terminal() {
        let server = MockServer::start().await;
        let mut t = TestFactory::with_input(
            &server.uri(),
            false,
            vec![],
            "{\"language\":\"en\",\"word\":\"a\",\"objectID\":\"a\"}\n{\"language\":\"en\",\"word\":\"b\"}\n",
        );
        let err = cmd(false).run(&mut t.factory).await.unwrap_err();
        assert_eq!(
            err.to_string(),
            "X Found 1 error (out of 2 entries) while parsing the file:\n  line 2: objectID is missing\n--continue-on-error required when non-interactive shell is detected"
        );
        assert!(server.received_requests().await.unwrap().is_empty());
    }
}
