//! Newline-delimited JSON input for bulk commands.

use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};

use crate::io::{ColorScheme, IoStreams};
use crate::types::{BuiltInOperation, DictionaryType};

/// `-F` value meaning "read from standard input".
pub const STDIN: &str = "-";

/// Read the whole input named by `-F`.
pub fn read_input(file: &str, io: &mut IoStreams) -> Result<String> {
    if file == STDIN {
        let mut content = String::new();
        io.input()
            .read_to_string(&mut content)
            .context("Failed to read standard input")?;
        return Ok(content);
    }

    std::fs::read_to_string(Path::new(file)).with_context(|| format!("open {}", file))
}

/// `1 error`, `2 errors`.
pub fn pluralize(count: usize, noun: &str) -> String {
    if count == 1 {
        format!("{} {}", count, noun)
    } else {
        format!("{} {}s", count, noun)
    }
}

#[derive(Debug, Default)]
pub struct ParsedLines {
    pub records: Vec<Map<String, Value>>,
    /// `line N: message`, in file order.
    pub errors: Vec<String>,
    /// Non-blank lines seen.
    pub total: usize,
}

impl ParsedLines {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The block shown before asking whether to go on.
    pub fn summary(&self, cs: &ColorScheme, noun: &str) -> String {
        let lines = self
            .errors
            .iter()
            .map(|e| format!("  {}", e))
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "{} Found {} (out of {} {}) while parsing the file:\n{}\n",
            cs.failure_icon(),
            pluralize(self.errors.len(), "error"),
            self.total,
            noun,
            lines
        )
    }
}

/// Parse one JSON object per line. Blank lines are skipped but still
/// counted for line numbers. `on_record` sees the running total.
pub fn parse_lines<V, P>(content: &str, validate: V, mut on_record: P) -> ParsedLines
where
    V: Fn(&Map<String, Value>) -> Result<(), String>,
    P: FnMut(usize),
{
    let mut parsed = ParsedLines::default();

    for (i, line) in content.lines().enumerate() {
        let line_number = i + 1;
        if line.trim().is_empty() {
            continue;
        }

        parsed.total += 1;
        on_record(parsed.total);

        let record = match serde_json::from_str::<Map<String, Value>>(line) {
            Ok(record) => record,
            Err(e) => {
                parsed.errors.push(format!("line {}: {}", line_number, e));
                continue;
            }
        };

        if let Err(e) = validate(&record) {
            parsed.errors.push(format!("line {}: {}", line_number, e));
            continue;
        }

        parsed.records.push(record);
    }

    parsed
}

/// A partial update needs an `objectID`, and any built-in operation must
/// be one the engine knows.
pub fn validate_update(record: &Map<String, Value>) -> Result<(), String> {
    if !record.contains_key("objectID") {
        return Err("objectID is required".to_string());
    }

    for (name, attribute) in record {
        let Some(op) = attribute.as_object().and_then(|nested| nested.get("_operation")) else {
            continue;
        };

        let op = match op {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        };
        if !BuiltInOperation::is_allowed(&op) {
            return Err(format!(
                "invalid operation \"{}\" for attribute \"{}\". Allowed operations: {}",
                op,
                name,
                BuiltInOperation::allowed_list()
            ));
        }
    }

    Ok(())
}

/// Returns a validator checking the fields `dictionary` entries require.
pub fn entry_validator(
    dictionary: DictionaryType,
) -> impl Fn(&Map<String, Value>) -> Result<(), String> {
    move |entry| {
        for field in dictionary.required_fields() {
            if !entry.contains_key(*field) {
                return Err(format!("{} is missing", field));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pluralize() {
        assert_eq!(pluralize(1, "error"), "1 error");
        assert_eq!(pluralize(0, "object"), "0 objects");
        assert_eq!(pluralize(2, "object"), "2 objects");
    }

    #[test]
    fn test_blank_lines_keep_numbering() {
        let content = "{\"objectID\":\"1\"}\n\n{\"name\":\"x\"}\n";
        let parsed = parse_lines(content, validate_update, |_| {});

        assert_eq!(parsed.total, 2);
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.errors, vec!["line 3: objectID is required"]);
    }

    #[test]
    fn test_invalid_json_is_reported() {
        let parsed = parse_lines("{\"objectID\":\"1\"},", validate_update, |_| {});
        assert_eq!(parsed.records.len(), 0);
        assert!(parsed.errors[0].starts_with("line 1: "));
    }

    #[test]
    fn test_unknown_operation() {
        let content = r#"{"objectID":"1","count":{"_operation":"Multiply","value":2}}"#;
        let parsed = parse_lines(content, validate_update, |_| {});
        assert_eq!(
            parsed.errors[0],
            format!(
                "line 1: invalid operation \"Multiply\" for attribute \"count\". Allowed operations: {}",
                BuiltInOperation::allowed_list()
            )
        );

        let ok = r#"{"objectID":"1","count":{"_operation":"Increment","value":2}}"#;
        assert!(!parse_lines(ok, validate_update, |_| {}).has_errors());
    }

    #[test]
    fn test_entry_validator_order() {
        let validate = entry_validator(DictionaryType::Stopwords);
        let content = "{\"language\":\"en\"}\n{\"language\":\"en\",\"objectID\":\"a\"}";
        let parsed = parse_lines(content, validate, |_| {});
        assert_eq!(
            parsed.errors,
            vec!["line 1: objectID is missing", "line 2: word is missing"]
        );
    }

    #[test]
    fn test_summary_block() {
        let parsed = parse_lines("{\"language\":\"en\",\"word\":\"test\"}", entry_validator(DictionaryType::Stopwords), |_| {});
        assert_eq!(
            parsed.summary(&ColorScheme::new(false), "entries"),
            "X Found 1 error (out of 1 entries) while parsing the file:\n  line 1: objectID is missing\n"
        );
    }

    #[test]
    fn test_progress_callback() {
        let mut seen = Vec::new();
        parse_lines("{}\n\n{}", |_| Ok(()), |n| seen.push(n));
        assert_eq!(seen, vec![1, 2]);
    }
}
