//! Transformation project scaffolding.
//!
//! A project is a plain directory:
//!
//! ```text
//! output/<name>/
//!   package.json    name, scripts, transformationID once saved
//!   index.js        SourceRecord typedef + transform()
//!   helper.ts       runtime helper types
//!   tsconfig.json
//!   sample.json     the record `try` runs against
//!   sample.js       the same record as a module
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

const INDEX_JS: &str = include_str!("files/index.js");
const HELPER_TS: &str = include_str!("files/helper.ts");
const TSCONFIG_JSON: &str = include_str!("files/tsconfig.json");

pub const PACKAGE_JSON: &str = "package.json";
pub const CODE_FILE: &str = "index.js";
pub const SAMPLE_JSON: &str = "sample.json";
pub const SAMPLE_JS: &str = "sample.js";

/// The fields of `package.json` the CLI cares about. Anything else the user
/// added is kept in `other`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PackageJson {
    #[serde(default)]
    pub name: String,

    #[serde(rename = "transformationID", default, skip_serializing_if = "Option::is_none")]
    pub transformation_id: Option<String>,

    #[serde(flatten)]
    pub other: Map<String, Value>,
}

impl PackageJson {
    pub fn new(name: &str) -> Self {
        let mut other = Map::new();
        other.insert("version".into(), json!("1.0.0"));
        other.insert("private".into(), json!(true));
        other.insert("main".into(), json!(CODE_FILE));
        other.insert(
            "scripts".into(),
            json!({
                "try": "algolia transformations try",
                "save": "algolia transformations save",
            }),
        );

        Self {
            name: name.to_string(),
            transformation_id: None,
            other,
        }
    }

    pub fn read(dir: &Path) -> Result<Self> {
        let path = dir.join(PACKAGE_JSON);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("unable to find '{}' file at path '{}'", PACKAGE_JSON, dir.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("unable to read '{}' at path '{}'", PACKAGE_JSON, dir.display()))
    }

    pub fn write(&self, dir: &Path) -> Result<()> {
        let mut content = serde_json::to_string_pretty(self)?;
        content.push('\n');
        write_file(dir, PACKAGE_JSON, &content)
    }

    /// The saved transformation ID, if any.
    pub fn transformation_id(&self) -> Option<&str> {
        self.transformation_id.as_deref().filter(|id| !id.is_empty())
    }
}

pub struct PackageTemplate {
    pub output_directory: PathBuf,
    pub transformation_name: String,
    pub sample: Map<String, Value>,
    /// Existing code to start from instead of the skeleton.
    pub code: Option<String>,
}

impl PackageTemplate {
    pub fn generate(&self) -> Result<()> {
        let dir = &self.output_directory;
        std::fs::create_dir_all(dir).with_context(|| {
            format!(
                "unable to create transformation folder with name '{}'",
                dir.display()
            )
        })?;

        PackageJson::new(&self.transformation_name).write(dir)?;

        let code = self.code.as_deref().unwrap_or(INDEX_JS);
        write_file(
            dir,
            CODE_FILE,
            &format!("{}\n{}", typedef_from_sample(&self.sample), code),
        )?;
        write_file(dir, "helper.ts", HELPER_TS)?;
        write_file(dir, "tsconfig.json", TSCONFIG_JSON)?;

        generate_sample(dir, &self.sample)
    }
}

/// JSDoc typedef describing the sample, one property per key in key order.
pub fn typedef_from_sample(sample: &Map<String, Value>) -> String {
    let mut keys = sample.keys().collect::<Vec<_>>();
    keys.sort();

    let mut out = String::from("/**\n * @typedef {Object} SourceRecord\n");
    for key in keys {
        let js_type = match &sample[key] {
            Value::String(_) => "string",
            Value::Number(_) => "number",
            Value::Bool(_) => "boolean",
            Value::Array(_) => "Array",
            Value::Object(_) => "Object",
            Value::Null => "any",
        };
        out.push_str(&format!(" * @property {{{}}} {}\n", js_type, key));
    }
    out.push_str(" */\n");

    out
}

/// Rewrite `sample.json` and `sample.js` in `dir`.
pub fn generate_sample(dir: &Path, sample: &Map<String, Value>) -> Result<()> {
    let pretty = serde_json::to_string_pretty(sample).context("unable to marshal sample data")?;

    write_file(dir, SAMPLE_JSON, &format!("{}\n", pretty))?;
    write_file(
        dir,
        SAMPLE_JS,
        &format!("export const sample = {};\n\nexport default sample;\n", pretty),
    )
}

/// Set `name` and `transformationID` in `dir/package.json`, keeping the rest.
pub fn refresh_package_json(dir: &Path, name: &str, transformation_id: &str) -> Result<()> {
    let mut package = PackageJson::read(dir).unwrap_or_else(|_| PackageJson::new(name));
    package.name = name.to_string();
    package.transformation_id = Some(transformation_id.to_string());

    package.write(dir).context("unable to refresh package.json")
}

fn write_file(dir: &Path, name: &str, content: &str) -> Result<()> {
    std::fs::write(dir.join(name), content)
        .with_context(|| format!("unable to write to '{}' file", name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn sample() -> Map<String, Value> {
        json!({
            "title": "Alien",
            "year": 1979,
            "tags": ["scifi"],
            "cast": {"lead": "Weaver"},
            "released": true,
            "rating": null
        })
        .as_object()
        .unwrap()
        .clone()
    }

    #[test]
    fn test_typedef_is_sorted_and_typed() {
        assert_eq!(
            typedef_from_sample(&sample()),
            "/**\n * @typedef {Object} SourceRecord\n \
             * @property {Object} cast\n \
             * @property {any} rating\n \
             * @property {boolean} released\n \
             * @property {Array} tags\n \
             * @property {string} title\n \
             * @property {number} year\n \
             */\n"
        );
    }

    #[test]
    fn test_generate_writes_project() {
        let dir = tempdir().unwrap();
        let out = dir.path().join("output").join("movies");

        PackageTemplate {
            output_directory: out.clone(),
            transformation_name: "movies".to_string(),
            sample: sample(),
            code: None,
        }
        .generate()
        .unwrap();

        for file in ["package.json", "index.js", "helper.ts", "tsconfig.json", "sample.json", "sample.js"] {
            assert!(out.join(file).exists(), "{file} missing");
        }

        let package = PackageJson::read(&out).unwrap();
        assert_eq!(package.name, "movies");
        assert_eq!(package.transformation_id(), None);
        assert_eq!(package.other["main"], "index.js");

        let code = std::fs::read_to_string(out.join("index.js")).unwrap();
        assert!(code.starts_with("/**\n * @typedef {Object} SourceRecord"));
        assert!(code.contains("async function transform(record, helper)"));

        let written: Value =
            serde_json::from_str(&std::fs::read_to_string(out.join("sample.json")).unwrap()).unwrap();
        assert_eq!(written["title"], "Alien");
    }

    #[test]
    fn test_generate_with_existing_code() {
        let dir = tempdir().unwrap();
        PackageTemplate {
            output_directory: dir.path().to_path_buf(),
            transformation_name: "imported".to_string(),
            sample: Map::new(),
            code: Some("async function transform(record) { return null; }\n".to_string()),
        }
        .generate()
        .unwrap();

        let code = std::fs::read_to_string(dir.path().join("index.js")).unwrap();
        assert!(code.ends_with("async function transform(record) { return null; }\n"));
    }

    #[test]
    fn test_generate_sample_rewrites_both_files() {
        let dir = tempdir().unwrap();
        generate_sample(dir.path(), &sample()).unwrap();

        let js = std::fs::read_to_string(dir.path().join("sample.js")).unwrap();
        assert!(js.starts_with("export const sample = {"));
        assert!(js.contains("\"title\": \"Alien\""));
    }

    #[test]
    fn test_refresh_keeps_unknown_fields() {
        let dir = tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"name": "old", "dependencies": {"lodash": "^4"}}"#,
        )
        .unwrap();

        refresh_package_json(dir.path(), "movies", "3f1c0a8e-0000-4000-8000-000000000001").unwrap();

        let package = PackageJson::read(dir.path()).unwrap();
        assert_eq!(package.name, "movies");
        assert_eq!(
            package.transformation_id(),
            Some("3f1c0a8e-0000-4000-8000-000000000001")
        );
        assert_eq!(package.other["dependencies"]["lodash"], "^4");
    }
}
