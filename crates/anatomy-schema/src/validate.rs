//! # Schema Validation
//!
//! Validation of JSON documents against a JSON Schema (Draft 2020-12)
//! compiled once per run.
//!
//! ## Schema Resolution
//!
//! Internal `$ref`s (`#/$defs/<name>`) are resolved by the jsonschema crate
//! natively. External relative `$ref`s such as `"entity.schema.json"` are
//! resolved by [`SiblingSchemaRetriever`] against the directory holding the
//! root schema. Remote URIs fall back to a file of the same name in that
//! directory; no network request is ever made.
//!
//! ## Ordering
//!
//! The jsonschema crate does not promise an order for `iter_errors`.
//! Violations are sorted by instance path (stable, so equal paths keep the
//! validator's order) and documents by file path, which makes the report a
//! pure function of the inputs.

use std::cmp::Ordering;
use std::fmt;
use std::path::{Path, PathBuf};

use anatomy_core::{load_json, LoadError, Mark, Report};
use serde_json::Value;
use thiserror::Error;

use crate::discover::discover_json_files;

/// Errors that abort schema validation before a report is produced.
#[derive(Error, Debug)]
pub enum SchemaValidationError {
    /// The schema or a data document could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The schema parsed as JSON but could not be compiled into a validator.
    #[error("failed to compile schema {path}: {reason}")]
    SchemaCompile {
        /// Path or identifier of the schema.
        path: String,
        /// Human-readable reason from the compiler.
        reason: String,
    },
}

/// One step from the document root to a violating value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PathSegment {
    /// Array index.
    Index(usize),
    /// Object key.
    Key(String),
}

impl PathSegment {
    /// Decode one RFC 6901 reference token.
    fn from_token(token: &str) -> Self {
        let is_index = !token.is_empty()
            && token.bytes().all(|b| b.is_ascii_digit())
            && (token == "0" || !token.starts_with('0'));
        if is_index {
            if let Ok(index) = token.parse() {
                return Self::Index(index);
            }
        }
        Self::Key(token.replace("~1", "/").replace("~0", "~"))
    }
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(i) => write!(f, "{i}"),
            Self::Key(k) => f.write_str(k),
        }
    }
}

/// Split a JSON Pointer (`/entities/0/id`) into path segments.
fn parse_pointer(pointer: &str) -> Vec<PathSegment> {
    if pointer.is_empty() {
        return Vec::new();
    }
    pointer
        .split('/')
        .skip(1)
        .map(PathSegment::from_token)
        .collect()
}

/// A single schema non-conformance finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// Segments from the document root to the violating value. Empty for
    /// root-level violations.
    pub path: Vec<PathSegment>,
    /// Human-readable description, as produced by the validator.
    pub message: String,
}

impl Violation {
    /// The path rendered as `entities/0/id`, or `None` at the document root.
    pub fn location(&self) -> Option<String> {
        if self.path.is_empty() {
            return None;
        }
        let joined = self
            .path
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("/");
        Some(joined)
    }

    /// Compare by path only. Shorter prefixes sort first.
    pub fn cmp_path(&self, other: &Self) -> Ordering {
        self.path.cmp(&other.path)
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.location() {
            Some(location) => write!(f, "{} at $.{location}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Validation result for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentOutcome {
    /// Path of the validated document.
    pub path: PathBuf,
    /// Violations sorted by path. Empty when the document is valid.
    pub violations: Vec<Violation>,
}

impl DocumentOutcome {
    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }
}

/// Resolves external `$ref`s to schema files beside the root schema.
struct SiblingSchemaRetriever {
    base_dir: PathBuf,
}

impl SiblingSchemaRetriever {
    /// Map a reference URI onto a path relative to `base_dir`.
    ///
    /// Relative references resolve against the default base URI
    /// `json-schema:///`, so their path is kept as-is. For any other scheme
    /// only the final path component is used.
    fn local_path(&self, uri: &str) -> PathBuf {
        let uri = uri.split('#').next().unwrap_or(uri);
        if let Some(relative) = uri.strip_prefix("json-schema:///") {
            return self.base_dir.join(relative);
        }
        if let Some(absolute) = uri.strip_prefix("file://") {
            return PathBuf::from(absolute);
        }
        let filename = uri.rsplit('/').next().unwrap_or(uri);
        self.base_dir.join(filename)
    }
}

impl jsonschema::Retrieve for SiblingSchemaRetriever {
    fn retrieve(
        &self,
        uri: &jsonschema::Uri<&str>,
    ) -> Result<Value, Box<dyn std::error::Error + Send + Sync>> {
        let path = self.local_path(uri.as_str());
        tracing::debug!(uri = uri.as_str(), path = %path.display(), "resolving schema reference");
        Ok(load_json(&path)?)
    }
}

/// A JSON Schema compiled once and reused for every document.
///
/// `SchemaValidator` is `Send + Sync`; one instance may validate documents
/// from several threads.
pub struct SchemaValidator {
    source: String,
    validator: jsonschema::Validator,
}

impl fmt::Debug for SchemaValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaValidator")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl SchemaValidator {
    /// Load and compile the schema at `path`.
    ///
    /// # Errors
    ///
    /// [`SchemaValidationError::Load`] if the file is missing or not JSON,
    /// [`SchemaValidationError::SchemaCompile`] if it is not a usable schema.
    pub fn from_file(path: &Path) -> Result<Self, SchemaValidationError> {
        let schema = load_json(path)?;
        let base_dir = path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        Self::compile(&schema, base_dir, path.display().to_string())
    }

    /// Compile an in-memory schema. External `$ref`s resolve against `base_dir`.
    pub fn from_value(
        schema: &Value,
        base_dir: impl Into<PathBuf>,
    ) -> Result<Self, SchemaValidationError> {
        Self::compile(schema, base_dir.into(), "<inline schema>".to_string())
    }

    fn compile(
        schema: &Value,
        base_dir: PathBuf,
        source: String,
    ) -> Result<Self, SchemaValidationError> {
        let validator = jsonschema::options()
            .with_draft(jsonschema::Draft::Draft202012)
            .with_retriever(SiblingSchemaRetriever { base_dir })
            .build(schema)
            .map_err(|e| SchemaValidationError::SchemaCompile {
                path: source.clone(),
                reason: e.to_string(),
            })?;

        tracing::debug!(schema = %source, "compiled schema");
        Ok(Self { source, validator })
    }

    /// Where the schema came from, for diagnostics.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Collect every violation of `document`, sorted by path.
    pub fn validate(&self, document: &Value) -> Vec<Violation> {
        let mut violations: Vec<Violation> = self
            .validator
            .iter_errors(document)
            .map(|err| Violation {
                path: parse_pointer(&err.instance_path.to_string()),
                message: err.to_string(),
            })
            .collect();
        violations.sort_by(Violation::cmp_path);
        violations
    }

    /// True if `document` conforms to the schema.
    pub fn is_valid(&self, document: &Value) -> bool {
        self.validator.is_valid(document)
    }

    /// Load and validate a single document.
    pub fn validate_file(&self, path: &Path) -> Result<DocumentOutcome, SchemaValidationError> {
        let document = load_json(path)?;
        Ok(DocumentOutcome {
            path: path.to_path_buf(),
            violations: self.validate(&document),
        })
    }

    /// Validate every `.json` file under `dir`, in sorted path order.
    ///
    /// All documents are parsed before any is validated, so one unparseable
    /// file fails the whole run without partial results.
    pub fn validate_directory(
        &self,
        dir: &Path,
    ) -> Result<Vec<DocumentOutcome>, SchemaValidationError> {
        let paths = discover_json_files(dir);
        tracing::info!(dir = %dir.display(), documents = paths.len(), "discovered documents");

        let documents = paths
            .into_iter()
            .map(|path| load_json(&path).map(|doc| (path, doc)))
            .collect::<Result<Vec<_>, LoadError>>()?;

        Ok(documents
            .into_iter()
            .map(|(path, document)| DocumentOutcome {
                violations: self.validate(&document),
                path,
            })
            .collect())
    }
}

/// Render per-document outcomes into report lines.
///
/// An empty outcome list renders a single warning line and counts no errors.
pub fn render_report(outcomes: &[DocumentOutcome]) -> Report {
    let mut report = Report::new();

    for outcome in outcomes {
        if outcome.is_valid() {
            report.push_marked(Mark::Valid, format!("{}: valid", outcome.path.display()));
            continue;
        }

        report.add_errors(outcome.violations.len());
        report.push_marked(Mark::Failed, format!("{}:", outcome.path.display()));
        for violation in &outcome.violations {
            report.push_line(format!("   • {violation}"));
        }
    }

    if report.lines().is_empty() {
        report.push_marked(Mark::Warning, "No JSON files found to validate.");
    }

    report
}

/// Validate all JSON documents under `data_dir` against the schema at
/// `schema_path` and render the report.
pub fn validate_documents(
    schema_path: &Path,
    data_dir: &Path,
) -> Result<Report, SchemaValidationError> {
    let validator = SchemaValidator::from_file(schema_path)?;
    let outcomes = validator.validate_directory(data_dir)?;
    Ok(render_report(&outcomes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn entity_schema() -> Value {
        json!({
            "$schema": "https://json-schema.org/draft/2020-12/schema",
            "type": "object",
            "required": ["entities"],
            "properties": {
                "entities": {
                    "type": "array",
                    "items": { "$ref": "#/$defs/entity" }
                }
            },
            "$defs": {
                "entity": {
                    "type": "object",
                    "required": ["id"],
                    "properties": {
                        "id": { "type": "string", "pattern": "^[a-z]+\\.[a-z_]+$" },
                        "layer": { "enum": ["muscle", "bone", "nerve"] }
                    }
                }
            }
        })
    }

    fn validator() -> SchemaValidator {
        SchemaValidator::from_value(&entity_schema(), ".").unwrap()
    }

    #[test]
    fn parse_pointer_segments() {
        assert!(parse_pointer("").is_empty());
        assert_eq!(
            parse_pointer("/entities/0/id"),
            [
                PathSegment::Key("entities".into()),
                PathSegment::Index(0),
                PathSegment::Key("id".into()),
            ]
        );
        assert_eq!(
            parse_pointer("/a~1b/m~0n/007"),
            [
                PathSegment::Key("a/b".into()),
                PathSegment::Key("m~n".into()),
                PathSegment::Key("007".into()),
            ]
        );
    }

    #[test]
    fn valid_document_has_no_violations() {
        let doc = json!({"entities": [{"id": "muscle.biceps", "layer": "muscle"}]});
        assert!(validator().validate(&doc).is_empty());
        assert!(validator().is_valid(&doc));
    }

    #[test]
    fn wrong_id_type_points_at_field() {
        let violations = validator().validate(&json!({"entities": [{"id": 42}]}));
        assert_eq!(violations.len(), 1, "{violations:?}");
        assert_eq!(violations[0].location().as_deref(), Some("entities/0/id"));
        assert!(violations[0].to_string().ends_with(" at $.entities/0/id"));
    }

    #[test]
    fn root_violation_has_no_location() {
        let violations = validator().validate(&json!({}));
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].location(), None);
        assert_eq!(violations[0].to_string(), violations[0].message);
    }

    #[test]
    fn violations_sorted_by_path() {
        let doc = json!({
            "entities": [
                {"id": "muscle.biceps", "layer": "organ"},
                {"id": 1},
                {}
            ]
        });
        let violations = validator().validate(&doc);
        let locations: Vec<String> = violations.iter().filter_map(Violation::location).collect();
        assert_eq!(
            locations,
            ["entities/0/layer", "entities/1/id", "entities/2"]
        );
    }

    #[test]
    fn index_segments_compare_numerically() {
        let a = Violation {
            path: parse_pointer("/entities/2"),
            message: String::new(),
        };
        let b = Violation {
            path: parse_pointer("/entities/10"),
            message: String::new(),
        };
        assert_eq!(a.cmp_path(&b), Ordering::Less);
        let prefix = Violation {
            path: parse_pointer("/entities"),
            message: String::new(),
        };
        assert_eq!(prefix.cmp_path(&a), Ordering::Less);
    }

    #[test]
    fn invalid_schema_is_compile_error() {
        let err = SchemaValidator::from_value(&json!({"type": 12}), ".").unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::SchemaCompile { .. }),
            "got: {err}"
        );
    }

    #[test]
    fn render_report_formats_lines() {
        let outcomes = vec![
            DocumentOutcome {
                path: PathBuf::from("data/a.json"),
                violations: Vec::new(),
            },
            DocumentOutcome {
                path: PathBuf::from("data/b.json"),
                violations: vec![
                    Violation {
                        path: Vec::new(),
                        message: "\"entities\" is a required property".into(),
                    },
                    Violation {
                        path: parse_pointer("/entities/0/id"),
                        message: "42 is not of type \"string\"".into(),
                    },
                ],
            },
        ];
        let report = render_report(&outcomes);
        assert_eq!(
            report.lines(),
            [
                "✔️  data/a.json: valid",
                "❌ data/b.json:",
                "   • \"entities\" is a required property",
                "   • 42 is not of type \"string\" at $.entities/0/id",
            ]
        );
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.exit_code(), 1);
    }

    #[test]
    fn render_report_empty_is_warning_success() {
        let report = render_report(&[]);
        assert_eq!(report.lines(), ["⚠️  No JSON files found to validate."]);
        assert!(report.is_success());
    }

    #[test]
    fn retriever_maps_uris_to_local_files() {
        let retriever = SiblingSchemaRetriever {
            base_dir: PathBuf::from("/schemas"),
        };
        assert_eq!(
            retriever.local_path("json-schema:///defs/entity.schema.json"),
            PathBuf::from("/schemas/defs/entity.schema.json")
        );
        assert_eq!(
            retriever.local_path("https://example.org/schemas/entity.schema.json#/x"),
            PathBuf::from("/schemas/entity.schema.json")
        );
        assert_eq!(
            retriever.local_path("file:///opt/entity.schema.json"),
            PathBuf::from("/opt/entity.schema.json")
        );
    }
}
