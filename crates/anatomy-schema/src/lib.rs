//! # anatomy-schema — Schema Conformance for Bundle Data
//!
//! Validates every `.json` document under a data directory against a single
//! JSON Schema (Draft 2020-12) and renders a deterministic report.
//!
//! ## Flow
//!
//! 1. [`SchemaValidator::from_file`] loads and compiles the schema once.
//!    External `$ref`s resolve against files next to the schema; nothing is
//!    fetched over the network.
//! 2. [`discover_json_files`] lists the data directory recursively, sorted.
//! 3. [`SchemaValidator::validate_directory`] parses every document up front
//!    (an unparseable document is a fatal load error), then collects all
//!    violations per document, sorted by instance path.
//! 4. [`render_report`] turns the outcomes into report lines and a
//!    violation count.
//!
//! [`validate_documents`] runs the whole pipeline.

pub mod discover;
pub mod validate;

pub use discover::discover_json_files;
pub use validate::{
    render_report, validate_documents, DocumentOutcome, PathSegment, SchemaValidationError,
    SchemaValidator, Violation,
};
