//! # Validate Subcommand
//!
//! Schema conformance of every JSON document under a data directory.
//! The report is persisted to a flat file for CI artifacts and echoed
//! to stdout.

use std::path::{Path, PathBuf};

use anatomy_core::Report;
use anyhow::{Context, Result};
use clap::Args;

use anatomy_schema::validate_documents;

/// Default location of the persisted report, relative to the working directory.
pub const DEFAULT_REPORT_PATH: &str = "bundle-validation-report.txt";

/// Arguments for `anatomy validate`.
#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    /// Path to the JSON schema file.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// Path to the directory containing bundled JSON files.
    #[arg(long, value_name = "DIR")]
    pub data: PathBuf,

    /// Where to write the plain-text report.
    #[arg(long, value_name = "PATH", default_value = DEFAULT_REPORT_PATH)]
    pub report: PathBuf,
}

/// Validate the data directory and persist the report.
///
/// # Errors
///
/// Fails if the schema or any document cannot be loaded, the schema does not
/// compile, or the report file cannot be written.
pub fn schema_report(args: &ValidateArgs) -> Result<Report> {
    let report = validate_documents(&args.schema, &args.data).with_context(|| {
        format!(
            "schema validation of {} against {} aborted",
            args.data.display(),
            args.schema.display()
        )
    })?;

    write_report(&report, &args.report)?;

    tracing::info!(
        errors = report.error_count(),
        report = %args.report.display(),
        "schema validation finished"
    );
    Ok(report)
}

/// Write report lines joined by `\n`, without a trailing newline.
pub fn write_report(report: &Report, path: &Path) -> Result<()> {
    std::fs::write(path, report.to_string())
        .with_context(|| format!("failed to write report to {}", path.display()))
}

/// Execute `anatomy validate`.
pub fn run_validate(args: &ValidateArgs) -> Result<u8> {
    let report = schema_report(args)?;
    crate::print_report(&report);
    Ok(report.exit_code())
}
