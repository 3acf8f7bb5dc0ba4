//! # Relations Subcommand
//!
//! Referential integrity of the anatomy index bundle at its well-known path.

use std::path::Path;

use anatomy_core::Report;
use anyhow::{Context, Result};

use anatomy_relations::{check_file, DEFAULT_BUNDLE_PATH};

/// Check `data/bundles/anatomy_3d_index.json` under `work_dir`.
///
/// # Errors
///
/// Fails if the bundle is missing or is not valid JSON.
pub fn relations_report(work_dir: &Path) -> Result<Report> {
    let bundle_path = work_dir.join(DEFAULT_BUNDLE_PATH);
    let findings = check_file(&bundle_path).context("relation check aborted")?;

    tracing::info!(
        duplicates = findings.duplicates.len(),
        missing = findings.missing.len(),
        "relation check finished"
    );
    Ok(findings.to_report())
}

/// Execute `anatomy relations`.
pub fn run_relations(work_dir: &Path) -> Result<u8> {
    let report = relations_report(work_dir)?;
    crate::print_report(&report);
    Ok(report.exit_code())
}
