//! # Check Subcommand
//!
//! Runs the schema validator and then the relation checker. The checkers
//! share nothing; a load failure in one is reported and the other still
//! runs. The exit status is non-zero if either failed or found anything.

use std::path::Path;

use anyhow::Result;
use clap::Args;

use crate::relations::relations_report;
use crate::validate::{schema_report, ValidateArgs};

/// Arguments for `anatomy check`.
#[derive(Args, Debug, Clone)]
pub struct CheckArgs {
    #[command(flatten)]
    pub validate: ValidateArgs,
}

/// Execute `anatomy check`.
pub fn run_check(args: &CheckArgs, work_dir: &Path) -> Result<u8> {
    let mut failed = false;

    match schema_report(&args.validate) {
        Ok(report) => {
            crate::print_report(&report);
            failed |= !report.is_success();
        }
        Err(e) => {
            tracing::error!("{e:#}");
            failed = true;
        }
    }

    match relations_report(work_dir) {
        Ok(report) => {
            crate::print_report(&report);
            failed |= !report.is_success();
        }
        Err(e) => {
            tracing::error!("{e:#}");
            failed = true;
        }
    }

    Ok(u8::from(failed))
}
