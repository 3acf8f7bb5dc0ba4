//! # anatomy-cli — Bundle Validator Command-Line Interface
//!
//! Thin glue around the two checkers. Argument parsing and report
//! persistence live here; all checking logic lives in `anatomy-schema` and
//! `anatomy-relations`.
//!
//! ## Subcommands
//!
//! - `anatomy validate --schema <PATH> --data <DIR>`: schema conformance of
//!   every `.json` file under `DIR`; the report is also written to
//!   `bundle-validation-report.txt`.
//! - `anatomy relations`: referential integrity of
//!   `data/bundles/anatomy_3d_index.json`.
//! - `anatomy check --schema <PATH> --data <DIR>`: both, with an aggregated
//!   exit status.
//!
//! Every handler returns the process exit code: 0 when the checker found
//! nothing, 1 otherwise. Load failures surface as `Err`.

pub mod check;
pub mod relations;
pub mod validate;

use anatomy_core::Report;

/// Print report lines to stdout, one per line.
pub fn print_report(report: &Report) {
    for line in report.lines() {
        println!("{line}");
    }
}
