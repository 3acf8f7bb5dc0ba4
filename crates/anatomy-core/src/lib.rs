//! # anatomy-core — Foundational Types for the Bundle Validator
//!
//! Leaf crate of the workspace. Defines the typed view of an anatomy
//! knowledge bundle, the load boundary that turns raw JSON into that view,
//! and the report format shared by both checkers.
//!
//! ## Key Design Principles
//!
//! 1. **Decode once, at the boundary.** Raw `serde_json::Value` documents are
//!    converted into [`Bundle`] / [`Entity`] / [`Relations`] by [`Bundle::from_value`].
//!    The checkers never poke at untyped JSON.
//!
//! 2. **Lenient decoding.** A parseable document never fails to decode. Missing
//!    or mistyped fields collapse to empty defaults; the checkers then report
//!    what matters (duplicates, dangling references) as ordinary findings.
//!
//! 3. **Closed set of relation kinds.** [`RelationKind`] enumerates the five
//!    recognised cross-reference categories. Unknown keys are ignored.
//!
//! 4. **Deterministic reports.** A [`Report`] is an ordered list of lines plus a
//!    violation count; identical input always renders identical bytes.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `anatomy-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod bundle;
pub mod error;
pub mod load;
pub mod report;

// Re-export primary types for ergonomic imports.
pub use bundle::{Bundle, Entity, RelationKind, Relations};
pub use error::LoadError;
pub use load::{load_bundle, load_json};
pub use report::{Mark, Report};
