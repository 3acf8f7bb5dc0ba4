//! # anatomy-relations — Referential Integrity
//!
//! Verifies that a bundle forms a closed, uniquely-keyed graph:
//!
//! - every non-empty entity `id` appears exactly once;
//! - every id listed under `origin`, `insertion`, `innervated_by`,
//!   `supplied_by` or `adjacent_to` names an entity in the bundle.
//!
//! The two checks are independent. A duplicated id still counts as present
//! for reference resolution, and references from an entity with a broken id
//! are still checked.

pub mod check;

pub use check::{check, check_file, RelationFindings, DEFAULT_BUNDLE_PATH};
