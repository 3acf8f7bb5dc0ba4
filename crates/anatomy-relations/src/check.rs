//! # Relation Check
//!
//! Duplicate and dangling-reference detection over a decoded [`Bundle`].
//! Results are sorted and deduplicated so a report never depends on entity
//! order or on how many times an id was repeated or referenced.

use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use anatomy_core::{load_bundle, Bundle, LoadError, Mark, Report};

/// Well-known location of the bundle checked by `anatomy relations`,
/// relative to the working directory.
pub const DEFAULT_BUNDLE_PATH: &str = "data/bundles/anatomy_3d_index.json";

/// Findings of one relation check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RelationFindings {
    /// Non-empty ids declared more than once, sorted.
    pub duplicates: Vec<String>,
    /// Referenced ids with no matching entity, sorted.
    pub missing: Vec<String>,
}

impl RelationFindings {
    /// Total number of findings.
    pub fn count(&self) -> usize {
        self.duplicates.len() + self.missing.len()
    }

    /// True when the bundle is unique and closed.
    pub fn is_consistent(&self) -> bool {
        self.count() == 0
    }

    /// Render the findings as report lines.
    pub fn to_report(&self) -> Report {
        let mut report = Report::new();

        if !self.duplicates.is_empty() {
            report.push_marked(Mark::Failed, "Duplicate IDs found:");
            for id in &self.duplicates {
                report.push_line(format!("  - {id}"));
            }
        }

        if !self.missing.is_empty() {
            report.push_marked(Mark::Failed, "Missing referenced IDs:");
            for id in &self.missing {
                report.push_line(format!("  - {id}"));
            }
        }

        if self.is_consistent() {
            report.push_marked(Mark::Consistent, "anatomy_3d_index relations look consistent.");
        }

        report.add_errors(self.count());
        report
    }
}

/// Check a bundle for duplicate ids and unresolved references.
pub fn check(bundle: &Bundle) -> RelationFindings {
    let mut occurrences: BTreeMap<&str, usize> = BTreeMap::new();
    for entity in &bundle.entities {
        *occurrences.entry(entity.id.as_str()).or_default() += 1;
    }

    let duplicates: Vec<String> = occurrences
        .iter()
        .filter(|(id, count)| !id.is_empty() && **count > 1)
        .map(|(id, _)| (*id).to_string())
        .collect();

    // Entities without an id declare nothing.
    let declared: HashSet<&str> = occurrences
        .keys()
        .copied()
        .filter(|id| !id.is_empty())
        .collect();
    let missing: BTreeSet<&str> = bundle
        .entities
        .iter()
        .filter_map(|entity| entity.relations.as_ref())
        .flat_map(|relations| relations.iter().map(|(_, reference)| reference))
        .filter(|reference| !declared.contains(reference))
        .collect();

    tracing::debug!(
        entities = bundle.entities.len(),
        duplicates = duplicates.len(),
        missing = missing.len(),
        "checked relations"
    );

    RelationFindings {
        duplicates,
        missing: missing.into_iter().map(str::to_string).collect(),
    }
}

/// Load the bundle at `path` and check it.
///
/// # Errors
///
/// Returns [`LoadError`] if the bundle is missing or not valid JSON.
pub fn check_file(path: &Path) -> Result<RelationFindings, LoadError> {
    let bundle = load_bundle(path)?;
    Ok(check(&bundle))
}
