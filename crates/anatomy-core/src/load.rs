//! # JSON Loading
//!
//! Reads UTF-8 JSON documents from disk into `serde_json::Value`, mapping
//! every failure onto [`LoadError`].

use std::path::Path;

use serde_json::Value;

use crate::bundle::Bundle;
use crate::error::LoadError;

/// Load and parse a JSON document.
///
/// # Errors
///
/// Returns [`LoadError::NotFound`] if `path` does not exist,
/// [`LoadError::Read`] if it cannot be read as UTF-8 text, and
/// [`LoadError::Parse`] if the contents are not valid JSON.
pub fn load_json(path: &Path) -> Result<Value, LoadError> {
    if !path.exists() {
        return Err(LoadError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Load a bundle document and decode it into the typed [`Bundle`] view.
///
/// Decoding is lenient; only the file load itself can fail.
pub fn load_bundle(path: &Path) -> Result<Bundle, LoadError> {
    let value = load_json(path)?;
    let bundle = Bundle::from_value(value);
    tracing::debug!(
        path = %path.display(),
        bundle_id = bundle.bundle_id.as_deref().unwrap_or("-"),
        version = bundle.version.as_deref().unwrap_or("-"),
        entities = bundle.entities.len(),
        "loaded bundle"
    );
    Ok(bundle)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_json_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.json");
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }), "got: {err}");
        assert_eq!(err.path(), path.as_path());
        assert!(err.to_string().contains("absent.json"));
    }

    #[test]
    fn load_json_invalid_content_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, b"{\"entities\": [").unwrap();
        let err = load_json(&path).unwrap_err();
        assert!(matches!(err, LoadError::Parse { .. }), "got: {err}");
        assert!(err.to_string().starts_with("invalid JSON in "));
    }

    #[test]
    fn load_json_reads_valid_document() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ok.json");
        std::fs::write(&path, br#"{"entities": []}"#).unwrap();
        let value = load_json(&path).unwrap();
        assert!(value["entities"].as_array().unwrap().is_empty());
    }

    #[test]
    fn load_bundle_decodes_entities() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bundle.json");
        std::fs::write(
            &path,
            br#"{"bundle_id": "core", "entities": [{"id": "bone.radius"}]}"#,
        )
        .unwrap();
        let bundle = load_bundle(&path).unwrap();
        assert_eq!(bundle.bundle_id.as_deref(), Some("core"));
        assert_eq!(bundle.entities.len(), 1);
        assert_eq!(bundle.entities[0].id, "bone.radius");
    }

    #[test]
    fn load_bundle_directory_path_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_bundle(dir.path()).unwrap_err();
        assert!(matches!(err, LoadError::Read { .. }), "got: {err}");
    }
}
