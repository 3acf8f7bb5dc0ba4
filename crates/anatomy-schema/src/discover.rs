//! # Document Discovery
//!
//! Recursive listing of `.json` files under a data directory, sorted by path
//! so that reports are stable across runs and platforms.

use std::path::{Path, PathBuf};

/// Recursively find every regular file with a `.json` extension under `dir`.
///
/// A missing directory yields an empty list. Unreadable subdirectories are
/// skipped with a warning. Symlinked directories are not followed.
pub fn discover_json_files(dir: &Path) -> Vec<PathBuf> {
    if !dir.is_dir() {
        tracing::warn!(dir = %dir.display(), "data directory does not exist");
        return Vec::new();
    }

    let mut results = Vec::new();
    walk(dir, &mut results);
    results.sort();
    results
}

fn walk(dir: &Path, acc: &mut Vec<PathBuf>) {
    let entries = match std::fs::read_dir(dir) {
        Ok(e) => e,
        Err(e) => {
            tracing::warn!(
                dir = %dir.display(),
                error = %e,
                "failed to read directory during discovery"
            );
            return;
        }
    };

    for entry in entries {
        let entry = match entry {
            Ok(e) => e,
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "failed to read directory entry");
                continue;
            }
        };
        let path = entry.path();
        let is_real_dir = entry.file_type().map(|t| t.is_dir()).unwrap_or(false);
        if is_real_dir {
            walk(&path, acc);
        } else if path.is_file() && is_json(&path) {
            acc.push(path);
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().and_then(|e| e.to_str()) == Some("json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(discover_json_files(&dir.path().join("nope")).is_empty());
    }

    #[test]
    fn finds_nested_json_sorted() {
        let dir = tempfile::tempdir().unwrap();
        let deep = dir.path().join("b").join("c");
        std::fs::create_dir_all(&deep).unwrap();
        std::fs::create_dir_all(dir.path().join("a")).unwrap();
        std::fs::write(deep.join("z.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("a").join("y.json"), b"{}").unwrap();
        std::fs::write(dir.path().join("x.json"), b"{}").unwrap();

        let files = discover_json_files(dir.path());
        let rel: Vec<PathBuf> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            [
                PathBuf::from("a/y.json"),
                PathBuf::from("b/c/z.json"),
                PathBuf::from("x.json"),
            ]
        );
    }

    #[test]
    fn ignores_other_extensions_and_directories_named_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("notes.txt"), b"hello").unwrap();
        std::fs::write(dir.path().join("data.json.bak"), b"{}").unwrap();
        std::fs::write(dir.path().join("upper.JSON"), b"{}").unwrap();
        std::fs::create_dir_all(dir.path().join("folder.json")).unwrap();
        assert!(discover_json_files(dir.path()).is_empty());
    }
}
