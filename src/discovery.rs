//! Manifest discovery
//!
//! Lists a single directory (no recursion) and keeps regular files whose name
//! matches a glob. Results are sorted by path so "last one wins" decisions
//! later in the run are reproducible.

use glob::Pattern;
use std::path::{Path, PathBuf};
use tokio::fs;

use crate::error::DiscoveryError;

/// Find manifest files in `dir` whose file name matches `pattern`
pub async fn discover_manifests(dir: &Path, pattern: &str) -> Result<Vec<PathBuf>, DiscoveryError> {
    let glob_pattern = Pattern::new(pattern).map_err(|e| DiscoveryError::InvalidPattern {
        pattern: pattern.to_string(),
        message: e.to_string(),
    })?;

    let list_failed = |e: std::io::Error| DiscoveryError::ListFailed {
        path: dir.to_path_buf(),
        message: e.to_string(),
    };

    let mut entries = fs::read_dir(dir).await.map_err(list_failed)?;
    let mut manifests = Vec::new();

    while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
        let path = entry.path();

        // Follows symlinks, so a link to a manifest counts
        if !path.is_file() {
            continue;
        }

        if let Some(filename) = path.file_name().and_then(|n| n.to_str()) {
            if glob_pattern.matches(filename) {
                manifests.push(path);
            }
        }
    }

    manifests.sort();
    Ok(manifests)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn touch(dir: &Path, name: &str) {
        std::fs::write(dir.join(name), "kind: Test\n").unwrap();
    }

    #[tokio::test]
    async fn test_matches_only_yaml_files_sorted() {
        let dir = TempDir::new().unwrap();
        touch(dir.path(), "b-deployment.yaml");
        touch(dir.path(), "a-secret.yaml");
        touch(dir.path(), "notes.txt");
        touch(dir.path(), "service.yml");

        let found = discover_manifests(dir.path(), "*.yaml").await.unwrap();
        let names: Vec<_> = found
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a-secret.yaml", "b-deployment.yaml"]);
    }

    #[tokio::test]
    async fn test_ignores_subdirectories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("nested.yaml")).unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        touch(&dir.path().join("sub"), "deep.yaml");
        touch(dir.path(), "top.yaml");

        let found = discover_manifests(dir.path(), "*.yaml").await.unwrap();
        assert_eq!(found, vec![dir.path().join("top.yaml")]);
    }

    #[tokio::test]
    async fn test_empty_directory() {
        let dir = TempDir::new().unwrap();
        let found = discover_manifests(dir.path(), "*.yaml").await.unwrap();
        assert!(found.is_empty());
    }

    #[tokio::test]
    async fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = discover_manifests(&dir.path().join("absent"), "*.yaml").await;
        assert!(matches!(result, Err(DiscoveryError::ListFailed { .. })));
    }

    #[tokio::test]
    async fn test_invalid_pattern_is_an_error() {
        let dir = TempDir::new().unwrap();
        let result = discover_manifests(dir.path(), "[").await;
        assert!(matches!(result, Err(DiscoveryError::InvalidPattern { .. })));
    }
}
