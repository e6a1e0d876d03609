//! Test utilities and mocks for slipway unit tests.
//!
//! Provides in-memory implementations of the two external collaborators
//! (manifest loader, directory lister) plus fixture helpers, so mapping and
//! generation can be tested without real checkouts on disk.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};

use crate::core::manifest::PackageManifest;
use crate::loader::ManifestLoader;
use crate::util::fs::DirectoryLister;

/// In-memory manifest loader keyed by package root.
///
/// Roots without a registered manifest fail to load, which is how tests
/// exercise `ManifestLoadFailure`.
#[derive(Debug, Clone, Default)]
pub struct MockManifestLoader {
    manifests: HashMap<PathBuf, PackageManifest>,
}

impl MockManifestLoader {
    /// Create an empty loader.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the manifest returned for a package root.
    pub fn add(&mut self, root: impl AsRef<Path>, manifest: PackageManifest) {
        self.manifests.insert(root.as_ref().to_path_buf(), manifest);
    }
}

impl ManifestLoader for MockManifestLoader {
    fn load(&self, root: &Path) -> Result<PackageManifest> {
        match self.manifests.get(root) {
            Some(manifest) => Ok(manifest.clone()),
            None => bail!("no manifest registered for {}", root.display()),
        }
    }
}

/// In-memory directory lister.
///
/// Unregistered paths report `None`, matching the real collaborator's
/// "not queried/unknown" contract.
#[derive(Debug, Clone, Default)]
pub struct MockDirectoryLister {
    directories: HashMap<PathBuf, Vec<PathBuf>>,
}

impl MockDirectoryLister {
    /// Create an empty lister.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a directory's entries by file name; listed paths come back
    /// joined onto the directory.
    pub fn add(
        &mut self,
        dir: impl AsRef<Path>,
        entries: impl IntoIterator<Item = impl AsRef<Path>>,
    ) {
        let dir = dir.as_ref().to_path_buf();
        let full: Vec<PathBuf> = entries.into_iter().map(|e| dir.join(e.as_ref())).collect();
        self.directories.insert(dir, full);
    }
}

impl DirectoryLister for MockDirectoryLister {
    fn list(&self, path: &Path) -> Option<Vec<PathBuf>> {
        self.directories.get(path).cloned()
    }
}

/// Write a workspace state file listing the given `(kind, name, path)`
/// references and return its location.
pub fn write_workspace_state(dir: &Path, references: &[(&str, &str, &str)]) -> PathBuf {
    let dependencies: Vec<String> = references
        .iter()
        .map(|(kind, name, path)| {
            format!(
                r#"{{ "packageRef": {{ "kind": "{kind}", "name": "{name}", "path": "{path}" }} }}"#
            )
        })
        .collect();

    let document = format!(
        r#"{{ "object": {{ "dependencies": [ {} ] }} }}"#,
        dependencies.join(", ")
    );

    let path = dir.join("workspace-state.json");
    std::fs::write(&path, document).unwrap();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::TargetSpec;
    use crate::generator::state::read_workspace_state;

    #[test]
    fn test_mock_loader_round_trip() {
        let mut loader = MockManifestLoader::new();
        let manifest = PackageManifest {
            products: vec![],
            targets: vec![TargetSpec::regular("T1")],
            platforms: vec![],
        };
        loader.add("/pkg", manifest.clone());

        assert_eq!(loader.load(Path::new("/pkg")).unwrap(), manifest);
        assert!(loader.load(Path::new("/other")).is_err());
    }

    #[test]
    fn test_mock_lister_joins_entries() {
        let mut lister = MockDirectoryLister::new();
        lister.add("/pkg/include", ["api.h"]);

        let entries = lister.list(Path::new("/pkg/include")).unwrap();
        assert_eq!(entries, vec![PathBuf::from("/pkg/include/api.h")]);
        assert!(lister.list(Path::new("/pkg/src")).is_none());
    }

    #[test]
    fn test_write_workspace_state_parses_back() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = write_workspace_state(
            tmp.path(),
            &[("remote", "PackageA", "https://example.org/PackageA")],
        );

        let refs = read_workspace_state(&path).unwrap();
        assert_eq!(refs.len(), 1);
        assert_eq!(refs[0].name, "PackageA");
    }
}
