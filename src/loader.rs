//! Manifest loader contract.
//!
//! Loading a manifest belongs to the package manager's own tooling; the
//! resolver only depends on this signature. A JSON-backed implementation is
//! provided for the common case where the manager dumps its manifest as a
//! JSON document inside the package checkout.

use std::path::Path;

use anyhow::{Context, Result};

use crate::core::manifest::PackageManifest;

/// Default file name `JsonManifestLoader` looks for in a package root.
pub const MANIFEST_DUMP_NAME: &str = "Package.json";

/// External collaborator that turns a resolved package's on-disk location
/// into a parsed manifest.
pub trait ManifestLoader {
    /// Load the manifest for the package rooted at `root`.
    fn load(&self, root: &Path) -> Result<PackageManifest>;
}

/// Loads manifests from a JSON dump inside the package root.
#[derive(Debug, Clone)]
pub struct JsonManifestLoader {
    manifest_name: String,
}

impl JsonManifestLoader {
    /// Create a loader using [`MANIFEST_DUMP_NAME`].
    pub fn new() -> Self {
        JsonManifestLoader {
            manifest_name: MANIFEST_DUMP_NAME.to_string(),
        }
    }

    /// Create a loader looking for a custom dump file name.
    pub fn with_manifest_name(manifest_name: impl Into<String>) -> Self {
        JsonManifestLoader {
            manifest_name: manifest_name.into(),
        }
    }
}

impl Default for JsonManifestLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ManifestLoader for JsonManifestLoader {
    fn load(&self, root: &Path) -> Result<PackageManifest> {
        let path = root.join(&self.manifest_name);
        let contents = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read manifest: {}", path.display()))?;

        serde_json::from_str(&contents)
            .with_context(|| format!("failed to parse manifest: {}", path.display()))
    }
}
