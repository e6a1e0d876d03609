//! Workspace resolution state parsing.
//!
//! The external package manager writes a JSON document describing the flat,
//! already-resolved set of package references. This module parses that
//! document and resolves each reference to the directory its manifest loads
//! from.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::errors::GraphError;

/// One resolved dependency from the workspace state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReference {
    /// Local packages live at their recorded location; remote packages are
    /// checked out under the shared checkouts root.
    pub kind: ReferenceKind,

    /// Package name; graph identity.
    pub name: String,

    /// Recorded location: a filesystem path for local references, the
    /// upstream URL for remote ones.
    pub location: PathBuf,
}

impl PackageReference {
    /// The directory this reference's manifest loads from.
    pub fn manifest_root(&self, checkouts_root: &Path) -> PathBuf {
        match self.kind {
            ReferenceKind::Local => self.location.clone(),
            ReferenceKind::Remote => checkouts_root.join(&self.name),
        }
    }
}

/// Where a referenced package lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Local,
    Remote,
}

// Wire shape of the state document:
// { "object": { "dependencies": [ { "packageRef": { "kind", "name", "path" } } ] } }

#[derive(Debug, Deserialize)]
struct StateDocument {
    object: StateObject,
}

#[derive(Debug, Deserialize)]
struct StateObject {
    dependencies: Vec<StateDependency>,
}

#[derive(Debug, Deserialize)]
struct StateDependency {
    #[serde(rename = "packageRef")]
    package_ref: StatePackageRef,
}

#[derive(Debug, Deserialize)]
struct StatePackageRef {
    kind: ReferenceKind,
    name: String,
    path: PathBuf,
}

/// Read and parse the workspace state file.
///
/// A missing or malformed file fails the whole run; no partial reference
/// list is ever returned.
pub fn read_workspace_state(path: &Path) -> Result<Vec<PackageReference>, GraphError> {
    let contents = std::fs::read_to_string(path).map_err(|e| GraphError::InvalidWorkspaceState {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;

    parse_workspace_state(path, &contents)
}

/// Parse workspace state from an in-memory document.
pub fn parse_workspace_state(
    path: &Path,
    contents: &str,
) -> Result<Vec<PackageReference>, GraphError> {
    let document: StateDocument =
        serde_json::from_str(contents).map_err(|e| GraphError::InvalidWorkspaceState {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

    Ok(document
        .object
        .dependencies
        .into_iter()
        .map(|dep| PackageReference {
            kind: dep.package_ref.kind,
            name: dep.package_ref.name,
            location: dep.package_ref.path,
        })
        .collect())
}
