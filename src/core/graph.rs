//! The aggregate dependencies graph and its merge strategies.
//!
//! Two merge levels exist with different conflict policies. Within one
//! manager's resolution pass a later entry overwrites an earlier one (the
//! workspace state is already deduplicated, collisions are not expected).
//! Across managers a collision is an error: silently preferring one
//! manager's artifact over another's would surprise the user at link time.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::descriptor::{ExternalDependency, ProjectDescriptor};
use crate::errors::GraphError;

/// The build graph handed to the project generator: every external project
/// to emit, and how downstream build units link each produced target.
///
/// Maps are ordered so that equal inputs serialize byte-identically.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DependenciesGraph {
    /// Link references keyed by target name.
    #[serde(default)]
    pub external_dependencies: BTreeMap<String, ExternalDependency>,

    /// Mapped projects keyed by package name.
    #[serde(default)]
    pub external_projects: BTreeMap<String, ProjectDescriptor>,
}

impl DependenciesGraph {
    /// An empty graph; the identity element for both merge strategies.
    pub fn new() -> Self {
        Self::default()
    }

    /// Check whether the graph carries no entries at all.
    pub fn is_empty(&self) -> bool {
        self.external_dependencies.is_empty() && self.external_projects.is_empty()
    }
}

/// A policy for combining two dependencies graphs.
///
/// The strategy is chosen by the caller based on the merge level; the two
/// levels must not be conflated behind a flag.
pub trait MergeStrategy {
    /// Combine two graphs into one, or fail on a conflict the policy
    /// rejects.
    fn combine(
        &self,
        left: DependenciesGraph,
        right: DependenciesGraph,
    ) -> Result<DependenciesGraph, GraphError>;
}

/// Same-manager accumulation: a later entry with the same key replaces an
/// earlier one, for dependencies and projects alike. Never fails.
#[derive(Debug, Clone, Copy, Default)]
pub struct OverwriteMerge;

impl MergeStrategy for OverwriteMerge {
    fn combine(
        &self,
        mut left: DependenciesGraph,
        right: DependenciesGraph,
    ) -> Result<DependenciesGraph, GraphError> {
        left.external_dependencies.extend(right.external_dependencies);
        left.external_projects.extend(right.external_projects);
        Ok(left)
    }
}

/// Cross-manager aggregation: any key present in both graphs is a
/// `DuplicatedDependency` error naming the colliding dependency.
#[derive(Debug, Clone, Copy, Default)]
pub struct RejectDuplicates;

impl MergeStrategy for RejectDuplicates {
    fn combine(
        &self,
        mut left: DependenciesGraph,
        right: DependenciesGraph,
    ) -> Result<DependenciesGraph, GraphError> {
        for name in right.external_dependencies.keys() {
            if left.external_dependencies.contains_key(name) {
                return Err(GraphError::DuplicatedDependency { name: name.clone() });
            }
        }
        for name in right.external_projects.keys() {
            if left.external_projects.contains_key(name) {
                return Err(GraphError::DuplicatedDependency { name: name.clone() });
            }
        }

        left.external_dependencies.extend(right.external_dependencies);
        left.external_projects.extend(right.external_projects);
        Ok(left)
    }
}
