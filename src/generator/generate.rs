//! Package graph generation.
//!
//! Drives the whole per-manager pass: read the workspace state, load every
//! referenced manifest, map each one, and accumulate the results into a
//! single graph. Any failure aborts the run; downstream consumers assume a
//! complete graph.

use std::path::Path;

use rayon::prelude::*;

use crate::core::descriptor::{ExternalDependency, ProjectDescriptor};
use crate::core::graph::{DependenciesGraph, MergeStrategy, OverwriteMerge};
use crate::errors::GraphError;
use crate::generator::state::{read_workspace_state, PackageReference};
use crate::loader::ManifestLoader;
use crate::mapper::map_package;
use crate::util::config::GenerateOptions;
use crate::util::fs::DirectoryLister;

/// Generates a per-manager dependencies graph from a workspace resolution
/// state file.
pub struct GraphGenerator<'a> {
    loader: &'a (dyn ManifestLoader + Sync),
    lister: &'a (dyn DirectoryLister + Sync),
}

impl<'a> GraphGenerator<'a> {
    /// Create a generator over the two external collaborators.
    pub fn new(
        loader: &'a (dyn ManifestLoader + Sync),
        lister: &'a (dyn DirectoryLister + Sync),
    ) -> Self {
        GraphGenerator { loader, lister }
    }

    /// Generate the dependencies graph for one manager's resolution pass.
    ///
    /// Packages are mapped in parallel; results are collected in original
    /// reference order, so output is deterministic regardless of scheduling.
    pub fn generate(
        &self,
        workspace_state: &Path,
        options: &GenerateOptions,
    ) -> Result<DependenciesGraph, GraphError> {
        let references = read_workspace_state(workspace_state)?;
        tracing::info!(
            state = %workspace_state.display(),
            packages = references.len(),
            "generating dependencies graph"
        );

        // Collect per-package results first and reduce in reference order,
        // so the surfaced error is the first failing reference no matter
        // how rayon schedules the mapping.
        let results: Vec<Result<ProjectDescriptor, GraphError>> = references
            .par_iter()
            .map(|reference| self.resolve_reference(reference, options))
            .collect();
        let projects: Vec<ProjectDescriptor> =
            results.into_iter().collect::<Result<_, _>>()?;

        let mut graph = DependenciesGraph::new();
        for project in projects {
            graph = OverwriteMerge.combine(graph, graph_for_project(project))?;
        }
        Ok(graph)
    }

    fn resolve_reference(
        &self,
        reference: &PackageReference,
        options: &GenerateOptions,
    ) -> Result<ProjectDescriptor, GraphError> {
        let root = reference.manifest_root(&options.checkouts_root);
        tracing::debug!(package = %reference.name, root = %root.display(), "loading manifest");

        let manifest =
            self.loader
                .load(&root)
                .map_err(|source| GraphError::ManifestLoadFailure {
                    package: reference.name.clone(),
                    path: root.clone(),
                    source,
                })?;

        map_package(&reference.name, &root, &manifest, options, self.lister)
    }
}

/// Lift one mapped project into a single-package graph: the project itself
/// plus one link reference per surviving target.
fn graph_for_project(project: ProjectDescriptor) -> DependenciesGraph {
    let mut graph = DependenciesGraph::new();

    for target in &project.targets {
        graph.external_dependencies.insert(
            target.name.clone(),
            ExternalDependency {
                target: target.name.clone(),
                package: project.name.clone(),
                product: target.product,
            },
        );
    }

    graph.external_projects.insert(project.name.clone(), project);
    graph
}
