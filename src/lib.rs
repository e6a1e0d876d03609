//! Slipway - package-manifest to build-graph resolver.
//!
//! This crate turns an external package manager's resolved workspace state
//! into a typed dependencies graph for a native-IDE project generator:
//! manifest loading, platform selection, target/source mapping, and graph
//! merging with conflict detection.

pub mod core;
pub mod errors;
pub mod generator;
pub mod loader;
pub mod mapper;
pub mod util;

/// Test utilities and mocks for slipway unit tests.
///
/// This module is only available when compiling with `--cfg test` or
/// running tests. It provides mock implementations for the manifest loader
/// and directory lister collaborators.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    DependenciesGraph, ExternalDependency, MergeStrategy, OverwriteMerge, PackageManifest,
    Platform, ProductKind, ProjectDescriptor, RejectDuplicates, TargetDescriptor,
};
pub use errors::GraphError;
pub use generator::GraphGenerator;
pub use loader::{JsonManifestLoader, ManifestLoader};
pub use util::{DirectoryLister, GenerateOptions, OsDirectoryLister};
