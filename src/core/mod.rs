//! Core data structures for slipway.
//!
//! This module contains the foundational types used throughout the
//! resolver:
//! - The manifest input model (products, targets, settings)
//! - Platforms and deployment targets
//! - Output descriptors (targets, projects, link references)
//! - The aggregate dependencies graph and its merge strategies

pub mod descriptor;
pub mod graph;
pub mod manifest;
pub mod platform;

pub use descriptor::{
    bundle_id_for, ExternalDependency, HeadersDescriptor, ProductKind, ProjectDescriptor,
    SettingValue, TargetDescriptor, HEADER_EXTENSION, HEADER_SEARCH_PATHS,
};
pub use graph::{DependenciesGraph, MergeStrategy, OverwriteMerge, RejectDuplicates};
pub use manifest::{
    DependencyRef, LibraryLinkage, ManifestSetting, PackageManifest, Product, ProductSpecKind,
    Resource, ResourceRule, SettingName, SettingTool, TargetSpec, TargetSpecKind,
};
pub use platform::{DeploymentTarget, Device, Platform, PlatformConstraint};
