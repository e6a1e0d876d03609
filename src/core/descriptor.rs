//! Normalized build-target descriptors — what the project generator consumes.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::platform::{DeploymentTarget, Platform};

/// Build-setting key for aggregated header search paths.
pub const HEADER_SEARCH_PATHS: &str = "HEADER_SEARCH_PATHS";

/// File extension recognized as a public native-library header.
pub const HEADER_EXTENSION: &str = "h";

/// The concrete product a mapped target builds into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Statically linked framework; the default mapping for automatic and
    /// static library products.
    StaticFramework,
    /// Dynamically linked framework.
    Framework,
    StaticLibrary,
    DynamicLibrary,
    Bundle,
}

/// A build-setting value attached to a target descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SettingValue {
    String(String),
    List(Vec<String>),
}

impl From<&str> for SettingValue {
    fn from(s: &str) -> Self {
        SettingValue::String(s.to_string())
    }
}

impl From<Vec<String>> for SettingValue {
    fn from(values: Vec<String>) -> Self {
        SettingValue::List(values)
    }
}

/// A fully-mapped build target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetDescriptor {
    /// Target name, as declared in the manifest.
    pub name: String,

    /// Platform the target builds for.
    pub platform: Platform,

    /// Concrete product kind.
    pub product: ProductKind,

    /// Bundle identifier derived from the target name.
    pub bundle_id: String,

    /// Minimum platform version, when the manifest constrains one.
    #[serde(default)]
    pub deployment_target: Option<DeploymentTarget>,

    /// Source file globs, in declaration order.
    pub sources: Vec<String>,

    /// Resource file globs, in declaration order.
    #[serde(default)]
    pub resources: Vec<String>,

    /// Discovered public headers, when any exist.
    #[serde(default)]
    pub headers: Option<HeadersDescriptor>,

    /// Translated build settings.
    #[serde(default)]
    pub settings: BTreeMap<String, SettingValue>,
}

/// Public headers of a mapped target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeadersDescriptor {
    /// Absolute paths of discovered public headers, sorted.
    pub public: Vec<PathBuf>,
}

/// One mapped package: a project the generator can emit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDescriptor {
    /// Package name.
    pub name: String,

    /// Mapped targets, in manifest declaration order.
    pub targets: Vec<TargetDescriptor>,
}

impl ProjectDescriptor {
    /// Look up a mapped target by name.
    pub fn target(&self, name: &str) -> Option<&TargetDescriptor> {
        self.targets.iter().find(|t| t.name == name)
    }
}

/// How a downstream build unit links one produced target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExternalDependency {
    /// Target name within the producing project.
    pub target: String,

    /// Producing package name.
    pub package: String,

    /// Product kind the target resolves to.
    pub product: ProductKind,
}

/// Derive a bundle identifier from a target name.
///
/// IDE bundle identifiers disallow underscores.
pub fn bundle_id_for(target_name: &str) -> String {
    target_name.replace('_', "-")
}
