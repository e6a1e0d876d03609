//! Package manifest input model.
//!
//! The manifest is produced by an external loader (the package manager's
//! own dump of its declaration file) and is read-only input to mapping.
//! Kinds are closed variant sets so the filtering and translation steps can
//! match exhaustively instead of string-comparing.

use serde::{Deserialize, Serialize};

use crate::core::platform::PlatformConstraint;

/// A parsed package manifest: what the package exports, what it builds,
/// and which platforms it supports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageManifest {
    /// Exported products.
    #[serde(default)]
    pub products: Vec<Product>,

    /// Declared build targets.
    #[serde(default)]
    pub targets: Vec<TargetSpec>,

    /// Platform support declarations. Empty means "supports everything".
    #[serde(default)]
    pub platforms: Vec<PlatformConstraint>,
}

impl PackageManifest {
    /// Look up a target by name.
    pub fn target(&self, name: &str) -> Option<&TargetSpec> {
        self.targets.iter().find(|t| t.name == name)
    }

    /// Products that participate in the build graph.
    pub fn library_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| p.kind.is_library())
    }
}

/// A named, buildable export of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product name.
    pub name: String,

    /// What the product builds into.
    pub kind: ProductSpecKind,

    /// Names of the targets composing this product.
    #[serde(default)]
    pub targets: Vec<String>,
}

impl Product {
    /// Create a library product over the given targets.
    pub fn library(
        name: impl Into<String>,
        linkage: LibraryLinkage,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Product {
            name: name.into(),
            kind: ProductSpecKind::Library(linkage),
            targets: targets.into_iter().map(|t| t.into()).collect(),
        }
    }

    /// Create an executable product over the given targets.
    pub fn executable(
        name: impl Into<String>,
        targets: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        Product {
            name: name.into(),
            kind: ProductSpecKind::Executable,
            targets: targets.into_iter().map(|t| t.into()).collect(),
        }
    }
}

/// The declared kind of a product.
///
/// Only library products participate in the build graph; targets referenced
/// exclusively by the other kinds are dropped during filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "linkage", rename_all = "lowercase")]
pub enum ProductSpecKind {
    Library(LibraryLinkage),
    Executable,
    Plugin,
}

impl ProductSpecKind {
    /// Check if this product contributes targets to the build graph.
    pub fn is_library(&self) -> bool {
        matches!(self, ProductSpecKind::Library(_))
    }
}

/// Linkage declared on a library product.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LibraryLinkage {
    /// Package manager picks; treated as static here.
    Automatic,
    Static,
    Dynamic,
}

/// A declared build target: the smallest compilable unit of a package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Target name, unique within the manifest.
    pub name: String,

    /// Target kind; only `Regular` targets are mappable.
    #[serde(default)]
    pub kind: TargetSpecKind,

    /// Base-path override, relative to the package root.
    #[serde(default)]
    pub path: Option<String>,

    /// Explicit source patterns relative to the base path. `None` means the
    /// whole base path is compiled.
    #[serde(default)]
    pub sources: Option<Vec<String>>,

    /// Declared resources.
    #[serde(default)]
    pub resources: Vec<Resource>,

    /// Patterns excluded from the target.
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Declared dependencies on other targets or products.
    #[serde(default)]
    pub dependencies: Vec<DependencyRef>,

    /// Public headers directory, relative to the base path.
    #[serde(default, rename = "publicHeadersPath")]
    pub public_headers_path: Option<String>,

    /// Tool-scoped build settings.
    #[serde(default)]
    pub settings: Vec<ManifestSetting>,

    /// Integrity checksum for binary targets; carried opaque.
    #[serde(default)]
    pub checksum: Option<String>,
}

impl TargetSpec {
    /// Create a regular target with defaults.
    pub fn regular(name: impl Into<String>) -> Self {
        TargetSpec {
            name: name.into(),
            kind: TargetSpecKind::Regular,
            path: None,
            sources: None,
            resources: Vec::new(),
            exclude: Vec::new(),
            dependencies: Vec::new(),
            public_headers_path: None,
            settings: Vec::new(),
            checksum: None,
        }
    }

    /// Create a test target.
    pub fn test(name: impl Into<String>) -> Self {
        TargetSpec {
            kind: TargetSpecKind::Test,
            ..TargetSpec::regular(name)
        }
    }

    /// Create a binary target.
    pub fn binary(name: impl Into<String>) -> Self {
        TargetSpec {
            kind: TargetSpecKind::Binary,
            ..TargetSpec::regular(name)
        }
    }

    /// Set the base-path override.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Set explicit source patterns.
    pub fn with_sources(mut self, sources: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.sources = Some(sources.into_iter().map(|s| s.into()).collect());
        self
    }

    /// Add a declared resource.
    pub fn with_resource(mut self, rule: ResourceRule, path: impl Into<String>) -> Self {
        self.resources.push(Resource {
            rule,
            path: path.into(),
        });
        self
    }

    /// Set the public headers directory.
    pub fn with_public_headers_path(mut self, path: impl Into<String>) -> Self {
        self.public_headers_path = Some(path.into());
        self
    }

    /// Add a build setting.
    pub fn with_setting(mut self, setting: ManifestSetting) -> Self {
        self.settings.push(setting);
        self
    }
}

/// The kind of a declared target.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TargetSpecKind {
    #[default]
    Regular,
    Test,
    Binary,
    System,
}

impl TargetSpecKind {
    /// Check if targets of this kind map into the build graph.
    pub fn is_mappable(&self) -> bool {
        matches!(self, TargetSpecKind::Regular)
    }
}

/// A declared resource of a target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Packaging rule. Affects downstream packaging only, not the file set
    /// collected during mapping.
    pub rule: ResourceRule,

    /// Resource path relative to the target base path.
    pub path: String,
}

/// How a resource is packaged by the downstream generator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceRule {
    Copy,
    Process,
}

/// A target's declared dependency on another build unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum DependencyRef {
    /// A target within the same package.
    Target { name: String },

    /// A product of another package.
    Product {
        name: String,
        #[serde(default)]
        package: Option<String>,
    },

    /// Resolved by name at graph-build time, target or product.
    ByName { name: String },
}

impl DependencyRef {
    /// The referenced name, regardless of shape.
    pub fn name(&self) -> &str {
        match self {
            DependencyRef::Target { name } => name,
            DependencyRef::Product { name, .. } => name,
            DependencyRef::ByName { name } => name,
        }
    }
}

/// A tool-scoped build setting from the manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestSetting {
    /// The tool the setting applies to.
    pub tool: SettingTool,

    /// What the setting declares.
    pub name: SettingName,

    /// Setting values; a single-valued setting carries one entry.
    #[serde(default)]
    pub value: Vec<String>,
}

impl ManifestSetting {
    /// Create a header-search-path setting for the given tool.
    pub fn header_search_path(tool: SettingTool, value: impl Into<String>) -> Self {
        ManifestSetting {
            tool,
            name: SettingName::HeaderSearchPath,
            value: vec![value.into()],
        }
    }
}

/// The tool a manifest setting is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingTool {
    C,
    Cxx,
    Swift,
    Linker,
}

/// What a manifest setting declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SettingName {
    HeaderSearchPath,
    Define,
    UnsafeFlags,
    LinkedLibrary,
    LinkedFramework,
}
