//! Target/source mapping: manifest declarations into normalized build
//! targets.
//!
//! This is a pure function of the manifest, the caller options, and
//! read-only `DirectoryLister` queries. Output order follows manifest
//! declaration order so repeated runs produce identical descriptors.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use crate::core::descriptor::{
    bundle_id_for, HeadersDescriptor, ProductKind, ProjectDescriptor, SettingValue,
    TargetDescriptor, HEADER_SEARCH_PATHS,
};
use crate::core::manifest::{
    LibraryLinkage, PackageManifest, ProductSpecKind, SettingName, SettingTool, TargetSpec,
};
use crate::core::platform::{DeploymentTarget, Platform};
use crate::errors::GraphError;
use crate::mapper::platform::select_platform;
use crate::util::config::GenerateOptions;
use crate::util::fs::{has_extension, is_header, recursive_glob, DirectoryLister};

/// Conventional sources directory when a target declares no path override.
const SOURCES_DIR: &str = "Sources";

/// Map one package manifest into a project descriptor.
///
/// Platform selection happens once per manifest; every surviving target is
/// attached to the same platform and deployment target.
pub fn map_package(
    package: &str,
    root: &Path,
    manifest: &PackageManifest,
    options: &GenerateOptions,
    lister: &dyn DirectoryLister,
) -> Result<ProjectDescriptor, GraphError> {
    let (platform, mut deployment) =
        select_platform(package, &options.platforms, &manifest.platforms)?;

    if let Some(version) = options.deployment_target_overrides.get(package) {
        deployment = Some(DeploymentTarget::for_platform(platform, version.clone()));
    }

    let targets = mappable_targets(manifest)
        .into_iter()
        .map(|spec| map_target(package, root, manifest, spec, platform, &deployment, options, lister))
        .collect();

    Ok(ProjectDescriptor {
        name: package.to_string(),
        targets,
    })
}

/// Filter the manifest's targets down to the mappable set, in declaration
/// order: regular targets referenced by at least one library product.
fn mappable_targets(manifest: &PackageManifest) -> Vec<&TargetSpec> {
    let library_referenced: BTreeSet<&str> = manifest
        .library_products()
        .flat_map(|p| p.targets.iter().map(String::as_str))
        .collect();

    manifest
        .targets
        .iter()
        .filter(|spec| {
            if !spec.kind.is_mappable() {
                tracing::debug!(target_name = %spec.name, kind = ?spec.kind, "skipping non-regular target");
                return false;
            }
            if !library_referenced.contains(spec.name.as_str()) {
                tracing::debug!(target_name = %spec.name, "skipping target not referenced by a library product");
                return false;
            }
            true
        })
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn map_target(
    package: &str,
    root: &Path,
    manifest: &PackageManifest,
    spec: &TargetSpec,
    platform: Platform,
    deployment: &Option<DeploymentTarget>,
    options: &GenerateOptions,
    lister: &dyn DirectoryLister,
) -> TargetDescriptor {
    let base_path = target_base_path(root, spec);

    TargetDescriptor {
        name: spec.name.clone(),
        platform,
        product: resolve_product_kind(manifest, spec, options),
        bundle_id: bundle_id_for(&spec.name),
        deployment_target: deployment.clone(),
        sources: resolve_sources(&base_path, spec),
        resources: resolve_resources(&base_path, spec),
        headers: discover_headers(&base_path, spec, lister),
        settings: translate_settings(package, spec),
    }
}

/// Base path a target's declarations resolve against: the manifest `path`
/// override, or `<root>/Sources/<name>` by convention.
fn target_base_path(root: &Path, spec: &TargetSpec) -> PathBuf {
    match &spec.path {
        Some(path) => root.join(path),
        None => root.join(SOURCES_DIR).join(&spec.name),
    }
}

/// Resolve a target's source globs.
///
/// Explicit entries resolve against the base path: an entry carrying a file
/// extension stays literal, a bare directory name becomes a recursive glob.
/// Without explicit sources the whole base path is compiled.
fn resolve_sources(base_path: &Path, spec: &TargetSpec) -> Vec<String> {
    match &spec.sources {
        Some(entries) => entries
            .iter()
            .map(|entry| {
                let resolved = base_path.join(entry);
                if has_extension(&resolved) {
                    resolved.display().to_string()
                } else {
                    recursive_glob(&resolved)
                }
            })
            .collect(),
        None => vec![recursive_glob(base_path)],
    }
}

/// Every declared resource becomes a recursive glob under the base path.
/// The copy/process rule only matters to downstream packaging.
fn resolve_resources(base_path: &Path, spec: &TargetSpec) -> Vec<String> {
    spec.resources
        .iter()
        .map(|resource| recursive_glob(&base_path.join(&resource.path)))
        .collect()
}

/// Discover public headers by listing the headers directory through the
/// collaborator: the base path itself, or the declared public-headers path
/// under it.
fn discover_headers(
    base_path: &Path,
    spec: &TargetSpec,
    lister: &dyn DirectoryLister,
) -> Option<HeadersDescriptor> {
    let headers_dir = match &spec.public_headers_path {
        Some(path) => base_path.join(path),
        None => base_path.to_path_buf(),
    };

    // Unknown directory reads as empty.
    let entries = lister.list(&headers_dir).unwrap_or_default();
    let public: Vec<PathBuf> = entries.into_iter().filter(|p| is_header(p)).collect();

    if public.is_empty() {
        None
    } else {
        Some(HeadersDescriptor { public })
    }
}

/// Translate manifest build settings.
///
/// Header-search-path declarations from the C and C++ tools union into one
/// `HEADER_SEARCH_PATHS` list, insertion order preserved, duplicate values
/// across tools collapsed. Every other setting kind is left to later
/// mapping passes.
fn translate_settings(package: &str, spec: &TargetSpec) -> BTreeMap<String, SettingValue> {
    let mut search_paths: Vec<String> = Vec::new();

    for setting in &spec.settings {
        match (setting.tool, setting.name) {
            (SettingTool::C | SettingTool::Cxx, SettingName::HeaderSearchPath) => {
                for value in &setting.value {
                    if !search_paths.contains(value) {
                        search_paths.push(value.clone());
                    }
                }
            }
            (tool, name) => {
                tracing::debug!(
                    package,
                    target_name = %spec.name,
                    ?tool,
                    ?name,
                    "setting kind not translated by this pass"
                );
            }
        }
    }

    let mut settings = BTreeMap::new();
    if !search_paths.is_empty() {
        settings.insert(
            HEADER_SEARCH_PATHS.to_string(),
            SettingValue::List(search_paths),
        );
    }
    settings
}

/// Resolve the concrete product kind for a target: a caller override wins,
/// else the declaring library product's linkage decides.
fn resolve_product_kind(
    manifest: &PackageManifest,
    spec: &TargetSpec,
    options: &GenerateOptions,
) -> ProductKind {
    if let Some(&kind) = options.product_overrides.get(&spec.name) {
        return kind;
    }

    let linkage = manifest
        .library_products()
        .find(|p| p.targets.iter().any(|t| t == &spec.name))
        .map(|p| match p.kind {
            ProductSpecKind::Library(linkage) => linkage,
            // Filtering guarantees a library product; unreachable for
            // surviving targets.
            _ => LibraryLinkage::Automatic,
        })
        .unwrap_or(LibraryLinkage::Automatic);

    match linkage {
        LibraryLinkage::Automatic | LibraryLinkage::Static => ProductKind::StaticFramework,
        LibraryLinkage::Dynamic => ProductKind::Framework,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::manifest::{ManifestSetting, Product, ResourceRule, TargetSpecKind};
    use crate::core::platform::PlatformConstraint;
    use crate::test_support::MockDirectoryLister;

    fn options() -> GenerateOptions {
        GenerateOptions::new([Platform::Ios, Platform::Tvos], PathBuf::from("/checkouts"))
    }

    fn manifest_with_target(spec: TargetSpec) -> PackageManifest {
        let name = spec.name.clone();
        PackageManifest {
            products: vec![Product::library("P1", LibraryLinkage::Automatic, [name])],
            targets: vec![spec],
            platforms: vec![],
        }
    }

    fn map(manifest: &PackageManifest) -> ProjectDescriptor {
        map_package(
            "Pkg",
            Path::new("/pkg"),
            manifest,
            &options(),
            &MockDirectoryLister::new(),
        )
        .unwrap()
    }

    #[test]
    fn test_default_source_glob() {
        let project = map(&manifest_with_target(TargetSpec::regular("T1")));
        assert_eq!(project.targets.len(), 1);
        assert_eq!(project.targets[0].sources, vec!["/pkg/Sources/T1/**"]);
    }

    #[test]
    fn test_path_override_changes_base() {
        let project = map(&manifest_with_target(
            TargetSpec::regular("T1").with_path("Custom/T1"),
        ));
        assert_eq!(project.targets[0].sources, vec!["/pkg/Custom/T1/**"]);
    }

    #[test]
    fn test_explicit_sources_literal_and_directory() {
        let project = map(&manifest_with_target(
            TargetSpec::regular("T1").with_sources(["main.c", "generated"]),
        ));
        assert_eq!(
            project.targets[0].sources,
            vec!["/pkg/Sources/T1/main.c", "/pkg/Sources/T1/generated/**"]
        );
    }

    #[test]
    fn test_resource_globs_ignore_rule() {
        let project = map(&manifest_with_target(
            TargetSpec::regular("T1")
                .with_resource(ResourceRule::Process, "Assets")
                .with_resource(ResourceRule::Copy, "Fixtures"),
        ));
        assert_eq!(
            project.targets[0].resources,
            vec!["/pkg/Sources/T1/Assets/**", "/pkg/Sources/T1/Fixtures/**"]
        );
    }

    #[test]
    fn test_filtering_drops_unreferenced_and_non_regular() {
        let manifest = PackageManifest {
            products: vec![
                Product::library("Lib", LibraryLinkage::Automatic, ["Kept", "TestTarget"]),
                Product::executable("Tool", ["ExeOnly"]),
            ],
            targets: vec![
                TargetSpec::regular("Kept"),
                TargetSpec::test("TestTarget"),
                TargetSpec::regular("ExeOnly"),
                TargetSpec::regular("Orphan"),
            ],
            platforms: vec![],
        };

        let project = map(&manifest);
        let names: Vec<_> = project.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Kept"]);
    }

    #[test]
    fn test_binary_target_dropped_even_if_referenced() {
        let manifest = PackageManifest {
            products: vec![Product::library(
                "Lib",
                LibraryLinkage::Automatic,
                ["Bin"],
            )],
            targets: vec![{
                let mut t = TargetSpec::binary("Bin");
                t.checksum = Some("abc123".to_string());
                t
            }],
            platforms: vec![],
        };

        assert!(map(&manifest).targets.is_empty());
    }

    #[test]
    fn test_header_discovery_from_base_path() {
        let mut lister = MockDirectoryLister::new();
        lister.add(
            "/pkg/Sources/T1",
            ["Source.swift", "Source.c", "Source.h"],
        );

        let manifest = manifest_with_target(TargetSpec::regular("T1"));
        let project = map_package("Pkg", Path::new("/pkg"), &manifest, &options(), &lister)
            .unwrap();

        let headers = project.targets[0].headers.as_ref().unwrap();
        assert_eq!(headers.public, vec![PathBuf::from("/pkg/Sources/T1/Source.h")]);
    }

    #[test]
    fn test_header_discovery_explicit_path() {
        let mut lister = MockDirectoryLister::new();
        lister.add("/pkg/Sources/T1/include", ["api.h", "impl.c"]);

        let manifest = manifest_with_target(
            TargetSpec::regular("T1").with_public_headers_path("include"),
        );
        let project = map_package("Pkg", Path::new("/pkg"), &manifest, &options(), &lister)
            .unwrap();

        let headers = project.targets[0].headers.as_ref().unwrap();
        assert_eq!(
            headers.public,
            vec![PathBuf::from("/pkg/Sources/T1/include/api.h")]
        );
    }

    #[test]
    fn test_no_headers_yields_no_descriptor() {
        let project = map(&manifest_with_target(TargetSpec::regular("T1")));
        assert!(project.targets[0].headers.is_none());
    }

    #[test]
    fn test_settings_single_tool() {
        let project = map(&manifest_with_target(TargetSpec::regular("T1").with_setting(
            ManifestSetting::header_search_path(SettingTool::C, "value"),
        )));

        assert_eq!(
            project.targets[0].settings.get(HEADER_SEARCH_PATHS),
            Some(&SettingValue::List(vec!["value".to_string()]))
        );
    }

    #[test]
    fn test_settings_union_across_tools_dedups() {
        let project = map(&manifest_with_target(
            TargetSpec::regular("T1")
                .with_setting(ManifestSetting::header_search_path(SettingTool::C, "value"))
                .with_setting(ManifestSetting::header_search_path(SettingTool::Cxx, "value"))
                .with_setting(ManifestSetting::header_search_path(SettingTool::Cxx, "other")),
        ));

        assert_eq!(
            project.targets[0].settings.get(HEADER_SEARCH_PATHS),
            Some(&SettingValue::List(vec![
                "value".to_string(),
                "other".to_string()
            ]))
        );
    }

    #[test]
    fn test_swift_tool_settings_not_translated() {
        let project = map(&manifest_with_target(TargetSpec::regular("T1").with_setting(
            ManifestSetting::header_search_path(SettingTool::Swift, "value"),
        )));

        assert!(project.targets[0].settings.is_empty());
    }

    #[test]
    fn test_bundle_id_attached() {
        let project = map(&manifest_with_target(TargetSpec::regular("Target_1")));
        assert_eq!(project.targets[0].bundle_id, "Target-1");
    }

    #[test]
    fn test_product_kind_from_linkage() {
        let manifest = PackageManifest {
            products: vec![Product::library("P1", LibraryLinkage::Dynamic, ["T1"])],
            targets: vec![TargetSpec::regular("T1")],
            platforms: vec![],
        };
        assert_eq!(map(&manifest).targets[0].product, ProductKind::Framework);

        let manifest = manifest_with_target(TargetSpec::regular("T1"));
        assert_eq!(
            map(&manifest).targets[0].product,
            ProductKind::StaticFramework
        );
    }

    #[test]
    fn test_product_kind_override_wins() {
        let manifest = manifest_with_target(TargetSpec::regular("T1"));
        let opts = options().with_product_override("T1", ProductKind::DynamicLibrary);

        let project = map_package(
            "Pkg",
            Path::new("/pkg"),
            &manifest,
            &opts,
            &MockDirectoryLister::new(),
        )
        .unwrap();
        assert_eq!(project.targets[0].product, ProductKind::DynamicLibrary);
    }

    #[test]
    fn test_platform_attached_once_per_manifest() {
        let mut manifest = PackageManifest {
            products: vec![Product::library(
                "P1",
                LibraryLinkage::Automatic,
                ["A", "B"],
            )],
            targets: vec![TargetSpec::regular("A"), TargetSpec::regular("B")],
            platforms: vec![PlatformConstraint::new(Platform::Tvos, "13.0")],
        };

        let project = map(&manifest);
        for target in &project.targets {
            assert_eq!(target.platform, Platform::Tvos);
            assert_eq!(target.deployment_target.as_ref().unwrap().version, "13.0");
        }

        manifest.platforms.clear();
        let project = map(&manifest);
        for target in &project.targets {
            assert_eq!(target.platform, Platform::Ios);
            assert!(target.deployment_target.is_none());
        }
    }

    #[test]
    fn test_deployment_override_replaces_constraint_version() {
        let manifest = PackageManifest {
            products: vec![Product::library("P1", LibraryLinkage::Automatic, ["T1"])],
            targets: vec![TargetSpec::regular("T1")],
            platforms: vec![PlatformConstraint::new(Platform::Ios, "11.0")],
        };
        let opts = options().with_deployment_target_override("Pkg", "15.0");

        let project = map_package(
            "Pkg",
            Path::new("/pkg"),
            &manifest,
            &opts,
            &MockDirectoryLister::new(),
        )
        .unwrap();

        let deployment = project.targets[0].deployment_target.as_ref().unwrap();
        assert_eq!(deployment.version, "15.0");
    }

    #[test]
    fn test_unsupported_platform_fails() {
        let manifest = PackageManifest {
            products: vec![Product::library("P1", LibraryLinkage::Automatic, ["T1"])],
            targets: vec![TargetSpec::regular("T1")],
            platforms: vec![PlatformConstraint::new(Platform::Watchos, "6.0")],
        };

        let err = map_package(
            "Pkg",
            Path::new("/pkg"),
            &manifest,
            &options(),
            &MockDirectoryLister::new(),
        )
        .unwrap_err();
        assert!(matches!(err, GraphError::NoSupportedPlatforms { .. }));
    }

    #[test]
    fn test_system_target_kind_dropped() {
        let manifest = PackageManifest {
            products: vec![Product::library("P1", LibraryLinkage::Automatic, ["Sys"])],
            targets: vec![TargetSpec {
                kind: TargetSpecKind::System,
                ..TargetSpec::regular("Sys")
            }],
            platforms: vec![],
        };
        assert!(map(&manifest).targets.is_empty());
    }
}
