//! Caller configuration for graph generation.

use std::collections::BTreeMap;
use std::path::PathBuf;

use crate::core::descriptor::ProductKind;
use crate::core::platform::Platform;

/// Options supplied by the caller of the graph generator.
#[derive(Debug, Clone)]
pub struct GenerateOptions {
    /// Configured platforms in preference order; the first platform a
    /// package supports wins.
    pub platforms: Vec<Platform>,

    /// Forced product kinds keyed by target name.
    pub product_overrides: BTreeMap<String, ProductKind>,

    /// Deployment-version overrides keyed by package name.
    pub deployment_target_overrides: BTreeMap<String, String>,

    /// Root directory the package manager checks remote packages out under.
    pub checkouts_root: PathBuf,
}

impl GenerateOptions {
    /// Create options with the given platform preference order and
    /// checkouts root.
    pub fn new(platforms: impl IntoIterator<Item = Platform>, checkouts_root: PathBuf) -> Self {
        GenerateOptions {
            platforms: platforms.into_iter().collect(),
            product_overrides: BTreeMap::new(),
            deployment_target_overrides: BTreeMap::new(),
            checkouts_root,
        }
    }

    /// Force a product kind for a target.
    pub fn with_product_override(
        mut self,
        target: impl Into<String>,
        kind: ProductKind,
    ) -> Self {
        self.product_overrides.insert(target.into(), kind);
        self
    }

    /// Override the deployment version for a package.
    pub fn with_deployment_target_override(
        mut self,
        package: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        self.deployment_target_overrides
            .insert(package.into(), version.into());
        self
    }
}
