//! Graph-resolution error types.
//!
//! Every failure here is a deterministic function of the input state: bad
//! workspace state, a manifest that will not load, a package with no usable
//! platform, or a cross-manager name collision. None of them is retried.

use std::path::PathBuf;

use thiserror::Error;

use crate::core::platform::Platform;

/// Error produced while resolving a dependencies graph.
#[derive(Debug, Error)]
pub enum GraphError {
    /// The workspace resolution state file is missing or malformed.
    #[error("invalid workspace state at `{path}`: {reason}")]
    InvalidWorkspaceState { path: PathBuf, reason: String },

    /// The external loader failed to produce a manifest for a package.
    /// Fatal to the whole run; package graphs are all-or-nothing.
    #[error("failed to load manifest for `{package}` at `{path}`")]
    ManifestLoadFailure {
        package: String,
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    /// None of the configured platforms is supported by the package.
    #[error(
        "no supported platforms for `{package}`: configured [{}], package supports [{}]",
        display_platforms(.configured),
        display_platforms(.supported)
    )]
    NoSupportedPlatforms {
        package: String,
        configured: Vec<Platform>,
        supported: Vec<Platform>,
    },

    /// Two dependency managers both declare a top-level dependency with
    /// this name.
    #[error("dependency `{name}` is declared by more than one package manager")]
    DuplicatedDependency { name: String },
}

fn display_platforms(platforms: &[Platform]) -> String {
    platforms
        .iter()
        .map(|p| p.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_supported_platforms_message() {
        let err = GraphError::NoSupportedPlatforms {
            package: "PackageA".to_string(),
            configured: vec![Platform::Ios, Platform::Tvos],
            supported: vec![Platform::Watchos],
        };

        let msg = err.to_string();
        assert!(msg.contains("PackageA"));
        assert!(msg.contains("ios, tvos"));
        assert!(msg.contains("watchos"));
    }

    #[test]
    fn test_manifest_load_failure_source_chain() {
        let err = GraphError::ManifestLoadFailure {
            package: "PackageA".to_string(),
            path: PathBuf::from("/checkouts/PackageA"),
            source: anyhow::anyhow!("no manifest file"),
        };

        assert!(err.to_string().contains("/checkouts/PackageA"));
        let source = std::error::Error::source(&err).unwrap();
        assert!(source.to_string().contains("no manifest file"));
    }

    #[test]
    fn test_duplicated_dependency_message() {
        let err = GraphError::DuplicatedDependency {
            name: "Lib".to_string(),
        };
        assert!(err.to_string().contains("`Lib`"));
    }
}
