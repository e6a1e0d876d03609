//! Build platforms and deployment targets.
//!
//! Platforms form a closed set: manifests that name anything else fail at
//! the loader boundary rather than leaking unknown strings into mapping.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A build platform a package can be mapped for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    #[serde(alias = "iOS")]
    Ios,

    #[serde(alias = "macOS", alias = "osx")]
    Macos,

    #[serde(alias = "tvOS")]
    Tvos,

    #[serde(alias = "watchOS")]
    Watchos,
}

impl Platform {
    /// The device classes an artifact for this platform runs on.
    pub fn devices(&self) -> &'static [Device] {
        match self {
            Platform::Ios => &[Device::Iphone, Device::Ipad],
            Platform::Macos => &[Device::Mac],
            Platform::Tvos => &[Device::AppleTv],
            Platform::Watchos => &[Device::AppleWatch],
        }
    }

    /// Canonical lowercase name used in build settings and messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::Ios => "ios",
            Platform::Macos => "macos",
            Platform::Tvos => "tvos",
            Platform::Watchos => "watchos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "ios" => Ok(Platform::Ios),
            "macos" | "osx" => Ok(Platform::Macos),
            "tvos" => Ok(Platform::Tvos),
            "watchos" => Ok(Platform::Watchos),
            other => Err(format!("unknown platform: `{}`", other)),
        }
    }
}

/// A device/form-factor class a built artifact targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    Iphone,
    Ipad,
    Mac,
    #[serde(rename = "appletv")]
    AppleTv,
    #[serde(rename = "applewatch")]
    AppleWatch,
}

/// Minimum platform version an artifact must support, expanded with the
/// device classes implied by its platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeploymentTarget {
    /// Minimum version, e.g. "12.0".
    pub version: String,

    /// Device classes covered by the deployment target.
    pub devices: Vec<Device>,
}

impl DeploymentTarget {
    /// Expand a version constraint into the device set of `platform`.
    pub fn for_platform(platform: Platform, version: impl Into<String>) -> Self {
        DeploymentTarget {
            version: version.into(),
            devices: platform.devices().to_vec(),
        }
    }
}

/// A platform-support declaration from a package manifest.
///
/// An empty constraint list on a manifest means the package supports every
/// configured platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformConstraint {
    /// The supported platform.
    pub platform: Platform,

    /// Minimum deployment version on that platform.
    #[serde(rename = "minVersion")]
    pub min_version: String,
}

impl PlatformConstraint {
    /// Create a new constraint.
    pub fn new(platform: Platform, min_version: impl Into<String>) -> Self {
        PlatformConstraint {
            platform,
            min_version: min_version.into(),
        }
    }
}
