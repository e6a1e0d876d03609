//! Platform selection for a package manifest.

use crate::core::platform::{DeploymentTarget, Platform, PlatformConstraint};
use crate::errors::GraphError;

/// Pick the platform a package builds for and the deployment target that
/// results.
///
/// No constraints means the package supports everything: the first
/// configured platform wins with no deployment target. Otherwise the
/// configured preference order is walked and the first platform the package
/// declares support for wins, carrying that constraint's version expanded
/// into the platform's device classes. An empty intersection is fatal for
/// the package.
pub fn select_platform(
    package: &str,
    configured: &[Platform],
    constraints: &[PlatformConstraint],
) -> Result<(Platform, Option<DeploymentTarget>), GraphError> {
    if constraints.is_empty() {
        let platform = *configured.first().ok_or_else(|| {
            GraphError::NoSupportedPlatforms {
                package: package.to_string(),
                configured: vec![],
                supported: vec![],
            }
        })?;
        return Ok((platform, None));
    }

    for &platform in configured {
        if let Some(constraint) = constraints.iter().find(|c| c.platform == platform) {
            let deployment =
                DeploymentTarget::for_platform(platform, constraint.min_version.clone());
            return Ok((platform, Some(deployment)));
        }
    }

    Err(GraphError::NoSupportedPlatforms {
        package: package.to_string(),
        configured: configured.to_vec(),
        supported: constraints.iter().map(|c| c.platform).collect(),
    })
}
