//! Constraint checks on a project description and a requested target.
//!
//! Checks, in order:
//!
//! 1. The normalized target is a declared supported architecture.
//! 2. The middleware is a declared supported middleware.
//! 3. The ROS 2 distribution is a declared supported distribution.
//! 4. The project repository and every extra volume are existing directories.
//!
//! Every check runs on every call. The first failure in the order above is
//! the one reported.

use std::path::Path;

use robotainer_common::config::{ProjectConfig, ProjectLayout};
use robotainer_common::error::{Result, RobotainerError};

use crate::arch::normalize;

/// Runs every check and returns all failures in check order.
pub fn validate_all(
    config: &ProjectConfig,
    layout: &ProjectLayout,
    target_arch: &str,
) -> Vec<RobotainerError> {
    let mut diagnostics = Vec::new();
    diagnostics.extend(check_architecture(config, target_arch).err());
    diagnostics.extend(check_middleware(config).err());
    diagnostics.extend(check_distribution(config).err());
    diagnostics.extend(check_paths(config, layout));
    diagnostics
}

/// Validates `config` and `target_arch`, reporting the first failure.
///
/// # Errors
///
/// Returns `UnsupportedArchitecture`, `UnsupportedMiddleware`,
/// `UnsupportedDistribution`, or `MissingPath`.
pub fn validate(config: &ProjectConfig, layout: &ProjectLayout, target_arch: &str) -> Result<()> {
    tracing::info!(target = %target_arch, middleware = %config.middleware, "validating project constraints");
    let mut diagnostics = validate_all(config, layout, target_arch).into_iter();
    match diagnostics.next() {
        None => Ok(()),
        Some(first) => {
            for other in diagnostics {
                tracing::warn!(error = %other, "additional constraint violation");
            }
            Err(first)
        }
    }
}

fn check_architecture(config: &ProjectConfig, target_arch: &str) -> Result<()> {
    let target = normalize(target_arch);
    let supported = &config.supported.architectures;
    if supported.iter().any(|a| normalize(a) == target) {
        return Ok(());
    }
    Err(RobotainerError::UnsupportedArchitecture {
        value: target_arch.to_string(),
        allowed: supported.clone(),
    })
}

fn check_middleware(config: &ProjectConfig) -> Result<()> {
    let supported = &config.supported.middlewares;
    if supported.contains(&config.middleware) {
        return Ok(());
    }
    Err(RobotainerError::UnsupportedMiddleware {
        value: config.middleware.clone(),
        allowed: supported.clone(),
    })
}

fn check_distribution(config: &ProjectConfig) -> Result<()> {
    let supported = &config.supported.ros2_distros;
    if supported.contains(&config.ros2_distro) {
        return Ok(());
    }
    Err(RobotainerError::UnsupportedDistribution {
        value: config.ros2_distro.clone(),
        allowed: supported.clone(),
    })
}

fn check_paths(config: &ProjectConfig, layout: &ProjectLayout) -> Vec<RobotainerError> {
    let repo = layout.project_repo_path(&config.project_repo);
    std::iter::once(repo.as_path())
        .chain(config.volumes.iter().map(|v| v.as_path()))
        .filter(|p| !p.is_dir())
        .map(|p: &Path| RobotainerError::MissingPath {
            path: p.to_path_buf(),
        })
        .collect()
}
