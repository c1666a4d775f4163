//! Domain primitive types used across the Robotainer workspace.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEPLOY_ALIAS, DEPLOY_STAGE, DEVELOP_ALIAS, DEVELOP_STAGE, MIDDLEWARE_MICRO_ROS,
    MIDDLEWARE_ROS2,
};
use crate::error::RobotainerError;

/// A normalized, lower-case architecture token.
///
/// Holds either a CPU architecture (`x86_64`, `aarch64`, `armv7`, ...) or an
/// alias token (`develop`, `deploy`). Unknown tokens are carried verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CanonicalArch(String);

impl CanonicalArch {
    /// Wraps an already-normalized token.
    #[must_use]
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether the token is one of the symbolic alias tokens.
    #[must_use]
    pub fn is_alias(&self) -> bool {
        self.0 == DEVELOP_ALIAS || self.0 == DEPLOY_ALIAS
    }
}

impl fmt::Display for CanonicalArch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Robotics middleware stack the image is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Middleware {
    /// ROS 2.
    Ros2,
    /// micro-ROS.
    MicroRos,
}

impl Middleware {
    /// Every middleware the resolver knows how to build.
    pub const ALL: [Self; 2] = [Self::Ros2, Self::MicroRos];

    /// Identifier as written in the project description.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ros2 => MIDDLEWARE_ROS2,
            Self::MicroRos => MIDDLEWARE_MICRO_ROS,
        }
    }
}

impl fmt::Display for Middleware {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Middleware {
    type Err = RobotainerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| RobotainerError::UnsupportedMiddleware {
                value: s.to_string(),
                allowed: Self::ALL.iter().map(|m| m.as_str().to_string()).collect(),
            })
    }
}

/// Which image flavour a target resolves to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BuildProfile {
    /// x86 development image.
    Develop,
    /// ARM deployment image.
    Deploy,
}

impl BuildProfile {
    /// Dockerfile stage built for this profile.
    #[must_use]
    pub const fn stage(self) -> &'static str {
        match self {
            Self::Develop => DEVELOP_STAGE,
            Self::Deploy => DEPLOY_STAGE,
        }
    }

    /// Image tag for this profile.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Self::Develop => DEVELOP_ALIAS,
            Self::Deploy => DEPLOY_ALIAS,
        }
    }

    /// Architecture class recorded as `TARGET_ARCH`.
    #[must_use]
    pub const fn arch(self) -> &'static str {
        match self {
            Self::Develop => "x86_64",
            Self::Deploy => "arm",
        }
    }
}

/// Cross-platform flag handed to `docker build`/`docker run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformOption {
    /// `linux/amd64`.
    Amd64,
    /// `linux/arm64`.
    Arm64,
    /// `linux/arm/v7`.
    ArmV7,
    /// Native build, no flag emitted.
    Native,
}

impl PlatformOption {
    /// The `--platform=...` argument, or `None` for a native build.
    #[must_use]
    pub const fn flag(self) -> Option<&'static str> {
        match self {
            Self::Amd64 => Some("--platform=linux/amd64"),
            Self::Arm64 => Some("--platform=linux/arm64"),
            Self::ArmV7 => Some("--platform=linux/arm/v7"),
            Self::Native => None,
        }
    }
}

impl fmt::Display for PlatformOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.flag().unwrap_or(""))
    }
}
