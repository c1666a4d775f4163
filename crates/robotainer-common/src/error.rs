//! Unified error types for the Robotainer workspace.
//!
//! Every failure the engine can report is a variant of [`RobotainerError`].
//! Each variant belongs to exactly one [`ErrorCategory`], and each category
//! maps to a stable process exit code that the CLI hands back to the shell.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type shared across the workspace.
#[derive(Debug, Error)]
pub enum RobotainerError {
    /// The requested target architecture is not in the supported set.
    #[error("unsupported architecture: {value}, supported architectures: {}", .allowed.join(", "))]
    UnsupportedArchitecture {
        /// Architecture token as requested.
        value: String,
        /// Declared supported architectures.
        allowed: Vec<String>,
    },

    /// The configured middleware is not in the supported set.
    #[error("unsupported middleware: {value}, supported middlewares: {}", .allowed.join(", "))]
    UnsupportedMiddleware {
        /// Middleware identifier as configured.
        value: String,
        /// Declared supported middlewares.
        allowed: Vec<String>,
    },

    /// The configured ROS 2 distribution is not in the supported set.
    #[error("unsupported ROS 2 distribution: {value}, supported distributions: {}", .allowed.join(", "))]
    UnsupportedDistribution {
        /// Distribution identifier as configured.
        value: String,
        /// Declared supported distributions.
        allowed: Vec<String>,
    },

    /// A directory the project depends on does not exist.
    #[error("directory does not exist: {}", .path.display())]
    MissingPath {
        /// The missing directory.
        path: PathBuf,
    },

    /// The resolved dockerfile is not present in the docker assets directory.
    #[error("dockerfile does not exist: {}", .path.display())]
    MissingDockerfile {
        /// Expected dockerfile location.
        path: PathBuf,
    },

    /// A command assembler needs a key the environment mapping lacks.
    #[error("missing required variable '{key}' in the resolved environment")]
    MissingRequiredKey {
        /// Name of the absent key.
        key: String,
    },

    /// A template still holds a placeholder nothing could substitute.
    #[error("unresolved placeholder '{placeholder}' in template {field}: {template}")]
    TemplateSubstitution {
        /// Configuration field the template came from.
        field: &'static str,
        /// Raw template text.
        template: String,
        /// The token left unresolved.
        placeholder: String,
    },

    /// The declarative project description failed schema validation.
    #[error("invalid project configuration {}: {message}", .path.display())]
    ConfigSchema {
        /// Configuration file that failed to load.
        path: PathBuf,
        /// Field path and location reported by the parser.
        message: String,
    },

    /// The persisted environment file is malformed or cannot hold a value.
    #[error("invalid environment file {} (line {line}): {message}", .path.display())]
    EnvFormat {
        /// Persisted environment path.
        path: PathBuf,
        /// One-based line number, or 0 when not tied to a line.
        line: usize,
        /// Description of the problem.
        message: String,
    },

    /// The image a run needs has not been built locally.
    #[error("docker image {image} not found, build it first")]
    ImageNotFound {
        /// Image reference as `name:tag`.
        image: String,
    },

    /// An external process could not be spawned.
    #[error("failed to execute {command}: {message}")]
    Process {
        /// Rendered command line.
        command: String,
        /// Underlying failure.
        message: String,
    },

    /// An external process ran and exited unsuccessfully.
    #[error("{command} failed with exit code {code}")]
    ProcessFailed {
        /// Rendered command line.
        command: String,
        /// Exit code, or -1 when terminated by a signal.
        code: i32,
    },

    /// An I/O operation failed.
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        /// Path where the I/O error occurred.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Outward failure class, stable across releases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// The project description could not be loaded.
    Config,
    /// A requested or configured value is outside the supported sets.
    Validation,
    /// Resolution could not derive a consistent environment.
    Resolution,
    /// A command assembler found a key missing.
    MissingKey,
    /// A runtime precondition (e.g. a built image) is not met.
    Precondition,
    /// The external container runtime failed.
    Process,
}

impl ErrorCategory {
    /// Process exit code reported for this category.
    #[must_use]
    pub const fn exit_code(self) -> i32 {
        match self {
            Self::Config => 2,
            Self::Validation => 3,
            Self::Resolution => 4,
            Self::MissingKey => 5,
            Self::Precondition => 6,
            Self::Process => 7,
        }
    }
}

impl RobotainerError {
    /// Returns the outward category of this failure.
    #[must_use]
    pub const fn category(&self) -> ErrorCategory {
        match self {
            Self::UnsupportedArchitecture { .. }
            | Self::UnsupportedMiddleware { .. }
            | Self::UnsupportedDistribution { .. }
            | Self::MissingPath { .. } => ErrorCategory::Validation,
            Self::MissingDockerfile { .. } | Self::TemplateSubstitution { .. } => {
                ErrorCategory::Resolution
            }
            Self::MissingRequiredKey { .. } => ErrorCategory::MissingKey,
            Self::ConfigSchema { .. } | Self::EnvFormat { .. } | Self::Io { .. } => {
                ErrorCategory::Config
            }
            Self::ImageNotFound { .. } => ErrorCategory::Precondition,
            Self::Process { .. } | Self::ProcessFailed { .. } => ErrorCategory::Process,
        }
    }
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, RobotainerError>;
