//! Declarative project description and on-disk layout.
//!
//! `config/env.yaml` is deserialized once into a [`ProjectConfig`]. Field
//! errors are reported with the YAML path and location of the offending
//! entry instead of surfacing later as missing keys.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_DIR, DOCKER_DIR, SOURCE_CONFIG, TARGET_CONFIG};
use crate::error::{Result, RobotainerError};

/// Root of the declarative project description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Owner of the project repository (used in image names).
    pub repo_author: String,
    /// Project repository directory name, relative to the workspace root.
    pub project_repo: String,
    /// Extra host directories mounted into the container home.
    #[serde(default)]
    pub volumes: Vec<PathBuf>,
    /// Identity of the user created inside the image.
    pub container_env: ContainerEnv,
    /// ROS 2 distribution the image is based on.
    pub ros2_distro: String,
    /// Middleware identifier (`ros2` or `micro-ros`).
    pub middleware: String,
    /// Base image templates per architecture class.
    pub docker_base_images: BaseImages,
    /// Dockerfile, image, and container name templates.
    pub docker_file_image_container: ArtifactNames,
    /// Command the container runs on creation.
    pub container_run_cmd: String,
    /// Accepted values for the target architecture, middleware, and distro.
    pub supported: Supported,
}

/// User account baked into the image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerEnv {
    /// User name.
    pub container_usr: String,
    /// User password.
    pub container_psw: String,
    /// Numeric user id.
    #[serde(deserialize_with = "id_from_int_or_string")]
    pub container_uid: String,
    /// Numeric group id.
    #[serde(deserialize_with = "id_from_int_or_string")]
    pub container_gid: String,
}

/// Base image templates. May reference `ROS2_DISTRO`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaseImages {
    /// Base image for x86 development builds.
    pub x86_full_image: String,
    /// Base image for ARM deployment builds.
    pub arm_base_image: String,
    /// Base image for every micro-ROS build.
    pub microros_base_image: String,
}

/// Templates for the generated artifact names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactNames {
    /// Dockerfile name inside the docker assets directory.
    pub dockerfile: String,
    /// Image repository name.
    pub docker_image: String,
    /// Container name.
    pub docker_container: String,
}

/// Supported-value sets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Supported {
    /// Accepted target architecture tokens (aliases included).
    pub architectures: Vec<String>,
    /// Accepted middleware identifiers.
    pub middlewares: Vec<String>,
    /// Accepted ROS 2 distributions.
    pub ros2_distros: Vec<String>,
}

/// Accepts `1000` as well as `"1000"`.
fn id_from_int_or_string<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    struct IdVisitor;

    impl Visitor<'_> for IdVisitor {
        type Value = String;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a numeric id or a string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }

        fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<String, E> {
            Ok(v.to_string())
        }
    }

    deserializer.deserialize_any(IdVisitor)
}

impl ProjectConfig {
    /// Parses a project description from YAML text.
    ///
    /// `origin` is only used to label errors.
    ///
    /// # Errors
    ///
    /// Returns `ConfigSchema` if a field is missing or has the wrong type.
    pub fn from_yaml(content: &str, origin: &Path) -> Result<Self> {
        serde_yaml::from_str(content).map_err(|e| RobotainerError::ConfigSchema {
            path: origin.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Reads and parses the project description at `path`.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, `ConfigSchema` if it does
    /// not match the schema.
    pub fn load(path: &Path) -> Result<Self> {
        tracing::debug!(path = %path.display(), "loading project configuration");
        let content = std::fs::read_to_string(path).map_err(|e| RobotainerError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_yaml(&content, path)
    }
}

/// Directory structure around a robotics container project.
///
/// `root` holds `config/` and `docker/` and is the docker build context.
/// The project repository lives next to it, under `workspace_root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectLayout {
    root: PathBuf,
    workspace_root: PathBuf,
}

impl ProjectLayout {
    /// Layout whose workspace root is the parent of `root`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let workspace_root = root
            .parent()
            .map_or_else(|| root.clone(), Path::to_path_buf);
        Self {
            root,
            workspace_root,
        }
    }

    /// Layout with an explicit workspace root.
    #[must_use]
    pub fn with_workspace_root(root: impl Into<PathBuf>, workspace_root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            workspace_root: workspace_root.into(),
        }
    }

    /// The robotics container directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The directory that contains the project repository.
    #[must_use]
    pub fn workspace_root(&self) -> &Path {
        &self.workspace_root
    }

    /// `config/env.yaml`.
    #[must_use]
    pub fn config_file(&self) -> PathBuf {
        self.root.join(CONFIG_DIR).join(SOURCE_CONFIG)
    }

    /// `config/.env`.
    #[must_use]
    pub fn env_file(&self) -> PathBuf {
        self.root.join(CONFIG_DIR).join(TARGET_CONFIG)
    }

    /// `docker/`.
    #[must_use]
    pub fn docker_dir(&self) -> PathBuf {
        self.root.join(DOCKER_DIR)
    }

    /// Host path of the project repository.
    #[must_use]
    pub fn project_repo_path(&self, project_repo: &str) -> PathBuf {
        self.workspace_root.join(project_repo)
    }
}
