//! Fixed file names, directories, and tokens.

/// Directory under the project root holding the declarative config.
pub const CONFIG_DIR: &str = "config";

/// Declarative project description file name.
pub const SOURCE_CONFIG: &str = "env.yaml";

/// Persisted environment file name.
pub const TARGET_CONFIG: &str = ".env";

/// Directory under the project root holding the dockerfiles.
pub const DOCKER_DIR: &str = "docker";

/// Container registry images are pushed to.
pub const REGISTRY: &str = "ghcr.io";

/// Container runtime binary.
pub const DOCKER_BIN: &str = "docker";

/// Alias token for the development (x86) target.
pub const DEVELOP_ALIAS: &str = "develop";

/// Alias token for the deployment (ARM) target.
pub const DEPLOY_ALIAS: &str = "deploy";

/// Build stage used for development images.
pub const DEVELOP_STAGE: &str = "develop-stage";

/// Build stage used for deployment images.
pub const DEPLOY_STAGE: &str = "deploy-stage";

/// Middleware identifier for ROS 2.
pub const MIDDLEWARE_ROS2: &str = "ros2";

/// Middleware identifier for micro-ROS.
pub const MIDDLEWARE_MICRO_ROS: &str = "micro-ros";

/// Application name used in CLI output.
pub const APP_NAME: &str = "robotainer";

/// Binary name for the CLI.
pub const BIN_NAME: &str = "rbt";
