//! Derivation of the full build/run environment from a project description.
//!
//! Resolution validates the inputs, picks the build profile for the
//! (middleware, target) pair, substitutes the name templates, checks that
//! the dockerfile exists, and merges the resulting strata in a fixed order:
//! repo, volumes, container, build, image.

use std::path::Path;

use robotainer_common::config::{ProjectConfig, ProjectLayout};
use robotainer_common::constants::{DEPLOY_ALIAS, DEVELOP_ALIAS};
use robotainer_common::error::{Result, RobotainerError};
use robotainer_common::types::{BuildProfile, CanonicalArch, Middleware};

use crate::arch::{host_arch, normalize};
use crate::environment::{ResolvedEnvironment, keys};
use crate::template::{Substitutions, substitute};
use crate::{store, validator, volumes};

/// What to resolve for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveRequest {
    /// Target architecture or alias, as the user typed it.
    pub target_arch: String,
    /// Architecture of the building host.
    pub source_arch: CanonicalArch,
}

impl ResolveRequest {
    /// Request for `target_arch`, built on the current host.
    #[must_use]
    pub fn new(target_arch: impl Into<String>) -> Self {
        Self {
            target_arch: target_arch.into(),
            source_arch: host_arch(),
        }
    }

    /// Overrides the source architecture.
    #[must_use]
    pub fn with_source_arch(mut self, source_arch: &str) -> Self {
        self.source_arch = normalize(source_arch);
        self
    }
}

struct Selection {
    profile: BuildProfile,
    base_field: &'static str,
    base_template: String,
}

fn select(config: &ProjectConfig, middleware: Middleware, target: &CanonicalArch) -> Result<Selection> {
    let images = &config.docker_base_images;
    let (profile, base_field, base_template) = match (middleware, target.as_str()) {
        (Middleware::Ros2, DEVELOP_ALIAS | "x86_64") => (
            BuildProfile::Develop,
            "docker_base_images.x86_full_image",
            &images.x86_full_image,
        ),
        (Middleware::Ros2, DEPLOY_ALIAS | "arm" | "aarch64") => (
            BuildProfile::Deploy,
            "docker_base_images.arm_base_image",
            &images.arm_base_image,
        ),
        (Middleware::MicroRos, DEVELOP_ALIAS) => (
            BuildProfile::Develop,
            "docker_base_images.microros_base_image",
            &images.microros_base_image,
        ),
        (Middleware::MicroRos, DEPLOY_ALIAS) => (
            BuildProfile::Deploy,
            "docker_base_images.microros_base_image",
            &images.microros_base_image,
        ),
        _ => {
            return Err(RobotainerError::UnsupportedArchitecture {
                value: target.to_string(),
                allowed: config.supported.architectures.clone(),
            });
        }
    };
    Ok(Selection {
        profile,
        base_field,
        base_template: base_template.clone(),
    })
}

/// Resolves the environment for `request`.
///
/// Pure apart from filesystem existence checks: nothing is written and no
/// process state is read.
///
/// # Errors
///
/// Returns the validator's errors, `UnsupportedArchitecture` when the
/// middleware has no profile for the target, `TemplateSubstitution` for an
/// unresolved placeholder, or `MissingDockerfile`.
pub fn resolve(
    config: &ProjectConfig,
    layout: &ProjectLayout,
    request: &ResolveRequest,
) -> Result<ResolvedEnvironment> {
    validator::validate(config, layout, &request.target_arch)?;

    let target = normalize(&request.target_arch);
    let middleware: Middleware = config.middleware.parse().inspect_err(|e| {
        tracing::error!(error = %e, "validated middleware has no build profile");
    })?;
    let selection = select(config, middleware, &target)?;
    let profile = selection.profile;
    tracing::info!(
        middleware = %middleware,
        target = %target,
        stage = profile.stage(),
        tag = profile.tag(),
        "resolved build profile"
    );

    let subs = Substitutions::new()
        .with("REPO_AUTHOR", config.repo_author.as_str())
        .with("PROJECT_REPO", config.project_repo.as_str())
        .with("ROS2_DISTRO", config.ros2_distro.as_str())
        .with("MIDDLEWARE", middleware.as_str())
        .with("TAG", profile.tag());
    let names = &config.docker_file_image_container;
    let base_image = substitute(selection.base_field, &selection.base_template, &subs)?;
    let dockerfile = substitute(
        "docker_file_image_container.dockerfile",
        &names.dockerfile,
        &subs,
    )?;
    let docker_image = substitute(
        "docker_file_image_container.docker_image",
        &names.docker_image,
        &subs,
    )?;
    let docker_container = substitute(
        "docker_file_image_container.docker_container",
        &names.docker_container,
        &subs,
    )?;

    let dockerfile_path = layout.docker_dir().join(&dockerfile);
    if !dockerfile_path.is_file() {
        return Err(RobotainerError::MissingDockerfile {
            path: dockerfile_path,
        });
    }

    let mut env = repo_stratum(config);
    env.merge(volumes_stratum(config, layout));
    env.merge(container_stratum(config));
    env.merge(
        [
            (keys::BASE_IMAGE, base_image),
            (keys::BUILD_STAGE, profile.stage().to_string()),
            (keys::TARGET_ARCH, profile.arch().to_string()),
            (keys::SOURCE_ARCH, request.source_arch.to_string()),
        ]
        .into_iter()
        .collect(),
    );
    env.merge(
        [
            (keys::DOCKERFILE, dockerfile),
            (keys::DOCKER_IMAGE, docker_image),
            (keys::DOCKER_CONTAINER, docker_container),
            (keys::DOCKER_IMAGE_TAG, profile.tag().to_string()),
        ]
        .into_iter()
        .collect(),
    );
    Ok(env)
}

/// Resolves and writes the result to the layout's persisted environment.
///
/// Nothing is written when resolution fails.
///
/// # Errors
///
/// Returns any [`resolve`] error, or the store's write errors.
pub fn resolve_to_file(
    config: &ProjectConfig,
    layout: &ProjectLayout,
    request: &ResolveRequest,
) -> Result<ResolvedEnvironment> {
    let env = resolve(config, layout, request)?;
    store::write_env_file(&layout.env_file(), &env)?;
    Ok(env)
}

fn repo_stratum(config: &ProjectConfig) -> ResolvedEnvironment {
    [
        (keys::REPO_AUTHOR, config.repo_author.as_str()),
        (keys::PROJECT_REPO, config.project_repo.as_str()),
    ]
    .into_iter()
    .collect()
}

fn volumes_stratum(config: &ProjectConfig, layout: &ProjectLayout) -> ResolvedEnvironment {
    let local_ws = layout.project_repo_path(&config.project_repo);
    let encoded = volumes::encode(config.volumes.iter().map(|v| path_string(v)));
    [
        (keys::LOCAL_WS_PATH, path_string(&local_ws)),
        (keys::VOLUMES, encoded),
    ]
    .into_iter()
    .collect()
}

fn container_stratum(config: &ProjectConfig) -> ResolvedEnvironment {
    let user = &config.container_env;
    let home = format!("/home/{}", user.container_usr);
    let workspace = format!("{home}/{}", config.project_repo);
    [
        (keys::CONTAINER_USR, user.container_usr.clone()),
        (keys::CONTAINER_PSW, user.container_psw.clone()),
        (keys::CONTAINER_UID, user.container_uid.clone()),
        (keys::CONTAINER_GID, user.container_gid.clone()),
        (keys::CONTAINER_HOME, home),
        (keys::CONTAINER_WS, workspace),
        (keys::CONTAINER_RUN_CMD, config.container_run_cmd.clone()),
    ]
    .into_iter()
    .collect()
}

fn path_string(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
