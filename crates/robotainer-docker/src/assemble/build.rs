//! `docker build` assembly.

use robotainer_common::config::ProjectLayout;
use robotainer_common::error::Result;
use robotainer_env::{ResolvedEnvironment, keys};

use crate::command::CommandLine;
use crate::platform::platform_option;

/// Keys the build command reads.
pub const BUILD_REQUIRED: &[&str] = &[
    keys::DOCKERFILE,
    keys::DOCKER_IMAGE,
    keys::DOCKER_IMAGE_TAG,
    keys::BUILD_STAGE,
    keys::BASE_IMAGE,
    keys::CONTAINER_USR,
    keys::CONTAINER_PSW,
    keys::CONTAINER_UID,
    keys::CONTAINER_GID,
    keys::TARGET_ARCH,
    keys::SOURCE_ARCH,
];

/// Build arguments forwarded from the environment, by `ARG` name.
const BUILD_ARGS: &[&str] = &[
    keys::CONTAINER_USR,
    keys::CONTAINER_PSW,
    keys::CONTAINER_UID,
    keys::CONTAINER_GID,
];

/// Assembles the image build for `env`.
///
/// The dockerfile is taken from the layout's docker directory and the
/// layout root is the build context.
///
/// # Errors
///
/// Returns `MissingRequiredKey` for the first absent key.
pub fn assemble_build(env: &ResolvedEnvironment, layout: &ProjectLayout) -> Result<CommandLine> {
    env.require_all(BUILD_REQUIRED)?;

    let image = env.require(keys::DOCKER_IMAGE)?;
    let tag = env.require(keys::DOCKER_IMAGE_TAG)?;
    let dockerfile = layout.docker_dir().join(env.require(keys::DOCKERFILE)?);
    let platform = platform_option(
        env.require(keys::TARGET_ARCH)?,
        env.require(keys::SOURCE_ARCH)?,
    );

    let mut cmd = CommandLine::docker()
        .args(["build", "--pull", "--rm"])
        .arg("--build-arg")
        .arg(format!("BASE_IMAGE={}", env.require(keys::BASE_IMAGE)?));
    for key in BUILD_ARGS {
        cmd = cmd
            .arg("--build-arg")
            .arg(format!("{key}={}", env.require(key)?));
    }

    let cmd = cmd
        .arg("-f")
        .arg(dockerfile.to_string_lossy())
        .arg("--target")
        .arg(env.require(keys::BUILD_STAGE)?)
        .arg("-t")
        .arg(format!("{image}:{tag}"))
        .arg_opt(platform.flag())
        .arg(layout.root().to_string_lossy());

    tracing::debug!(command = %cmd, "build command assembled");
    Ok(cmd)
}

#[cfg(test)]
mod tests {
    use robotainer_common::error::RobotainerError;

    use super::*;
    use crate::assemble::fixtures::{resolved_env, without};

    fn layout() -> ProjectLayout {
        ProjectLayout::new("/work/robotics_container")
    }

    #[test]
    fn build_command_matches_contract() {
        let cmd = assemble_build(&resolved_env(), &layout()).expect("assemble");
        assert_eq!(cmd.program, "docker");
        assert_eq!(
            cmd.args,
            vec![
                "build",
                "--pull",
                "--rm",
                "--build-arg",
                "BASE_IMAGE=osrf/ros:humble-desktop-full",
                "--build-arg",
                "CONTAINER_USR=ros",
                "--build-arg",
                "CONTAINER_PSW=secret",
                "--build-arg",
                "CONTAINER_UID=1000",
                "--build-arg",
                "CONTAINER_GID=1001",
                "-f",
                "/work/robotics_container/docker/Dockerfile.ros2",
                "--target",
                "develop-stage",
                "-t",
                "Acme/rover-humble:develop",
                "--platform=linux/amd64",
                "/work/robotics_container",
            ]
        );
    }

    #[test]
    fn build_deploy_uses_arm64_platform() {
        let mut env = without(&without(&resolved_env(), keys::TARGET_ARCH), keys::BUILD_STAGE);
        let _ = env.insert(keys::TARGET_ARCH, "arm");
        let _ = env.insert(keys::BUILD_STAGE, "deploy-stage");
        let cmd = assemble_build(&env, &layout()).expect("assemble");
        assert!(cmd.args.contains(&"--platform=linux/arm64".to_string()));
        assert!(cmd.args.contains(&"deploy-stage".to_string()));
    }

    #[test]
    fn build_native_target_omits_platform() {
        let mut env = without(&resolved_env(), keys::TARGET_ARCH);
        let _ = env.insert(keys::TARGET_ARCH, "riscv64");
        let cmd = assemble_build(&env, &layout()).expect("assemble");
        assert!(!cmd.args.iter().any(|a| a.starts_with("--platform")));
    }

    #[test]
    fn build_fails_on_missing_image_key() {
        let env = without(&resolved_env(), keys::DOCKER_IMAGE);
        let err = assemble_build(&env, &layout()).unwrap_err();
        assert!(matches!(
            err,
            RobotainerError::MissingRequiredKey { ref key } if key == "DOCKER_IMAGE"
        ));
    }
}
