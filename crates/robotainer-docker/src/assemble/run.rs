//! `docker run` / `docker exec` assembly.
//!
//! A container that is already running is joined with `docker exec`,
//! otherwise a fresh interactive container is created.

use std::path::Path;

use robotainer_common::error::{Result, RobotainerError};
use robotainer_env::{ResolvedEnvironment, keys, volumes};

use crate::backend::DockerProbe;
use crate::command::CommandLine;
use crate::platform::platform_option;

/// Keys the run command reads.
pub const RUN_REQUIRED: &[&str] = &[
    keys::DOCKER_IMAGE,
    keys::DOCKER_IMAGE_TAG,
    keys::DOCKER_CONTAINER,
    keys::LOCAL_WS_PATH,
    keys::CONTAINER_WS,
    keys::CONTAINER_HOME,
    keys::VOLUMES,
    keys::TARGET_ARCH,
    keys::SOURCE_ARCH,
    keys::CONTAINER_UID,
    keys::CONTAINER_USR,
    keys::CONTAINER_GID,
    keys::CONTAINER_RUN_CMD,
];

const JOIN_SHELL: &str = "/entrypoint.sh ; /bin/bash";

/// Host values used when the environment does not pin them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunHost {
    /// X display forwarded into the container.
    pub display: String,
    /// Hostname given to the container.
    pub hostname: String,
}

impl Default for RunHost {
    fn default() -> Self {
        Self {
            display: String::new(),
            hostname: "localhost".to_string(),
        }
    }
}

impl RunHost {
    /// Reads `DISPLAY` and `HOSTNAME` from the calling process.
    #[must_use]
    pub fn from_process_env() -> Self {
        let defaults = Self::default();
        Self {
            display: std::env::var("DISPLAY").unwrap_or(defaults.display),
            hostname: std::env::var("HOSTNAME").unwrap_or(defaults.hostname),
        }
    }
}

/// What the run step will do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunPlan {
    /// Attach to the running container.
    Join(CommandLine),
    /// Start a new container.
    Create(CommandLine),
}

impl RunPlan {
    /// The command to execute.
    #[must_use]
    pub const fn command(&self) -> &CommandLine {
        match self {
            Self::Join(cmd) | Self::Create(cmd) => cmd,
        }
    }
}

/// Assembles the run step for `env`.
///
/// # Errors
///
/// Returns `MissingRequiredKey` before any probe is made, then
/// `ImageNotFound` when the image has not been built, or a probe error.
pub fn assemble_run(
    env: &ResolvedEnvironment,
    probe: &dyn DockerProbe,
    host: &RunHost,
) -> Result<RunPlan> {
    env.require_all(RUN_REQUIRED)?;

    let image = env.require(keys::DOCKER_IMAGE)?;
    let tag = env.require(keys::DOCKER_IMAGE_TAG)?;
    let name = env.require(keys::DOCKER_CONTAINER)?;
    let workspace = env.require(keys::CONTAINER_WS)?;

    if !probe.image_exists(image, tag)? {
        return Err(RobotainerError::ImageNotFound {
            image: format!("{image}:{tag}"),
        });
    }

    if probe.container_running(name)? {
        tracing::info!(container = %name, "container already running, joining");
        let cmd = CommandLine::docker()
            .args(["exec", "-it", "-w", workspace, name, "/bin/bash", "-c", JOIN_SHELL]);
        return Ok(RunPlan::Join(cmd));
    }

    create_command(env, host).map(RunPlan::Create)
}

fn create_command(env: &ResolvedEnvironment, host: &RunHost) -> Result<CommandLine> {
    let uid = env.require(keys::CONTAINER_UID)?;
    let gid = env.require(keys::CONTAINER_GID)?;
    let user = env.require(keys::CONTAINER_USR)?;
    let home = env.require(keys::CONTAINER_HOME)?;
    let workspace = env.require(keys::CONTAINER_WS)?;
    let display = env.get(keys::DISPLAY).unwrap_or(&host.display);
    let hostname = env.get(keys::HOSTNAME).unwrap_or(&host.hostname);
    let platform = platform_option(
        env.require(keys::TARGET_ARCH)?,
        env.require(keys::SOURCE_ARCH)?,
    );

    let mut mounts = vec![format!(
        "-v{}:{workspace}:rw",
        env.require(keys::LOCAL_WS_PATH)?
    )];
    for volume in volumes::decode(env.require(keys::VOLUMES)?) {
        let file_name = Path::new(&volume)
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        mounts.push(format!("-v{volume}:{home}/{file_name}:rw"));
    }

    let cmd = CommandLine::docker()
        .args(["run", "-it", "--rm", "--privileged"])
        .args(["--cap-add", "IPC_LOCK"])
        .args(["--ulimit", "memlock=-1:-1"])
        .args(["--device", "/dev:/dev"])
        .args(["--network", "host"])
        .arg("-e")
        .arg(format!("LOCAL_USER_ID={uid}"))
        .arg("-e")
        .arg(format!("USER={user}"))
        .arg("-e")
        .arg(format!("UID={uid}"))
        .arg("-e")
        .arg(format!("GROUPS={gid}"))
        .arg("-e")
        .arg(format!("DISPLAY={display}"))
        .args(["-e", "QT_X11_NO_MITSHM=1"])
        .args(["-e", "XAUTHORITY=/tmp/.docker.xauth"])
        .args(["-p", "14556:14556/udp"])
        .args(["-p", "8888-8890:8888-8890/udp"])
        .args(["-v", "/etc/localtime:/etc/localtime:ro"])
        .args(["-v", "/tmp/.X11-unix:/tmp/.X11-unix"])
        .args(["-v", "/tmp/.docker.xauth:/tmp/.docker.xauth"])
        .args(["-v", "/dev/shm:/dev/shm"])
        .args(mounts)
        .arg_opt(platform.flag())
        .args(["-h", hostname])
        .args(["-w", workspace])
        .args(["--name", env.require(keys::DOCKER_CONTAINER)?])
        .arg(format!(
            "{}:{}",
            env.require(keys::DOCKER_IMAGE)?,
            env.require(keys::DOCKER_IMAGE_TAG)?
        ))
        .arg(env.require(keys::CONTAINER_RUN_CMD)?);

    tracing::debug!(command = %cmd, "run command assembled");
    Ok(cmd)
}
