//! `docker` CLI implementation of the runtime collaborators.

use std::path::PathBuf;
use std::process::{Command, Stdio};

use robotainer_common::constants::DOCKER_BIN;
use robotainer_common::error::{Result, RobotainerError};

use super::{DockerProbe, ExecStatus, ProcessExecutor};
use crate::command::CommandLine;

/// Talks to the container runtime through the `docker` binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: PathBuf,
}

impl DockerCli {
    /// Locates `docker` on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `Process` if the binary cannot be found.
    pub fn locate() -> Result<Self> {
        let binary = which::which(DOCKER_BIN).map_err(|e| RobotainerError::Process {
            command: DOCKER_BIN.to_string(),
            message: format!("{e} (is docker installed?)"),
        })?;
        tracing::debug!(binary = %binary.display(), "docker binary located");
        Ok(Self { binary })
    }

    /// Uses an explicit binary path.
    #[must_use]
    pub fn with_binary(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    fn query(&self, args: &[&str]) -> Result<std::process::Output> {
        Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .map_err(|e| RobotainerError::Process {
                command: format!("{} {}", DOCKER_BIN, args.join(" ")),
                message: e.to_string(),
            })
    }
}

impl DockerProbe for DockerCli {
    fn image_exists(&self, image: &str, tag: &str) -> Result<bool> {
        let reference = format!("{image}:{tag}");
        let output = self.query(&["image", "inspect", &reference])?;
        tracing::debug!(image = %reference, exists = output.status.success(), "image probe");
        Ok(output.status.success())
    }

    fn container_running(&self, name: &str) -> Result<bool> {
        let filter = format!("name={name}");
        let output = self.query(&["ps", "-q", "-f", &filter])?;
        let running = !String::from_utf8_lossy(&output.stdout).trim().is_empty();
        tracing::debug!(container = %name, running, "container probe");
        Ok(running)
    }
}

impl ProcessExecutor for DockerCli {
    fn execute(&self, command: &CommandLine) -> Result<ExecStatus> {
        tracing::info!(command = %command, "executing");
        let program = if command.program == DOCKER_BIN {
            self.binary.clone()
        } else {
            PathBuf::from(&command.program)
        };
        let status = Command::new(program)
            .args(&command.args)
            .status()
            .map_err(|e| RobotainerError::Process {
                command: command.render(),
                message: e.to_string(),
            })?;
        Ok(ExecStatus {
            success: status.success(),
            code: status.code().unwrap_or(-1),
        })
    }
}
