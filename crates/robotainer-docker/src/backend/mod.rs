//! Collaborator seams towards the container runtime.
//!
//! Command assembly only reads runtime state through [`DockerProbe`] and
//! only spawns processes through [`ProcessExecutor`]. [`DockerCli`] backs
//! both with the `docker` binary; tests substitute recording fakes.

pub mod cli;

pub use cli::DockerCli;

use robotainer_common::error::Result;

use crate::command::CommandLine;

/// Outcome of an executed process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecStatus {
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, or -1 when terminated by a signal.
    pub code: i32,
}

impl ExecStatus {
    /// A successful exit.
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            success: true,
            code: 0,
        }
    }

    /// A failed exit with `code`.
    #[must_use]
    pub const fn failed(code: i32) -> Self {
        Self {
            success: false,
            code,
        }
    }
}

/// Read-only queries against the local container runtime.
pub trait DockerProbe {
    /// Whether `image:tag` exists locally.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be queried.
    fn image_exists(&self, image: &str, tag: &str) -> Result<bool>;

    /// Whether a container named `name` is currently running.
    ///
    /// # Errors
    ///
    /// Returns an error if the runtime cannot be queried.
    fn container_running(&self, name: &str) -> Result<bool>;
}

/// Runs an assembled command to completion.
pub trait ProcessExecutor {
    /// Executes `command`, inheriting the terminal.
    ///
    /// # Errors
    ///
    /// Returns `Process` if the command cannot be spawned.
    fn execute(&self, command: &CommandLine) -> Result<ExecStatus>;
}
