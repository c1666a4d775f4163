//! Engine that ties resolution, persistence, assembly, and execution.
//!
//! Every operation resolves fresh from `config/env.yaml`, writes
//! `config/.env`, and assembles its commands from the file it just wrote.

use robotainer_common::config::{ProjectConfig, ProjectLayout};
use robotainer_common::error::{Result, RobotainerError};
use robotainer_env::{ResolveRequest, ResolvedEnvironment, resolve_to_file, store};

use crate::assemble::{self, PushPlan, RunHost, RunPlan};
use crate::backend::{DockerCli, DockerProbe, ProcessExecutor};
use crate::command::CommandLine;

/// A container runtime that can be both probed and driven.
pub trait Runtime: DockerProbe + ProcessExecutor {}

impl<T: DockerProbe + ProcessExecutor> Runtime for T {}

/// A resolved operation ready to execute.
#[derive(Debug, Clone)]
pub struct Prepared<P> {
    /// Environment as read back from the persisted file.
    pub env: ResolvedEnvironment,
    /// Assembled commands.
    pub plan: P,
}

/// Coordinates one project layout with one container runtime.
pub struct Engine {
    layout: ProjectLayout,
    runtime: Box<dyn Runtime>,
}

impl Engine {
    /// Creates an engine backed by the `docker` binary on `PATH`.
    ///
    /// # Errors
    ///
    /// Returns `Process` if docker cannot be found.
    pub fn new(layout: ProjectLayout) -> Result<Self> {
        Ok(Self::with_runtime(layout, Box::new(DockerCli::locate()?)))
    }

    /// Creates an engine with a custom runtime.
    #[must_use]
    pub fn with_runtime(layout: ProjectLayout, runtime: Box<dyn Runtime>) -> Self {
        Self { layout, runtime }
    }

    /// Loads the project description, resolves `target_arch`, persists the
    /// result, and reads it back.
    ///
    /// # Errors
    ///
    /// Returns config, validation, or resolution errors. Nothing is written
    /// when resolution fails.
    pub fn generate(&self, target_arch: &str) -> Result<ResolvedEnvironment> {
        let config = ProjectConfig::load(&self.layout.config_file())?;
        let request = ResolveRequest::new(target_arch);
        let _ = resolve_to_file(&config, &self.layout, &request)?;
        self.load_persisted()
    }

    /// Reads the persisted environment without resolving.
    ///
    /// # Errors
    ///
    /// Returns `Io` if `config/.env` cannot be read.
    pub fn load_persisted(&self) -> Result<ResolvedEnvironment> {
        store::read_env_file(&self.layout.env_file())
    }

    /// Resolves and assembles the image build.
    ///
    /// # Errors
    ///
    /// Returns any [`Engine::generate`] or assembly error.
    pub fn prepare_build(&self, target_arch: &str) -> Result<Prepared<CommandLine>> {
        let env = self.generate(target_arch)?;
        let plan = assemble::assemble_build(&env, &self.layout)?;
        Ok(Prepared { env, plan })
    }

    /// Resolves and assembles the container run.
    ///
    /// # Errors
    ///
    /// Returns any [`Engine::generate`] or assembly error, including
    /// `ImageNotFound`.
    pub fn prepare_run(&self, target_arch: &str, host: &RunHost) -> Result<Prepared<RunPlan>> {
        let env = self.generate(target_arch)?;
        let plan = assemble::assemble_run(&env, self.runtime.as_ref(), host)?;
        Ok(Prepared { env, plan })
    }

    /// Resolves and assembles the registry push.
    ///
    /// # Errors
    ///
    /// Returns any [`Engine::generate`] or assembly error.
    pub fn prepare_push(&self, target_arch: &str) -> Result<Prepared<PushPlan>> {
        let env = self.generate(target_arch)?;
        let plan = assemble::assemble_push(&env)?;
        Ok(Prepared { env, plan })
    }

    /// Executes `command`, treating a non-zero exit as an error.
    ///
    /// # Errors
    ///
    /// Returns `Process` if it cannot be spawned, `ProcessFailed` if it
    /// exits unsuccessfully.
    pub fn execute(&self, command: &CommandLine) -> Result<()> {
        let status = self.runtime.execute(command)?;
        if status.success {
            return Ok(());
        }
        tracing::error!(command = %command, code = status.code, "command failed");
        Err(RobotainerError::ProcessFailed {
            command: command.render(),
            code: status.code,
        })
    }

    /// Executes `commands` in order, stopping at the first failure.
    ///
    /// # Errors
    ///
    /// Returns the first [`Engine::execute`] error.
    pub fn execute_all<'a>(&self, commands: impl IntoIterator<Item = &'a CommandLine>) -> Result<()> {
        commands.into_iter().try_for_each(|c| self.execute(c))
    }
}
