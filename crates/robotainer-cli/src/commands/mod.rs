//! CLI command definitions and dispatch.

pub mod build;
pub mod config;
pub mod generate;
pub mod push;
pub mod run;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use robotainer_common::config::ProjectLayout;
use robotainer_common::constants::DOCKER_BIN;
use robotainer_common::error::RobotainerError;
use robotainer_docker::backend::DockerCli;
use robotainer_docker::command::CommandLine;
use robotainer_docker::engine::Engine;

use crate::output;

/// Robotainer: resolve and drive the robotics development container.
#[derive(Parser, Debug)]
#[command(name = "rbt", version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Command,

    /// Root of the container project (the directory holding `config/` and `docker/`).
    #[arg(long, global = true, env = "ROBOTAINER_ROOT", default_value = ".")]
    pub root_dir: PathBuf,

    /// Print the docker commands instead of executing them.
    #[arg(long, global = true)]
    pub dry_run: bool,

    /// Log at debug level when `RUST_LOG` is unset.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Resolve the environment and write `config/.env`.
    Generate(generate::GenerateArgs),
    /// Resolve, then build the image.
    Build(build::BuildArgs),
    /// Resolve, then start or join the container.
    Run(run::RunArgs),
    /// Resolve, then push the image to the registry.
    Push(push::PushArgs),
    /// Show the persisted environment.
    Config(config::ConfigArgs),
}

/// Target selection shared by the resolving subcommands.
#[derive(Args, Debug)]
pub struct TargetArgs {
    /// Target architecture or profile alias (develop, deploy, x86_64, aarch64, arm).
    #[arg(default_value = std::env::consts::ARCH)]
    pub target: String,
}

/// State shared by every subcommand.
#[derive(Debug)]
pub struct Context {
    /// Resolved project layout.
    pub layout: ProjectLayout,
    /// Whether commands are printed rather than executed.
    pub dry_run: bool,
}

impl Context {
    fn from_cli(cli: &Cli) -> anyhow::Result<Self> {
        let root = cli
            .root_dir
            .canonicalize()
            .map_err(|source| RobotainerError::Io {
                path: cli.root_dir.clone(),
                source,
            })?;
        tracing::debug!(root = %root.display(), dry_run = cli.dry_run, "project layout");
        Ok(Self {
            layout: ProjectLayout::new(root),
            dry_run: cli.dry_run,
        })
    }

    /// Builds an engine over the `docker` binary.
    ///
    /// A missing binary only surfaces once something is probed or spawned,
    /// so `generate` and `--dry-run` work on hosts without docker.
    pub fn engine(&self) -> Engine {
        Engine::new(self.layout.clone()).unwrap_or_else(|err| {
            tracing::debug!(error = %err, "docker not on PATH, deferring");
            Engine::with_runtime(
                self.layout.clone(),
                Box::new(DockerCli::with_binary(DOCKER_BIN)),
            )
        })
    }

    /// Executes `commands` in order, or prints them under `--dry-run`.
    ///
    /// # Errors
    ///
    /// Returns the first spawn or exit-status failure.
    pub fn run<'a>(
        &self,
        engine: &Engine,
        commands: impl IntoIterator<Item = &'a CommandLine>,
    ) -> anyhow::Result<()> {
        if self.dry_run {
            commands.into_iter().for_each(output::print_command);
            return Ok(());
        }
        engine.execute_all(commands)?;
        Ok(())
    }
}

/// Dispatches the parsed CLI command to its handler.
///
/// # Errors
///
/// Returns an error if the command execution fails.
pub fn execute(cli: Cli) -> anyhow::Result<()> {
    let ctx = Context::from_cli(&cli)?;
    match cli.command {
        Command::Generate(args) => generate::execute(&ctx, &args),
        Command::Build(args) => build::execute(&ctx, &args),
        Command::Run(args) => run::execute(&ctx, &args),
        Command::Push(args) => push::execute(&ctx, &args),
        Command::Config(args) => config::execute(&ctx, &args),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn target_defaults_to_host_arch() {
        let cli = Cli::try_parse_from(["rbt", "build"]).expect("parse");
        let Command::Build(args) = cli.command else {
            panic!("expected build");
        };
        assert_eq!(args.target.target, std::env::consts::ARCH);
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["rbt", "push", "deploy", "--dry-run", "--root-dir", "/srv/rc"])
            .expect("parse");
        assert!(cli.dry_run);
        assert_eq!(cli.root_dir, PathBuf::from("/srv/rc"));
        let Command::Push(args) = cli.command else {
            panic!("expected push");
        };
        assert_eq!(args.target.target, "deploy");
    }

    #[test]
    fn missing_root_dir_is_config_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope");
        let cli = Cli::try_parse_from(["rbt", "--root-dir", missing.to_str().expect("utf8"), "config"])
            .expect("parse");
        let err = Context::from_cli(&cli).unwrap_err();
        let err = err.downcast_ref::<RobotainerError>().expect("robotainer error");
        assert!(matches!(err, RobotainerError::Io { .. }));
    }
}
