//! # rbt: Robotainer CLI
//!
//! Resolves the robotics container environment from `config/env.yaml`
//! and drives `docker build`, `run`, and `push` from the persisted result.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used, clippy::panic))]

mod commands;
mod output;

use std::process::ExitCode;

use clap::Parser;
use robotainer_common::error::RobotainerError;
use tracing_subscriber::EnvFilter;

use crate::commands::Cli;

/// Exit code for failures that carry no category.
const GENERIC_FAILURE: u8 = 1;

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match commands::execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            #[allow(clippy::print_stderr)]
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<RobotainerError>()
        .and_then(|e| u8::try_from(e.category().exit_code()).ok())
        .unwrap_or(GENERIC_FAILURE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exit_code_follows_error_category() {
        let err = anyhow::Error::new(RobotainerError::MissingRequiredKey {
            key: "DOCKER_IMAGE".into(),
        });
        assert_eq!(exit_code(&err), 5);

        let err = anyhow::Error::new(RobotainerError::ImageNotFound {
            image: "acme/rover:develop".into(),
        });
        assert_eq!(exit_code(&err), 6);
    }

    #[test]
    fn exit_code_for_foreign_error_is_generic() {
        let err = anyhow::anyhow!("boom");
        assert_eq!(exit_code(&err), GENERIC_FAILURE);
    }
}
