//! `rbt config`: show the persisted environment without resolving.

use clap::{Args, ValueEnum};
use robotainer_env::store;

use super::Context;
use crate::output;

/// Output format for `config`.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    /// Human summary.
    Text,
    /// Every key as one JSON object, in file order.
    Json,
}

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    /// Output format.
    #[arg(long, value_enum, default_value_t = Format::Text)]
    pub format: Format,
}

/// Executes the `config` command.
///
/// # Errors
///
/// Returns an error if `config/.env` is missing or malformed.
pub fn execute(ctx: &Context, args: &ConfigArgs) -> anyhow::Result<()> {
    let env = store::read_env_file(&ctx.layout.env_file())?;
    match args.format {
        Format::Text => output::print_summary(&env),
        Format::Json => output::print_json(&output::to_json(&env)?),
    }
    Ok(())
}
