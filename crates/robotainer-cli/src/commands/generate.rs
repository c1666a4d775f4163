//! `rbt generate`: resolve the environment and write `config/.env`.

use clap::Args;

use super::{Context, TargetArgs};
use crate::output;

/// Arguments for the `generate` command.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Executes the `generate` command.
///
/// # Errors
///
/// Returns any config, validation, or resolution error.
pub fn execute(ctx: &Context, args: &GenerateArgs) -> anyhow::Result<()> {
    let env = ctx.engine().generate(&args.target.target)?;
    output::print_summary(&env);
    output::print_written(&ctx.layout.env_file());
    Ok(())
}
