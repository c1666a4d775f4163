//! `rbt build`: resolve, then build the image.

use clap::Args;

use super::{Context, TargetArgs};
use crate::output;

/// Arguments for the `build` command.
#[derive(Args, Debug)]
pub struct BuildArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Executes the `build` command.
///
/// # Errors
///
/// Returns resolution, assembly, or process errors.
pub fn execute(ctx: &Context, args: &BuildArgs) -> anyhow::Result<()> {
    let engine = ctx.engine();
    let prepared = engine.prepare_build(&args.target.target)?;
    output::print_summary(&prepared.env);
    tracing::info!(target = %args.target.target, "building image");
    ctx.run(&engine, [&prepared.plan])
}
