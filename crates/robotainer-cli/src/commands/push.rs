//! `rbt push`: resolve, then tag, push, and untag the registry image.

use clap::Args;

use super::{Context, TargetArgs};
use crate::output;

/// Arguments for the `push` command.
#[derive(Args, Debug)]
pub struct PushArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Executes the `push` command, stopping at the first failing step.
///
/// # Errors
///
/// Returns resolution, assembly, or process errors.
pub fn execute(ctx: &Context, args: &PushArgs) -> anyhow::Result<()> {
    let engine = ctx.engine();
    let prepared = engine.prepare_push(&args.target.target)?;
    output::print_summary(&prepared.env);
    output::print_note(&format!(
        "{} -> {}",
        prepared.plan.local_ref, prepared.plan.remote_ref
    ));
    ctx.run(&engine, prepared.plan.commands())
}
