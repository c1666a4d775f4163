//! `rbt run`: resolve, then start the container or join the running one.

use clap::Args;
use robotainer_docker::assemble::{RunHost, RunPlan};

use super::{Context, TargetArgs};
use crate::output;

/// Arguments for the `run` command.
#[derive(Args, Debug)]
pub struct RunArgs {
    #[command(flatten)]
    pub target: TargetArgs,
}

/// Executes the `run` command.
///
/// # Errors
///
/// Returns resolution or assembly errors, `ImageNotFound` if the image was
/// never built, or process errors.
pub fn execute(ctx: &Context, args: &RunArgs) -> anyhow::Result<()> {
    let engine = ctx.engine();
    let host = RunHost::from_process_env();
    let prepared = engine.prepare_run(&args.target.target, &host)?;
    output::print_summary(&prepared.env);
    if let RunPlan::Join(_) = prepared.plan {
        output::print_note("container already running, attaching a shell");
    }
    ctx.run(&engine, [prepared.plan.command()])
}
