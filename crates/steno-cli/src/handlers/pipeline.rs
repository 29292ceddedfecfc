use super::{convert, fetch};
use crate::args::{ConvertArgs, FetchArgs};
use crate::context::ExecutionContext;
use crate::views;
use anyhow::Result;

pub fn handle(ctx: &ExecutionContext, best_effort: bool) -> Result<()> {
    let config = ctx.config()?;

    let fetch_config = fetch::resolve_config(&config.fetch, &FetchArgs::default());
    let fetch_report = fetch::execute(ctx, fetch_config)?;

    let convert_args = ConvertArgs {
        best_effort,
        ..ConvertArgs::default()
    };
    let convert_config = convert::resolve_config(&config.convert, &convert_args);
    let convert_report = convert::execute(ctx, convert_config)?;

    views::print_pipeline_report(ctx.format, &fetch_report, &convert_report)
}
