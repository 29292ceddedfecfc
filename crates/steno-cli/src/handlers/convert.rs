use crate::args::ConvertArgs;
use crate::context::ExecutionContext;
use crate::views;
use anyhow::Result;
use steno_runtime::{ConvertConfig, ConvertReport, FailurePolicy, Normalizer};

pub fn resolve_config(base: &ConvertConfig, args: &ConvertArgs) -> ConvertConfig {
    let mut config = base.clone();
    if !args.inputs.is_empty() {
        config.input_dirs = args.inputs.clone();
    }
    if let Some(out) = &args.out {
        config.output_dir = out.clone();
    }
    if args.best_effort {
        config.failure_policy = FailurePolicy::BestEffort;
    }
    config
}

pub fn handle(ctx: &ExecutionContext, args: ConvertArgs) -> Result<()> {
    let config = resolve_config(&ctx.config()?.convert, &args);
    let report = execute(ctx, config)?;
    views::print_convert_report(ctx.format, &report)
}

pub(crate) fn execute(ctx: &ExecutionContext, config: ConvertConfig) -> Result<ConvertReport> {
    let normalizer = Normalizer::new(config);

    let show_progress = !ctx.is_json();
    let report = normalizer.run(|event| {
        if show_progress {
            views::print_convert_progress(&event);
        }
    })?;
    Ok(report)
}
