use crate::args::ChunkArgs;
use crate::context::ExecutionContext;
use crate::views;
use anyhow::Result;
use steno_runtime::{ChunkConfig, Chunker};

pub fn resolve_config(base: &ChunkConfig, args: &ChunkArgs) -> ChunkConfig {
    let mut config = base.clone();
    if let Some(input) = &args.input {
        config.input_dir = input.clone();
    }
    if let Some(out) = &args.out {
        config.output_file = out.clone();
    }
    if let Some(size) = args.size {
        config.chunk_size = size;
    }
    if let Some(overlap) = args.overlap {
        config.chunk_overlap = overlap;
    }
    config
}

pub fn handle(ctx: &ExecutionContext, args: ChunkArgs) -> Result<()> {
    let config = resolve_config(&ctx.config()?.chunk, &args);
    let chunker = Chunker::new(config)?;

    let show_progress = !ctx.is_json();
    let report = chunker.run(|event| {
        if show_progress {
            views::print_chunk_progress(&event);
        }
    })?;

    views::print_chunk_report(ctx.format, &report)
}
