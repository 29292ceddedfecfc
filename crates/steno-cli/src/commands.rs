use super::args::{Cli, Commands};
use super::handlers;
use crate::context::ExecutionContext;
use crate::logging;
use anyhow::Result;

pub fn run(cli: Cli) -> Result<()> {
    logging::init(cli.log_level);

    let ctx = ExecutionContext::new(cli.config, cli.format);

    let Some(command) = cli.command else {
        show_guidance(&ctx);
        return Ok(());
    };

    match command {
        Commands::Init { force } => handlers::init::handle(&ctx, force),
        Commands::Fetch(args) => handlers::fetch::handle(&ctx, args),
        Commands::Convert(args) => handlers::convert::handle(&ctx, args),
        Commands::Chunk(args) => handlers::chunk::handle(&ctx, args),
        Commands::Run { best_effort } => handlers::pipeline::handle(&ctx, best_effort),
    }
}

fn show_guidance(ctx: &ExecutionContext) {
    println!("steno: parliamentary session transcripts to free-flow text");
    println!();
    if !ctx.config_path().exists() {
        println!(
            "No configuration at {} (defaults apply). Create one with:",
            ctx.config_path().display()
        );
        println!("  steno init");
        println!();
    }
    println!("Typical workflow:");
    println!("  steno fetch --from 2024-09-01 --to 2024-09-30");
    println!("  steno convert");
    println!("  steno chunk");
    println!();
    println!("Run 'steno --help' for all commands.");
}
