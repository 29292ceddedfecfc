mod commands;

pub use commands::*;

use crate::types::{LogLevel, OutputFormat};
use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "steno")]
#[command(about = "Fetch parliamentary session transcripts and normalize them into free-flow text", long_about = None)]
#[command(version)]
#[command(args_override_self = true)]
pub struct Cli {
    #[arg(long, default_value = "steno.toml", global = true)]
    pub config: PathBuf,

    #[arg(long, default_value = "plain", global = true)]
    pub format: OutputFormat,

    #[arg(long, default_value = "warn", global = true)]
    pub log_level: LogLevel,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
