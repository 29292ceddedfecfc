use chrono::NaiveDate;
use clap::{Args, Subcommand};
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Write a default configuration file")]
    Init {
        #[arg(long, help = "Overwrite an existing configuration file")]
        force: bool,
    },

    #[command(about = "Download session statements for each day of a date range")]
    Fetch(FetchArgs),

    #[command(about = "Convert session JSON files into free-flow text")]
    Convert(ConvertArgs),

    #[command(about = "Split free-flow text files into overlapping chunks (JSON Lines)")]
    Chunk(ChunkArgs),

    #[command(about = "Fetch, then convert, using configured values")]
    Run {
        #[arg(long, help = "Log and skip session files that cannot be converted")]
        best_effort: bool,
    },
}

#[derive(Debug, Clone, Default, Args)]
pub struct FetchArgs {
    #[arg(long, help = "First day to fetch (YYYY-MM-DD)")]
    pub from: Option<NaiveDate>,

    #[arg(long, help = "Last day to fetch, inclusive (YYYY-MM-DD)")]
    pub to: Option<NaiveDate>,

    #[arg(long)]
    pub base_url: Option<String>,

    #[arg(long, help = "Statements per remote page")]
    pub batch_size: Option<u64>,

    #[arg(long, help = "Directory for per-date JSON files")]
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ConvertArgs {
    #[arg(long = "input", help = "Input folder (repeatable; replaces configured folders)")]
    pub inputs: Vec<PathBuf>,

    #[arg(long, help = "Directory for text files")]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Log and skip session files that cannot be converted")]
    pub best_effort: bool,
}

#[derive(Debug, Clone, Default, Args)]
pub struct ChunkArgs {
    #[arg(long, help = "Folder of .txt files")]
    pub input: Option<PathBuf>,

    #[arg(long, help = "JSON Lines output file")]
    pub out: Option<PathBuf>,

    #[arg(long, help = "Maximum chunk length in characters")]
    pub size: Option<usize>,

    #[arg(long, help = "Characters shared by consecutive chunks")]
    pub overlap: Option<usize>,
}
