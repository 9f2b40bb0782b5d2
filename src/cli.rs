use clap::{Args, Parser, Subcommand};
use std::num::NonZeroUsize;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "media-split")]
#[command(about = "A CLI tool for splitting media files into fixed-length chunks with ffmpeg")]
#[command(version = "0.1.0")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Path to the ffmpeg binary
    #[arg(long, global = true, default_value = "ffmpeg", value_name = "PATH")]
    pub ffmpeg: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Split a media file into chunks
    Split(SplitArgs),

    /// Show the chunks a split would produce without running it
    Plan(PlanArgs),

    /// Print the duration ffmpeg reports for a file
    Probe(ProbeArgs),
}

#[derive(Args, Clone)]
pub struct ChunkArgs {
    /// Input media file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,

    /// Output directory for chunk files
    #[arg(short, long, value_name = "DIR")]
    pub output: PathBuf,

    /// Length of each chunk in seconds
    #[arg(short, long, value_name = "SECONDS", allow_hyphen_values = true)]
    pub seconds: i64,

    /// Create the output directory if it does not exist (one level only)
    #[arg(long)]
    pub create_dir: bool,

    /// Start at this position in seconds instead of the beginning
    #[arg(long, value_name = "SECONDS", conflicts_with = "start_index")]
    pub start_offset: Option<f64>,

    /// Start at this 0-based chunk of the full split
    #[arg(long, value_name = "INDEX")]
    pub start_index: Option<u32>,

    /// Maximum number of chunks to produce (with --start-offset or --start-index)
    #[arg(long, value_name = "N")]
    pub count: Option<u32>,

    /// Write a JSON report of the chunks to this file
    #[arg(long, value_name = "FILE")]
    pub json_output: Option<PathBuf>,
}

#[derive(Args)]
pub struct SplitArgs {
    #[command(flatten)]
    pub chunks: ChunkArgs,

    /// Audio codec used for each chunk
    #[arg(long, default_value = "libmp3lame")]
    pub codec: String,

    /// Maximum number of ffmpeg processes running at once (default: one per chunk)
    #[arg(long, value_name = "N")]
    pub max_concurrent: Option<NonZeroUsize>,
}

#[derive(Args)]
pub struct PlanArgs {
    #[command(flatten)]
    pub chunks: ChunkArgs,
}

#[derive(Args)]
pub struct ProbeArgs {
    /// Input media file
    #[arg(value_name = "INPUT")]
    pub input: PathBuf,
}
