// encplan-cli/src/cli.rs
//
// Defines the command-line argument structures using clap.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

// --- CLI Argument Definition ---

#[derive(Parser, Debug)]
#[command(
    author,
    version, // Reads from Cargo.toml via "cargo" feature in clap
    about = "encplan: resolve transcoding jobs into encode settings",
    long_about = "Resolves crop, output geometry, audio tracks and target-size bitrates \
                  for a scanned source title and an encoding job, using encplan-core."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// JSON file overriding the resolution constants
    #[arg(long, global = true, value_name = "CONFIG_JSON", env = "ENCPLAN_CONFIG")]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Resolves crop, geometry and audio for one job
    Resolve(ResolveArgs),

    /// Computes the video bitrate needed to hit a target file size
    Bitrate(BitrateArgs),

    /// Estimates the output file size for a video bitrate
    Filesize(FilesizeArgs),

    /// Resolves several jobs against one title in parallel
    Batch(BatchArgs),
}

/// Source title and job inputs shared by the single-job commands.
#[derive(Args, Debug)]
pub struct InputArgs {
    /// Scanned source title (JSON)
    #[arg(short, long, value_name = "TITLE_JSON")]
    pub title: PathBuf,

    /// Encode job: profile plus track and range selections (JSON)
    #[arg(short, long, value_name = "JOB_JSON")]
    pub job: PathBuf,
}

#[derive(Args, Debug)]
pub struct ResolveArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Print the full plan as JSON instead of a report
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct BitrateArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Target file size in MiB
    #[arg(long, value_name = "MIB")]
    pub size_mb: f64,

    /// Only estimate this many seconds of the selected range
    #[arg(long, value_name = "SECONDS", default_value_t = 0.0)]
    pub length_secs: f64,
}

#[derive(Args, Debug)]
pub struct FilesizeArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Video bitrate in kbps
    #[arg(long, value_name = "KBPS")]
    pub bitrate: u32,
}

#[derive(Args, Debug)]
pub struct BatchArgs {
    /// Scanned source title (JSON) shared by every job
    #[arg(short, long, value_name = "TITLE_JSON")]
    pub title: PathBuf,

    /// Job files to resolve
    #[arg(required = true, value_name = "JOB_JSON")]
    pub jobs: Vec<PathBuf>,
}
