// encplan-cli/src/lib.rs
//
// Library portion of the encplan CLI application.
// Contains argument definitions and command logic.

pub mod cli;
pub mod commands;
pub mod input;
pub mod logging;
pub mod output;

// Re-export items needed by the binary or integration tests
pub use cli::{BatchArgs, BitrateArgs, Cli, Commands, FilesizeArgs, InputArgs, ResolveArgs};
pub use commands::{run_batch, run_bitrate, run_filesize, run_resolve};

/// Runs the parsed command line.
pub fn run(cli: Cli) -> anyhow::Result<()> {
    let config = input::load_config(cli.config.as_deref())?;
    log::debug!("Using config: {:?}", config);

    match cli.command {
        Commands::Resolve(args) => run_resolve(&args, &config),
        Commands::Bitrate(args) => run_bitrate(&args, &config),
        Commands::Filesize(args) => run_filesize(&args, &config),
        Commands::Batch(args) => run_batch(&args, &config),
    }
}
