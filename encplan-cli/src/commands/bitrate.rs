// encplan-cli/src/commands/bitrate.rs
//
// Implementation of the `bitrate` command.

use anyhow::{Context, Result};
use encplan_core::{CapabilityTable, CoreConfig, calculate_bitrate, format_megabytes};

use crate::cli::BitrateArgs;
use crate::input::{load_job, load_title};
use crate::output::{print_heading, print_info, print_warning};

pub fn run_bitrate(args: &BitrateArgs, config: &CoreConfig) -> Result<()> {
    let title = load_title(&args.input.title)?;
    let job = load_job(&args.input.job)?;

    let kbps = calculate_bitrate(
        &job,
        &title,
        args.size_mb,
        args.length_secs,
        CapabilityTable::standard(),
        config,
    )
    .context("Failed to calculate bitrate")?;

    print_heading("Target Size");
    print_info("Target", format_megabytes(args.size_mb));
    if args.length_secs > 0.0 {
        print_info("Estimated span", format!("{:.1} s", args.length_secs));
    }
    print_info("Video bitrate", format!("{kbps} kbps"));

    if kbps == 0 {
        print_warning("Target size is too small for the audio and container overhead");
    }
    Ok(())
}
