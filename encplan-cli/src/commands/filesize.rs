// encplan-cli/src/commands/filesize.rs
//
// Implementation of the `filesize` command.

use anyhow::{Context, Result};
use encplan_core::{CapabilityTable, CoreConfig, calculate_file_size, format_megabytes};

use crate::cli::FilesizeArgs;
use crate::input::{load_job, load_title};
use crate::output::{print_heading, print_info};

pub fn run_filesize(args: &FilesizeArgs, config: &CoreConfig) -> Result<()> {
    let title = load_title(&args.input.title)?;
    let job = load_job(&args.input.job)?;

    let size_mb = calculate_file_size(
        &job,
        &title,
        args.bitrate,
        CapabilityTable::standard(),
        config,
    )
    .context("Failed to estimate file size")?;

    print_heading("Size Estimate");
    print_info("Video bitrate", format!("{} kbps", args.bitrate));
    print_info("Estimated size", format_megabytes(size_mb));
    Ok(())
}
