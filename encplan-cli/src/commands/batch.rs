// ============================================================================
// encplan-cli/src/commands/batch.rs
// ============================================================================
//
// BATCH COMMAND: Resolve many jobs against one title
//
// Jobs are resolved in parallel by the core. A job that fails to resolve is
// reported on its own line; the command fails at the end if any did.

use anyhow::{Result, bail};
use encplan_core::{CapabilityTable, CoreConfig, EncodePlan, resolve_batch};
use std::path::Path;

use crate::cli::BatchArgs;
use crate::input::{load_job, load_title};
use crate::output::{print_error, print_heading, print_success};

pub fn run_batch(args: &BatchArgs, config: &CoreConfig) -> Result<()> {
    let title = load_title(&args.title)?;

    let items = args
        .jobs
        .iter()
        .map(|path| -> Result<_> { Ok((load_job(path)?, title.clone())) })
        .collect::<Result<Vec<_>>>()?;

    log::info!("Resolving {} job(s)", items.len());
    let results = resolve_batch(&items, CapabilityTable::standard(), config);

    print_heading("Batch");
    let mut failed = 0;
    for (path, result) in args.jobs.iter().zip(&results) {
        match result {
            Ok(plan) => print_success(&summarize(path, plan)),
            Err(e) => {
                failed += 1;
                print_error(&format!("{}: {}", job_name(path), e));
            }
        }
    }

    if failed > 0 {
        bail!("{} of {} job(s) failed to resolve", failed, results.len());
    }
    Ok(())
}

fn job_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn summarize(path: &Path, plan: &EncodePlan) -> String {
    format!(
        "{}: {}x{} (par {}), {} audio track(s)",
        job_name(path),
        plan.geometry.output_width,
        plan.geometry.output_height,
        plan.geometry.par,
        plan.audio.tracks.len()
    )
}
