// encplan-cli/src/input.rs
//
// Loads titles, jobs and config overrides from JSON files.

use anyhow::{Context, Result};
use encplan_core::{CoreConfig, Job, SourceTitle};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

fn load_json<T: DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file {}", what, path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("Failed to parse {} file {}", what, path.display()))
}

pub fn load_title(path: &Path) -> Result<SourceTitle> {
    let title: SourceTitle = load_json(path, "title")?;
    log::debug!(
        "Loaded title {}: {}x{}, {} audio track(s)",
        path.display(),
        title.width,
        title.height,
        title.audio_tracks.len()
    );
    Ok(title)
}

/// Loads a job and rejects profiles the resolvers cannot interpret.
pub fn load_job(path: &Path) -> Result<Job> {
    let job: Job = load_json(path, "job")?;
    job.profile
        .validate()
        .with_context(|| format!("Invalid profile in job file {}", path.display()))?;
    Ok(job)
}

/// The config file if one is given, otherwise defaults with `ENCPLAN_*`
/// environment overrides.
pub fn load_config(path: Option<&Path>) -> Result<CoreConfig> {
    match path {
        Some(path) => CoreConfig::load(path)
            .with_context(|| format!("Failed to load config file {}", path.display())),
        None => Ok(CoreConfig::from_env()),
    }
}
