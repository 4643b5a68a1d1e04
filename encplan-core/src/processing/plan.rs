// ============================================================================
// encplan-core/src/processing/plan.rs
// ============================================================================
//
// JOB PLANNING: Every resolver applied to one job, or to a batch in parallel
//
// A plan is what a downstream "build encode parameters" step consumes. Batch
// resolution runs each (job, title) pair on the rayon pool; pairs share only
// the read-only capability registry, and one failing job does not affect the
// others.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::capabilities::CapabilityRegistry;
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::model::{Crop, Job, SourceTitle};
use crate::processing::audio::{ResolvedAudio, resolve_audio};
use crate::processing::cropping::resolve_cropping;
use crate::processing::estimate::effective_framerate;
use crate::processing::geometry::{OutputSize, resolve_geometry};

/// Fully resolved encode settings for one job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EncodePlan {
    /// Crop in final (flipped, rotated) orientation
    pub crop: Crop,

    /// The same crop relabelled for an encoder that crops before rotating
    pub source_crop: Crop,

    pub geometry: OutputSize,
    pub audio: ResolvedAudio,

    /// Length of the selected range in seconds
    pub length_secs: f64,

    /// Output frame rate used for estimates
    pub framerate: f64,
}

/// Resolves crop, geometry and audio for `job` applied to `title`.
pub fn plan_job<R>(
    job: &Job,
    title: &SourceTitle,
    registry: &R,
    config: &CoreConfig,
) -> CoreResult<EncodePlan>
where
    R: CapabilityRegistry + ?Sized,
{
    let profile = &job.profile;

    let crop = resolve_cropping(profile, title);
    let source_crop = crop.to_source_orientation(
        profile.rotation,
        profile.flip_horizontal,
        profile.flip_vertical,
    );
    let geometry = resolve_geometry(profile, title, config);
    let audio = resolve_audio(job, title, registry)?;

    Ok(EncodePlan {
        crop,
        source_crop,
        geometry,
        audio,
        length_secs: job.selected_length_secs(title),
        framerate: effective_framerate(profile, title),
    })
}

/// Plans many jobs in parallel. Results keep the input order.
pub fn resolve_batch<R>(
    items: &[(Job, SourceTitle)],
    registry: &R,
    config: &CoreConfig,
) -> Vec<CoreResult<EncodePlan>>
where
    R: CapabilityRegistry + ?Sized,
{
    log::debug!("Resolving {} jobs", items.len());

    items
        .par_iter()
        .map(|(job, title)| plan_job(job, title, registry, config))
        .collect()
}
