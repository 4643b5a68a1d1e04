// ============================================================================
// encplan-core/src/processing/estimate.rs
// ============================================================================
//
// BITRATE AND SIZE ESTIMATION: Target-size bitrate and its inverse
//
// Both directions share one byte model:
//
//   file bytes = video kbps × 125 × length
//              + video frames × per-frame container overhead
//              + Σ audio tracks (bytes/s + audio frames/s × overhead) × length
//
// Quality-targeted audio has no predictable size and contributes only its
// container overhead.

use crate::capabilities::{AudioCodec, CapabilityRegistry};
use crate::config::CoreConfig;
use crate::error::CoreResult;
use crate::model::{EncodingProfile, Job, SourceTitle};
use crate::processing::audio::{ResolvedAudio, ResolvedAudioTrack, resolve_audio};

/// Bytes in one MiB; sizes are specified in binary megabytes.
pub const BYTES_PER_MEGABYTE: f64 = 1024.0 * 1024.0;

/// Bytes per second produced by one kbps.
const BYTES_PER_KBPS_SECOND: f64 = 125.0;

/// Frame rate used for container overhead: the profile's output rate (a
/// constant rate or a peak cap), otherwise the source rate.
pub fn effective_framerate(profile: &EncodingProfile, title: &SourceTitle) -> f64 {
    profile
        .framerate
        .filter(|rate| rate.is_finite() && *rate > 0.0)
        .unwrap_or_else(|| title.fps())
}

/// Video bitrate in kbps that lands the encode at `target_size_mb` MiB.
///
/// With `length_override_secs > 0` only that much of the selected range is
/// estimated: the byte budget is scaled by its share of the full length.
/// Returns 0 when audio and overhead alone exceed the budget.
pub fn calculate_bitrate<R>(
    job: &Job,
    title: &SourceTitle,
    target_size_mb: f64,
    length_override_secs: f64,
    registry: &R,
    config: &CoreConfig,
) -> CoreResult<u32>
where
    R: CapabilityRegistry + ?Sized,
{
    let audio = resolve_audio(job, title, registry)?;

    let full_length = job.selected_length_secs(title);
    let mut available_bytes = target_size_mb * BYTES_PER_MEGABYTE;
    let mut length = full_length;

    if length_override_secs > 0.0 {
        if full_length > 0.0 {
            available_bytes *= length_override_secs / full_length;
        }
        length = length_override_secs;
    }

    if length <= 0.0 || !available_bytes.is_finite() {
        log::info!("Nothing to encode (length {:.3}s); bitrate is 0", length);
        return Ok(0);
    }

    let framerate = effective_framerate(&job.profile, title);
    let video_overhead = length * framerate * config.container_overhead_per_frame;
    let audio_bytes = audio_bytes(&audio, title, length, registry, config);
    let remaining = available_bytes - video_overhead - audio_bytes;

    log::debug!(
        "Bitrate estimate: length {:.3}s, available {:.0} B, \
         video overhead {:.0} B ({:.3} fps), audio {:.0} B, remaining {:.0} B",
        length,
        available_bytes,
        video_overhead,
        framerate,
        audio_bytes,
        remaining
    );

    if remaining < 0.0 {
        log::info!(
            "Target size of {:.2} MiB is too small for the audio and container overhead",
            target_size_mb
        );
        return Ok(0);
    }

    let kbps = (remaining / (BYTES_PER_KBPS_SECOND * length)).floor();
    log::debug!("Bitrate estimate: {} kbps", kbps);
    Ok(kbps.min(u32::MAX as f64) as u32)
}

/// Estimated output size in MiB for a video bitrate of `video_bitrate_kbps`.
pub fn calculate_file_size<R>(
    job: &Job,
    title: &SourceTitle,
    video_bitrate_kbps: u32,
    registry: &R,
    config: &CoreConfig,
) -> CoreResult<f64>
where
    R: CapabilityRegistry + ?Sized,
{
    let audio = resolve_audio(job, title, registry)?;

    let length = job.selected_length_secs(title) + config.size_estimate_margin_secs;
    let framerate = effective_framerate(&job.profile, title);

    let video_bytes = length * f64::from(video_bitrate_kbps) * BYTES_PER_KBPS_SECOND;
    let video_overhead = length * framerate * config.container_overhead_per_frame;
    let audio_bytes = audio_bytes(&audio, title, length, registry, config);
    let total = video_bytes + video_overhead + audio_bytes;

    log::debug!(
        "Size estimate: length {:.3}s, video {:.0} B, video overhead {:.0} B, \
         audio {:.0} B, total {:.0} B",
        length,
        video_bytes,
        video_overhead,
        audio_bytes,
        total
    );

    Ok(total / BYTES_PER_MEGABYTE)
}

/// Total audio bytes over `length` seconds.
pub fn audio_bytes<R>(
    audio: &ResolvedAudio,
    title: &SourceTitle,
    length: f64,
    registry: &R,
    config: &CoreConfig,
) -> f64
where
    R: CapabilityRegistry + ?Sized,
{
    audio
        .tracks
        .iter()
        .map(|track| track_bytes_per_second(audio, track, title, registry, config) * length)
        .sum()
}

fn track_bytes_per_second<R>(
    audio: &ResolvedAudio,
    track: &ResolvedAudioTrack,
    title: &SourceTitle,
    registry: &R,
    config: &CoreConfig,
) -> f64
where
    R: CapabilityRegistry + ?Sized,
{
    let (payload, codec, sample_rate) = if !track.passthrough {
        (
            track.bitrate.map_or(0.0, kbps_to_bytes),
            registry.codec_family(track.encoder).unwrap_or(AudioCodec::Other),
            track.sample_rate,
        )
    } else if audio.copies(track) {
        let source_bitrate = title
            .audio_track(track.track_number)
            .map_or(0, |source| source.bitrate);
        (f64::from(source_bitrate) / 8.0, track.source_codec, track.sample_rate)
    } else {
        match &track.fallback {
            Some(fallback) => (
                fallback.bitrate.map_or(0.0, kbps_to_bytes),
                registry
                    .codec_family(fallback.encoder)
                    .unwrap_or(AudioCodec::Other),
                fallback.sample_rate,
            ),
            None => (0.0, track.source_codec, track.sample_rate),
        }
    };

    let frame_overhead = f64::from(sample_rate) * config.container_overhead_per_frame
        / f64::from(codec.samples_per_frame());

    payload + frame_overhead
}

fn kbps_to_bytes(kbps: u32) -> f64 {
    f64::from(kbps) * 1000.0 / 8.0
}
