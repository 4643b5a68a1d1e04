// ============================================================================
// encplan-cli/src/commands/resolve.rs
// ============================================================================
//
// RESOLVE COMMAND: Full plan for one title/job pair
//
// Prints the resolved crop, geometry and audio tracks as a report, or the
// whole `EncodePlan` as pretty JSON for a downstream parameter builder.

use anyhow::{Context, Result};
use encplan_core::{
    CapabilityTable, CoreConfig, EncodePlan, ResolvedAudioTrack, format_duration, plan_job,
};

use crate::cli::ResolveArgs;
use crate::input::{load_job, load_title};
use crate::output::{print_heading, print_info};

pub fn run_resolve(args: &ResolveArgs, config: &CoreConfig) -> Result<()> {
    let title = load_title(&args.input.title)?;
    let job = load_job(&args.input.job)?;

    let plan = plan_job(&job, &title, CapabilityTable::standard(), config)
        .context("Failed to resolve job")?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&plan)?);
    } else {
        print_plan(&plan);
    }
    Ok(())
}

pub(crate) fn print_plan(plan: &EncodePlan) {
    let geometry = &plan.geometry;

    print_heading("Video");
    print_info("Crop", plan.crop);
    if plan.source_crop != plan.crop {
        print_info("Source crop", plan.source_crop);
    }
    print_info(
        "Picture",
        format!("{}x{}", geometry.scale_width, geometry.scale_height),
    );
    print_info(
        "Output",
        format!("{}x{}", geometry.output_width, geometry.output_height),
    );
    if !geometry.padding.is_empty() {
        print_info("Padding", geometry.padding);
    }
    print_info("Pixel aspect", geometry.par);
    print_info("Display aspect", format!("{:.3}", geometry.display_aspect()));
    print_info("Length", format_duration(plan.length_secs));
    print_info("Frame rate", format!("{:.3} fps", plan.framerate));

    print_heading("Audio");
    if let Some(fallback) = plan.audio.fallback_encoder {
        print_info("Fallback", fallback);
    }
    if plan.audio.tracks.is_empty() {
        print_info("Tracks", "none");
    }
    for track in &plan.audio.tracks {
        print_info(&format!("Track {}", track.track_number), describe_track(track));
    }
}

/// One-line summary of a resolved audio track.
pub(crate) fn describe_track(track: &ResolvedAudioTrack) -> String {
    let mut parts = vec![track.encoder.to_string()];

    if track.passthrough {
        parts.push(format!("passthrough of {}", track.source_codec));
    } else {
        if let Some(mixdown) = track.mixdown {
            parts.push(mixdown.to_string());
        }
        parts.push(format!("{} Hz", track.sample_rate));
        match (track.bitrate, track.quality) {
            (Some(bitrate), _) => parts.push(format!("{bitrate} kbps")),
            (None, Some(quality)) => parts.push(format!("quality {quality}")),
            (None, None) => {}
        }
    }

    let summary = parts.join(", ");
    match &track.name {
        Some(name) => format!("{summary} \"{name}\""),
        None => summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encplan_core::{AudioCodec, AudioEncoder, Mixdown};

    fn track() -> ResolvedAudioTrack {
        ResolvedAudioTrack {
            track_number: 1,
            source_codec: AudioCodec::Ac3,
            encoder: AudioEncoder::Aac,
            passthrough: false,
            mixdown: Some(Mixdown::Stereo),
            sample_rate: 48000,
            bitrate: Some(160),
            quality: None,
            gain: 0.0,
            drc: 0.0,
            compression: None,
            name: None,
            fallback: None,
        }
    }

    #[test]
    fn test_describe_encoded_track() {
        assert_eq!(describe_track(&track()), "av_aac, stereo, 48000 Hz, 160 kbps");
    }

    #[test]
    fn test_describe_passthrough_track() {
        let copied = ResolvedAudioTrack {
            encoder: AudioEncoder::Ac3Passthru,
            passthrough: true,
            mixdown: None,
            bitrate: None,
            name: Some("Surround".to_string()),
            ..track()
        };
        assert_eq!(describe_track(&copied), "copy:ac3, passthrough of ac3 \"Surround\"");
    }
}
