mod common;

use common::*;
use encplan_core::capabilities::DefaultBitrates;
use encplan_core::*;
use std::error::Error;

fn registry() -> &'static CapabilityTable {
    CapabilityTable::standard()
}

fn profile_with(encodings: Vec<AudioEncoding>) -> EncodingProfile {
    EncodingProfile {
        audio_encodings: encodings,
        ..EncodingProfile::default()
    }
}

#[test]
fn test_masked_passthrough_uses_fallback_defaults() -> Result<(), Box<dyn Error>> {
    let profile = EncodingProfile {
        audio_fallback: Some(AudioEncoder::Aac),
        audio_copy_mask: vec![CopyMaskChoice {
            codec: AudioEncoder::Ac3Passthru,
            enabled: false,
        }],
        ..profile_with(vec![encoding(AudioEncoder::Ac3Passthru)])
    };
    let job = job_with_tracks(profile, &[1]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.fallback_encoder, Some(AudioEncoder::Aac));
    assert!(!audio.copy_mask.contains(&AudioEncoder::Ac3Passthru));

    let track = &audio.tracks[0];
    assert_eq!(track.encoder, AudioEncoder::Aac);
    assert!(!track.passthrough);
    assert_eq!(track.mixdown, Some(Mixdown::FivePointOne));
    assert_eq!(track.bitrate, Some(384));
    assert_eq!(track.sample_rate, 48000);
    Ok(())
}

#[test]
fn test_auto_passthrough_copies_allowed_codec() -> Result<(), Box<dyn Error>> {
    let job = job_with_tracks(profile_with(vec![encoding(AudioEncoder::AutoPassthru)]), &[1, 2]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.fallback_encoder, Some(AudioEncoder::Aac));
    assert_eq!(audio.tracks.len(), 2);

    let surround = &audio.tracks[0];
    assert!(surround.passthrough);
    assert_eq!(surround.encoder, AudioEncoder::Ac3Passthru);
    assert_eq!(surround.name.as_deref(), Some("Surround 5.1"));
    assert!(audio.copies(surround));

    // Fallback defaults are attached for estimation but not applied.
    let fallback = surround.fallback.as_ref().ok_or("missing fallback")?;
    assert_eq!(fallback.encoder, AudioEncoder::Aac);
    assert_eq!(fallback.mixdown, Mixdown::FivePointOne);
    assert_eq!(fallback.bitrate, Some(384));
    assert_eq!(surround.mixdown, None);

    assert_eq!(audio.tracks[1].encoder, AudioEncoder::AacPassthru);
    Ok(())
}

#[test]
fn test_passthrough_rejected_by_container_falls_back() -> Result<(), Box<dyn Error>> {
    let mut title = letterboxed_feature();
    title.audio_tracks = vec![audio_track(AudioCodec::TrueHd, 8, 0)];

    let profile = EncodingProfile {
        container: Container::Mp4,
        ..profile_with(vec![encoding(AudioEncoder::AutoPassthru)])
    };
    let audio = resolve_audio(&job_with_tracks(profile, &[1]), &title, registry())?;

    let track = &audio.tracks[0];
    assert_eq!(track.encoder, AudioEncoder::Aac);
    assert_eq!(track.mixdown, Some(Mixdown::SevenPointOne));
    assert_eq!(track.bitrate, Some(512));
    Ok(())
}

#[test]
fn test_specific_passthrough_only_copies_its_codec() -> Result<(), Box<dyn Error>> {
    let job = job_with_tracks(profile_with(vec![encoding(AudioEncoder::Ac3Passthru)]), &[2]);

    // Track 2 is AAC, which copy:ac3 cannot carry.
    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    let track = &audio.tracks[0];
    assert!(!track.passthrough);
    assert_eq!(track.encoder, AudioEncoder::Aac);
    assert_eq!(track.mixdown, Some(Mixdown::Stereo));
    assert_eq!(track.bitrate, Some(160));
    Ok(())
}

#[test]
fn test_passthrough_if_possible_matches_codec_family() -> Result<(), Box<dyn Error>> {
    let fdk = AudioEncoding {
        passthrough_if_possible: true,
        ..encoding(AudioEncoder::FdkAac)
    };
    let job = job_with_tracks(profile_with(vec![fdk]), &[1, 2]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.fallback_encoder, None);

    // AC3 source is re-encoded; AAC source is copied.
    assert!(!audio.tracks[0].passthrough);
    assert_eq!(audio.tracks[0].encoder, AudioEncoder::FdkAac);
    assert!(audio.tracks[1].passthrough);
    assert_eq!(audio.tracks[1].encoder, AudioEncoder::AacPassthru);
    assert_eq!(audio.tracks[1].fallback, None);
    Ok(())
}

#[test]
fn test_passthrough_if_possible_respects_copy_mask() -> Result<(), Box<dyn Error>> {
    let aac = AudioEncoding {
        passthrough_if_possible: true,
        ..encoding(AudioEncoder::Aac)
    };
    let profile = EncodingProfile {
        audio_copy_mask: vec![CopyMaskChoice {
            codec: AudioEncoder::AacPassthru,
            enabled: false,
        }],
        ..profile_with(vec![aac])
    };
    let job = job_with_tracks(profile, &[2]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    let track = &audio.tracks[0];
    assert!(!track.passthrough);
    assert_eq!(track.encoder, AudioEncoder::Aac);
    assert_eq!(track.mixdown, Some(Mixdown::Stereo));
    assert_eq!(track.bitrate, Some(160));
    assert_eq!(track.fallback, None);
    Ok(())
}

#[test]
fn test_encoder_settings_are_sanitized() -> Result<(), Box<dyn Error>> {
    let mp3 = AudioEncoding {
        mixdown: Some(Mixdown::FivePointOne),
        rate_control: AudioRateControl::Bitrate(999),
        sample_rate: 96000,
        ..encoding(AudioEncoder::Mp3)
    };
    let ac3_quality = AudioEncoding {
        rate_control: AudioRateControl::Quality(4.0),
        ..encoding(AudioEncoder::Ac3)
    };
    let vorbis_default = AudioEncoding {
        gain: -3.0,
        ..encoding(AudioEncoder::Vorbis)
    };
    let job = job_with_tracks(profile_with(vec![mp3, ac3_quality, vorbis_default]), &[1]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.tracks.len(), 3);

    let mp3 = &audio.tracks[0];
    assert_eq!(mp3.mixdown, Some(Mixdown::DolbyProLogicII));
    assert_eq!(mp3.bitrate, Some(320));
    assert_eq!(mp3.sample_rate, 48000);
    assert_eq!(mp3.compression, Some(2.0));

    // AC3 has no quality mode, so the default bitrate applies.
    let ac3 = &audio.tracks[1];
    assert_eq!(ac3.quality, None);
    assert_eq!(ac3.bitrate, Some(448));

    let vorbis = &audio.tracks[2];
    assert_eq!(vorbis.quality, Some(5.0));
    assert_eq!(vorbis.bitrate, None);
    assert_eq!(vorbis.gain, -3.0);
    Ok(())
}

#[test]
fn test_opus_rate_is_forced_to_48k() -> Result<(), Box<dyn Error>> {
    let mut title = letterboxed_feature();
    title.audio_tracks = vec![SourceAudioTrack {
        sample_rate: 44100,
        ..audio_track(AudioCodec::Flac, 2, 900_000)
    }];
    let profile = EncodingProfile {
        container: Container::Webm,
        ..profile_with(vec![encoding(AudioEncoder::Opus)])
    };

    let audio = resolve_audio(&job_with_tracks(profile, &[1]), &title, registry())?;
    assert_eq!(audio.tracks[0].sample_rate, 48000);
    assert_eq!(audio.tracks[0].bitrate, Some(128));
    assert_eq!(audio.tracks[0].compression, Some(10.0));
    Ok(())
}

#[test]
fn test_short_track_selections_are_skipped() -> Result<(), Box<dyn Error>> {
    let all = encoding(AudioEncoder::Aac);
    let third = AudioEncoding {
        input_number: 3,
        ..encoding(AudioEncoder::Ac3)
    };
    // Track 5 does not exist in the source.
    let job = job_with_tracks(profile_with(vec![all, third]), &[2, 5]);

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.tracks.len(), 1);
    assert_eq!(audio.tracks[0].track_number, 2);
    Ok(())
}

#[test]
fn test_explicit_input_number_pairs_single_track() -> Result<(), Box<dyn Error>> {
    let second = AudioEncoding {
        input_number: 2,
        name: Some("Commentary".to_string()),
        ..encoding(AudioEncoder::Aac)
    };
    let job = Job {
        chosen_audio_tracks: vec![
            ChosenAudioTrack::new(1),
            ChosenAudioTrack {
                track_number: 2,
                name: Some("Stereo".to_string()),
            },
        ],
        ..Job::new(profile_with(vec![second]))
    };

    let audio = resolve_audio(&job, &letterboxed_feature(), registry())?;
    assert_eq!(audio.tracks.len(), 1);
    assert_eq!(audio.tracks[0].track_number, 2);
    // The chosen name matches the source name, so the encoding's name wins.
    assert_eq!(audio.tracks[0].name.as_deref(), Some("Commentary"));
    Ok(())
}

#[test]
fn test_configuration_errors_fail_fast() {
    let title = letterboxed_feature();

    let profile = EncodingProfile {
        audio_fallback: Some(AudioEncoder::DtsPassthru),
        ..profile_with(vec![encoding(AudioEncoder::AutoPassthru)])
    };
    let result = resolve_audio(&job_with_tracks(profile, &[1]), &title, registry());
    assert!(matches!(result, Err(CoreError::InvalidFallbackEncoder(_))));

    // A registry with nothing but passthrough encoders has no fallback.
    let passthrough_only = CapabilityTable::new(vec![
        EncoderCapabilities::passthrough(AudioEncoder::AutoPassthru, None, &[Container::Mkv]),
        EncoderCapabilities::passthrough(
            AudioEncoder::Ac3Passthru,
            Some(AudioCodec::Ac3),
            &[Container::Mkv],
        ),
    ]);
    let job = job_with_tracks(profile_with(vec![encoding(AudioEncoder::AutoPassthru)]), &[1]);
    let result = resolve_audio(&job, &title, &passthrough_only);
    assert!(matches!(
        result,
        Err(CoreError::NoFallbackEncoder {
            container: Container::Mkv
        })
    ));

    let job = job_with_tracks(profile_with(vec![encoding(AudioEncoder::Opus)]), &[1]);
    let result = resolve_audio(&job, &title, &passthrough_only);
    assert!(matches!(result, Err(CoreError::UnknownEncoder(_))));
}

#[test]
fn test_substituted_registry_drives_defaults() -> Result<(), Box<dyn Error>> {
    let mut aac = CapabilityTable::standard()
        .capabilities(AudioEncoder::Aac)
        .cloned()
        .ok_or("aac missing")?;
    aac.default_bitrates = DefaultBitrates::new(64, 96, 256, 320);
    let table = CapabilityTable::new(vec![aac]);

    let job = job_with_tracks(profile_with(vec![encoding(AudioEncoder::Aac)]), &[1, 2]);
    let audio = resolve_audio(&job, &letterboxed_feature(), &table)?;

    assert_eq!(audio.tracks[0].bitrate, Some(256));
    assert_eq!(audio.tracks[1].bitrate, Some(96));
    assert!(audio.copy_mask.is_empty());
    Ok(())
}

#[test]
fn test_audio_resolution_is_idempotent() -> Result<(), Box<dyn Error>> {
    let job = job_with_tracks(
        profile_with(vec![
            encoding(AudioEncoder::AutoPassthru),
            encoding(AudioEncoder::Opus),
        ]),
        &[1, 2],
    );
    let title = letterboxed_feature();

    assert_eq!(
        resolve_audio(&job, &title, registry())?,
        resolve_audio(&job, &title, registry())?
    );
    Ok(())
}
