//! Shared fixtures for the encplan-core integration tests.

#![allow(dead_code)]

use encplan_core::{
    AudioCodec, AudioEncoder, AudioEncoding, ChosenAudioTrack, Crop, CroppingType,
    EncodingProfile, Job, Ratio, SourceAudioTrack, SourceTitle,
};

pub fn audio_track(codec: AudioCodec, channels: u32, bitrate: u32) -> SourceAudioTrack {
    SourceAudioTrack {
        codec,
        channels,
        sample_rate: 48000,
        bitrate,
        name: None,
        language: Some("eng".to_string()),
    }
}

/// Blank title with the given picture size and no streams.
pub fn title(width: u32, height: u32) -> SourceTitle {
    SourceTitle {
        width,
        height,
        par: Ratio::SQUARE,
        autocrop: Crop::default(),
        framerate: Ratio::new(24000, 1001),
        duration_secs: 5400.0,
        audio_tracks: Vec::new(),
        subtitle_tracks: Vec::new(),
        chapters: Vec::new(),
    }
}

/// 1080p feature with 2.40:1 letterboxing, an AC3 5.1 track and an AAC
/// stereo track.
pub fn letterboxed_feature() -> SourceTitle {
    let mut surround = audio_track(AudioCodec::Ac3, 6, 448_000);
    surround.name = Some("Surround 5.1".to_string());
    let mut stereo = audio_track(AudioCodec::Aac, 2, 160_000);
    stereo.name = Some("Stereo".to_string());

    SourceTitle {
        autocrop: Crop::new(138, 138, 0, 0),
        audio_tracks: vec![surround, stereo],
        ..title(1920, 1080)
    }
}

/// NTSC DVD with 16:9 anamorphic pixels.
pub fn anamorphic_dvd() -> SourceTitle {
    SourceTitle {
        par: Ratio::new(32, 27),
        framerate: Ratio::new(30000, 1001),
        duration_secs: 1800.0,
        audio_tracks: vec![audio_track(AudioCodec::Ac3, 6, 384_000)],
        ..title(720, 480)
    }
}

pub fn bounded_profile(max_width: u32, max_height: u32) -> EncodingProfile {
    EncodingProfile {
        max_width,
        max_height,
        ..EncodingProfile::default()
    }
}

/// Profile with no cropping, so titles are sized as stored.
pub fn uncropped_profile() -> EncodingProfile {
    EncodingProfile {
        cropping_type: CroppingType::None,
        ..EncodingProfile::default()
    }
}

pub fn encoding(encoder: AudioEncoder) -> AudioEncoding {
    AudioEncoding {
        encoder,
        ..AudioEncoding::default()
    }
}

/// Job choosing the given 1-based source tracks.
pub fn job_with_tracks(profile: EncodingProfile, tracks: &[usize]) -> Job {
    Job {
        chosen_audio_tracks: tracks.iter().copied().map(ChosenAudioTrack::new).collect(),
        ..Job::new(profile)
    }
}
