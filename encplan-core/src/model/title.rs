//! Structure for scanned source title metadata.
//!
//! A `SourceTitle` is produced by an external scan and is read-only input
//! to every resolver.

use serde::{Deserialize, Serialize};

use super::geometry::{Crop, Ratio};
use crate::capabilities::AudioCodec;

/// Source title geometry, timing and stream tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceTitle {
    /// Stored picture width in pixels
    pub width: u32,

    /// Stored picture height in pixels
    pub height: u32,

    /// Source pixel aspect ratio
    #[serde(default)]
    pub par: Ratio,

    /// Black borders detected by the scan, in source orientation
    #[serde(default)]
    pub autocrop: Crop,

    /// Frame rate as a fraction (e.g. 24000/1001)
    pub framerate: Ratio,

    /// Duration of the whole title in seconds
    pub duration_secs: f64,

    #[serde(default)]
    pub audio_tracks: Vec<SourceAudioTrack>,

    #[serde(default)]
    pub subtitle_tracks: Vec<SourceSubtitleTrack>,

    #[serde(default)]
    pub chapters: Vec<Chapter>,
}

impl SourceTitle {
    /// Frames per second, 0.0 when the scan reported no frame rate.
    pub fn fps(&self) -> f64 {
        self.framerate.as_f64()
    }

    /// Source audio track by 1-based track number.
    pub fn audio_track(&self, track_number: usize) -> Option<&SourceAudioTrack> {
        track_number
            .checked_sub(1)
            .and_then(|index| self.audio_tracks.get(index))
    }
}

/// A source audio stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceAudioTrack {
    pub codec: AudioCodec,

    /// Channel count of the source layout (6 for 5.1)
    pub channels: u32,

    /// Sample rate in Hz
    pub sample_rate: u32,

    /// Bitrate in bits per second, 0 when unknown
    #[serde(default)]
    pub bitrate: u32,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub language: Option<String>,
}

/// A source subtitle stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceSubtitleTrack {
    #[serde(default)]
    pub language: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub forced: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub duration_secs: f64,

    #[serde(default)]
    pub name: Option<String>,
}
