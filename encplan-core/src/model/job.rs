//! Encode job: a profile snapshot plus per-title selections.

use serde::{Deserialize, Serialize};

use super::profile::EncodingProfile;
use super::title::SourceTitle;

/// A source audio track picked for the job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChosenAudioTrack {
    /// 1-based source track number
    pub track_number: usize,

    /// Display name chosen by the user, if any
    #[serde(default)]
    pub name: Option<String>,
}

impl ChosenAudioTrack {
    pub fn new(track_number: usize) -> Self {
        Self {
            track_number,
            name: None,
        }
    }
}

/// Portion of the title to encode.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum VideoRange {
    #[default]
    All,
    /// 1-based, inclusive chapter numbers
    Chapters { start: usize, end: usize },
    Seconds { start: f64, end: f64 },
    Frames { start: u64, end: u64 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Job {
    pub profile: EncodingProfile,

    #[serde(default)]
    pub chosen_audio_tracks: Vec<ChosenAudioTrack>,

    #[serde(default)]
    pub range: VideoRange,
}

impl Job {
    pub fn new(profile: EncodingProfile) -> Self {
        Self {
            profile,
            chosen_audio_tracks: Vec::new(),
            range: VideoRange::All,
        }
    }

    /// Length in seconds of the selected range, clamped to the title.
    pub fn selected_length_secs(&self, title: &SourceTitle) -> f64 {
        let duration = title.duration_secs.max(0.0);

        let length = match self.range {
            VideoRange::All => duration,
            VideoRange::Chapters { start, end } => {
                if title.chapters.is_empty() {
                    duration
                } else {
                    let first = start.max(1);
                    let last = end.min(title.chapters.len());
                    if first > last {
                        0.0
                    } else {
                        title.chapters[first - 1..last]
                            .iter()
                            .map(|chapter| chapter.duration_secs.max(0.0))
                            .sum()
                    }
                }
            }
            VideoRange::Seconds { start, end } => {
                let start = start.max(0.0);
                let end = if duration > 0.0 { end.min(duration) } else { end };
                (end - start).max(0.0)
            }
            VideoRange::Frames { start, end } => {
                let fps = title.fps();
                if fps <= 0.0 {
                    0.0
                } else {
                    let frames = end.saturating_sub(start) as f64;
                    let seconds = frames / fps;
                    if duration > 0.0 { seconds.min(duration) } else { seconds }
                }
            }
        };

        if length.is_finite() { length } else { 0.0 }
    }
}
