//! Input data model: scanned titles, encoding profiles and jobs.

/// Ratios, rotation, crop and padding rectangles
pub mod geometry;

/// Job selections and range length
pub mod job;

/// Encoding profile and audio encoding settings
pub mod profile;

/// Scanned source title metadata
pub mod title;

pub use geometry::{Crop, Padding, Ratio, Rotation};
pub use job::{ChosenAudioTrack, Job, VideoRange};
pub use profile::{
    AudioEncoding, AudioRateControl, CopyMaskChoice, CroppingType, EncodingProfile, PaddingMode,
    ScalingMode, SizingMode,
};
pub use title::{Chapter, SourceAudioTrack, SourceSubtitleTrack, SourceTitle};
