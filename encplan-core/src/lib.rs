//! Core library for resolving transcoding jobs into concrete encode settings.
//!
//! Given a scanned source title and an encoding profile, this crate computes
//! the crop, the output picture geometry, the audio track list and the
//! bitrate or file size needed to hit a target. It performs no I/O and
//! drives no encoder: its output is consumed by a UI preview or by a step
//! that builds encoder parameters.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use encplan_core::{CapabilityTable, CoreConfig, Job, SourceTitle, plan_job};
//!
//! let title: SourceTitle = serde_json::from_str(r#"{
//!     "width": 1920, "height": 1080,
//!     "framerate": { "num": 24000, "den": 1001 },
//!     "duration_secs": 5400.0
//! }"#).unwrap();
//! let job: Job = serde_json::from_str(r#"{ "profile": { "max_width": 1280 } }"#).unwrap();
//!
//! let plan = plan_job(&job, &title, CapabilityTable::standard(), &CoreConfig::default()).unwrap();
//! println!("{}x{}", plan.geometry.output_width, plan.geometry.output_height);
//! ```

pub mod capabilities;
pub mod config;
pub mod error;
pub mod model;
pub mod processing;
pub mod utils;

// Re-exports for public API
pub use capabilities::{
    AudioCodec, AudioEncoder, CapabilityRegistry, CapabilityTable, Container,
    EncoderCapabilities, Mixdown,
};
pub use config::{CoreConfig, CoreConfigBuilder};
pub use error::{CoreError, CoreResult};
pub use model::{
    AudioEncoding, AudioRateControl, Chapter, ChosenAudioTrack, CopyMaskChoice, Crop,
    CroppingType, EncodingProfile, Job, Padding, PaddingMode, Ratio, Rotation, ScalingMode,
    SizingMode, SourceAudioTrack, SourceSubtitleTrack, SourceTitle, VideoRange,
};
pub use processing::{
    EncodePlan, OutputSize, ResolvedAudio, ResolvedAudioTrack, calculate_bitrate,
    calculate_file_size, plan_job, resolve_audio, resolve_batch, resolve_cropping,
    resolve_geometry,
};
pub use utils::{format_duration, format_megabytes};
