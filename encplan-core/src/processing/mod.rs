//! Resolution logic: cropping, geometry, audio, size estimation and
//! job-level planning.
//!
//! Every function here is a pure computation over borrowed snapshots. None
//! of them mutate their inputs or keep state between calls, so they can be
//! called concurrently from any number of threads.

/// Crop resolution in final orientation
pub mod cropping;

/// Output picture size, padding and pixel aspect
pub mod geometry;

/// Audio encoding/track pairing and passthrough decisions
pub mod audio;

/// Target-size bitrate and file size estimates
pub mod estimate;

/// Whole-job and batch resolution
pub mod plan;

pub use audio::{FallbackSettings, ResolvedAudio, ResolvedAudioTrack, resolve_audio};
pub use cropping::resolve_cropping;
pub use estimate::{calculate_bitrate, calculate_file_size, effective_framerate};
pub use geometry::{OutputSize, resolve_geometry};
pub use plan::{EncodePlan, plan_job, resolve_batch};
