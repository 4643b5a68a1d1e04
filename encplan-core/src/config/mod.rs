//! Configuration structures and constants for the encplan-core library.
//!
//! The resolvers are pure functions of their inputs plus the numeric
//! constants held here: the automatic picture ceiling used when a profile
//! sets no bounds, the per-frame container overhead and the safety margin
//! added to file size estimates.

mod builder;
mod utils;

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::CoreResult;

pub use builder::CoreConfigBuilder;
use utils::{get_env_f64, get_env_u32};

// Default constants

/// Picture width ceiling used when neither the profile nor the scaling mode bounds it.
pub const DEFAULT_MAX_WIDTH: u32 = 1920;

/// Picture height ceiling used when neither the profile nor the scaling mode bounds it.
pub const DEFAULT_MAX_HEIGHT: u32 = 1080;

/// Muxing overhead in bytes charged per video frame and per audio frame.
pub const DEFAULT_CONTAINER_OVERHEAD_PER_FRAME: f64 = 6.0;

/// Seconds added to the job length when estimating output file size.
/// Accounts for encoder startup and flush.
pub const DEFAULT_SIZE_ESTIMATE_MARGIN_SECS: f64 = 1.5;

/// Modulus applied when a profile leaves it at 0.
pub const DEFAULT_MODULUS: u32 = 2;

/// Numeric configuration for the resolvers.
///
/// # Examples
///
/// ```rust
/// use encplan_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .default_max_width(1280)
///     .default_max_height(720)
///     .size_estimate_margin_secs(0.0)
///     .build();
/// assert_eq!(config.default_max_width, 1280);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CoreConfig {
    /// Fallback picture width ceiling for automatic sizing
    pub default_max_width: u32,

    /// Fallback picture height ceiling for automatic sizing
    pub default_max_height: u32,

    /// Bytes of container overhead per video or audio frame
    pub container_overhead_per_frame: f64,

    /// Seconds added to the length in file size estimates
    pub size_estimate_margin_secs: f64,

    /// Modulus used when the profile specifies 0
    pub default_modulus: u32,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            default_max_width: DEFAULT_MAX_WIDTH,
            default_max_height: DEFAULT_MAX_HEIGHT,
            container_overhead_per_frame: DEFAULT_CONTAINER_OVERHEAD_PER_FRAME,
            size_estimate_margin_secs: DEFAULT_SIZE_ESTIMATE_MARGIN_SECS,
            default_modulus: DEFAULT_MODULUS,
        }
    }
}

impl CoreConfig {
    /// Returns the defaults with any `ENCPLAN_*` environment overrides applied.
    ///
    /// Unparseable values are ignored and the default is kept.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            default_max_width: get_env_u32("ENCPLAN_DEFAULT_MAX_WIDTH", defaults.default_max_width),
            default_max_height: get_env_u32(
                "ENCPLAN_DEFAULT_MAX_HEIGHT",
                defaults.default_max_height,
            ),
            container_overhead_per_frame: get_env_f64(
                "ENCPLAN_CONTAINER_OVERHEAD",
                defaults.container_overhead_per_frame,
            ),
            size_estimate_margin_secs: get_env_f64(
                "ENCPLAN_SIZE_MARGIN_SECS",
                defaults.size_estimate_margin_secs,
            ),
            default_modulus: get_env_u32("ENCPLAN_DEFAULT_MODULUS", defaults.default_modulus),
        }
    }

    /// Reads a JSON config file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> CoreResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config = serde_json::from_str(&contents)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }
}
