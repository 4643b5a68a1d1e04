// ============================================================================
// encplan-core/src/error.rs
// ============================================================================
//
// ERROR HANDLING: Custom error types for encplan-core
//
// Resolution itself is total: infeasible size targets return zero, short
// track selections are skipped and inconsistent padding is clamped. The
// variants below cover the fail-fast paths, which are caller configuration
// mistakes: unknown short names and unusable fallback encoders.

use thiserror::Error;

use crate::capabilities::Container;

/// Errors raised by encplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Unknown audio encoder: {0}")]
    UnknownEncoder(String),

    #[error("Unknown audio codec: {0}")]
    UnknownCodec(String),

    #[error("Unknown mixdown: {0}")]
    UnknownMixdown(String),

    #[error("Unknown container: {0}")]
    UnknownContainer(String),

    #[error("Invalid rotation {0}: must be 0, 90, 180 or 270")]
    InvalidRotation(u16),

    #[error("No non-passthrough audio encoder is available for container {container}")]
    NoFallbackEncoder { container: Container },

    #[error("Invalid audio fallback encoder: {0}")]
    InvalidFallbackEncoder(String),

    #[error("Invalid profile: {0}")]
    InvalidProfile(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for encplan-core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;
