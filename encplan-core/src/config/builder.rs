// ============================================================================
// encplan-core/src/config/builder.rs
// ============================================================================
//
// CONFIGURATION BUILDER: Builder Pattern for CoreConfig
//
// Fluent construction of CoreConfig starting from the library defaults.

use super::CoreConfig;

/// Builder for creating CoreConfig instances.
///
/// # Examples
///
/// ```rust
/// use encplan_core::config::CoreConfigBuilder;
///
/// let config = CoreConfigBuilder::new()
///     .container_overhead_per_frame(8.0)
///     .default_modulus(16)
///     .build();
/// assert_eq!(config.default_modulus, 16);
/// ```
#[derive(Debug, Clone, Default)]
pub struct CoreConfigBuilder {
    config: CoreConfig,
}

impl CoreConfigBuilder {
    /// Creates a new builder seeded with `CoreConfig::default()`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder seeded with `CoreConfig::from_env()`.
    pub fn from_env() -> Self {
        Self {
            config: CoreConfig::from_env(),
        }
    }

    /// Sets the fallback picture width ceiling.
    pub fn default_max_width(mut self, width: u32) -> Self {
        self.config.default_max_width = width;
        self
    }

    /// Sets the fallback picture height ceiling.
    pub fn default_max_height(mut self, height: u32) -> Self {
        self.config.default_max_height = height;
        self
    }

    /// Sets the container overhead in bytes per frame.
    pub fn container_overhead_per_frame(mut self, bytes: f64) -> Self {
        self.config.container_overhead_per_frame = bytes;
        self
    }

    /// Sets the length margin added to file size estimates.
    pub fn size_estimate_margin_secs(mut self, seconds: f64) -> Self {
        self.config.size_estimate_margin_secs = seconds;
        self
    }

    /// Sets the modulus used for profiles that leave it at 0.
    pub fn default_modulus(mut self, modulus: u32) -> Self {
        self.config.default_modulus = modulus;
        self
    }

    /// Builds the CoreConfig.
    pub fn build(self) -> CoreConfig {
        self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_overrides() {
        let config = CoreConfigBuilder::new()
            .default_max_width(1280)
            .default_max_height(720)
            .container_overhead_per_frame(0.0)
            .size_estimate_margin_secs(0.0)
            .default_modulus(8)
            .build();

        assert_eq!(config.default_max_width, 1280);
        assert_eq!(config.default_max_height, 720);
        assert_eq!(config.container_overhead_per_frame, 0.0);
        assert_eq!(config.size_estimate_margin_secs, 0.0);
        assert_eq!(config.default_modulus, 8);
    }

    #[test]
    fn test_builder_defaults_match_config_defaults() {
        assert_eq!(CoreConfigBuilder::new().build(), CoreConfig::default());
    }
}
