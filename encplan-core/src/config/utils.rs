//! Configuration utility functions
//!
//! This module provides helper functions for reading numeric overrides
//! from environment variables.

/// Get a u32 value from an environment variable or use the default
pub fn get_env_u32(key: &str, default: u32) -> u32 {
    match std::env::var(key) {
        Ok(val) => val.trim().parse().unwrap_or(default),
        Err(_) => default,
    }
}

/// Get a f64 value from an environment variable or use the default
pub fn get_env_f64(key: &str, default: f64) -> f64 {
    match std::env::var(key) {
        Ok(val) => val
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .unwrap_or(default),
        Err(_) => default,
    }
}
