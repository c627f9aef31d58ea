//! Error types
//!
//! Configuration problems fail fast at construction. Placement exhaustion is
//! recoverable: the caller may relax spacing and try again.

use thiserror::Error;

/// Invalid or unreadable configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("spring constant bounds are inverted: min {min} > max {max}")]
    SpringBounds { min: f32, max: f32 },

    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} radius must not be negative, got {value}")]
    NegativeRadius { field: &'static str, value: f32 },

    #[error("near plane {near} must be closer than far plane {far}")]
    ClipPlanes { near: f32, far: f32 },

    #[error("placement band [{min}, {max}) is empty or exceeds range {range}")]
    PlacementBand { min: i32, max: i32, range: f32 },

    #[error("placement attempts must be at least 1")]
    NoAttempts,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A building could not be given a free slot
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    #[error("could not place building {index} after {attempts} attempts")]
    Exhausted { index: usize, attempts: u32 },

    #[error("invalid placement configuration: {0}")]
    InvalidConfig(String),
}

/// Scene construction failure
#[derive(Debug, Error)]
pub enum SceneError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Placement(#[from] PlacementError),
}
