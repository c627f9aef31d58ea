//! Robo Walk - third-person walking demo core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (bodies, follow camera, obstacles, motion)
//! - `settings`: Data-driven tuning, persisted as JSON
//! - `error`: Configuration and placement failures
//!
//! Rendering, audio and menus live outside this crate. They feed it elapsed
//! time and decoded input, and read back transforms and camera matrices.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, PlacementError, SceneError};
pub use settings::Settings;

/// Full turn in degrees
pub const FULL_TURN_DEG: f32 = 360.0;

/// Pull an accumulated angle back into [-360, 360] with a single correction.
///
/// Only one turn is removed, so a value more than two turns out stays out of
/// range. Accumulators fed at most one turn per call never leave the range.
#[inline]
pub fn wrap_degrees_once(mut degrees: f32) -> f32 {
    if degrees > FULL_TURN_DEG {
        degrees -= FULL_TURN_DEG;
    }
    if degrees < -FULL_TURN_DEG {
        degrees += FULL_TURN_DEG;
    }
    degrees
}
