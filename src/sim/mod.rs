//! Frame-driven simulation module
//!
//! All movement, orientation and collision logic lives here:
//! - Caller-supplied `dt` only, no hidden clock
//! - Seeded RNG only (building layout)
//! - No rendering, audio or input-device dependencies

pub mod body;
pub mod bounds;
pub mod camera;
pub mod controller;
pub mod obstacle;
pub mod state;
pub mod tick;

pub use body::OrientedBody;
pub use bounds::BoundingSphere;
pub use camera::FollowCamera;
pub use controller::{MotionController, MotionInput, MotionOutcome};
pub use obstacle::{Building, BuildingKind, Footprint, ObstacleField};
pub use state::Scene;
pub use tick::tick;
