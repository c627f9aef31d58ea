//! Per-frame simulation tick
//!
//! Input → motion controller (with admission control) → body → camera.
//! `dt` is the wall-clock time since the previous frame; nothing assumes a
//! fixed timestep.

use super::controller::{MotionInput, MotionOutcome};
use super::state::Scene;

/// Advance the scene by `dt` seconds
pub fn tick(scene: &mut Scene, input: &MotionInput, dt: f32) -> MotionOutcome {
    scene.time_ticks += 1;
    scene.elapsed += dt;

    let outcome = scene
        .controller
        .step(&mut scene.body, &mut scene.field, input, dt);

    // The body inverts its turn when backing up; the camera has to follow suit
    let camera_heading = if outcome.forward_speed >= 0.0 {
        outcome.heading_rate
    } else {
        -outcome.heading_rate
    };
    scene.camera.rotate(camera_heading, 0.0);
    scene.camera.look_at_target(scene.body.position());
    scene.camera.update(dt);

    outcome
}
