//! Motion controller: input intents to body commands
//!
//! Two states per tick. Idle: no forward/back key, zero speed. Walking:
//! forward or back held, signed speed, optionally boosted by the run
//! modifier. Turning is independent of the state and always applied, even
//! when the move itself is refused by the obstacle field.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::body::OrientedBody;
use super::obstacle::ObstacleField;
use crate::settings::MotionConfig;

/// Decoded input for one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MotionInput {
    pub turn_left: bool,
    pub turn_right: bool,
    pub forward: bool,
    pub backward: bool,
    pub run: bool,
}

impl MotionInput {
    /// Forward or back held
    #[inline]
    pub fn is_moving(&self) -> bool {
        self.forward || self.backward
    }
}

/// What the controller did this tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MotionOutcome {
    /// Heading rate handed to the body, degrees per second
    pub heading_rate: f32,
    /// Speed actually committed (zero when blocked)
    pub forward_speed: f32,
    pub walking: bool,
    /// A move was requested but refused
    pub blocked: bool,
}

#[derive(Debug, Clone)]
pub struct MotionController {
    forward_speed: f32,
    heading_speed: f32,
    run_multiplier: f32,
    walking: bool,
    walk_time: f32,
}

impl MotionController {
    pub fn new(config: &MotionConfig) -> Self {
        Self {
            forward_speed: config.forward_speed,
            heading_speed: config.heading_speed,
            run_multiplier: config.run_multiplier,
            walking: false,
            walk_time: 0.0,
        }
    }

    /// Heading rate for the held turn keys.
    ///
    /// Reversed turn while walking: the sign flips between standing and
    /// walking. The forward key drives the body along -forward, where the
    /// body inverts its turn again, so right turns right both standing and
    /// walking forward. Backing up turns like a reversing car. Left wins
    /// over right.
    pub fn heading_rate(&self, input: &MotionInput) -> f32 {
        let moving = input.is_moving();
        let mut heading = 0.0;
        if input.turn_right {
            heading = if moving { self.heading_speed } else { -self.heading_speed };
        }
        if input.turn_left {
            heading = if moving { -self.heading_speed } else { self.heading_speed };
        }
        heading
    }

    /// Signed speed requested by the walk keys. Forward wins over back.
    ///
    /// The walk cycle faces away from the body's forward axis, so walking
    /// forward is a negative speed.
    pub fn requested_speed(&self, input: &MotionInput) -> f32 {
        let speed = if input.forward {
            -self.forward_speed
        } else if input.backward {
            self.forward_speed
        } else {
            0.0
        };
        if input.run { speed * self.run_multiplier } else { speed }
    }

    /// Apply one tick of input to the body, gated by the obstacle field
    pub fn step(
        &mut self,
        body: &mut OrientedBody,
        field: &mut ObstacleField,
        input: &MotionInput,
        dt: f32,
    ) -> MotionOutcome {
        self.walking = input.is_moving();
        if self.walking {
            self.walk_time += dt;
        }

        let heading_rate = self.heading_rate(input);
        let mut forward_speed = self.requested_speed(input);

        let mut blocked = false;
        if forward_speed != 0.0 {
            let candidate = body.position() + body.forward() * (forward_speed * dt);
            if !field.validate_movement(candidate) {
                log::debug!("Move to {} refused", candidate);
                forward_speed = 0.0;
                blocked = true;
            }
        }

        body.set_velocity(Vec3::new(0.0, 0.0, forward_speed));
        body.orient(heading_rate, 0.0, 0.0);
        body.integrate(dt);
        field.recenter_player(body.position());

        MotionOutcome {
            heading_rate,
            forward_speed,
            walking: self.walking,
            blocked,
        }
    }

    pub fn is_walking(&self) -> bool {
        self.walking
    }

    /// Seconds spent walking; drives the walk-cycle animation clock
    pub fn walk_time(&self) -> f32 {
        self.walk_time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::{BodyConfig, FieldConfig};
    use crate::sim::bounds::BoundingSphere;
    use crate::sim::obstacle::BuildingKind;

    fn setup() -> (MotionController, OrientedBody, ObstacleField) {
        let controller = MotionController::new(&MotionConfig {
            forward_speed: 10.0,
            heading_speed: 90.0,
            run_multiplier: 5.0,
        });
        let body = OrientedBody::new(&BodyConfig {
            constrain_to_world_up: true,
            display_scale: 1.0,
        })
        .unwrap();
        let field = ObstacleField::new(
            &FieldConfig { max_range: 98.0 },
            BoundingSphere::new(Vec3::ZERO, 2.0),
        )
        .unwrap();
        (controller, body, field)
    }

    #[test]
    fn test_idle_has_no_speed() {
        let (mut controller, mut body, mut field) = setup();
        let outcome = controller.step(&mut body, &mut field, &MotionInput::default(), 0.1);
        assert!(!outcome.walking);
        assert_eq!(outcome.forward_speed, 0.0);
        assert_eq!(body.position(), Vec3::ZERO);
    }

    #[test]
    fn test_walk_forward() {
        let (mut controller, mut body, mut field) = setup();
        let input = MotionInput {
            forward: true,
            ..Default::default()
        };
        let outcome = controller.step(&mut body, &mut field, &input, 0.5);
        assert!(outcome.walking && !outcome.blocked);
        assert!((body.position() - Vec3::new(0.0, 0.0, 5.0)).length() < 1e-5);
        assert_eq!(field.player().center, Vec3::new(0.0, 0.0, body.position().z));
        assert!((controller.walk_time() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_run_multiplies_speed() {
        let (controller, _, _) = setup();
        let backing = MotionInput {
            backward: true,
            run: true,
            ..Default::default()
        };
        let walking = MotionInput {
            forward: true,
            ..Default::default()
        };
        assert_eq!(controller.requested_speed(&backing), 50.0);
        assert_eq!(controller.requested_speed(&walking), -10.0);
        assert_eq!(
            controller.requested_speed(&MotionInput { run: true, ..walking }),
            -50.0
        );
    }

    #[test]
    fn test_turn_sign_flips_while_walking() {
        let (controller, _, _) = setup();
        let left_idle = MotionInput {
            turn_left: true,
            ..Default::default()
        };
        let left_walking = MotionInput {
            turn_left: true,
            forward: true,
            ..Default::default()
        };
        let right_idle = MotionInput {
            turn_right: true,
            ..Default::default()
        };
        let right_backing = MotionInput {
            turn_right: true,
            backward: true,
            ..Default::default()
        };
        assert_eq!(controller.heading_rate(&left_idle), 90.0);
        assert_eq!(controller.heading_rate(&left_walking), -90.0);
        assert_eq!(controller.heading_rate(&right_idle), -90.0);
        assert_eq!(controller.heading_rate(&right_backing), 90.0);
    }

    #[test]
    fn test_left_wins_over_right() {
        let (controller, _, _) = setup();
        let both = MotionInput {
            turn_left: true,
            turn_right: true,
            ..Default::default()
        };
        assert_eq!(controller.heading_rate(&both), 90.0);
    }

    #[test]
    fn test_blocked_move_still_turns() {
        let (mut controller, mut body, mut field) = setup();
        field
            .add_building(BuildingKind::Tower, BoundingSphere::new(Vec3::new(0.0, 0.0, 8.0), 5.0))
            .unwrap();

        let input = MotionInput {
            forward: true,
            turn_left: true,
            ..Default::default()
        };
        let outcome = controller.step(&mut body, &mut field, &input, 0.5);
        assert!(outcome.blocked);
        assert_eq!(outcome.forward_speed, 0.0);
        assert_eq!(body.position(), Vec3::ZERO);
        // Walking turn sign applied: -90 deg/s for half a second
        assert!((body.forward() - Vec3::new(45f32.to_radians().sin(), 0.0, -45f32.to_radians().cos())).length() < 1e-5);
    }

    #[test]
    fn test_edge_of_floor_blocks() {
        let (mut controller, mut body, mut field) = setup();
        body.set_position(Vec3::new(0.0, 0.0, 97.0));
        field.recenter_player(body.position());
        let input = MotionInput {
            forward: true,
            ..Default::default()
        };
        let outcome = controller.step(&mut body, &mut field, &input, 0.5);
        assert!(outcome.blocked);
        assert_eq!(body.position(), Vec3::new(0.0, 0.0, 97.0));
    }
}
