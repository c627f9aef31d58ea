//! Position and orientation integrator
//!
//! An `OrientedBody` can be oriented and rotated. Orienting changes the
//! direction it faces and therefore its right, up and forward axes. Rotating
//! spins the body in place (a tumbling asteroid, a turning planet) without
//! touching the direction of travel.
//!
//! Both kinds of change are requested as Euler rates in degrees and applied
//! on the next `integrate`, scaled by the elapsed time.

use glam::{Mat4, Quat, Vec3};

use crate::error::ConfigError;
use crate::settings::BodyConfig;
use crate::wrap_degrees_once;

/// A body moving and turning in 3D space
#[derive(Debug, Clone)]
pub struct OrientedBody {
    position: Vec3,
    orientation: Quat,
    spin: Quat,
    /// Requested Euler rates per rotation axis: x = pitch, y = heading, z = roll
    pending_orient: Vec3,
    pending_spin: Vec3,
    /// Requested speed along (right, up, forward)
    velocity: Vec3,
    constrain_to_world_up: bool,
    display_scale: f32,
    world_transform: Mat4,
}

impl OrientedBody {
    /// New body at the origin, facing -Z
    pub fn new(config: &BodyConfig) -> Result<Self, ConfigError> {
        if config.display_scale <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "body.display_scale",
                value: config.display_scale,
            });
        }
        Ok(Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
            spin: Quat::IDENTITY,
            pending_orient: Vec3::ZERO,
            pending_spin: Vec3::ZERO,
            velocity: Vec3::ZERO,
            constrain_to_world_up: config.constrain_to_world_up,
            display_scale: config.display_scale,
            world_transform: Mat4::IDENTITY,
        })
    }

    /// Change the facing direction. Takes effect on the next `integrate`.
    pub fn orient(&mut self, heading_deg: f32, pitch_deg: f32, roll_deg: f32) {
        self.pending_orient = accumulate(self.pending_orient, heading_deg, pitch_deg, roll_deg);
    }

    /// Spin the body without changing where it is heading
    pub fn rotate(&mut self, heading_deg: f32, pitch_deg: f32, roll_deg: f32) {
        self.pending_spin = accumulate(self.pending_spin, heading_deg, pitch_deg, roll_deg);
    }

    /// Advance by `dt` seconds, consuming the requested velocity and rotations
    pub fn integrate(&mut self, dt: f32) {
        let velocity = self.velocity * dt;
        let orient = self.pending_orient * dt;
        let spin = self.pending_spin * dt;

        let (right, up, forward) = axes(self.orientation);

        let old_position = self.position;
        self.position += right * velocity.x + up * velocity.y + forward * velocity.z;
        let heading = (self.position - old_position).normalize_or_zero();

        let mut delta = self.euler_delta(self.orientation, orient);

        // Moving backwards: invert so the turn follows the direction of travel
        if heading.dot(forward) < 0.0 {
            delta = delta.inverse();
        }
        self.orientation = (delta * self.orientation).normalize();

        let delta = self.euler_delta(self.spin, spin);
        self.spin = (delta * self.spin).normalize();

        let combined = (self.orientation * self.spin).normalize();
        self.world_transform = Mat4::from_quat(combined);
        self.world_transform.w_axis.x = self.position.x / self.display_scale;
        self.world_transform.w_axis.y = self.position.y;
        self.world_transform.w_axis.z = self.position.z / self.display_scale;

        self.velocity = Vec3::ZERO;
        self.pending_orient = Vec3::ZERO;
        self.pending_spin = Vec3::ZERO;
    }

    /// Teleport: take orientation and position straight from a transform.
    ///
    /// A singular transform carries no usable rotation; the current
    /// orientation is kept and only the translation is taken.
    pub fn set_world_transform(&mut self, transform: Mat4) {
        let translation = transform.w_axis.truncate();
        if translation.is_finite() {
            self.position = translation;
        }

        if transform.determinant().abs() > f32::EPSILON {
            let (_, rotation, _) = transform.to_scale_rotation_translation();
            if rotation.is_finite() && rotation.length_squared() > 0.0 {
                self.orientation = rotation.normalize();
            } else {
                log::warn!("Teleport rotation is not finite, orientation kept");
            }
        } else {
            log::warn!("Teleport transform is singular, orientation kept");
        }
        self.world_transform = transform;
    }

    /// Rotation about heading, then pitch, then roll.
    ///
    /// Axes come from `q`. Heading uses world up when constrained. Zero
    /// angles contribute nothing, not even an identity step.
    fn euler_delta(&self, q: Quat, degrees: Vec3) -> Quat {
        let (local_x, local_y, local_z) = (q * Vec3::X, q * Vec3::Y, q * Vec3::Z);
        let heading_axis = if self.constrain_to_world_up {
            Vec3::Y
        } else {
            local_y.normalize()
        };

        let steps = [
            (heading_axis, degrees.y),
            (local_x.normalize(), degrees.x),
            (local_z.normalize(), degrees.z),
        ];

        steps
            .into_iter()
            .filter(|&(_, angle)| angle != 0.0)
            .fold(Quat::IDENTITY, |acc, (axis, angle)| {
                Quat::from_axis_angle(axis, angle.to_radians()) * acc
            })
    }

    #[inline]
    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    pub fn right(&self) -> Vec3 {
        axes(self.orientation).0
    }

    pub fn up(&self) -> Vec3 {
        axes(self.orientation).1
    }

    pub fn forward(&self) -> Vec3 {
        axes(self.orientation).2
    }

    #[inline]
    pub fn orientation(&self) -> Quat {
        self.orientation
    }

    #[inline]
    pub fn spin(&self) -> Quat {
        self.spin
    }

    /// Model matrix from the last `integrate` (or teleport)
    #[inline]
    pub fn world_transform(&self) -> Mat4 {
        self.world_transform
    }

    #[inline]
    pub fn velocity(&self) -> Vec3 {
        self.velocity
    }

    /// Speed along (right, up, forward) for the next `integrate`
    pub fn set_velocity(&mut self, velocity: Vec3) {
        self.velocity = velocity;
    }

    pub fn pending_orient(&self) -> Vec3 {
        self.pending_orient
    }

    pub fn pending_spin(&self) -> Vec3 {
        self.pending_spin
    }

    pub fn constrain_to_world_up(&self) -> bool {
        self.constrain_to_world_up
    }

    pub fn set_constrain_to_world_up(&mut self, constrain: bool) {
        self.constrain_to_world_up = constrain;
    }
}

fn accumulate(pending: Vec3, heading_deg: f32, pitch_deg: f32, roll_deg: f32) -> Vec3 {
    Vec3::new(
        wrap_degrees_once(pending.x + pitch_deg),
        wrap_degrees_once(pending.y + heading_deg),
        wrap_degrees_once(pending.z + roll_deg),
    )
}

/// (right, up, forward) of an orientation
fn axes(q: Quat) -> (Vec3, Vec3, Vec3) {
    (
        (q * Vec3::X).normalize(),
        (q * Vec3::Y).normalize(),
        (q * Vec3::NEG_Z).normalize(),
    )
}
