//! Third-person follow camera
//!
//! The eye sits at a fixed offset from the tracked body, rotated by the
//! camera's own heading and pitch. With the spring system enabled the eye
//! trails the ideal position under critical damping instead of snapping.

use glam::{Mat4, Quat, Vec3};

use crate::error::ConfigError;
use crate::settings::{CameraConfig, validate_projection};

/// Camera chasing a target from behind
#[derive(Debug, Clone)]
pub struct FollowCamera {
    eye_offset: Vec3,
    target_offset: Vec3,
    heading_deg: f32,
    pitch_deg: f32,
    /// Rates in degrees per second, consumed by the next `update`
    pending_heading: f32,
    pending_pitch: f32,
    tracked: Vec3,
    world_up: Vec3,
    eye: Vec3,
    eye_velocity: Vec3,
    target: Vec3,
    spring_enabled: bool,
    spring_constant: f32,
    min_spring_constant: f32,
    max_spring_constant: f32,
    fov_y_deg: f32,
    aspect: f32,
    near: f32,
    far: f32,
    view: Mat4,
    projection: Mat4,
}

impl FollowCamera {
    pub fn new(config: &CameraConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let mut camera = Self {
            eye_offset: config.eye_offset,
            target_offset: config.target_offset,
            heading_deg: 0.0,
            pitch_deg: 0.0,
            pending_heading: 0.0,
            pending_pitch: 0.0,
            tracked: Vec3::ZERO,
            world_up: Vec3::Y,
            eye: config.eye_offset,
            eye_velocity: Vec3::ZERO,
            target: config.target_offset,
            spring_enabled: config.spring_enabled,
            spring_constant: config.spring_constant,
            min_spring_constant: config.min_spring_constant,
            max_spring_constant: config.max_spring_constant,
            fov_y_deg: config.fov_y_deg,
            aspect: config.aspect,
            near: config.near,
            far: config.far,
            view: Mat4::IDENTITY,
            projection: Mat4::IDENTITY,
        };
        camera.set_spring_constant(config.spring_constant);
        camera.perspective(config.fov_y_deg, config.aspect, config.near, config.far)?;
        camera.refresh_view();
        Ok(camera)
    }

    /// Set the projection. Call again after a viewport resize.
    ///
    /// Invalid parameters leave the current projection in place.
    pub fn perspective(&mut self, fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Result<(), ConfigError> {
        validate_projection(fov_y_deg, aspect, near, far)?;
        self.fov_y_deg = fov_y_deg;
        self.aspect = aspect;
        self.near = near;
        self.far = far;
        self.projection = Mat4::perspective_rh(fov_y_deg.to_radians(), aspect, near, far);
        Ok(())
    }

    /// Aim from `eye` straight at `target`. The eye's offset from the target
    /// becomes the new follow offset for later updates.
    pub fn look_at(&mut self, eye: Vec3, target: Vec3, up: Vec3) {
        self.world_up = up.normalize_or(Vec3::Y);
        self.tracked = target;
        self.eye = eye;
        self.eye_velocity = Vec3::ZERO;
        self.target = target;
        self.eye_offset = self.frame().inverse() * (eye - target);
        self.refresh_view();
    }

    /// Follow a new target position using the current offsets
    pub fn look_at_target(&mut self, target: Vec3) {
        self.tracked = target;
        let (ideal_eye, ideal_target) = self.ideal();
        if !self.spring_enabled {
            self.eye = ideal_eye;
        }
        self.target = ideal_target;
        self.refresh_view();
    }

    /// Queue heading and pitch rates (degrees per second)
    pub fn rotate(&mut self, heading_deg: f32, pitch_deg: f32) {
        self.pending_heading += heading_deg;
        self.pending_pitch += pitch_deg;
    }

    pub fn update(&mut self, dt: f32) {
        self.heading_deg = crate::wrap_degrees_once(self.heading_deg + self.pending_heading * dt);
        self.pitch_deg = crate::wrap_degrees_once(self.pitch_deg + self.pending_pitch * dt);
        self.pending_heading = 0.0;
        self.pending_pitch = 0.0;

        let (ideal_eye, ideal_target) = self.ideal();

        if self.spring_enabled {
            let damping = 2.0 * self.spring_constant.sqrt();
            let accel = (ideal_eye - self.eye) * self.spring_constant - self.eye_velocity * damping;
            self.eye_velocity += accel * dt;
            self.eye += self.eye_velocity * dt;
        } else {
            self.eye = ideal_eye;
        }

        self.target = ideal_target;
        self.refresh_view();
    }

    /// Ideal eye and look-at point for the tracked position
    fn ideal(&self) -> (Vec3, Vec3) {
        let frame = self.frame();
        (
            self.tracked + frame * self.eye_offset,
            self.tracked + frame * self.target_offset,
        )
    }

    fn frame(&self) -> Quat {
        Quat::from_rotation_y(self.heading_deg.to_radians())
            * Quat::from_rotation_x(self.pitch_deg.to_radians())
    }

    fn refresh_view(&mut self) {
        self.view = Mat4::look_at_rh(self.eye, self.target, self.world_up);
    }

    pub fn spring_enabled(&self) -> bool {
        self.spring_enabled
    }

    /// Toggle the spring. Enabling starts it at rest from the current eye.
    pub fn set_spring_enabled(&mut self, enabled: bool) {
        if enabled && !self.spring_enabled {
            self.eye_velocity = Vec3::ZERO;
        }
        self.spring_enabled = enabled;
        log::debug!("Camera spring {}", if enabled { "enabled" } else { "disabled" });
    }

    pub fn spring_constant(&self) -> f32 {
        self.spring_constant
    }

    /// Clamped to the configured bounds
    pub fn set_spring_constant(&mut self, spring_constant: f32) {
        self.spring_constant = spring_constant.clamp(self.min_spring_constant, self.max_spring_constant);
    }

    pub fn eye(&self) -> Vec3 {
        self.eye
    }

    pub fn target(&self) -> Vec3 {
        self.target
    }

    pub fn heading_deg(&self) -> f32 {
        self.heading_deg
    }

    pub fn eye_offset(&self) -> Vec3 {
        self.eye_offset
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.projection
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// (fov_y_deg, aspect, near, far)
    pub fn projection_params(&self) -> (f32, f32, f32, f32) {
        (self.fov_y_deg, self.aspect, self.near, self.far)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(spring: bool) -> CameraConfig {
        CameraConfig {
            eye_offset: Vec3::new(0.0, 7.0, -15.0),
            target_offset: Vec3::new(0.0, 5.0, 0.0),
            spring_enabled: spring,
            ..CameraConfig::default()
        }
    }

    #[test]
    fn test_snap_places_eye_at_offset() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        camera.look_at_target(Vec3::ZERO);
        camera.update(1.0 / 60.0);
        assert_eq!(camera.eye(), Vec3::new(0.0, 7.0, -15.0));
        assert_eq!(camera.target(), Vec3::new(0.0, 5.0, 0.0));
    }

    #[test]
    fn test_snap_follows_every_update() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        for i in 0..10 {
            let target = Vec3::new(i as f32, 0.0, -(i as f32) * 2.0);
            camera.look_at_target(target);
            camera.update(1.0 / 60.0);
            assert!((camera.eye() - (target + Vec3::new(0.0, 7.0, -15.0))).length() < 1e-5);
        }
    }

    #[test]
    fn test_heading_rotates_offset() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        camera.rotate(90.0, 0.0);
        camera.update(1.0);
        // (0, 7, -15) turned 90 degrees about +Y
        assert!((camera.eye() - Vec3::new(-15.0, 7.0, 0.0)).length() < 1e-4);
        assert!((camera.heading_deg() - 90.0).abs() < 1e-5);
    }

    #[test]
    fn test_rotate_is_consumed() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        camera.rotate(30.0, 0.0);
        camera.update(1.0);
        camera.update(1.0);
        assert!((camera.heading_deg() - 30.0).abs() < 1e-5);
    }

    #[test]
    fn test_view_matrix_maps_target_ahead() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        camera.look_at_target(Vec3::new(3.0, 0.0, 4.0));
        camera.update(0.016);
        // Right-handed view space looks down -Z
        let p = camera.view_matrix().transform_point3(camera.target());
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4);
        assert!(p.z < 0.0);
    }

    #[test]
    fn test_spring_constant_is_clamped() {
        let mut camera = FollowCamera::new(&config(true)).unwrap();
        camera.set_spring_constant(1000.0);
        assert_eq!(camera.spring_constant(), 100.0);
        camera.set_spring_constant(0.01);
        assert_eq!(camera.spring_constant(), 1.0);
    }

    #[test]
    fn test_spring_lags_then_converges_without_overshoot() {
        let mut camera = FollowCamera::new(&config(true)).unwrap();
        camera.look_at(Vec3::new(0.0, 7.0, -15.0), Vec3::ZERO, Vec3::Y);

        // Step the target 10 units along +X
        let goal_x = 10.0;
        camera.look_at_target(Vec3::new(goal_x, 0.0, 0.0));
        let dt = 1.0 / 60.0;

        camera.update(dt);
        assert!(camera.eye().x < goal_x * 0.5, "spring should lag");

        let mut max_x = f32::MIN;
        for _ in 0..600 {
            camera.update(dt);
            max_x = max_x.max(camera.eye().x);
        }
        assert!((camera.eye().x - goal_x).abs() < 0.01);
        assert!(max_x <= goal_x + 0.01, "overshoot {}", max_x - goal_x);
    }

    #[test]
    fn test_look_at_sets_offset() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        camera.look_at(Vec3::new(0.0, 10.0, 20.0), Vec3::new(0.0, 0.0, 5.0), Vec3::Y);
        assert!((camera.eye_offset() - Vec3::new(0.0, 10.0, 15.0)).length() < 1e-5);
        camera.look_at_target(Vec3::ZERO);
        assert!((camera.eye() - Vec3::new(0.0, 10.0, 15.0)).length() < 1e-5);
    }

    #[test]
    fn test_perspective_reconfigures_projection() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        let before = camera.projection_matrix();
        camera.perspective(60.0, 16.0 / 9.0, 0.5, 500.0).unwrap();
        assert_ne!(before, camera.projection_matrix());
        assert_eq!(camera.projection_params(), (60.0, 16.0 / 9.0, 0.5, 500.0));

        // Moving the camera leaves the projection alone
        let projection = camera.projection_matrix();
        camera.look_at_target(Vec3::new(5.0, 0.0, 5.0));
        camera.update(0.1);
        assert_eq!(projection, camera.projection_matrix());
    }

    #[test]
    fn test_look_at_aims_at_given_target() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        let target = Vec3::new(2.0, 1.0, -3.0);
        camera.look_at(Vec3::new(0.0, 7.0, 15.0), target, Vec3::Y);
        assert_eq!(camera.target(), target);

        let p = camera.view_matrix().transform_point3(target);
        assert!(p.x.abs() < 1e-4 && p.y.abs() < 1e-4, "target off axis: {p}");
        assert!(p.z < 0.0);
    }

    #[test]
    fn test_bad_perspective_keeps_projection() {
        let mut camera = FollowCamera::new(&config(false)).unwrap();
        let before = camera.projection_matrix();
        let params = camera.projection_params();

        assert!(matches!(
            camera.perspective(45.0, 0.0, 1.0, 1000.0),
            Err(ConfigError::NotPositive { field: "camera.aspect", .. })
        ));
        assert!(matches!(
            camera.perspective(45.0, 2.0, 10.0, 10.0),
            Err(ConfigError::ClipPlanes { .. })
        ));
        assert!(camera.perspective(0.0, 2.0, 1.0, 1000.0).is_err());

        assert_eq!(camera.projection_matrix(), before);
        assert_eq!(camera.projection_params(), params);
        assert!(camera.projection_matrix().is_finite());
    }

    #[test]
    fn test_invalid_config_rejected() {
        let bad = CameraConfig {
            near: 10.0,
            far: 1.0,
            ..CameraConfig::default()
        };
        assert!(FollowCamera::new(&bad).is_err());
    }
}
