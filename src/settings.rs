//! Scene settings
//!
//! Every tuning constant the simulation needs, grouped per component.
//! Persisted as JSON; validated before any component is built.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Oriented body (the player's robot)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BodyConfig {
    /// Heading changes rotate about world up instead of the body's local up
    pub constrain_to_world_up: bool,
    /// Horizontal divisor applied to the exported transform's translation.
    /// The rendered model is shrunk by this factor; simulation coordinates are not.
    pub display_scale: f32,
}

impl Default for BodyConfig {
    fn default() -> Self {
        Self {
            constrain_to_world_up: true,
            display_scale: 0.3,
        }
    }
}

/// Third-person follow camera
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    /// Eye position relative to the tracked body, in the camera's heading frame
    pub eye_offset: Vec3,
    /// Look-at point relative to the tracked body
    pub target_offset: Vec3,
    pub spring_enabled: bool,
    pub spring_constant: f32,
    pub min_spring_constant: f32,
    pub max_spring_constant: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_y_deg: 45.0,
            aspect: 2.0,
            near: 1.0,
            far: 1000.0,
            // The robot walks along -forward (+Z at spawn), so the eye sits on -Z
            eye_offset: Vec3::new(0.0, 7.0, -15.0),
            target_offset: Vec3::new(0.0, 5.0, 0.0),
            spring_enabled: false,
            spring_constant: 16.0,
            min_spring_constant: 1.0,
            max_spring_constant: 100.0,
        }
    }
}

impl CameraConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_projection(self.fov_y_deg, self.aspect, self.near, self.far)?;
        if self.min_spring_constant > self.max_spring_constant {
            return Err(ConfigError::SpringBounds {
                min: self.min_spring_constant,
                max: self.max_spring_constant,
            });
        }
        positive("camera.min_spring_constant", self.min_spring_constant)
    }
}

/// Walking and turning speeds
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    /// Walking speed in world units per second
    pub forward_speed: f32,
    /// Turn rate in degrees per second
    pub heading_speed: f32,
    /// Speed multiplier while the run modifier is held
    pub run_multiplier: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            forward_speed: 12.0,
            heading_speed: 120.0,
            run_multiplier: 5.0,
        }
    }
}

/// Walkable floor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FieldConfig {
    /// Movement is rejected beyond +-max_range on X or Z
    pub max_range: f32,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self { max_range: 98.0 }
    }
}

/// Random building placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlacementConfig {
    /// Minimum absolute coordinate (inclusive)
    pub min_dist: i32,
    /// Maximum absolute coordinate (exclusive)
    pub max_dist: i32,
    /// Minimum per-axis spacing between centres
    pub spacing: i32,
    /// Samples tried per building before giving up
    pub max_attempts: u32,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_dist: 10,
            max_dist: 90,
            spacing: 20,
            max_attempts: 10_000,
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self, max_range: f32) -> Result<(), ConfigError> {
        if self.min_dist < 0 || self.min_dist >= self.max_dist || self.max_dist as f32 > max_range {
            return Err(ConfigError::PlacementBand {
                min: self.min_dist,
                max: self.max_dist,
                range: max_range,
            });
        }
        if self.max_attempts == 0 {
            return Err(ConfigError::NoAttempts);
        }
        Ok(())
    }
}

/// Building population
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildingConfig {
    pub count: usize,
    /// Model bounding radius per building kind, indexed by `BuildingKind::index`
    pub kind_radii: [f32; 4],
    /// Shrinks the model sphere to the building's actual footprint
    pub bounding_factor: f32,
}

impl Default for BuildingConfig {
    fn default() -> Self {
        Self {
            count: 15,
            kind_radii: [12.0, 10.0, 14.0, 11.0],
            bounding_factor: 0.55,
        }
    }
}

/// Player collision volume
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerConfig {
    /// Merged bounding radius of the unscaled character model
    pub model_radius: f32,
    /// Character model scale
    pub size: f32,
    pub bounding_factor: f32,
    pub spawn: Vec3,
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            model_radius: 80.0,
            size: 0.065,
            bounding_factor: 0.7,
            spawn: Vec3::ZERO,
        }
    }
}

impl PlayerConfig {
    /// Collision radius after model scaling
    pub fn radius(&self) -> f32 {
        self.model_radius * self.bounding_factor * self.size
    }
}

/// All scene settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub body: BodyConfig,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub field: FieldConfig,
    #[serde(default)]
    pub placement: PlacementConfig,
    #[serde(default)]
    pub buildings: BuildingConfig,
    #[serde(default)]
    pub player: PlayerConfig,
}

impl Settings {
    /// Check every section; the first problem found is returned
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("body.display_scale", self.body.display_scale)?;
        self.camera.validate()?;
        positive("motion.forward_speed", self.motion.forward_speed)?;
        positive("motion.run_multiplier", self.motion.run_multiplier)?;
        positive("field.max_range", self.field.max_range)?;
        self.placement.validate(self.field.max_range)?;
        for &radius in &self.buildings.kind_radii {
            non_negative("buildings.kind_radii", radius)?;
        }
        non_negative("buildings.bounding_factor", self.buildings.bounding_factor)?;
        non_negative("player.model_radius", self.player.model_radius)?;
        positive("player.size", self.player.size)?;
        non_negative("player.bounding_factor", self.player.bounding_factor)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Settings saved to {}", path.display());
        Ok(())
    }
}

/// Perspective parameters: positive fov, aspect and near plane, near before far
pub fn validate_projection(fov_y_deg: f32, aspect: f32, near: f32, far: f32) -> Result<(), ConfigError> {
    positive("camera.fov_y_deg", fov_y_deg)?;
    positive("camera.aspect", aspect)?;
    positive("camera.near", near)?;
    if near >= far || far.is_nan() {
        return Err(ConfigError::ClipPlanes { near, far });
    }
    Ok(())
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::NegativeRadius { field, value })
    }
}
