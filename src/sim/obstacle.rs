//! Obstacle field: buildings, the player volume and movement admission
//!
//! Buildings are static spheres on the ground plane. The player volume
//! follows the body across the floor. A move is admitted only if it stays on
//! the floor and the recentred player sphere touches no building.

use glam::Vec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::BoundingSphere;
use crate::error::{ConfigError, PlacementError};
use crate::settings::{FieldConfig, PlacementConfig};

/// Building models available to the scene
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BuildingKind {
    Cottage,
    Bungalow,
    Tower,
    Townhouse,
}

impl BuildingKind {
    pub const ALL: [BuildingKind; 4] = [
        BuildingKind::Cottage,
        BuildingKind::Bungalow,
        BuildingKind::Tower,
        BuildingKind::Townhouse,
    ];

    /// Index into per-kind tables such as `BuildingConfig::kind_radii`
    pub fn index(self) -> usize {
        match self {
            BuildingKind::Cottage => 0,
            BuildingKind::Bungalow => 1,
            BuildingKind::Tower => 2,
            BuildingKind::Townhouse => 3,
        }
    }

    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }
}

/// A placed building
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Building {
    pub kind: BuildingKind,
    pub bounds: BoundingSphere,
}

/// Building awaiting placement
#[derive(Debug, Clone, Copy)]
pub struct Footprint {
    pub kind: BuildingKind,
    pub radius: f32,
}

/// Static obstacles plus the moving player volume
#[derive(Debug, Clone)]
pub struct ObstacleField {
    buildings: Vec<Building>,
    player: BoundingSphere,
    max_range: f32,
}

impl ObstacleField {
    pub fn new(config: &FieldConfig, player: BoundingSphere) -> Result<Self, ConfigError> {
        if config.max_range <= 0.0 {
            return Err(ConfigError::NotPositive {
                field: "field.max_range",
                value: config.max_range,
            });
        }
        if player.radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                field: "player",
                value: player.radius,
            });
        }
        Ok(Self {
            buildings: Vec::new(),
            player: player.on_ground_at(player.center),
            max_range: config.max_range,
        })
    }

    /// Add an externally supplied obstacle; its centre is dropped to the ground
    pub fn add_building(&mut self, kind: BuildingKind, bounds: BoundingSphere) -> Result<(), ConfigError> {
        if bounds.radius < 0.0 {
            return Err(ConfigError::NegativeRadius {
                field: "building",
                value: bounds.radius,
            });
        }
        self.buildings.push(Building {
            kind,
            bounds: bounds.on_ground_at(bounds.center),
        });
        Ok(())
    }

    /// Scatter buildings by rejection sampling.
    ///
    /// Each coordinate is an integer in `[min_dist, max_dist)` with a random
    /// sign. A sample is taken when no placed building, nor the player's
    /// current position, lies within `spacing` on both axes. On exhaustion
    /// the field is left without buildings.
    pub fn place_random<R: Rng + ?Sized>(
        &mut self,
        footprints: &[Footprint],
        placement: &PlacementConfig,
        rng: &mut R,
    ) -> Result<(), PlacementError> {
        placement
            .validate(self.max_range)
            .map_err(|err| PlacementError::InvalidConfig(err.to_string()))?;

        self.buildings.clear();
        let reserved = (self.player.center.x, self.player.center.z);

        for (index, footprint) in footprints.iter().enumerate() {
            let mut placed = None;
            for _ in 0..placement.max_attempts {
                let x = sample_coordinate(rng, placement);
                let z = sample_coordinate(rng, placement);

                let (x, z) = (x as f32, z as f32);
                let blocked = too_close(x, z, reserved, placement.spacing)
                    || self.buildings.iter().any(|b| {
                        too_close(x, z, (b.bounds.center.x, b.bounds.center.z), placement.spacing)
                    });
                if !blocked {
                    placed = Some(Vec3::new(x, 0.0, z));
                    break;
                }
            }

            let Some(center) = placed else {
                log::warn!(
                    "Placement exhausted for building {} after {} attempts",
                    index,
                    placement.max_attempts
                );
                self.buildings.clear();
                return Err(PlacementError::Exhausted {
                    index,
                    attempts: placement.max_attempts,
                });
            };

            self.buildings.push(Building {
                kind: footprint.kind,
                bounds: BoundingSphere::new(center, footprint.radius),
            });
        }

        log::info!("Placed {} buildings", self.buildings.len());
        Ok(())
    }

    /// Whether the player volume, moved to `candidate`, hits a building
    pub fn query(&self, candidate: Vec3) -> bool {
        let moved = self.player.on_ground_at(candidate);
        self.buildings.iter().any(|b| moved.intersects(&b.bounds))
    }

    /// Admission control for a player move
    pub fn validate_movement(&self, candidate: Vec3) -> bool {
        if candidate.x.abs() > self.max_range || candidate.z.abs() > self.max_range {
            return false;
        }
        !self.query(candidate)
    }

    /// Keep the player volume under the body
    pub fn recenter_player(&mut self, position: Vec3) {
        self.player = self.player.on_ground_at(position);
    }

    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn player(&self) -> BoundingSphere {
        self.player
    }

    pub fn max_range(&self) -> f32 {
        self.max_range
    }

    /// Every sphere worth drawing in debug view, player last
    pub fn debug_spheres(&self) -> impl Iterator<Item = BoundingSphere> + '_ {
        self.buildings
            .iter()
            .map(|b| b.bounds)
            .chain(std::iter::once(self.player))
    }
}

fn sample_coordinate<R: Rng + ?Sized>(rng: &mut R, placement: &PlacementConfig) -> i32 {
    let value = rng.random_range(placement.min_dist..placement.max_dist);
    if rng.random_bool(0.5) { -value } else { value }
}

/// Occupied when both axis distances, truncated to whole units, fall short
fn too_close(x: f32, z: f32, other: (f32, f32), spacing: i32) -> bool {
    ((x - other.0).abs() as i32) < spacing && ((z - other.1).abs() as i32) < spacing
}
