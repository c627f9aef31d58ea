//! Scene state
//!
//! Everything the simulation mutates lives here. Built once per scene load
//! from `Settings` and a seed; the same seed gives the same building layout.

use glam::{Mat4, Vec3};
use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::body::OrientedBody;
use super::bounds::BoundingSphere;
use super::camera::FollowCamera;
use super::controller::MotionController;
use super::obstacle::{BuildingKind, Footprint, ObstacleField};
use crate::error::SceneError;
use crate::settings::Settings;

/// Complete scene state
#[derive(Debug, Clone)]
pub struct Scene {
    /// Layout seed for reproducibility
    pub seed: u64,
    pub body: OrientedBody,
    pub camera: FollowCamera,
    pub field: ObstacleField,
    pub controller: MotionController,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Accumulated simulated seconds
    pub elapsed: f32,
}

impl Scene {
    /// Validate settings, scatter buildings and set up body and camera
    pub fn new(settings: &Settings, seed: u64) -> Result<Self, SceneError> {
        settings.validate()?;
        let mut rng = Pcg32::seed_from_u64(seed);

        let mut body = OrientedBody::new(&settings.body)?;
        body.set_position(settings.player.spawn);

        let player = BoundingSphere::new(Vec3::ZERO, settings.player.radius())
            .on_ground_at(settings.player.spawn);
        let mut field = ObstacleField::new(&settings.field, player)?;

        let footprints: Vec<Footprint> = (0..settings.buildings.count)
            .map(|_| {
                let kind = BuildingKind::random(&mut rng);
                Footprint {
                    kind,
                    radius: settings.buildings.kind_radii[kind.index()]
                        * settings.buildings.bounding_factor,
                }
            })
            .collect();
        field.place_random(&footprints, &settings.placement, &mut rng)?;

        let mut camera = FollowCamera::new(&settings.camera)?;
        let spawn = body.position();
        camera.look_at(spawn + settings.camera.eye_offset, spawn, Vec3::Y);
        camera.look_at_target(spawn);

        log::info!(
            "Scene ready: seed={}, buildings={}, player radius={:.2}",
            seed,
            field.buildings().len(),
            field.player().radius
        );

        Ok(Self {
            seed,
            body,
            camera,
            field,
            controller: MotionController::new(&settings.motion),
            time_ticks: 0,
            elapsed: 0.0,
        })
    }

    /// Model matrix for the player
    pub fn player_transform(&self) -> Mat4 {
        self.body.world_transform()
    }

    pub fn view_matrix(&self) -> Mat4 {
        self.camera.view_matrix()
    }

    pub fn projection_matrix(&self) -> Mat4 {
        self.camera.projection_matrix()
    }
}
