//! Bounding spheres for collision and debug drawing

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// A sphere in world space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    pub center: Vec3,
    pub radius: f32,
}

impl BoundingSphere {
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Smallest sphere enclosing both inputs
    pub fn merged(a: Self, b: Self) -> Self {
        let offset = b.center - a.center;
        let distance = offset.length();

        // One sphere already contains the other
        if a.radius >= distance + b.radius {
            return a;
        }
        if b.radius >= distance + a.radius {
            return b;
        }

        let dir = offset / distance;
        let near = a.center - dir * a.radius;
        let far = b.center + dir * b.radius;
        Self {
            center: (near + far) * 0.5,
            radius: (distance + a.radius + b.radius) * 0.5,
        }
    }

    /// Merge per-mesh spheres into one and drop it onto the ground plane
    pub fn from_parts(parts: &[Self]) -> Option<Self> {
        let (first, rest) = parts.split_first()?;
        let mut sphere = rest.iter().fold(*first, |acc, part| Self::merged(acc, *part));
        sphere.center.y = 0.0;
        Some(sphere)
    }

    /// Same centre, radius multiplied by `factor`
    #[inline]
    pub fn scaled(self, factor: f32) -> Self {
        Self {
            center: self.center,
            radius: self.radius * factor,
        }
    }

    /// Same radius, centre moved to `(x, 0, z)` of the given point
    #[inline]
    pub fn on_ground_at(self, point: Vec3) -> Self {
        Self {
            center: Vec3::new(point.x, 0.0, point.z),
            radius: self.radius,
        }
    }

    /// Touching spheres count as intersecting
    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        let reach = self.radius + other.radius;
        self.center.distance_squared(other.center) <= reach * reach
    }

    /// World matrix placing a unit sphere mesh over this volume
    pub fn debug_transform(&self) -> Mat4 {
        Mat4::from_translation(self.center) * Mat4::from_scale(Vec3::splat(self.radius))
    }
}
