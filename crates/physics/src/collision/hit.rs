//! Raycast hit reports.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::flags::LayerMask;

/// Identifier of a collider inside a spatial-query provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColliderId(pub u32);

/// The nearest surface a ray ran into.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RaycastHit {
    /// World-space impact point.
    pub point: Vec2,

    /// Unit surface normal at the impact point, pointing away from the surface.
    pub normal: Vec2,

    /// Distance from the ray origin to `point`.
    ///
    /// Zero when the ray started inside the collider.
    pub distance: f32,

    /// The collider that was hit.
    pub collider: ColliderId,

    /// Layers of the collider that was hit.
    pub layers: LayerMask,
}

impl RaycastHit {
    /// Angle between the surface normal and world up, in degrees.
    ///
    /// `0` is flat ground, `90` is a vertical wall, `180` is a ceiling.
    pub fn surface_angle(&self) -> f32 {
        surface_angle(self.normal)
    }
}

/// Unsigned angle in degrees between `normal` and `Vec2::Y`.
pub fn surface_angle(normal: Vec2) -> f32 {
    let normal = normal.normalize_or_zero();
    if normal == Vec2::ZERO {
        return 0.0;
    }
    normal.dot(Vec2::Y).clamp(-1.0, 1.0).acos().to_degrees()
}
