//! Actor box geometry and the ray origins derived from it.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An actor's axis-aligned box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub center: Vec2,
    pub half_extents: Vec2,
}

impl BoundingBox {
    pub fn new(center: Vec2, half_extents: Vec2) -> Self {
        Self {
            center,
            half_extents,
        }
    }

    #[inline]
    pub fn min(&self) -> Vec2 {
        self.center - self.half_extents
    }

    #[inline]
    pub fn max(&self) -> Vec2 {
        self.center + self.half_extents
    }

    #[inline]
    pub fn size(&self) -> Vec2 {
        self.half_extents * 2.0
    }

    /// The same box moved by `offset`.
    #[inline]
    pub fn translated(&self, offset: Vec2) -> Self {
        Self::new(self.center + offset, self.half_extents)
    }

    /// Shrink every side by `skin`.
    #[inline]
    pub fn inset(&self, skin: f32) -> Self {
        Self::new(self.center, self.half_extents - Vec2::splat(skin))
    }
}

/// Corner points rays are cast from, taken from the inset box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RaycastOrigins {
    pub top_left: Vec2,
    pub bottom_left: Vec2,
    pub bottom_right: Vec2,
}

impl RaycastOrigins {
    /// Compute origins for `bounds` inset by `skin`.
    pub fn from_bounds(bounds: &BoundingBox, skin: f32) -> Self {
        let inset = bounds.inset(skin);
        let min = inset.min();
        let max = inset.max();
        Self {
            top_left: Vec2::new(min.x, max.y),
            bottom_left: min,
            bottom_right: Vec2::new(max.x, min.y),
        }
    }

    #[inline]
    pub fn top_right(&self) -> Vec2 {
        Vec2::new(self.bottom_right.x, self.top_left.y)
    }

    /// Usable width of the inset box.
    #[inline]
    pub fn width(&self) -> f32 {
        self.bottom_right.x - self.bottom_left.x
    }

    /// Usable height of the inset box.
    #[inline]
    pub fn height(&self) -> f32 {
        self.top_left.y - self.bottom_left.y
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.bottom_left.x + self.bottom_right.x) * 0.5
    }

    /// Vertical gap between horizontal-pass rays.
    #[inline]
    pub fn vertical_spacing(&self, ray_count: usize) -> f32 {
        self.height() / (ray_count.max(2) - 1) as f32
    }

    /// Horizontal gap between vertical-pass rays.
    #[inline]
    pub fn horizontal_spacing(&self, ray_count: usize) -> f32 {
        self.width() / (ray_count.max(2) - 1) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_origins_are_inset() {
        let bounds = BoundingBox::new(Vec2::new(1.0, 2.0), Vec2::new(0.5, 1.0));
        let origins = RaycastOrigins::from_bounds(&bounds, 0.1);

        assert!((origins.bottom_left - Vec2::new(0.6, 1.1)).length() < 1e-6);
        assert!((origins.bottom_right - Vec2::new(1.4, 1.1)).length() < 1e-6);
        assert!((origins.top_left - Vec2::new(0.6, 2.9)).length() < 1e-6);
        assert!((origins.top_right() - Vec2::new(1.4, 2.9)).length() < 1e-6);
        assert!((origins.width() - 0.8).abs() < 1e-6);
        assert!((origins.height() - 1.8).abs() < 1e-6);
    }

    #[test]
    fn test_ray_spacing() {
        let bounds = BoundingBox::new(Vec2::ZERO, Vec2::new(0.5, 1.0));
        let origins = RaycastOrigins::from_bounds(&bounds, 0.0);
        assert!((origins.horizontal_spacing(3) - 0.5).abs() < 1e-6);
        assert!((origins.vertical_spacing(5) - 0.5).abs() < 1e-6);
    }
}
