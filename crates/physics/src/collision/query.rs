//! The spatial-query capability the resolver is built on.

use std::rc::Rc;
use std::sync::Arc;

use glam::Vec2;

use super::flags::LayerMask;
use super::hit::RaycastHit;

/// Anything that can answer raycasts against level geometry.
///
/// Implementations may use a grid, a BVH or an engine broadphase. The only
/// requirement is that identical queries within a tick return identical hits.
pub trait SpatialQuery {
    /// Cast a ray and return the nearest hit within `max_distance`.
    ///
    /// Only colliders whose layers intersect `mask` are considered. A ray that
    /// starts inside a collider may report that collider at distance zero.
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit>;
}

impl<Q: SpatialQuery + ?Sized> SpatialQuery for &Q {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        (**self).raycast(origin, direction, max_distance, mask)
    }
}

impl<Q: SpatialQuery + ?Sized> SpatialQuery for Rc<Q> {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        (**self).raycast(origin, direction, max_distance, mask)
    }
}

impl<Q: SpatialQuery + ?Sized> SpatialQuery for Arc<Q> {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        (**self).raycast(origin, direction, max_distance, mask)
    }
}
