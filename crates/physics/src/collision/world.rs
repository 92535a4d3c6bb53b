//! Reference spatial-query provider backed by parry2d shapes.
//!
//! The collision world stores static and moving level geometry and answers
//! raycasts against it. It does no broadphase; levels for a single screen
//! have a few hundred colliders at most.

use glam::Vec2;
use parry2d::math::{Isometry, Point, Real, Vector};
use parry2d::query::Ray;
use parry2d::shape::SharedShape;

use super::flags::LayerMask;
use super::hit::{ColliderId, RaycastHit};
use super::query::SpatialQuery;

/// A piece of collision geometry in the world.
#[derive(Clone)]
pub struct Collider {
    /// Unique identifier for this collider.
    pub id: ColliderId,
    /// The collision shape.
    pub shape: SharedShape,
    /// Position in world space.
    pub transform: Isometry<Real>,
    /// Layers this collider belongs to.
    pub layers: LayerMask,
}

impl std::fmt::Debug for Collider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Collider")
            .field("id", &self.id)
            .field("translation", &self.transform.translation.vector)
            .field("layers", &self.layers)
            .finish()
    }
}

/// The collision world containing all level geometry.
#[derive(Debug, Default)]
pub struct CollisionWorld {
    colliders: Vec<Collider>,
    next_id: u32,
}

impl CollisionWorld {
    /// Create an empty collision world.
    pub fn new() -> Self {
        Self {
            colliders: Vec::new(),
            next_id: 0,
        }
    }

    /// Add an axis-aligned box to the world.
    ///
    /// # Arguments
    ///
    /// * `center` - Center of the box in world space
    /// * `half_extents` - Half-size on each axis
    /// * `layers` - Layers used for collision filtering
    pub fn add_box(&mut self, center: Vec2, half_extents: Vec2, layers: LayerMask) -> ColliderId {
        let shape = SharedShape::cuboid(half_extents.x, half_extents.y);
        let transform = Isometry::translation(center.x, center.y);
        self.insert(shape, transform, layers)
    }

    /// Add a right-triangle ramp.
    ///
    /// `foot` is the low tip of the ramp. The ramp climbs `rise` over `run`;
    /// a positive `run` climbs to the right, a negative one to the left.
    ///
    /// Returns `None` for a degenerate triangle.
    pub fn add_ramp(
        &mut self,
        foot: Vec2,
        run: f32,
        rise: f32,
        layers: LayerMask,
    ) -> Option<ColliderId> {
        if !(run.is_finite() && rise.is_finite()) || run == 0.0 || rise == 0.0 {
            return None;
        }
        self.add_convex_polygon(
            &[foot, foot + Vec2::new(run, 0.0), foot + Vec2::new(run, rise)],
            layers,
        )
    }

    /// Add the convex hull of `points` to the world.
    ///
    /// Returns `None` if the hull couldn't be computed.
    pub fn add_convex_polygon(&mut self, points: &[Vec2], layers: LayerMask) -> Option<ColliderId> {
        let parry_points: Vec<Point<Real>> = points.iter().map(|p| Point::new(p.x, p.y)).collect();
        let shape = SharedShape::convex_hull(&parry_points)?;
        Some(self.insert(shape, Isometry::identity(), layers))
    }

    /// Move a collider by `offset`. Used for moving platforms.
    ///
    /// Returns `false` if no collider has this id.
    pub fn translate(&mut self, id: ColliderId, offset: Vec2) -> bool {
        match self.colliders.iter_mut().find(|c| c.id == id) {
            Some(collider) => {
                collider.transform.translation.vector += Vector::new(offset.x, offset.y);
                true
            }
            None => false,
        }
    }

    /// Remove a collider. Returns `false` if no collider has this id.
    pub fn remove(&mut self, id: ColliderId) -> bool {
        let before = self.colliders.len();
        self.colliders.retain(|c| c.id != id);
        self.colliders.len() != before
    }

    /// Get the number of colliders.
    pub fn collider_count(&self) -> usize {
        self.colliders.len()
    }

    fn insert(&mut self, shape: SharedShape, transform: Isometry<Real>, layers: LayerMask) -> ColliderId {
        let id = ColliderId(self.next_id);
        self.next_id += 1;
        self.colliders.push(Collider {
            id,
            shape,
            transform,
            layers,
        });
        id
    }
}

impl SpatialQuery for CollisionWorld {
    fn raycast(
        &self,
        origin: Vec2,
        direction: Vec2,
        max_distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        let dir = direction.normalize_or_zero();
        if dir == Vec2::ZERO || max_distance <= 0.0 {
            return None;
        }

        let ray = Ray::new(Point::new(origin.x, origin.y), Vector::new(dir.x, dir.y));

        let mut closest: Option<RaycastHit> = None;
        for collider in &self.colliders {
            if !mask.intersects(collider.layers) {
                continue;
            }

            let Some(intersection) =
                collider
                    .shape
                    .cast_ray_and_get_normal(&collider.transform, &ray, max_distance, true)
            else {
                continue;
            };

            let distance = intersection.time_of_impact;
            if closest.as_ref().is_some_and(|hit| hit.distance <= distance) {
                continue;
            }

            closest = Some(RaycastHit {
                point: origin + dir * distance,
                normal: Vec2::new(intersection.normal.x, intersection.normal.y),
                distance,
                collider: collider.id,
                layers: collider.layers,
            });
        }

        closest
    }
}
