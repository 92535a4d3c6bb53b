//! Scratch state for a single resolve.
//!
//! A [`Resolution`] is created by every call into the resolver, runs the
//! slope, horizontal and vertical passes over a displacement and is consumed
//! into a [`MoveResult`]. Nothing in here outlives the call.

use glam::Vec2;

use super::bounds::{BoundingBox, RaycastOrigins};
use super::config::ControllerConfig;
use super::state::{CollisionState, MoveResult};
use crate::collision::{LayerMask, RaycastHit, SpatialQuery};

/// Hits closer than this are rays that started inside a collider.
pub(super) const ZERO_DISTANCE: f32 = 1.0e-6;

/// Angles closer than this (degrees) are treated as equal.
pub(super) const ANGLE_EPSILON: f32 = 0.01;

/// Upward leftover after a downward clamp that marks a ramp apex.
pub(super) const APEX_RESIDUAL: f32 = 1.0e-5;

/// A surface whose angle rounds to 90 degrees.
#[inline]
pub(super) fn is_vertical_wall(angle: f32) -> bool {
    angle.round() == 90.0
}

pub(super) struct Resolution<'c, Q> {
    pub(super) config: &'c ControllerConfig,
    pub(super) query: &'c Q,
    pub(super) bounds: BoundingBox,
    pub(super) origins: RaycastOrigins,
    pub(super) state: CollisionState,
    pub(super) delta: Vec2,
    pub(super) going_up_slope: bool,
    pub(super) slope_walked: bool,
    pub(super) ignore_one_way: bool,
    pub(super) hits: Vec<RaycastHit>,
}

impl<'c, Q: SpatialQuery> Resolution<'c, Q> {
    pub(super) fn new(
        config: &'c ControllerConfig,
        query: &'c Q,
        bounds: BoundingBox,
        previous: &CollisionState,
        displacement: Vec2,
        ignore_one_way: bool,
    ) -> Self {
        Self {
            config,
            query,
            bounds,
            origins: RaycastOrigins::from_bounds(&bounds, config.skin_width),
            state: CollisionState::carried_from(previous),
            delta: displacement,
            going_up_slope: false,
            slope_walked: false,
            ignore_one_way,
            hits: Vec::new(),
        }
    }

    #[inline]
    pub(super) fn skin(&self) -> f32 {
        self.config.skin_width
    }

    /// Cast a ray, dropping hits from rays that started inside a collider.
    ///
    /// A moving platform pushed into a resting actor must not pin it in place.
    pub(super) fn cast(
        &self,
        origin: Vec2,
        direction: Vec2,
        distance: f32,
        mask: LayerMask,
    ) -> Option<RaycastHit> {
        if !(distance > 0.0) || direction == Vec2::ZERO {
            return None;
        }
        self.query
            .raycast(origin, direction, distance, mask)
            .filter(|hit| hit.distance > ZERO_DISTANCE)
    }

    /// Mask for rays that may stand on one-way platforms.
    #[inline]
    pub(super) fn ground_mask(&self) -> LayerMask {
        if self.ignore_one_way {
            self.config.solid_mask()
        } else {
            self.config.platform_mask
        }
    }

    /// Mask for rays that must pass through one-way platforms.
    #[inline]
    pub(super) fn solid_mask(&self) -> LayerMask {
        self.config.solid_mask()
    }

    pub(super) fn snap_small_components(&mut self) {
        let epsilon = self.config.zero_displacement_epsilon;
        if self.delta.x.abs() < epsilon {
            self.delta.x = 0.0;
        }
        if self.delta.y.abs() < epsilon {
            self.delta.y = 0.0;
        }
    }

    /// Probe both bottom corners at the post-move position.
    fn probe_full_footing(&self) -> bool {
        let moved = self.bounds.translated(self.delta);
        let origins = RaycastOrigins::from_bounds(&moved, self.skin());

        // On a ramp the downhill corner hangs above the surface by up to
        // width * tan(angle).
        let slope_reach = if self.state.slope_angle.abs() > ANGLE_EPSILON {
            origins.width() * self.state.slope_angle.abs().to_radians().tan()
        } else {
            0.0
        };
        let distance = self.skin() + self.config.ground_probe_distance + slope_reach;
        let mask = self.ground_mask();

        [origins.bottom_left, origins.bottom_right]
            .into_iter()
            .all(|corner| self.cast(corner, Vec2::NEG_Y, distance, mask).is_some())
    }

    pub(super) fn finish(mut self, original: Vec2, now: f32) -> MoveResult {
        if self.config.check_fully_grounded && self.state.below {
            self.state.is_fully_grounded = self.probe_full_footing();
        }
        if self.state.below {
            self.state.last_time_grounded = now;
        }
        self.state.became_grounded_this_frame =
            !self.state.was_grounded_last_frame && self.state.below;

        MoveResult {
            collision_state: self.state,
            adjusted_displacement: self.delta,
            original_displacement: original,
            is_going_up_slope: self.going_up_slope,
            hits: self.hits,
        }
    }
}
