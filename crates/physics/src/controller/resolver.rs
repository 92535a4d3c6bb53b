//! The public resolver.
//!
//! [`CharacterController`] owns the actor's box and the last committed
//! [`CollisionState`]. Resolving never touches the actor; committing does.

use glam::Vec2;

use super::bounds::BoundingBox;
use super::config::ControllerConfig;
use super::resolve::Resolution;
use super::state::{CollisionState, ControllerEvent, MoveResult, SlideDirection};
use crate::collision::SpatialQuery;
use crate::error::ConfigError;

/// Timestep assumed until [`CharacterController::set_clock`] is called.
const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

/// Kinematic box controller for 2D platformers.
///
/// Handles:
/// - Walls, floors and ceilings
/// - Walking up and down ramps
/// - One-way platforms
/// - Edge slide-up when jumping past a ceiling corner
///
/// # Example
///
/// ```ignore
/// let mut controller = CharacterController::new(&world, bounds, ControllerConfig::default())?;
///
/// // Each frame:
/// controller.set_clock(now, dt);
/// let events = controller.move_by(velocity * dt);
/// ```
#[derive(Debug, Clone)]
pub struct CharacterController<Q> {
    query: Q,
    config: ControllerConfig,
    bounds: BoundingBox,
    state: CollisionState,
    velocity: Vec2,
    ignore_one_way: bool,
    now: f32,
    dt: f32,
}

impl<Q: SpatialQuery> CharacterController<Q> {
    /// Create a controller for a box resolved against `query`.
    ///
    /// Fails if the config is invalid or the box is too small for its skin.
    pub fn new(query: Q, bounds: BoundingBox, config: ControllerConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let half = bounds.half_extents;
        if !(half.x > config.skin_width && half.y > config.skin_width) {
            return Err(ConfigError::BoxTooSmall {
                width: half.x * 2.0,
                height: half.y * 2.0,
            });
        }

        Ok(Self {
            query,
            config,
            bounds,
            state: CollisionState::default(),
            velocity: Vec2::ZERO,
            ignore_one_way: false,
            now: 0.0,
            dt: DEFAULT_TIMESTEP,
        })
    }

    // ========================================================================
    // Resolving
    // ========================================================================

    /// Resolve `displacement` against the world without moving.
    ///
    /// Calling this twice with the same input gives the same result.
    pub fn calculate_move(&self, displacement: Vec2) -> MoveResult {
        let mut resolution = self.resolution(displacement);
        resolution.snap_small_components();

        if resolution.delta.y < 0.0 && resolution.state.was_grounded_last_frame {
            resolution.handle_down_slope();
        }
        if resolution.delta.x != 0.0 {
            resolution.move_horizontally(true);
        }
        if resolution.delta.y != 0.0 && !resolution.slope_walked {
            resolution.move_vertically();
        }

        resolution.finish(displacement, self.now)
    }

    /// Commit a resolved move and report what happened.
    pub fn perform_move(&mut self, result: MoveResult) -> Vec<ControllerEvent> {
        self.bounds = self.bounds.translated(result.adjusted_displacement);

        if self.dt > 0.0 {
            self.velocity = result.adjusted_displacement / self.dt;
        }
        // Climbing a ramp is not falling; keep gravity from building up.
        if result.is_going_up_slope {
            self.velocity.y = 0.0;
        }

        let state = result.collision_state;
        let mut events: Vec<ControllerEvent> =
            result.hits.into_iter().map(ControllerEvent::Collided).collect();
        if state.became_grounded_this_frame {
            log::trace!("became grounded at {:?}", self.bounds.center);
            events.push(ControllerEvent::BecameGrounded);
        }
        if state.lost_ground_this_frame() {
            log::trace!("lost ground at {:?}", self.bounds.center);
            events.push(ControllerEvent::LostGround);
        }

        self.state = state;
        self.ignore_one_way = false;
        events
    }

    /// Resolve and commit in one step.
    pub fn move_by(&mut self, displacement: Vec2) -> Vec<ControllerEvent> {
        let result = self.calculate_move(displacement);
        self.perform_move(result)
    }

    /// Resolve a forced slide off one edge, e.g. when pushed off a platform.
    ///
    /// The slide follows the surface under the leading bottom corner, or drops
    /// at 45 degrees when there is none. Only walls and floors clamp it.
    pub fn slide_down(&self, direction: SlideDirection, speed: f32) -> Result<MoveResult, ConfigError> {
        if !(speed.is_finite() && speed > 0.0) {
            return Err(ConfigError::InvalidSlideSpeed(speed));
        }

        let mut resolution = self.resolution(Vec2::ZERO);
        let corner = match direction {
            SlideDirection::Left => resolution.origins.bottom_left,
            SlideDirection::Right => resolution.origins.bottom_right,
        };
        let reach = resolution.origins.width();
        let theta = resolution
            .cast(corner, Vec2::NEG_Y, reach, resolution.ground_mask())
            .map_or(45.0_f32, |hit| hit.surface_angle())
            .to_radians();

        let displacement = Vec2::new(direction.sign() * speed * theta.cos(), -speed * theta.sin());
        resolution.delta = displacement;
        resolution.snap_small_components();

        if resolution.delta.x != 0.0 {
            resolution.move_horizontally(false);
        }
        if resolution.delta.y != 0.0 {
            let mask = resolution.ground_mask();
            resolution.clamp_vertically(mask);
        }

        Ok(resolution.finish(displacement, self.now))
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Ground within `distance` below the box.
    pub fn is_floor_within_distance(&self, distance: f32) -> bool {
        if !(distance.is_finite() && distance >= 0.0) {
            return false;
        }
        self.resolution(Vec2::ZERO).floor_within(distance)
    }

    /// Whether the box could move `distance` vertically without hitting
    /// anything. Used by jump logic before committing to a jump.
    ///
    /// With `allow_edge_assist`, ceiling hits near either top corner are
    /// ignored since edge slide-up will carry the actor past them.
    pub fn can_move_vertically(&self, distance: f32, allow_edge_assist: bool) -> bool {
        if !distance.is_finite() {
            return false;
        }
        self.resolution(Vec2::ZERO)
            .vertical_clearance(distance, allow_edge_assist)
    }

    // ========================================================================
    // State
    // ========================================================================

    /// Teleport to `position`. Clears collision state and velocity.
    pub fn warp_to(&mut self, position: Vec2) {
        self.bounds.center = position;
        self.state = CollisionState {
            last_time_grounded: self.state.last_time_grounded,
            ..Default::default()
        };
        self.velocity = Vec2::ZERO;
    }

    /// Set the time stamped into `last_time_grounded` and the timestep used
    /// to derive velocity.
    pub fn set_clock(&mut self, now: f32, dt: f32) {
        self.now = now;
        self.dt = dt;
    }

    /// Drop through one-way platforms for the next committed move only.
    pub fn set_ignore_one_way_platforms(&mut self, ignore: bool) {
        self.ignore_one_way = ignore;
    }

    #[inline]
    pub fn bounds(&self) -> BoundingBox {
        self.bounds
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.bounds.center
    }

    #[inline]
    pub fn collision_state(&self) -> &CollisionState {
        &self.state
    }

    /// Velocity implied by the last committed move.
    #[inline]
    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    #[inline]
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    #[inline]
    pub fn query(&self) -> &Q {
        &self.query
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.state.below
    }

    fn resolution(&self, displacement: Vec2) -> Resolution<'_, Q> {
        Resolution::new(
            &self.config,
            &self.query,
            self.bounds,
            &self.state,
            displacement,
            self.ignore_one_way,
        )
    }
}
