//! Running and jumping.

use ledgewalk_physics::SpatialQuery;

use super::WallJump;
use crate::actor::{ActorBody, Facing};
use crate::handler::{BehaviorHandler, HandlerStatus};
use crate::input::Frame;

/// Base handler for player-controlled actors. Never finishes.
///
/// Each tick:
/// - Steers horizontal speed toward the input, damped differently on the
///   ground and in the air
/// - Jumps when grounded and the way up is clear (ceiling corners allowed)
/// - Hands off to [`WallJump`] when jump is pressed airborne against a wall
/// - Drops through one-way platforms on down + jump
#[derive(Debug, Clone, Default)]
pub struct Locomotion {
    /// Jumped and still rising with jump held.
    rising: bool,
    /// One-way platforms are ignored until this time.
    drop_until: f32,
}

impl Locomotion {
    pub fn new() -> Self {
        Self::default()
    }

    fn try_jump<Q: SpatialQuery>(&mut self, body: &mut ActorBody<Q>, frame: &Frame) {
        let jump_velocity = body.config.jump_velocity();
        if !body
            .controller
            .can_move_vertically(jump_velocity * frame.dt, true)
        {
            log::debug!("jump blocked by ceiling at {:?}", body.position());
            return;
        }
        body.velocity.y = jump_velocity;
        self.rising = true;
    }
}

impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for Locomotion {
    fn name(&self) -> &str {
        "locomotion"
    }

    fn do_update(&mut self, body: &mut ActorBody<Q>, frame: &Frame) -> HandlerStatus {
        let input = frame.input;
        let config = body.config;
        let state = *body.controller.collision_state();
        let grounded = state.below;

        if grounded && body.velocity.y < 0.0 {
            body.velocity.y = 0.0;
        }
        if body.velocity.y <= 0.0 {
            self.rising = false;
        }

        let horizontal = input.horizontal.clamp(-1.0, 1.0);
        if let Some(facing) = Facing::from_direction(horizontal) {
            body.facing = facing;
        }

        if input.drop_down && grounded {
            self.drop_until = frame.now + config.drop_through_duration;
        } else if input.jump_pressed {
            if grounded {
                self.try_jump(body, frame);
            } else if state.wall_state.on_any_wall() {
                let away = state.wall_state.away_direction();
                if away != 0.0 {
                    let until = frame.now + config.wall_jump_duration;
                    body.request_push(Box::new(WallJump::new(away, until)));
                }
            }
        }

        // Variable jump height.
        if self.rising && !input.jump_held {
            body.velocity.y *= config.jump_cut;
            self.rising = false;
        }

        if frame.now < self.drop_until {
            body.controller.set_ignore_one_way_platforms(true);
        }

        let damping = if grounded {
            config.ground_damping
        } else {
            config.air_damping
        };
        body.approach_horizontal(horizontal * config.run_speed, damping, frame.dt);
        body.apply_gravity(frame.dt);
        body.move_by_velocity(frame.dt);

        HandlerStatus::Continue
    }

    fn on_after_update(&mut self, body: &mut ActorBody<Q>, _frame: &Frame) {
        if body.controller.collision_state().above && body.velocity.y > 0.0 {
            body.velocity.y = 0.0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actor::Actor;
    use crate::config::ActorConfig;
    use crate::input::ActorInput;
    use glam::Vec2;
    use ledgewalk_physics::{
        BoundingBox, CharacterController, CollisionWorld, ControllerConfig, LayerMask,
    };

    const DT: f32 = 1.0 / 60.0;

    /// Floor spanning x in [-20, 20] with its top at y = 0.
    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -1.0), Vec2::new(20.0, 1.0), LayerMask::SOLID);
        world
    }

    fn actor_at(world: &CollisionWorld, center: Vec2) -> Actor<&CollisionWorld> {
        let bounds = BoundingBox::new(center, Vec2::new(0.5, 1.0));
        let controller =
            CharacterController::new(world, bounds, ControllerConfig::default()).unwrap();
        Actor::new(controller, ActorConfig::default(), Box::new(Locomotion::new())).unwrap()
    }

    fn jump() -> ActorInput {
        ActorInput {
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        }
    }

    fn hold_jump() -> ActorInput {
        ActorInput {
            jump_held: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_runs_toward_input() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        let right = ActorInput {
            horizontal: 1.0,
            ..Default::default()
        };

        for i in 0..60 {
            actor.update(&Frame::new(i as f32 * DT, DT, right)).unwrap();
        }

        let body = actor.body();
        assert!(body.is_grounded());
        assert_eq!(body.facing, Facing::Right);
        assert!((body.velocity.x - body.config.run_speed).abs() < 0.1);
        assert!(actor.position().x > 3.0);
    }

    #[test]
    fn test_jump_from_ground() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.update(&Frame::idle(0.0, DT)).unwrap();
        assert!(actor.body().is_grounded());

        actor.update(&Frame::new(DT, DT, jump())).unwrap();
        assert!(!actor.body().is_grounded());
        assert!(actor.body().velocity.y > 0.0);

        let mut peak = actor.position().y;
        for i in 2..40 {
            actor.update(&Frame::new(i as f32 * DT, DT, hold_jump())).unwrap();
            peak = peak.max(actor.position().y);
        }
        // Full jump with the button held.
        let expected = 1.0 + actor.body().config.jump_height;
        assert!((peak - expected).abs() < 0.3);
    }

    #[test]
    fn test_releasing_jump_cuts_height() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.update(&Frame::idle(0.0, DT)).unwrap();
        actor.update(&Frame::new(DT, DT, jump())).unwrap();

        let mut peak = actor.position().y;
        for i in 2..40 {
            actor.update(&Frame::idle(i as f32 * DT, DT)).unwrap();
            peak = peak.max(actor.position().y);
        }
        assert!(peak < 1.0 + actor.body().config.jump_height * 0.5);
    }

    #[test]
    fn test_jump_blocked_by_low_ceiling() {
        let mut world = create_test_world();
        // Underside 0.05 above the head.
        world.add_box(Vec2::new(0.0, 2.55), Vec2::new(3.0, 0.5), LayerMask::SOLID);
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.update(&Frame::idle(0.0, DT)).unwrap();

        actor.update(&Frame::new(DT, DT, jump())).unwrap();
        assert!(actor.body().is_grounded());
        assert!(actor.body().velocity.y <= 0.0);
    }

    #[test]
    fn test_wall_jump_hand_off() {
        let mut world = create_test_world();
        // Wall face at x = 2.
        world.add_box(Vec2::new(2.5, 5.0), Vec2::new(0.5, 5.0), LayerMask::SOLID);
        let mut actor = actor_at(&world, Vec2::new(1.4, 4.0));
        let toward = ActorInput {
            horizontal: 1.0,
            ..Default::default()
        };

        // Slam into the wall while airborne.
        actor.body_mut().velocity = Vec2::new(30.0, 0.0);
        actor.update(&Frame::new(0.0, DT, toward)).unwrap();
        assert!(actor.body().controller.collision_state().wall_state.on_right());

        let press = ActorInput {
            horizontal: 1.0,
            jump_pressed: true,
            jump_held: true,
            ..Default::default()
        };
        actor.update(&Frame::new(DT, DT, press)).unwrap();
        assert_eq!(actor.active_handler(), Some("wall_jump"));

        actor.update(&Frame::new(2.0 * DT, DT, toward)).unwrap();
        assert!(actor.body().velocity.x < 0.0);
        assert!(actor.body().velocity.y > 0.0);
        assert_eq!(actor.body().facing, Facing::Left);

        // Control returns once the push expires.
        let until = DT + actor.body().config.wall_jump_duration;
        actor.update(&Frame::new(until, DT, toward)).unwrap();
        assert_eq!(actor.active_handler(), Some("locomotion"));
        assert_eq!(actor.handler_count(), 1);
    }

    #[test]
    fn test_drop_through_one_way() {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -0.1), Vec2::new(3.0, 0.1), LayerMask::ONE_WAY_PLATFORM);
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.update(&Frame::idle(0.0, DT)).unwrap();
        assert!(actor.body().is_grounded());

        let drop = ActorInput {
            jump_pressed: true,
            jump_held: true,
            drop_down: true,
            ..Default::default()
        };
        actor.update(&Frame::new(DT, DT, drop)).unwrap();
        assert!(!actor.body().is_grounded());

        for i in 2..30 {
            actor.update(&Frame::idle(i as f32 * DT, DT)).unwrap();
        }
        assert!(actor.position().y < 0.0);
    }
}
