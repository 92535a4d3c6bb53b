//! Push off a wall.

use ledgewalk_physics::SpatialQuery;

use crate::actor::{ActorBody, Facing};
use crate::handler::{BehaviorHandler, Expiry, HandlerStatus};
use crate::input::Frame;

/// Push away from a wall. Horizontal input is locked out until the push
/// expires or the actor lands.
#[derive(Debug, Clone)]
pub struct WallJump {
    direction: f32,
    until: f32,
    launched: bool,
}

impl WallJump {
    /// `direction` points away from the wall.
    pub fn new(direction: f32, until: f32) -> Self {
        Self {
            direction: direction.signum(),
            until,
            launched: false,
        }
    }
}

impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for WallJump {
    fn name(&self) -> &str {
        "wall_jump"
    }

    fn expiry(&self) -> Expiry {
        Expiry::At(self.until)
    }

    fn do_update(&mut self, body: &mut ActorBody<Q>, frame: &Frame) -> HandlerStatus {
        if !self.launched {
            self.launched = true;
            body.velocity.x = self.direction * body.config.wall_jump_speed_x;
            body.velocity.y = body.config.wall_jump_speed_y;
            if let Some(facing) = Facing::from_direction(self.direction) {
                body.facing = facing;
            }
        } else if body.is_grounded() {
            return HandlerStatus::Done;
        }

        body.apply_gravity(frame.dt);
        body.move_by_velocity(frame.dt);
        HandlerStatus::Continue
    }
}
