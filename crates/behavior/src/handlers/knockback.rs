//! Damage flinch.

use ledgewalk_physics::SpatialQuery;

use crate::actor::ActorBody;
use crate::handler::{BehaviorHandler, Expiry, HandlerStatus};
use crate::input::Frame;

/// Flinch after taking a hit: launched away from the source, no control
/// until `until`.
#[derive(Debug, Clone)]
pub struct Knockback {
    direction: f32,
    until: f32,
    launched: bool,
}

impl Knockback {
    /// `direction` is the sign of the horizontal launch.
    pub fn new(direction: f32, until: f32) -> Self {
        Self {
            direction: direction.signum(),
            until,
            launched: false,
        }
    }
}

impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for Knockback {
    fn name(&self) -> &str {
        "knockback"
    }

    fn expiry(&self) -> Expiry {
        Expiry::At(self.until)
    }

    fn do_update(&mut self, body: &mut ActorBody<Q>, frame: &Frame) -> HandlerStatus {
        let config = body.config;
        if !self.launched {
            self.launched = true;
            body.velocity.x = self.direction * config.knockback_speed_x;
            body.velocity.y = config.knockback_speed_y;
        } else {
            body.approach_horizontal(0.0, config.air_damping, frame.dt);
        }

        body.apply_gravity(frame.dt);
        body.move_by_velocity(frame.dt);
        HandlerStatus::Continue
    }

    fn on_before_pop(&mut self, body: &mut ActorBody<Q>) {
        body.velocity.x = 0.0;
    }
}
