//! An actor: a resolver-backed body driven by a handler stack.

use glam::Vec2;
use ledgewalk_physics::{CharacterController, ControllerEvent, SpatialQuery};
use serde::{Deserialize, Serialize};

use crate::config::ActorConfig;
use crate::error::BehaviorError;
use crate::handler::{BehaviorHandler, HandlerId};
use crate::input::Frame;
use crate::stack::HandlerStack;

/// Handlers that drive an [`ActorBody`].
pub type ActorHandler<Q> = Box<dyn BehaviorHandler<ActorBody<Q>>>;

/// Which way the actor is looking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }

    /// Facing for a horizontal direction; `None` for zero.
    pub fn from_direction(x: f32) -> Option<Self> {
        if x > 0.0 {
            Some(Self::Right)
        } else if x < 0.0 {
            Some(Self::Left)
        } else {
            None
        }
    }
}

/// Stack edits queued by handlers while they are being updated.
pub enum StackRequest<Q> {
    Push(ActorHandler<Q>),
    Remove(HandlerId),
}

impl<Q> std::fmt::Debug for StackRequest<Q> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Push(handler) => write!(f, "Push({})", handler.name()),
            Self::Remove(id) => write!(f, "Remove({id})"),
        }
    }
}

/// Everything a handler may touch.
pub struct ActorBody<Q> {
    pub controller: CharacterController<Q>,
    pub velocity: Vec2,
    pub facing: Facing,
    pub config: ActorConfig,
    events: Vec<ControllerEvent>,
    requests: Vec<StackRequest<Q>>,
}

impl<Q: SpatialQuery> ActorBody<Q> {
    fn new(controller: CharacterController<Q>, config: ActorConfig) -> Self {
        Self {
            controller,
            velocity: Vec2::ZERO,
            facing: Facing::default(),
            config,
            events: Vec::new(),
            requests: Vec::new(),
        }
    }

    #[inline]
    pub fn is_grounded(&self) -> bool {
        self.controller.is_grounded()
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.controller.position()
    }

    /// Accelerate downward for one tick.
    pub fn apply_gravity(&mut self, dt: f32) {
        self.velocity.y -= self.config.gravity * dt;
    }

    /// Ease horizontal speed toward `target`.
    pub fn approach_horizontal(&mut self, target: f32, damping: f32, dt: f32) {
        let t = (damping * dt).min(1.0);
        self.velocity.x += (target - self.velocity.x) * t;
    }

    /// Move by `velocity * dt` through the resolver, then take the velocity
    /// the resolver actually allowed.
    pub fn move_by_velocity(&mut self, dt: f32) {
        let events = self.controller.move_by(self.velocity * dt);
        self.events.extend(events);
        self.velocity = self.controller.velocity();
    }

    /// Push `handler` once the current update finishes.
    pub fn request_push(&mut self, handler: ActorHandler<Q>) {
        self.requests.push(StackRequest::Push(handler));
    }

    /// Remove a handler once the current update finishes.
    pub fn request_remove(&mut self, id: HandlerId) {
        self.requests.push(StackRequest::Remove(id));
    }

    /// Resolver notifications collected since the last tick.
    pub fn events(&self) -> &[ControllerEvent] {
        &self.events
    }
}

/// A body plus the handler stack driving it.
///
/// # Example
///
/// ```ignore
/// let mut actor = Actor::new(controller, ActorConfig::default(), Box::new(Locomotion::new()))?;
///
/// // Each tick:
/// let events = actor.update(&Frame::new(now, dt, input))?;
/// ```
pub struct Actor<Q> {
    body: ActorBody<Q>,
    stack: HandlerStack<ActorBody<Q>>,
}

impl<Q: SpatialQuery> Actor<Q> {
    /// Create an actor with `base` as its persistent bottom handler.
    pub fn new(
        controller: CharacterController<Q>,
        config: ActorConfig,
        base: ActorHandler<Q>,
    ) -> Result<Self, BehaviorError> {
        config.validate()?;
        let (stack, _) = HandlerStack::with_base(base);
        Ok(Self {
            body: ActorBody::new(controller, config),
            stack,
        })
    }

    /// Run one tick: set the resolver clock, run the active handler and
    /// apply any stack edits it queued.
    ///
    /// Returns the resolver notifications produced this tick. An error means
    /// the stack emptied or a queued edit tried to remove the last handler;
    /// the actor should stop being updated.
    ///
    /// Queued removals of handlers that are already gone are skipped.
    pub fn update(&mut self, frame: &Frame) -> Result<Vec<ControllerEvent>, BehaviorError> {
        self.body.controller.set_clock(frame.now, frame.dt);

        if let Err(err) = self.stack.update(&mut self.body, frame) {
            log::error!("actor update aborted: {err}");
            return Err(err);
        }
        if let Err(err) = self.apply_requests() {
            log::error!("actor update aborted: {err}");
            return Err(err);
        }

        Ok(std::mem::take(&mut self.body.events))
    }

    /// Apply every queued edit in order. The first fatal error is returned
    /// after the whole batch has been applied.
    fn apply_requests(&mut self) -> Result<(), BehaviorError> {
        let mut fatal = None;
        for request in std::mem::take(&mut self.body.requests) {
            match request {
                StackRequest::Push(handler) => {
                    self.stack.push(handler);
                }
                StackRequest::Remove(id) => match self.stack.remove(&mut self.body, id) {
                    Ok(()) => {}
                    Err(BehaviorError::UnknownHandler(id)) => {
                        log::warn!("skipping removal of unknown handler {id}");
                    }
                    Err(err) => {
                        fatal.get_or_insert(err);
                    }
                },
            }
        }
        fatal.map_or(Ok(()), Err)
    }

    // ========================================================================
    // Stack
    // ========================================================================

    pub fn push_handler(&mut self, handler: ActorHandler<Q>) -> HandlerId {
        self.stack.push(handler)
    }

    pub fn pop_handler(&mut self) -> Result<(), BehaviorError> {
        self.stack.pop(&mut self.body)
    }

    pub fn remove_handler(&mut self, id: HandlerId) -> Result<(), BehaviorError> {
        self.stack.remove(&mut self.body, id)
    }

    pub fn exchange_handler(
        &mut self,
        index: usize,
        handler: ActorHandler<Q>,
    ) -> Result<HandlerId, BehaviorError> {
        self.stack.exchange(&mut self.body, index, handler)
    }

    pub fn reset_handlers(&mut self, base: ActorHandler<Q>) -> HandlerId {
        self.stack.reset(base)
    }

    #[inline]
    pub fn handler_count(&self) -> usize {
        self.stack.len()
    }

    #[inline]
    pub fn active_handler(&self) -> Option<&str> {
        self.stack.active_name()
    }

    // ========================================================================
    // Body
    // ========================================================================

    #[inline]
    pub fn body(&self) -> &ActorBody<Q> {
        &self.body
    }

    #[inline]
    pub fn body_mut(&mut self) -> &mut ActorBody<Q> {
        &mut self.body
    }

    #[inline]
    pub fn position(&self) -> Vec2 {
        self.body.position()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handler::{Expiry, HandlerStatus};
    use crate::handlers::{Knockback, Locomotion};
    use crate::input::ActorInput;
    use ledgewalk_physics::{BoundingBox, CollisionWorld, ControllerConfig, LayerMask};

    const DT: f32 = 1.0 / 60.0;

    /// Floor spanning x in [-20, 20] with its top at y = 0.
    fn create_test_world() -> CollisionWorld {
        let mut world = CollisionWorld::new();
        world.add_box(Vec2::new(0.0, -1.0), Vec2::new(20.0, 1.0), LayerMask::SOLID);
        world
    }

    fn actor_at(world: &CollisionWorld, center: Vec2) -> Actor<&CollisionWorld> {
        let bounds = BoundingBox::new(center, Vec2::new(0.5, 1.0));
        let controller = CharacterController::new(world, bounds, ControllerConfig::default()).unwrap();
        Actor::new(controller, ActorConfig::default(), Box::new(Locomotion::new())).unwrap()
    }

    /// Pushes a handler on its first update, then keeps running.
    struct Spawner {
        spawned: bool,
    }

    struct Marker;

    impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for Marker {
        fn name(&self) -> &str {
            "marker"
        }

        fn expiry(&self) -> Expiry {
            Expiry::At(1.0)
        }

        fn do_update(&mut self, _body: &mut ActorBody<Q>, _frame: &Frame) -> HandlerStatus {
            HandlerStatus::Continue
        }
    }

    impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for Spawner {
        fn name(&self) -> &str {
            "spawner"
        }

        fn do_update(&mut self, body: &mut ActorBody<Q>, _frame: &Frame) -> HandlerStatus {
            if !self.spawned {
                self.spawned = true;
                body.request_push(Box::new(Marker));
            }
            HandlerStatus::Continue
        }
    }

    /// Queues a fixed batch of stack edits on its first update.
    struct Editor {
        remove: Vec<HandlerId>,
        sent: bool,
    }

    impl<Q: SpatialQuery> BehaviorHandler<ActorBody<Q>> for Editor {
        fn name(&self) -> &str {
            "editor"
        }

        fn do_update(&mut self, body: &mut ActorBody<Q>, _frame: &Frame) -> HandlerStatus {
            if !self.sent {
                self.sent = true;
                for &id in &self.remove {
                    body.request_remove(id);
                }
                body.request_push(Box::new(Marker));
            }
            HandlerStatus::Continue
        }
    }

    #[test]
    fn test_falls_and_lands() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 3.0));

        let mut landed = false;
        for i in 0..120 {
            let events = actor.update(&Frame::idle(i as f32 * DT, DT)).unwrap();
            landed |= events.contains(&ControllerEvent::BecameGrounded);
        }

        assert!(landed);
        assert!(actor.body().is_grounded());
        assert!((actor.position().y - 1.0).abs() < 0.01);
        assert!(actor.body().velocity.y.abs() < 0.01);
    }

    #[test]
    fn test_deferred_push_applies_after_tick() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.reset_handlers(Box::new(Spawner { spawned: false }));

        actor.update(&Frame::idle(0.0, DT)).unwrap();
        assert_eq!(actor.handler_count(), 2);
        assert_eq!(actor.active_handler(), Some("marker"));

        // Expires without running and hands back to the spawner.
        actor.update(&Frame::idle(1.0, DT)).unwrap();
        assert_eq!(actor.active_handler(), Some("spawner"));
        assert_eq!(actor.handler_count(), 1);
    }

    #[test]
    fn test_knockback_then_control_returns() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        actor.update(&Frame::idle(0.0, DT)).unwrap();
        assert!(actor.body().is_grounded());

        let until = DT + actor.body().config.knockback_duration;
        actor.push_handler(Box::new(Knockback::new(1.0, until)));
        actor.update(&Frame::idle(DT, DT)).unwrap();
        assert_eq!(actor.active_handler(), Some("knockback"));
        assert!(actor.body().velocity.x > 0.0);

        // Input is ignored while flinching.
        let left = ActorInput {
            horizontal: -1.0,
            ..Default::default()
        };
        actor.update(&Frame::new(2.0 * DT, DT, left)).unwrap();
        assert!(actor.body().velocity.x >= 0.0);

        actor.update(&Frame::new(until, DT, left)).unwrap();
        assert_eq!(actor.active_handler(), Some("locomotion"));
        assert_eq!(actor.handler_count(), 1);
        assert!(actor.body().velocity.x < 0.0);
    }

    #[test]
    fn test_remove_and_exchange_through_actor() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));

        let id = actor.push_handler(Box::new(Knockback::new(1.0, 10.0)));
        assert_eq!(actor.handler_count(), 2);
        actor.remove_handler(id).unwrap();
        assert_eq!(actor.handler_count(), 1);
        assert_eq!(actor.remove_handler(id), Err(BehaviorError::UnknownHandler(id)));

        actor.exchange_handler(0, Box::new(Locomotion::new())).unwrap();
        assert_eq!(actor.active_handler(), Some("locomotion"));
        assert_eq!(actor.pop_handler(), Err(BehaviorError::LastHandler));
    }

    #[test]
    fn test_deferred_remove_skips_stale_ids() {
        let world = create_test_world();
        let mut actor = actor_at(&world, Vec2::new(0.0, 1.0));
        let lower = actor.push_handler(Box::new(Knockback::new(1.0, 10.0)));
        actor.push_handler(Box::new(Editor {
            remove: vec![HandlerId(999), lower],
            sent: false,
        }));
        assert_eq!(actor.handler_count(), 3);

        // The stale id is skipped; the lower removal and the push still land.
        assert!(actor.update(&Frame::idle(0.0, DT)).is_ok());
        assert_eq!(actor.handler_count(), 3);
        assert_eq!(actor.active_handler(), Some("marker"));

        actor.pop_handler().unwrap();
        assert_eq!(actor.active_handler(), Some("editor"));
        actor.pop_handler().unwrap();
        assert_eq!(actor.active_handler(), Some("locomotion"));
    }

    #[test]
    fn test_deferred_remove_of_last_handler_fails() {
        let world = create_test_world();
        let bounds = BoundingBox::new(Vec2::new(0.0, 1.0), Vec2::new(0.5, 1.0));
        let controller = CharacterController::new(&world, bounds, ControllerConfig::default()).unwrap();
        let base = Box::new(Editor {
            remove: Vec::new(),
            sent: true,
        });
        let mut actor = Actor::new(controller, ActorConfig::default(), base).unwrap();
        let base_id = actor.stack.active_id().unwrap();
        actor.body_mut().request_remove(base_id);
        actor.body_mut().request_push(Box::new(Marker));

        assert_eq!(actor.update(&Frame::idle(0.0, DT)), Err(BehaviorError::LastHandler));
        // The rest of the batch was still applied.
        assert_eq!(actor.handler_count(), 2);
        assert_eq!(actor.active_handler(), Some("marker"));
    }

    #[test]
    fn test_rejects_bad_config() {
        let world = create_test_world();
        let bounds = BoundingBox::new(Vec2::ZERO, Vec2::new(0.5, 1.0));
        let controller = CharacterController::new(&world, bounds, ControllerConfig::default()).unwrap();
        let config = ActorConfig {
            gravity: f32::NAN,
            ..Default::default()
        };

        let result = Actor::new(controller, config, Box::new(Locomotion::new()));
        assert!(matches!(result, Err(BehaviorError::Config(_))));
    }
}
