//! The handler stack.
//!
//! Only the top handler runs. When it finishes, it is popped and the handler
//! beneath it runs in the same tick, until one keeps going. A stack that
//! runs out of handlers is a setup error.

use crate::error::BehaviorError;
use crate::handler::{BehaviorHandler, HandlerId, HandlerStatus};
use crate::input::Frame;

struct Slot<C> {
    id: HandlerId,
    handler: Box<dyn BehaviorHandler<C>>,
    disposed: bool,
}

impl<C> Slot<C> {
    fn dispose(&mut self) {
        if !self.disposed {
            self.disposed = true;
            self.handler.dispose();
        }
    }

    /// Leave the stack as the active handler.
    fn retire(&mut self, ctx: &mut C) {
        self.handler.on_before_pop(ctx);
        self.dispose();
    }
}

/// Stack of [`BehaviorHandler`]s driving one context.
pub struct HandlerStack<C> {
    slots: Vec<Slot<C>>,
    next_id: u64,
    /// Clock of the last update, used to expire handlers exposed by removal.
    now: f32,
}

impl<C> Default for HandlerStack<C> {
    fn default() -> Self {
        Self {
            slots: Vec::new(),
            next_id: 1,
            now: 0.0,
        }
    }
}

impl<C> HandlerStack<C> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stack with `base` as its only handler.
    pub fn with_base(base: Box<dyn BehaviorHandler<C>>) -> (Self, HandlerId) {
        let mut stack = Self::new();
        let id = stack.push(base);
        (stack, id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Name of the handler that runs next tick.
    pub fn active_name(&self) -> Option<&str> {
        self.slots.last().map(|slot| slot.handler.name())
    }

    pub fn active_id(&self) -> Option<HandlerId> {
        self.slots.last().map(|slot| slot.id)
    }

    pub fn contains(&self, id: HandlerId) -> bool {
        self.slots.iter().any(|slot| slot.id == id)
    }

    /// Handler names from bottom to top.
    pub fn names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.handler.name()).collect()
    }

    // ========================================================================
    // Running
    // ========================================================================

    /// Run the active handler for one tick, collapsing finished handlers.
    pub fn update(&mut self, ctx: &mut C, frame: &Frame) -> Result<(), BehaviorError> {
        self.now = frame.now;

        loop {
            let slot = self.slots.last_mut().ok_or(BehaviorError::EmptyStack)?;

            let status = if slot.handler.expiry().is_expired(frame.now) {
                log::debug!("{} expired at {:.3}", slot.handler.name(), frame.now);
                HandlerStatus::Done
            } else {
                slot.handler.do_update(ctx, frame)
            };

            match status {
                HandlerStatus::Continue => {
                    slot.handler.on_after_update(ctx, frame);
                    return Ok(());
                }
                HandlerStatus::Done => self.pop_active(ctx),
            }
        }
    }

    // ========================================================================
    // Editing
    // ========================================================================

    /// Push `handler` on top. It is active from the next update.
    pub fn push(&mut self, handler: Box<dyn BehaviorHandler<C>>) -> HandlerId {
        let id = HandlerId(self.next_id);
        self.next_id += 1;
        log::debug!("push {} {id}", handler.name());
        self.slots.push(Slot {
            id,
            handler,
            disposed: false,
        });
        id
    }

    /// Pop the active handler.
    ///
    /// Handlers exposed by the pop that have already expired are popped too.
    pub fn pop(&mut self, ctx: &mut C) -> Result<(), BehaviorError> {
        if self.slots.len() <= 1 {
            return Err(BehaviorError::LastHandler);
        }
        self.pop_active(ctx);
        self.collapse_expired(ctx)
    }

    /// Remove the handler with `id` from anywhere in the stack.
    ///
    /// Removing the active handler follows the [`pop`](Self::pop) rules;
    /// anything beneath it is only disposed.
    pub fn remove(&mut self, ctx: &mut C, id: HandlerId) -> Result<(), BehaviorError> {
        let index = self
            .slots
            .iter()
            .position(|slot| slot.id == id)
            .ok_or(BehaviorError::UnknownHandler(id))?;

        if index + 1 == self.slots.len() {
            return self.pop(ctx);
        }

        let mut slot = self.slots.remove(index);
        log::debug!("remove {} {id}", slot.handler.name());
        slot.dispose();
        Ok(())
    }

    /// Replace the handler at `index` (0 is the bottom) in place.
    ///
    /// Replacing the active handler retires the outgoing one as a pop would;
    /// otherwise it is only disposed and the active handler is untouched.
    pub fn exchange(
        &mut self,
        ctx: &mut C,
        index: usize,
        handler: Box<dyn BehaviorHandler<C>>,
    ) -> Result<HandlerId, BehaviorError> {
        let len = self.slots.len();
        if index >= len {
            return Err(BehaviorError::IndexOutOfRange { index, len });
        }

        let id = HandlerId(self.next_id);
        self.next_id += 1;
        let mut outgoing = std::mem::replace(
            &mut self.slots[index],
            Slot {
                id,
                handler,
                disposed: false,
            },
        );
        log::debug!(
            "exchange {} for {} {id}",
            outgoing.handler.name(),
            self.slots[index].handler.name()
        );

        if index + 1 == len {
            outgoing.retire(ctx);
            self.collapse_expired(ctx)?;
        } else {
            outgoing.dispose();
        }
        Ok(id)
    }

    /// Dispose every handler top to bottom and start over with `base`.
    pub fn reset(&mut self, base: Box<dyn BehaviorHandler<C>>) -> HandlerId {
        self.dispose_all();
        self.push(base)
    }

    fn pop_active(&mut self, ctx: &mut C) {
        if let Some(mut slot) = self.slots.pop() {
            log::debug!("pop {} {}", slot.handler.name(), slot.id);
            slot.retire(ctx);
        }
    }

    /// Pop expired handlers off the top without running anything.
    fn collapse_expired(&mut self, ctx: &mut C) -> Result<(), BehaviorError> {
        loop {
            let slot = self.slots.last().ok_or(BehaviorError::EmptyStack)?;
            if !slot.handler.expiry().is_expired(self.now) {
                return Ok(());
            }
            self.pop_active(ctx);
        }
    }

    fn dispose_all(&mut self) {
        while let Some(mut slot) = self.slots.pop() {
            slot.dispose();
        }
    }
}

impl<C> Drop for HandlerStack<C> {
    fn drop(&mut self) {
        self.dispose_all();
    }
}

impl<C> std::fmt::Debug for HandlerStack<C> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HandlerStack")
            .field("handlers", &self.names())
            .field("now", &self.now)
            .finish()
    }
}
