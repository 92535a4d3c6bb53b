//! The handler contract.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::input::Frame;

/// Handle returned when a handler is pushed, used to remove it later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HandlerId(pub u64);

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// When a handler stops being eligible to run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub enum Expiry {
    #[default]
    Never,
    /// Expired once the clock reaches this time.
    At(f32),
}

impl Expiry {
    #[inline]
    pub fn is_expired(self, now: f32) -> bool {
        match self {
            Self::Never => false,
            Self::At(deadline) => now >= deadline,
        }
    }
}

/// Outcome of one [`BehaviorHandler::do_update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerStatus {
    /// Stay active; `on_after_update` runs next.
    Continue,
    /// Finished; the handler is popped and the one beneath runs this tick.
    Done,
}

/// One mode of an actor's behavior (walking, flinching, wall jumping, ...).
///
/// Only the top handler of a stack runs each tick. `C` is the state handlers
/// drive, normally an [`ActorBody`](crate::ActorBody).
///
/// Lifecycle, per tick, for the active handler:
///
/// 1. If [`expiry`](Self::expiry) has passed it is treated as done without
///    running.
/// 2. Otherwise [`do_update`](Self::do_update) runs.
/// 3. `Continue` calls [`on_after_update`](Self::on_after_update).
/// 4. `Done` calls [`on_before_pop`](Self::on_before_pop) then
///    [`dispose`](Self::dispose), and the next handler down runs.
///
/// `dispose` is called exactly once for every handler that leaves the stack,
/// whether it finished, was removed, replaced or reset away.
pub trait BehaviorHandler<C> {
    /// Short name for logs.
    fn name(&self) -> &str;

    fn expiry(&self) -> Expiry {
        Expiry::Never
    }

    fn do_update(&mut self, ctx: &mut C, frame: &Frame) -> HandlerStatus;

    fn on_after_update(&mut self, _ctx: &mut C, _frame: &Frame) {}

    /// Runs when this handler leaves the stack while it is the active one.
    fn on_before_pop(&mut self, _ctx: &mut C) {}

    fn dispose(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        assert!(!Expiry::Never.is_expired(f32::MAX));
        assert!(!Expiry::At(1.0).is_expired(0.99));
        assert!(Expiry::At(1.0).is_expired(1.0));
        assert!(Expiry::At(1.0).is_expired(2.0));
    }

    #[test]
    fn test_handler_id_display() {
        assert_eq!(HandlerId(7).to_string(), "#7");
    }
}
