//! Ledgewalk Behavior
//!
//! Stack-based behavior machine for platformer actors. Each actor runs
//! exactly one handler per tick, the top of its stack:
//!
//! ```text
//! ┌──────────────┐
//! │ WallJump     │◄── active: runs this tick
//! ├──────────────┤
//! │ Knockback    │    resumes when the handler above finishes
//! ├──────────────┤
//! │ Locomotion   │    persistent base
//! └──────────────┘
//! ```
//!
//! Handlers move the actor through its [`CharacterController`]. They cannot
//! edit the stack while it is running them; edits are queued on the
//! [`ActorBody`] and applied after the tick.
//!
//! [`CharacterController`]: ledgewalk_physics::CharacterController

pub mod actor;
pub mod config;
pub mod error;
pub mod handler;
pub mod handlers;
pub mod input;
pub mod stack;

// Re-export main types
pub use actor::{Actor, ActorBody, ActorHandler, Facing, StackRequest};
pub use config::ActorConfig;
pub use error::BehaviorError;
pub use handler::{BehaviorHandler, Expiry, HandlerId, HandlerStatus};
pub use input::{ActorInput, ButtonState, Frame};
pub use stack::HandlerStack;
