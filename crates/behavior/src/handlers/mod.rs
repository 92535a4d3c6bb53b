//! Stock handlers.
//!
//! - [`Locomotion`]: Persistent base; running, jumping, gravity
//! - [`Knockback`]: Damage flinch that ignores input until it expires
//! - [`WallJump`]: Short push away from a wall

mod knockback;
mod locomotion;
mod wall_jump;

pub use knockback::Knockback;
pub use locomotion::Locomotion;
pub use wall_jump::WallJump;
