//! Kinematic box resolver for 2D platformers.
//!
//! Movement is resolved by casting parallel rays from the box edges it is
//! moving toward, inset by a small skin so rays never start inside a surface
//! the box is resting on. Each call runs up to three passes:
//!
//! 1. Down-slope hugging while grounded and falling
//! 2. Horizontal rays, handing climbable ramps to an iterative slope walk
//! 3. Vertical rays, with optional edge slide-up past ceiling corners
//!
//! # Key Types
//!
//! - [`CharacterController`]: Owns the box and resolves/commits moves
//! - [`ControllerConfig`]: Ray counts, skin, slope limit and assists
//! - [`MoveResult`]: Adjusted displacement plus what was touched
//! - [`CollisionState`]: Contact flags for one resolve

mod bounds;
mod config;
mod curve;
mod horizontal;
mod resolve;
mod resolver;
mod slope;
mod state;
mod vertical;

pub use bounds::{BoundingBox, RaycastOrigins};
pub use config::{ControllerConfig, SKIN_FUDGE};
pub use curve::SlopeSpeedCurve;
pub use resolver::CharacterController;
pub use state::{CollisionState, ControllerEvent, MoveResult, SlideDirection, WallState};
