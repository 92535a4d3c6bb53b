//! Ledgewalk Physics
//!
//! Raycast-based kinematic collision for 2D platformer actors. Actors are
//! axis-aligned boxes moved by explicit displacements; the resolver clamps
//! each displacement against the level and reports what was touched.
//!
//! # Architecture
//!
//! - **Collision**: The [`SpatialQuery`] raycast seam plus a parry2d-backed
//!   [`CollisionWorld`]
//! - **Controller**: Resolves displacements against any `SpatialQuery`
//!
//! The resolver holds no global state. The level is injected at
//! construction and may be shared through `&`, `Rc` or `Arc`.

pub mod collision;
pub mod controller;
pub mod error;

// Re-export commonly used types
pub use collision::{CollisionWorld, LayerMask, RaycastHit, SpatialQuery};
pub use controller::{
    BoundingBox, CharacterController, CollisionState, ControllerConfig, ControllerEvent,
    MoveResult, SlideDirection, SlopeSpeedCurve, WallState,
};
pub use error::ConfigError;
