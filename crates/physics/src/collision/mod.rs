//! Level collision queries.
//!
//! The resolver only ever asks one question of the level: "where does this
//! ray stop?". That question is the [`SpatialQuery`] trait. [`CollisionWorld`]
//! is a ready-made implementation over parry2d shapes.
//!
//! # Key Types
//!
//! - [`SpatialQuery`]: The raycast capability injected into the resolver
//! - [`RaycastHit`]: Nearest surface a ray ran into
//! - [`LayerMask`]: Layer bits used to filter what a ray can hit

mod flags;
mod hit;
mod query;
mod world;

pub use flags::LayerMask;
pub use hit::{surface_angle, ColliderId, RaycastHit};
pub use query::SpatialQuery;
pub use world::{Collider, CollisionWorld};
