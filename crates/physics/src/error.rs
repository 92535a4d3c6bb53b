//! Errors raised while configuring or driving the resolver.

use thiserror::Error;

/// Setup defects and out-of-range requests.
///
/// These indicate a misconfigured actor, not a runtime condition, so callers
/// are expected to abort the actor's update rather than recover.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{axis} ray count must be at least 2, got {count}")]
    TooFewRays { axis: &'static str, count: usize },

    #[error("skin width must be positive and finite, got {0}")]
    InvalidSkinWidth(f32),

    #[error("slope limit must be within (0, 90) degrees, got {0}")]
    InvalidSlopeLimit(f32),

    #[error("slope speed curve must have at least one key")]
    EmptySlopeCurve,

    #[error("slope speed curve keys must be finite and sorted by angle (key {index})")]
    UnsortedSlopeCurve { index: usize },

    #[error("actor half extents must exceed the skin width, got {width}x{height}")]
    BoxTooSmall { width: f32, height: f32 },

    #[error("edge slide-up band must be non-negative and finite, got {0}")]
    InvalidEdgeBand(f32),

    #[error("slide speed must be positive and finite, got {0}")]
    InvalidSlideSpeed(f32),

    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidTunable { name: &'static str, value: f32 },
}
