//! Resolver tunables.
//!
//! Distances are in world units, angles in degrees.

use serde::{Deserialize, Serialize};

use super::curve::SlopeSpeedCurve;
use crate::collision::LayerMask;
use crate::error::ConfigError;

/// Extra margin used when deciding whether a clamped ray is flush against a
/// surface. Rays shorter than `skin_width + SKIN_FUDGE` end the pass early.
pub const SKIN_FUDGE: f32 = 0.001;

/// Configuration for the collision resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControllerConfig {
    // ========================================================================
    // Rays
    // ========================================================================
    /// Inset applied to the box before ray origins are computed.
    pub skin_width: f32,

    /// Rays cast from the leading vertical edge during the horizontal pass.
    pub horizontal_rays: usize,

    /// Rays cast from the leading horizontal edge during the vertical pass.
    pub vertical_rays: usize,

    /// Displacement components with a smaller magnitude are snapped to zero.
    pub zero_displacement_epsilon: f32,

    // ========================================================================
    // Slopes
    // ========================================================================
    /// Steepest ramp that can be walked up.
    pub slope_limit: f32,

    /// Speed multiplier by slope angle (negative = downhill).
    pub slope_speed_multiplier: SlopeSpeedCurve,

    /// Upward displacement at or above which the actor counts as jumping.
    /// Jumping actors are not glued to ramps they run into.
    pub jumping_threshold: f32,

    /// Maximum ramp segments followed by a single slope walk.
    pub max_slope_segments: usize,

    // ========================================================================
    // Layers
    // ========================================================================
    /// Layers that block movement.
    pub platform_mask: LayerMask,

    /// Subset of `platform_mask` that only blocks from above.
    pub one_way_platform_mask: LayerMask,

    // ========================================================================
    // Assists
    // ========================================================================
    /// Nudge ascending actors sideways around ceiling corners they graze.
    pub edge_slide_up: bool,

    /// Width of the corner band at each edge of the box used by edge
    /// slide-up. Hits inside the band count as grazing a corner.
    pub edge_slide_band: f32,

    /// Probe both bottom corners after moving to report full footing.
    pub check_fully_grounded: bool,

    /// Distance below the skin the fully-grounded probes reach.
    pub ground_probe_distance: f32,

    /// Distance beyond a horizontal clamp the wall probe reaches.
    pub wall_probe_margin: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            skin_width: 0.02,
            horizontal_rays: 8,
            vertical_rays: 4,
            zero_displacement_epsilon: 1.0e-5,

            slope_limit: 30.0,
            slope_speed_multiplier: SlopeSpeedCurve::default(),
            jumping_threshold: 0.07,
            max_slope_segments: 4,

            platform_mask: LayerMask::MASK_PLATFORMS,
            one_way_platform_mask: LayerMask::ONE_WAY_PLATFORM,

            edge_slide_up: false,
            edge_slide_band: 0.15,
            check_fully_grounded: true,
            ground_probe_distance: 0.05,
            wall_probe_margin: 0.01,
        }
    }
}

impl ControllerConfig {
    /// A forgiving setup for player characters: steeper ramps and corner
    /// assistance when jumping.
    pub fn player() -> Self {
        Self {
            slope_limit: 50.0,
            edge_slide_up: true,
            ..Default::default()
        }
    }

    /// Dense rays for small or fast actors.
    pub fn precise() -> Self {
        Self {
            horizontal_rays: 12,
            vertical_rays: 8,
            skin_width: 0.01,
            ..Default::default()
        }
    }

    /// Check every tunable, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizontal_rays < 2 {
            return Err(ConfigError::TooFewRays {
                axis: "horizontal",
                count: self.horizontal_rays,
            });
        }
        if self.vertical_rays < 2 {
            return Err(ConfigError::TooFewRays {
                axis: "vertical",
                count: self.vertical_rays,
            });
        }
        if !(self.skin_width.is_finite() && self.skin_width > 0.0) {
            return Err(ConfigError::InvalidSkinWidth(self.skin_width));
        }
        if !(self.slope_limit > 0.0 && self.slope_limit < 90.0) {
            return Err(ConfigError::InvalidSlopeLimit(self.slope_limit));
        }
        if !(self.edge_slide_band.is_finite() && self.edge_slide_band >= 0.0) {
            return Err(ConfigError::InvalidEdgeBand(self.edge_slide_band));
        }
        for (name, value) in [
            ("zero_displacement_epsilon", self.zero_displacement_epsilon),
            ("jumping_threshold", self.jumping_threshold),
            ("ground_probe_distance", self.ground_probe_distance),
            ("wall_probe_margin", self.wall_probe_margin),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTunable { name, value });
            }
        }
        self.slope_speed_multiplier.validate()
    }

    /// Mask used for rays that must ignore one-way platforms.
    #[inline]
    pub fn solid_mask(&self) -> LayerMask {
        self.platform_mask.difference(self.one_way_platform_mask)
    }

    /// `tan(slope_limit)`, used to size the down-slope probe.
    #[inline]
    pub fn slope_limit_tangent(&self) -> f32 {
        self.slope_limit.to_radians().tan()
    }
}
