//! Collision layers used to filter raycasts.
//!
//! Every collider in the world carries a [`LayerMask`] describing what it is.
//! Queries pass a mask of the layers they care about and skip everything else.

use serde::{Deserialize, Serialize};

/// Bit set of collision layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    /// No layers.
    pub const NONE: Self = Self(0);

    /// Solid level geometry - floors, walls, ramps.
    pub const SOLID: Self = Self(1 << 0);

    /// Platforms that only block from above.
    ///
    /// Actors may jump up through them and stand on top of them.
    pub const ONE_WAY_PLATFORM: Self = Self(1 << 1);

    /// Moving platforms. Treated as solid by actors.
    pub const MOVING_PLATFORM: Self = Self(1 << 2);

    /// Hazards such as spikes. Blocks like solid geometry.
    pub const HAZARD: Self = Self(1 << 4);

    /// Everything an actor collides with while moving.
    pub const MASK_PLATFORMS: Self = Self(
        Self::SOLID.0 | Self::ONE_WAY_PLATFORM.0 | Self::MOVING_PLATFORM.0 | Self::HAZARD.0,
    );

    /// Every layer.
    pub const ALL: Self = Self(u32::MAX);

    /// Check if these flags contain every bit of `other`.
    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check if any of the given layers are set.
    #[inline]
    pub fn intersects(self, other: Self) -> bool {
        (self.0 & other.0) != 0
    }

    /// Combine two masks.
    #[inline]
    pub fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Remove layers from this mask.
    #[inline]
    pub fn difference(self, other: Self) -> Self {
        Self(self.0 & !other.0)
    }
}

impl std::ops::BitOr for LayerMask {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitAnd for LayerMask {
    type Output = Self;
    fn bitand(self, rhs: Self) -> Self {
        Self(self.0 & rhs.0)
    }
}

impl std::ops::Not for LayerMask {
    type Output = Self;
    fn not(self) -> Self {
        Self(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_mask() {
        let mask = LayerMask::MASK_PLATFORMS;
        assert!(mask.contains(LayerMask::SOLID));
        assert!(mask.contains(LayerMask::ONE_WAY_PLATFORM));
        assert!(mask.contains(LayerMask::MOVING_PLATFORM | LayerMask::HAZARD));
    }

    #[test]
    fn test_excluding_one_way() {
        let mask = LayerMask::MASK_PLATFORMS.difference(LayerMask::ONE_WAY_PLATFORM);
        assert!(!mask.intersects(LayerMask::ONE_WAY_PLATFORM));
        assert!(mask.contains(LayerMask::SOLID));
        assert_eq!(mask, LayerMask::MASK_PLATFORMS & !LayerMask::ONE_WAY_PLATFORM);
    }
}
