//! Collision reports produced by the resolver.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::collision::RaycastHit;

/// Contact with a vertical surface, used to gate wall jumps.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WallState(pub u8);

impl WallState {
    pub const NOT_ON_WALL: Self = Self(0);
    pub const ON_LEFT_WALL: Self = Self(1 << 0);
    pub const ON_RIGHT_WALL: Self = Self(1 << 1);
    /// Both sides at once, e.g. wedged in a one-tile shaft.
    pub const ON_WALL: Self = Self(Self::ON_LEFT_WALL.0 | Self::ON_RIGHT_WALL.0);

    #[inline]
    pub fn contains(self, other: Self) -> bool {
        (self.0 & other.0) == other.0
    }

    #[inline]
    pub fn on_left(self) -> bool {
        self.contains(Self::ON_LEFT_WALL)
    }

    #[inline]
    pub fn on_right(self) -> bool {
        self.contains(Self::ON_RIGHT_WALL)
    }

    #[inline]
    pub fn on_any_wall(self) -> bool {
        self.0 != 0
    }

    /// Direction pointing away from the wall, or `0.0` when not on one.
    pub fn away_direction(self) -> f32 {
        match (self.on_left(), self.on_right()) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }
}

impl std::ops::BitOr for WallState {
    type Output = Self;
    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl std::ops::BitOrAssign for WallState {
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}

/// What the actor touched during one resolve.
///
/// A fresh value is produced by every resolve; only
/// `was_grounded_last_frame` and `last_time_grounded` carry over from the
/// previously committed state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CollisionState {
    pub left: bool,
    pub right: bool,
    pub above: bool,
    pub below: bool,

    pub was_grounded_last_frame: bool,
    pub became_grounded_this_frame: bool,

    pub moving_down_slope: bool,

    /// Degrees. Positive while climbing, negative while descending.
    pub slope_angle: f32,

    pub wall_state: WallState,

    /// Both bottom corners over solid footing.
    pub is_fully_grounded: bool,

    /// Clock time of the last resolve that ended grounded.
    pub last_time_grounded: f32,
}

impl CollisionState {
    /// Fresh state for a new resolve, carrying grounded history forward.
    pub fn carried_from(previous: &CollisionState) -> Self {
        Self {
            was_grounded_last_frame: previous.below,
            last_time_grounded: previous.last_time_grounded,
            ..Default::default()
        }
    }

    /// Touching anything at all.
    #[inline]
    pub fn has_collision(&self) -> bool {
        self.below || self.right || self.left || self.above
    }

    /// Grounded last resolve, airborne now.
    #[inline]
    pub fn lost_ground_this_frame(&self) -> bool {
        self.was_grounded_last_frame && !self.below
    }
}

/// Output of [`calculate_move`](super::CharacterController::calculate_move).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MoveResult {
    pub collision_state: CollisionState,
    pub adjusted_displacement: Vec2,
    pub original_displacement: Vec2,
    pub is_going_up_slope: bool,
    /// Every ray hit that shaped the adjusted displacement, in cast order.
    pub hits: Vec<RaycastHit>,
}

/// Notifications produced when a move is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControllerEvent {
    /// A ray that shaped the move hit something.
    Collided(RaycastHit),
    BecameGrounded,
    LostGround,
}

/// Edge an actor is forced to slide off.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SlideDirection {
    Left,
    Right,
}

impl SlideDirection {
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wall_state_composite() {
        let both = WallState::ON_LEFT_WALL | WallState::ON_RIGHT_WALL;
        assert_eq!(both, WallState::ON_WALL);
        assert!(both.on_left() && both.on_right());
        assert_eq!(both.away_direction(), 0.0);

        assert_eq!(WallState::ON_LEFT_WALL.away_direction(), 1.0);
        assert_eq!(WallState::ON_RIGHT_WALL.away_direction(), -1.0);
        assert!(!WallState::NOT_ON_WALL.on_any_wall());
    }

    #[test]
    fn test_carried_state() {
        let previous = CollisionState {
            below: true,
            left: true,
            last_time_grounded: 4.5,
            slope_angle: 12.0,
            ..Default::default()
        };

        let fresh = CollisionState::carried_from(&previous);
        assert!(fresh.was_grounded_last_frame);
        assert_eq!(fresh.last_time_grounded, 4.5);
        assert!(!fresh.below && !fresh.left);
        assert_eq!(fresh.slope_angle, 0.0);
        assert!(fresh.lost_ground_this_frame());
    }
}
