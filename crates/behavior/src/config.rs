//! Actor tunables.
//!
//! All speeds in units/second, times in seconds.

use ledgewalk_physics::ConfigError;
use serde::{Deserialize, Serialize};

/// Movement tunables shared by the stock handlers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActorConfig {
    // ========================================================================
    // Running
    // ========================================================================
    /// Downward acceleration. Stored as a positive magnitude.
    pub gravity: f32,

    pub run_speed: f32,

    /// How fast horizontal speed approaches the target on the ground.
    pub ground_damping: f32,

    /// How fast horizontal speed approaches the target in the air.
    pub air_damping: f32,

    // ========================================================================
    // Jumping
    // ========================================================================
    /// Apex height of a full jump.
    pub jump_height: f32,

    /// Upward speed is scaled by this when jump is released early.
    pub jump_cut: f32,

    /// How long one-way platforms are ignored after dropping through.
    pub drop_through_duration: f32,

    // ========================================================================
    // Wall jump
    // ========================================================================
    /// Speed away from the wall.
    pub wall_jump_speed_x: f32,
    pub wall_jump_speed_y: f32,

    /// Time before horizontal control returns.
    pub wall_jump_duration: f32,

    // ========================================================================
    // Knockback
    // ========================================================================
    pub knockback_speed_x: f32,
    pub knockback_speed_y: f32,
    pub knockback_duration: f32,
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            gravity: 25.0,
            run_speed: 8.0,
            ground_damping: 20.0,
            air_damping: 5.0,

            jump_height: 3.0,
            jump_cut: 0.5,
            drop_through_duration: 0.2,

            wall_jump_speed_x: 7.0,
            wall_jump_speed_y: 11.0,
            wall_jump_duration: 0.2,

            knockback_speed_x: 6.0,
            knockback_speed_y: 5.0,
            knockback_duration: 0.35,
        }
    }
}

impl ActorConfig {
    /// Snappy ground control, short hops.
    pub fn tight() -> Self {
        Self {
            ground_damping: 40.0,
            air_damping: 15.0,
            jump_height: 2.5,
            ..Default::default()
        }
    }

    /// Low gravity and drifty air control.
    pub fn floaty() -> Self {
        Self {
            gravity: 12.0,
            air_damping: 2.0,
            jump_height: 4.0,
            jump_cut: 0.8,
            ..Default::default()
        }
    }

    /// Upward speed that reaches `jump_height`.
    #[inline]
    pub fn jump_velocity(&self) -> f32 {
        (2.0 * self.jump_height * self.gravity).sqrt()
    }

    /// Reject negative or non-finite tunables.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("gravity", self.gravity),
            ("run_speed", self.run_speed),
            ("ground_damping", self.ground_damping),
            ("air_damping", self.air_damping),
            ("jump_height", self.jump_height),
            ("jump_cut", self.jump_cut),
            ("drop_through_duration", self.drop_through_duration),
            ("wall_jump_speed_x", self.wall_jump_speed_x),
            ("wall_jump_speed_y", self.wall_jump_speed_y),
            ("wall_jump_duration", self.wall_jump_duration),
            ("knockback_speed_x", self.knockback_speed_x),
            ("knockback_speed_y", self.knockback_speed_y),
            ("knockback_duration", self.knockback_duration),
        ] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::InvalidTunable { name, value });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_are_valid() {
        for config in [ActorConfig::default(), ActorConfig::tight(), ActorConfig::floaty()] {
            assert!(config.validate().is_ok());
        }
    }

    #[test]
    fn test_jump_velocity_reaches_height() {
        let config = ActorConfig::default();
        let v = config.jump_velocity();
        // v^2 / 2g
        let apex = v * v / (2.0 * config.gravity);
        assert!((apex - config.jump_height).abs() < 0.001);
    }

    #[test]
    fn test_rejects_negative_tunable() {
        let config = ActorConfig {
            run_speed: -1.0,
            ..Default::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidTunable {
                name: "run_speed",
                value: -1.0
            })
        );
    }
}
