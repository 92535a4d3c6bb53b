//! Actor input handling.
//!
//! Raw button states are converted into an [`ActorInput`] once per tick,
//! which handlers read through the [`Frame`].

use serde::{Deserialize, Serialize};

/// Raw button states for a single tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButtonState {
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub down: bool,
}

/// What an actor is being asked to do this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ActorInput {
    /// -1 (left) to 1 (right).
    pub horizontal: f32,

    /// Jump went down this tick.
    pub jump_pressed: bool,

    /// Jump is held.
    pub jump_held: bool,

    /// Drop through one-way platforms.
    pub drop_down: bool,
}

impl ButtonState {
    /// Convert to actor input. `previous` is last tick's buttons and is used
    /// to detect the jump press.
    pub fn to_input(&self, previous: &ButtonState) -> ActorInput {
        let mut horizontal = 0.0;
        if self.right {
            horizontal += 1.0;
        }
        if self.left {
            horizontal -= 1.0;
        }

        ActorInput {
            horizontal,
            jump_pressed: self.jump && !previous.jump,
            jump_held: self.jump,
            // Down + jump drops through instead of jumping.
            drop_down: self.down && self.jump && !previous.jump,
        }
    }
}

/// Clock and input for one tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Frame {
    /// Time at the start of this tick, in seconds.
    pub now: f32,
    /// Tick length in seconds.
    pub dt: f32,
    pub input: ActorInput,
}

impl Frame {
    pub fn new(now: f32, dt: f32, input: ActorInput) -> Self {
        Self { now, dt, input }
    }

    /// A tick with no input.
    pub fn idle(now: f32, dt: f32) -> Self {
        Self::new(now, dt, ActorInput::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_horizontal_axis() {
        let none = ButtonState::default();
        let both = ButtonState {
            left: true,
            right: true,
            ..Default::default()
        };
        let left = ButtonState {
            left: true,
            ..Default::default()
        };

        assert_eq!(both.to_input(&none).horizontal, 0.0);
        assert_eq!(left.to_input(&none).horizontal, -1.0);
    }

    #[test]
    fn test_jump_press_is_an_edge() {
        let up = ButtonState::default();
        let jump = ButtonState {
            jump: true,
            ..Default::default()
        };

        let pressed = jump.to_input(&up);
        assert!(pressed.jump_pressed && pressed.jump_held);

        let held = jump.to_input(&jump);
        assert!(!held.jump_pressed && held.jump_held);
    }

    #[test]
    fn test_down_jump_drops() {
        let up = ButtonState::default();
        let down_jump = ButtonState {
            down: true,
            jump: true,
            ..Default::default()
        };

        let input = down_jump.to_input(&up);
        assert!(input.drop_down);
        assert!(!down_jump.to_input(&down_jump).drop_down);
    }
}
