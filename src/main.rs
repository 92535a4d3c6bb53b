//! Ledgewalk - headless demo
//!
//! Runs one scripted actor across a test course and logs what it does.
//! Set `RUST_LOG=debug` to see resolver and handler decisions.
//!
//! ```text
//! ledgewalk [settings.json]
//! ```
//!
//! The optional settings file may override any of the controller, actor or
//! level settings; missing fields keep their defaults. A `preset` replaces
//! the section it names:
//!
//! ```json
//! { "preset": "floaty", "ticks": 300 }
//! ```

mod level;

use std::path::Path;

use glam::Vec2;
use ledgewalk_behavior::handlers::{Knockback, Locomotion};
use ledgewalk_behavior::{Actor, ActorConfig, BehaviorError, ButtonState, Frame};
use ledgewalk_physics::{
    BoundingBox, CharacterController, ConfigError, ControllerConfig, ControllerEvent,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::level::{Level, LevelDesc};

/// Simulation tick rate (ticks per second).
const TICK_RATE: u32 = 60;

#[derive(Debug, Error)]
enum DemoError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings file: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Behavior(#[from] BehaviorError),
}

/// Named tuning presets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
enum Preset {
    /// Snappy actor tunables.
    Tight,
    /// Low-gravity actor tunables.
    Floaty,
    /// Denser rays and a thinner skin.
    Precise,
}

/// Everything the demo can be configured with.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
struct DemoSettings {
    preset: Option<Preset>,
    controller: ControllerConfig,
    actor: ActorConfig,
    half_extents: Vec2,
    ticks: u32,
    level: LevelDesc,
}

impl Default for DemoSettings {
    fn default() -> Self {
        Self {
            preset: None,
            controller: ControllerConfig::player(),
            actor: ActorConfig::default(),
            half_extents: Vec2::new(0.4, 0.9),
            ticks: 600,
            level: Level::test_course(),
        }
    }
}

impl DemoSettings {
    fn load(path: &Path) -> Result<Self, DemoError> {
        let text = std::fs::read_to_string(path)?;
        let settings: Self = serde_json::from_str(&text)?;
        Ok(settings.with_preset())
    }

    /// Replace the section named by `preset`, if any.
    fn with_preset(mut self) -> Self {
        match self.preset {
            Some(Preset::Tight) => self.actor = ActorConfig::tight(),
            Some(Preset::Floaty) => self.actor = ActorConfig::floaty(),
            Some(Preset::Precise) => self.controller = ControllerConfig::precise(),
            None => {}
        }
        self
    }
}

/// Buttons held on a given tick.
fn scripted_buttons(tick: u32) -> ButtonState {
    ButtonState {
        right: tick < 420,
        jump: matches!(tick, 150..=175 | 330..=340 | 345..=350),
        left: (430..480).contains(&tick),
        down: false,
    }
}

fn run() -> Result<(), DemoError> {
    let settings = match std::env::args().nth(1) {
        Some(path) => DemoSettings::load(Path::new(&path))?,
        None => DemoSettings::default(),
    };

    let level = Level::build(&settings.level);
    log::info!(
        "loaded {} ({} colliders)",
        level.name,
        level.collision.collider_count()
    );

    let bounds = BoundingBox::new(level.spawn, settings.half_extents);
    let controller = CharacterController::new(&level.collision, bounds, settings.controller)?;
    let mut actor = Actor::new(controller, settings.actor, Box::new(Locomotion::new()))?;

    let dt = 1.0 / TICK_RATE as f32;
    let mut previous = ButtonState::default();

    for tick in 0..settings.ticks {
        let now = tick as f32 * dt;

        // Take a hit from the right halfway through.
        if tick == 380 {
            let until = now + actor.body().config.knockback_duration;
            actor.push_handler(Box::new(Knockback::new(-1.0, until)));
        }

        let buttons = scripted_buttons(tick);
        let frame = Frame::new(now, dt, buttons.to_input(&previous));
        previous = buttons;

        for event in actor.update(&frame)? {
            match event {
                ControllerEvent::BecameGrounded => log::debug!("tick {tick}: landed"),
                ControllerEvent::LostGround => log::debug!("tick {tick}: airborne"),
                ControllerEvent::Collided(_) => {}
            }
        }

        if tick % 30 == 0 {
            let body = actor.body();
            let state = body.controller.collision_state();
            log::info!(
                "tick {tick:>4} pos ({:6.2}, {:6.2}) vel ({:6.2}, {:6.2}) grounded={} slope={:5.1} handler={}",
                body.position().x,
                body.position().y,
                body.velocity.x,
                body.velocity.y,
                state.below,
                state.slope_angle,
                actor.active_handler().unwrap_or("-"),
            );
        }
    }

    log::info!("finished at {:?}", actor.position());
    Ok(())
}

fn main() {
    env_logger::init();

    if let Err(err) = run() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_settings_keep_defaults() {
        let settings: DemoSettings =
            serde_json::from_str(r#"{ "ticks": 10, "actor": { "gravity": 30.0 } }"#).unwrap();
        assert_eq!(settings.ticks, 10);
        assert_eq!(settings.actor.gravity, 30.0);
        assert_eq!(settings.actor.run_speed, ActorConfig::default().run_speed);
        assert_eq!(settings.controller, ControllerConfig::player());
    }

    #[test]
    fn test_preset_replaces_section() {
        let settings: DemoSettings =
            serde_json::from_str(r#"{ "preset": "floaty", "actor": { "gravity": 30.0 } }"#).unwrap();
        let settings = settings.with_preset();
        assert_eq!(settings.actor, ActorConfig::floaty());
        assert_eq!(settings.controller, ControllerConfig::player());

        let settings: DemoSettings = serde_json::from_str(r#"{ "preset": "precise" }"#).unwrap();
        let settings = settings.with_preset();
        assert_eq!(settings.controller, ControllerConfig::precise());
        assert_eq!(settings.actor, ActorConfig::default());

        let settings: DemoSettings = serde_json::from_str(r#"{ "preset": "tight" }"#).unwrap();
        assert_eq!(settings.with_preset().actor, ActorConfig::tight());
    }

    #[test]
    fn test_default_course_runs() {
        let settings = DemoSettings::default();
        let level = Level::build(&settings.level);
        let bounds = BoundingBox::new(level.spawn, settings.half_extents);
        let controller =
            CharacterController::new(&level.collision, bounds, settings.controller).unwrap();
        let mut actor =
            Actor::new(controller, settings.actor, Box::new(Locomotion::new())).unwrap();

        let dt = 1.0 / TICK_RATE as f32;
        let mut previous = ButtonState::default();
        for tick in 0..45 {
            let buttons = scripted_buttons(tick);
            let frame = Frame::new(tick as f32 * dt, dt, buttons.to_input(&previous));
            previous = buttons;
            actor.update(&frame).unwrap();
        }

        // Dropped onto the floor and ran right, short of the ramp.
        assert!(actor.body().is_grounded());
        assert!(actor.position().x > level.spawn.x + 2.0);
        assert!(actor.position().x < -2.0);
    }
}
