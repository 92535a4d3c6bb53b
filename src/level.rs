//! Level layouts for the demo.

use glam::Vec2;
use ledgewalk_physics::{CollisionWorld, LayerMask};
use serde::{Deserialize, Serialize};

/// One piece of collision geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Brush {
    Box {
        center: Vec2,
        half_extents: Vec2,
        #[serde(default = "solid")]
        layers: LayerMask,
    },
    Ramp {
        foot: Vec2,
        run: f32,
        rise: f32,
        #[serde(default = "solid")]
        layers: LayerMask,
    },
}

fn solid() -> LayerMask {
    LayerMask::SOLID
}

/// Serializable level description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDesc {
    pub name: String,
    pub spawn: Vec2,
    pub brushes: Vec<Brush>,
}

/// A level ready to be queried.
#[derive(Debug)]
pub struct Level {
    pub name: String,
    pub spawn: Vec2,
    pub collision: CollisionWorld,
}

impl Level {
    /// Build collision for every brush. Degenerate ramps are skipped.
    pub fn build(desc: &LevelDesc) -> Self {
        let mut collision = CollisionWorld::new();
        for brush in &desc.brushes {
            match *brush {
                Brush::Box {
                    center,
                    half_extents,
                    layers,
                } => {
                    collision.add_box(center, half_extents, layers);
                }
                Brush::Ramp {
                    foot,
                    run,
                    rise,
                    layers,
                } => {
                    if collision.add_ramp(foot, run, rise, layers).is_none() {
                        log::warn!("skipping degenerate ramp at {foot:?}");
                    }
                }
            }
        }

        Self {
            name: desc.name.clone(),
            spawn: desc.spawn,
            collision,
        }
    }

    /// A short course with one of everything the resolver handles.
    pub fn test_course() -> LevelDesc {
        let rise = 4.0 * 20f32.to_radians().tan();

        LevelDesc {
            name: "Test Course".to_string(),
            spawn: Vec2::new(-8.0, 3.0),
            brushes: vec![
                Brush::Box {
                    center: Vec2::new(0.0, -0.5),
                    half_extents: Vec2::new(20.0, 0.5),
                    layers: LayerMask::SOLID,
                },
                // 20 degree ramp up to a plateau
                Brush::Ramp {
                    foot: Vec2::new(-2.0, 0.0),
                    run: 4.0,
                    rise,
                    layers: LayerMask::SOLID,
                },
                Brush::Box {
                    center: Vec2::new(4.0, rise * 0.5),
                    half_extents: Vec2::new(2.0, rise * 0.5),
                    layers: LayerMask::SOLID,
                },
                // One-way ledge above the plateau
                Brush::Box {
                    center: Vec2::new(4.0, 3.5),
                    half_extents: Vec2::new(1.5, 0.1),
                    layers: LayerMask::ONE_WAY_PLATFORM,
                },
                // Far wall
                Brush::Box {
                    center: Vec2::new(12.0, 5.0),
                    half_extents: Vec2::new(0.5, 5.0),
                    layers: LayerMask::SOLID,
                },
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ledgewalk_physics::SpatialQuery;

    #[test]
    fn test_course_builds() {
        let level = Level::build(&Level::test_course());
        assert_eq!(level.collision.collider_count(), 5);

        let hit = level
            .collision
            .raycast(level.spawn, Vec2::NEG_Y, 10.0, LayerMask::ALL)
            .unwrap();
        assert!((hit.point.y - 0.0).abs() < 0.001);
    }

    #[test]
    fn test_level_from_json() {
        let json = r#"{
            "name": "tiny",
            "spawn": [0.0, 2.0],
            "brushes": [
                { "kind": "box", "center": [0.0, -0.5], "half_extents": [5.0, 0.5] },
                { "kind": "ramp", "foot": [1.0, 0.0], "run": 0.0, "rise": 1.0, "layers": 2 }
            ]
        }"#;

        let desc: LevelDesc = serde_json::from_str(json).unwrap();
        assert_eq!(desc.brushes.len(), 2);

        // The zero-run ramp is degenerate.
        let level = Level::build(&desc);
        assert_eq!(level.collision.collider_count(), 1);
    }
}
