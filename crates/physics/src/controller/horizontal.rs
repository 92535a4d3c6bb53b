//! Horizontal pass: walls, steep faces and the hand-off to slope walking.

use glam::Vec2;

use super::config::SKIN_FUDGE;
use super::resolve::{is_vertical_wall, Resolution};
use super::state::WallState;
use crate::collision::{RaycastHit, SpatialQuery};

impl<Q: SpatialQuery> Resolution<'_, Q> {
    /// Cast parallel rays from the leading vertical edge and clamp `delta.x`.
    ///
    /// With `follow_slopes` the lowest ray may hand off to the slope walk;
    /// without it every hit is treated as a wall.
    pub(super) fn move_horizontally(&mut self, follow_slopes: bool) {
        let going_right = self.delta.x > 0.0;
        let sign = if going_right { 1.0 } else { -1.0 };
        let direction = Vec2::new(sign, 0.0);
        let base = if going_right {
            self.origins.bottom_right
        } else {
            self.origins.bottom_left
        };
        let ray_count = self.config.horizontal_rays;
        let spacing = self.origins.vertical_spacing(ray_count);

        let mut ray_distance = self.delta.x.abs() + self.skin();
        let mut lowest_hit_wall = false;

        for i in 0..ray_count {
            let origin = base + Vec2::new(0.0, i as f32 * spacing);

            // Only the lowest ray may hit a one-way platform, and only while
            // grounded, so one-way ramps can be walked up.
            let mask = if i == 0 && self.state.was_grounded_last_frame {
                self.ground_mask()
            } else {
                self.solid_mask()
            };

            let Some(hit) = self.cast(origin, direction, ray_distance, mask) else {
                continue;
            };
            let angle = hit.surface_angle();

            if i == 0 && follow_slopes && self.handle_horizontal_slope(hit, origin, angle) {
                self.hits.push(hit);
                break;
            }

            ray_distance = hit.distance;
            self.delta.x = sign * (hit.distance - self.skin()).max(0.0);
            if going_right {
                self.state.right = true;
            } else {
                self.state.left = true;
            }
            if i == 0 && is_vertical_wall(angle) {
                lowest_hit_wall = true;
            }
            self.hits.push(hit);

            // Flush against the surface; no other ray can get any closer.
            if ray_distance < self.skin() + SKIN_FUDGE {
                break;
            }
        }

        if lowest_hit_wall {
            self.probe_wall(base, direction, spacing * (ray_count - 1) as f32);
        }
    }

    /// Decide what the lowest ray's hit means. Returns `true` when the hit
    /// was consumed as a slope (climbed, or refused as too steep).
    fn handle_horizontal_slope(&mut self, hit: RaycastHit, origin: Vec2, angle: f32) -> bool {
        if is_vertical_wall(angle) {
            return false;
        }

        let sign = self.delta.x.signum();

        if angle >= self.config.slope_limit {
            log::trace!("ramp at {angle:.1} deg is too steep, blocking");
            self.delta.x = 0.0;
            if sign > 0.0 {
                self.state.right = true;
            } else {
                self.state.left = true;
            }
            return true;
        }

        if self.delta.y >= self.config.jumping_threshold {
            // Jumping into a ramp: stop short of it and let the vertical pass
            // carry the actor over.
            self.delta.x = sign * (hit.distance - self.skin()).max(0.0);
            return true;
        }

        self.walk_slope(hit, origin, angle);
        true
    }

    /// The lowest ray hit a vertical wall; check the topmost ray to see if
    /// the whole side is against it.
    fn probe_wall(&mut self, base: Vec2, direction: Vec2, top_offset: f32) {
        let origin = base + Vec2::new(0.0, top_offset);
        let distance = self.delta.x.abs() + self.skin() + self.config.wall_probe_margin;

        let Some(hit) = self.cast(origin, direction, distance, self.solid_mask()) else {
            return;
        };
        if !is_vertical_wall(hit.surface_angle()) {
            return;
        }

        self.state.wall_state |= if direction.x > 0.0 {
            WallState::ON_RIGHT_WALL
        } else {
            WallState::ON_LEFT_WALL
        };
    }
}
