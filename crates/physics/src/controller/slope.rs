//! Ramp handling: hugging ramps on the way down and walking up them.

use glam::Vec2;

use super::resolve::{is_vertical_wall, Resolution, ANGLE_EPSILON};
use crate::collision::{LayerMask, RaycastHit, SpatialQuery};

impl<Q: SpatialQuery> Resolution<'_, Q> {
    /// Keep a grounded actor glued to a ramp it is walking down.
    ///
    /// Probes straight down from the bottom center. The probe reaches as far
    /// as the steepest walkable ramp could fall away under half the box.
    pub(super) fn handle_down_slope(&mut self) {
        let center_x = self.origins.center_x();
        let origin = Vec2::new(center_x, self.origins.bottom_left.y);
        let probe_distance =
            self.config.slope_limit_tangent() * (self.origins.bottom_right.x - center_x);

        let Some(hit) = self.cast(origin, Vec2::NEG_Y, probe_distance, self.ground_mask()) else {
            return;
        };

        let angle = hit.surface_angle();
        if angle < ANGLE_EPSILON {
            return;
        }

        // Descending when the ramp faces the way we are moving.
        let descending = self.delta.x != 0.0 && hit.normal.x.signum() == self.delta.x.signum();
        if !descending {
            return;
        }

        let modifier = self.config.slope_speed_multiplier.evaluate(-angle);
        self.delta.x *= modifier;

        // Pull down onto the ramp under the center, then on down the ramp for
        // the horizontal distance covered. The vertical pass clamps the
        // overshoot against the ramp surface.
        let stick = hit.point.y - origin.y - self.skin();
        let follow = self.delta.x.abs() * angle.to_radians().tan();
        self.delta.y += stick - follow;

        self.state.moving_down_slope = true;
        self.state.slope_angle = -angle;
        log::trace!(
            "descending {angle:.1} deg ramp, x scaled by {modifier:.2}, y now {:.4}",
            self.delta.y
        );
    }

    /// Walk up a climbable ramp the lowest horizontal ray ran into.
    ///
    /// Moves flush to the ramp first, then repeatedly casts along the ramp
    /// diagonal. A steeper-but-climbable ramp met on the way becomes the new
    /// segment; walls, too-steep faces and ceilings end the walk.
    pub(super) fn walk_slope(&mut self, first_hit: RaycastHit, foot: Vec2, angle: f32) {
        let sign = self.delta.x.signum();
        let skin = self.skin();
        let epsilon = self.config.zero_displacement_epsilon;
        let mask = if self.state.was_grounded_last_frame {
            self.ground_mask()
        } else {
            self.solid_mask()
        };
        let head = if sign > 0.0 {
            self.origins.top_right()
        } else {
            self.origins.top_left
        };

        let mut remaining = self.delta.x.abs();
        let approach = (first_hit.distance - skin).max(0.0).min(remaining);
        let mut total = Vec2::new(sign * approach, 0.0);
        remaining -= approach;

        let mut angle = angle;
        for _ in 0..self.config.max_slope_segments {
            if remaining <= epsilon {
                break;
            }

            let run = remaining * self.config.slope_speed_multiplier.evaluate(angle);
            let step = Vec2::new(sign * run, run * angle.to_radians().tan());
            let length = step.length();
            if length <= epsilon {
                break;
            }
            let direction = step / length;

            let foot_hit = self.cast(foot + total, direction, length + skin, mask);
            let head_hit = self.cast(head + total, direction, length + skin, self.solid_mask());
            let (hit, from_head) = match (foot_hit, head_hit) {
                (None, None) => {
                    total += step;
                    self.settle_past_apex(foot, &mut total, step.y, angle, mask);
                    break;
                }
                (Some(f), Some(h)) if h.distance < f.distance => (h, true),
                (Some(f), _) => (f, false),
                (None, Some(h)) => (h, true),
            };

            let travel = (hit.distance - skin).max(0.0).min(length);
            total += direction * travel;
            remaining -= remaining * travel / length;
            self.hits.push(hit);

            if from_head {
                self.state.above = true;
                break;
            }

            let hit_angle = hit.surface_angle();
            if is_vertical_wall(hit_angle) || hit_angle >= self.config.slope_limit {
                if sign > 0.0 {
                    self.state.right = true;
                } else {
                    self.state.left = true;
                }
                break;
            }
            if (hit_angle - angle).abs() < ANGLE_EPSILON {
                break;
            }
            angle = hit_angle;
        }

        log::trace!("slope walk at {angle:.1} deg moved {total:?}");

        self.delta = total;
        self.going_up_slope = true;
        self.slope_walked = true;
        self.state.below = true;
        self.state.slope_angle = angle;
    }

    /// After a free diagonal step the leading foot may have crossed the top of
    /// the ramp onto shallower ground. Drop it back onto that ground so the
    /// actor does not float off the apex.
    fn settle_past_apex(
        &self,
        foot: Vec2,
        total: &mut Vec2,
        rise: f32,
        angle: f32,
        mask: LayerMask,
    ) {
        let skin = self.skin();
        let Some(hit) = self.cast(foot + *total, Vec2::NEG_Y, rise + skin, mask) else {
            return;
        };
        if hit.surface_angle() < angle - ANGLE_EPSILON {
            total.y -= (hit.distance - skin).max(0.0);
        }
    }
}
