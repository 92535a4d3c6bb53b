//! Vertical pass: floors, ceilings, one-way platforms and edge slide-up.

use glam::Vec2;

use super::config::SKIN_FUDGE;
use super::resolve::{Resolution, APEX_RESIDUAL};
use crate::collision::{LayerMask, SpatialQuery};

/// Where along the top edge a ceiling hit landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Graze {
    /// Only rays in the left corner band hit; `innermost` is the highest index.
    Left { innermost: usize },
    /// Only rays in the right corner band hit; `innermost` is the lowest index.
    Right { innermost: usize },
}

impl<Q: SpatialQuery> Resolution<'_, Q> {
    /// Resolve `delta.y`, casting from the edge we are moving toward.
    pub(super) fn move_vertically(&mut self) {
        let going_up = self.delta.y > 0.0;

        // One-way platforms only block from above.
        let mask = if (going_up && !self.state.was_grounded_last_frame) || self.ignore_one_way {
            self.solid_mask()
        } else {
            self.ground_mask()
        };

        if going_up && self.config.edge_slide_up {
            self.slide_out_of_corner(mask);
        }
        self.clamp_vertically(mask);
    }

    /// Cast parallel rays from the leading horizontal edge, shifted by the
    /// horizontal displacement already resolved, and clamp `delta.y`.
    pub(super) fn clamp_vertically(&mut self, mask: LayerMask) {
        let going_up = self.delta.y > 0.0;
        let direction = if going_up { Vec2::Y } else { Vec2::NEG_Y };
        let base = if going_up {
            self.origins.top_left
        } else {
            self.origins.bottom_left
        } + Vec2::new(self.delta.x, 0.0);
        let ray_count = self.config.vertical_rays;
        let spacing = self.origins.horizontal_spacing(ray_count);

        let mut ray_distance = self.delta.y.abs() + self.skin();

        for i in 0..ray_count {
            let origin = base + Vec2::new(i as f32 * spacing, 0.0);
            let Some(hit) = self.cast(origin, direction, ray_distance, mask) else {
                continue;
            };

            ray_distance = hit.distance;
            if going_up {
                self.delta.y = (hit.distance - self.skin()).max(0.0);
                self.state.above = true;
            } else {
                // Can come out positive when the ray lands closer than the
                // skin, e.g. right at the apex of a ramp.
                self.delta.y = -(hit.distance - self.skin());
                self.state.below = true;
                if self.delta.y > APEX_RESIDUAL {
                    self.going_up_slope = true;
                }
            }
            self.hits.push(hit);

            if ray_distance < self.skin() + SKIN_FUDGE {
                break;
            }
        }
    }

    /// Edge slide-up: when ascending into a ceiling only with the corner of
    /// the box, shift sideways out from under it instead of stopping.
    ///
    /// Returns `true` when a nudge was applied. The caller still clamps
    /// vertically at the nudged position.
    fn slide_out_of_corner(&mut self, mask: LayerMask) -> bool {
        let ray_count = self.config.vertical_rays;
        let spacing = self.origins.horizontal_spacing(ray_count);
        let width = self.origins.width();
        let band = self.config.edge_slide_band;
        let base = self.origins.top_left + Vec2::new(self.delta.x, 0.0);
        let distance = self.delta.y + self.skin();

        let mut left = None;
        let mut right = None;
        let mut hit_height = f32::MAX;
        for i in 0..ray_count {
            let offset = i as f32 * spacing;
            let origin = base + Vec2::new(offset, 0.0);
            let Some(hit) = self.cast(origin, Vec2::Y, distance, mask) else {
                continue;
            };

            // Strict bounds: a ray exactly on the band edge is a direct hit.
            if offset < band {
                left = Some(i);
            } else if width - offset < band {
                right = right.or(Some(i));
            } else {
                return false;
            }
            hit_height = hit_height.min(hit.point.y);
        }

        let graze = match (left, right) {
            (Some(innermost), None) => Graze::Left { innermost },
            (None, Some(innermost)) => Graze::Right { innermost },
            _ => return false,
        };

        let Some(nudge) = self.corner_clearance(graze, base, spacing, hit_height, mask) else {
            return false;
        };
        if nudge.abs() > band + self.skin() || !self.side_is_clear(nudge) {
            return false;
        }

        log::debug!("edge slide-up: {graze:?} nudged {nudge:.4}");
        self.delta.x += nudge;
        true
    }

    /// Signed horizontal shift that puts the grazed corner just past the
    /// obstacle's side face.
    fn corner_clearance(
        &self,
        graze: Graze,
        base: Vec2,
        spacing: f32,
        hit_height: f32,
        mask: LayerMask,
    ) -> Option<f32> {
        let skin = self.skin();
        // Probe sideways from the first clear ray, a little above the
        // obstacle's underside, back toward the corner.
        let probe_y = hit_height + skin * 0.5;
        match graze {
            Graze::Left { innermost } => {
                let clear_x = base.x + (innermost + 1) as f32 * spacing;
                let hit = self.cast(Vec2::new(clear_x, probe_y), Vec2::NEG_X, spacing, mask)?;
                let face_x = clear_x - hit.distance;
                Some(face_x + skin - base.x)
            }
            Graze::Right { innermost } => {
                let clear_x = base.x + (innermost as f32 - 1.0) * spacing;
                let hit = self.cast(Vec2::new(clear_x, probe_y), Vec2::X, spacing, mask)?;
                let face_x = clear_x + hit.distance;
                let right_x = base.x + self.origins.width();
                Some(face_x - skin - right_x)
            }
        }
    }

    /// No wall within `nudge` of the side we would shift toward.
    fn side_is_clear(&self, nudge: f32) -> bool {
        let (direction, bottom, top) = if nudge > 0.0 {
            (Vec2::X, self.origins.bottom_right, self.origins.top_right())
        } else {
            (Vec2::NEG_X, self.origins.bottom_left, self.origins.top_left)
        };
        let shift = Vec2::new(self.delta.x, 0.0);
        let distance = nudge.abs() + self.skin();
        [bottom, top]
            .into_iter()
            .all(|origin| self.cast(origin + shift, direction, distance, self.solid_mask()).is_none())
    }

    /// Any vertical-pass ray finds ground within `distance` below the box.
    pub(super) fn floor_within(&self, distance: f32) -> bool {
        let spacing = self.origins.horizontal_spacing(self.config.vertical_rays);
        let reach = distance + self.skin();
        let mask = self.ground_mask();
        (0..self.config.vertical_rays).any(|i| {
            let origin = self.origins.bottom_left + Vec2::new(i as f32 * spacing, 0.0);
            self.cast(origin, Vec2::NEG_Y, reach, mask).is_some()
        })
    }

    /// Pre-flight for a vertical move of `distance` from the current pose.
    ///
    /// With `allow_edge_assist`, upward hits inside the corner band do not
    /// block. Unlike [`slide_out_of_corner`](Self::slide_out_of_corner) the
    /// band edge is inclusive and grazes on both corners at once are
    /// accepted.
    pub(super) fn vertical_clearance(&self, distance: f32, allow_edge_assist: bool) -> bool {
        if distance == 0.0 {
            return true;
        }
        let going_up = distance > 0.0;
        let (base, direction, mask) = if going_up {
            (self.origins.top_left, Vec2::Y, self.solid_mask())
        } else {
            (self.origins.bottom_left, Vec2::NEG_Y, self.ground_mask())
        };
        let ray_count = self.config.vertical_rays;
        let spacing = self.origins.horizontal_spacing(ray_count);
        let width = self.origins.width();
        let band = self.config.edge_slide_band;
        let reach = distance.abs() + self.skin();

        for i in 0..ray_count {
            let offset = i as f32 * spacing;
            if self.cast(base + Vec2::new(offset, 0.0), direction, reach, mask).is_none() {
                continue;
            }
            let in_band = offset <= band || width - offset <= band;
            if !(going_up && allow_edge_assist && in_band) {
                return false;
            }
        }
        true
    }
}
