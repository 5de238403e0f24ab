use glam::vec2;

use crate::{
    renderer::{
        Billboard, is_transparent,
        software::{Software, projection::pixel_span},
    },
    world::DEPTH_UNITS_PER_CELL,
};

/// World size of one sprite texel, in cells: a 64-texel sprite is half a
/// cell wide.
pub const SPRITE_TEXEL: f32 = 1.0 / 128.0;

/// Source texel for interpolation factor `t ∈ [0, 1)` along `n` texels.
#[inline(always)]
fn texel_index(t: f32, n: usize) -> usize {
    let i = (t * n as f32) as i32;
    if n.is_power_of_two() {
        (i & (n as i32 - 1)) as usize
    } else {
        i.clamp(0, n as i32 - 1) as usize
    }
}

impl Software {
    /// Draw one billboard. Returns `false` if it was culled before touching
    /// any pixel (out of range, behind the near plane, off-screen or empty).
    pub(super) fn cast_billboard(&mut self, b: &Billboard<'_>) -> bool {
        if b.width == 0 || b.height == 0 || b.pixels.len() < b.width * b.height {
            return false;
        }

        // same cells the wall caster walks
        let cam = self.camera;
        let (col, row) = (b.pos.x.floor() as i32, b.pos.z.floor() as i32);
        if !self.range_cells(cam.x).contains(&col) || !self.range_cells(cam.z).contains(&row) {
            return false;
        }

        let p = cam.to_cam(vec2(b.pos.x, b.pos.z));
        if !(p.y >= self.config.near_clip) {
            return false;
        }
        let depth = p.y * DEPTH_UNITS_PER_CELL;

        let xc = self.project_x(p);
        let yc = self.project_y(b.pos.y + b.y_offset, p.y);
        let half_w = b.width as f32 * SPRITE_TEXEL * 0.5 / p.y * self.height_f;
        let half_h = b.height as f32 * SPRITE_TEXEL * 0.5 / p.y * self.height_f;
        let (left, top) = (xc - half_w, yc - half_h);

        let (x_start, x_end) = pixel_span(left, xc + half_w, self.width);
        let (y_start, y_end) = pixel_span(top, yc + half_h, self.height);
        if x_start >= x_end || y_start >= y_end {
            return false;
        }

        let inv_w = 1.0 / (2.0 * half_w);
        let inv_h = 1.0 / (2.0 * half_h);
        for y in y_start..y_end {
            let v = texel_index((y as f32 + 0.5 - top) * inv_h, b.height);
            let src_row = &b.pixels[v * b.width..(v + 1) * b.width];
            for x in x_start..x_end {
                let i = y * self.width + x;
                let stored = self.depth[i];
                // 0 = nothing drawn yet
                if stored != 0.0 && stored <= depth {
                    continue;
                }
                let px = src_row[texel_index((x as f32 + 0.5 - left) * inv_w, b.width)];
                if is_transparent(px) {
                    continue;
                }
                self.surface.pixels_mut()[i] = px;
                self.depth[i] = depth;
            }
        }
        true
    }
}
