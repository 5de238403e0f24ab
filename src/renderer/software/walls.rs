use glam::{Vec2, vec2};

use crate::{
    renderer::{
        VOID,
        software::{
            Software,
            projection::{clip_near, pixel_span},
        },
    },
    world::{DEPTH_UNITS_PER_CELL, Direction, LevelGrid, Texture, TextureBank, TextureId},
};

impl Software {
    /// Emit a face for every solid/empty boundary inside the render square.
    ///
    /// Each cell is paired with its east and south neighbour, so scanning one
    /// cell past the range on the low side covers the boundaries shared with
    /// the first in-range cells.
    pub(super) fn cast_walls<G: LevelGrid>(&mut self, grid: &G, bank: &TextureBank) {
        let cols = self.range_cells(self.camera.x);
        let rows = self.range_cells(self.camera.z);

        for row in rows {
            for col in cols.clone() {
                let solid = grid.is_solid(col, row);
                let (east, south) = (col.saturating_add(1), row.saturating_add(1));
                let (x0, x1) = (col as f32, col as f32 + 1.0);
                let (z0, z1) = (row as f32, row as f32 + 1.0);

                // boundary at x = col + 1; endpoints ordered left→right as
                // seen from the empty side
                match (solid, grid.is_solid(east, row)) {
                    (true, false) => {
                        let tex = grid.texture_for(col, row, Direction::East);
                        self.emit_face(vec2(x1, z1), vec2(x1, z0), bank, tex);
                    }
                    (false, true) => {
                        let tex = grid.texture_for(east, row, Direction::West);
                        self.emit_face(vec2(x1, z0), vec2(x1, z1), bank, tex);
                    }
                    _ => {}
                }

                // boundary at z = row + 1
                match (solid, grid.is_solid(col, south)) {
                    (true, false) => {
                        let tex = grid.texture_for(col, row, Direction::South);
                        self.emit_face(vec2(x0, z1), vec2(x1, z1), bank, tex);
                    }
                    (false, true) => {
                        let tex = grid.texture_for(col, south, Direction::North);
                        self.emit_face(vec2(x1, z1), vec2(x0, z1), bank, tex);
                    }
                    _ => {}
                }
            }
        }
    }

    #[inline]
    fn emit_face(&mut self, left: Vec2, right: Vec2, bank: &TextureBank, tex: TextureId) {
        if self.render_wall(left, right, 0.0, bank.texture_or_missing(tex)) {
            self.stats.faces_drawn += 1;
        } else {
            self.stats.faces_clipped += 1;
        }
    }

    /// Rasterise one wall face standing on the ground-plane segment
    /// `left → right` (cells), spanning elevations `base ..= base + 1`.
    ///
    /// `left` must be the endpoint that appears on the left from the side
    /// the face is meant to be seen from; seen from behind it projects with
    /// left ≥ right and is dropped. Returns `false` when the face is skipped
    /// (behind the near plane or back-facing), `true` otherwise, including
    /// faces that end up off-screen or hidden by nearer walls.
    pub fn render_wall(&mut self, left: Vec2, right: Vec2, base: f32, tex: &Texture) -> bool {
        let cam = self.camera;
        let mut p_l = cam.to_cam(left);
        let mut p_r = cam.to_cam(right);
        let (mut u_l, mut u_r) = (0.0_f32, 1.0_f32);
        if !clip_near(&mut p_l, &mut p_r, &mut u_l, &mut u_r, self.config.near_clip) {
            return false;
        }

        let xl = self.project_x(p_l);
        let xr = self.project_x(p_r);
        if !(xl < xr) {
            return false;
        }

        let top_l = self.project_y(base + 1.0, p_l.y);
        let top_r = self.project_y(base + 1.0, p_r.y);
        let bot_l = self.project_y(base, p_l.y);
        let bot_r = self.project_y(base, p_r.y);

        // 1/z and u/z are linear in screen space
        let iz_l = 1.0 / p_l.y;
        let iz_r = 1.0 / p_r.y;
        let uz_l = u_l * iz_l;
        let uz_r = u_r * iz_r;

        let size = tex.size() as f32;
        let span = xr - xl;
        let (x_start, x_end) = pixel_span(xl, xr, self.width);

        for x in x_start..x_end {
            let t = (x as f32 + 0.5 - xl) / span;
            let iz = iz_l + (iz_r - iz_l) * t;
            if self.wall_depth[x] > iz {
                continue; // a nearer wall already owns this column
            }
            self.wall_depth[x] = iz;

            let depth = DEPTH_UNITS_PER_CELL / iz;
            let u = (((uz_l + (uz_r - uz_l) * t) / iz) * size) as i32;
            let top = top_l + (top_r - top_l) * t;
            let bot = bot_l + (bot_r - bot_l) * t;
            let (y_start, y_end) = pixel_span(top, bot, self.height);
            let v_scale = size / (bot - top);

            let void = depth > self.config.max_depth;
            for y in y_start..y_end {
                let i = y * self.width + x;
                self.surface.pixels_mut()[i] = if void {
                    VOID
                } else {
                    let v = ((y as f32 + 0.5 - top) * v_scale) as i32;
                    tex.sample(u, v)
                };
                self.depth[i] = depth;
            }
        }
        true
    }
}
