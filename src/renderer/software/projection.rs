use glam::Vec2;

use crate::renderer::software::Software;

/// Clip a camera-space segment to the near plane, carrying the texture
/// coordinate along. Returns false if the segment is completely behind.
pub(super) fn clip_near(
    p1: &mut Vec2,
    p2: &mut Vec2,
    u1: &mut f32,
    u2: &mut f32,
    near: f32,
) -> bool {
    if p1.y < near && p2.y < near {
        return false;
    }
    if p1.y < near {
        let t = (near - p1.y) / (p2.y - p1.y);
        *p1 += (*p2 - *p1) * t;
        p1.y = near;
        *u1 += (*u2 - *u1) * t;
    }
    if p2.y < near {
        let t = (near - p2.y) / (p1.y - p2.y);
        *p2 += (*p1 - *p2) * t;
        p2.y = near;
        *u2 += (*u1 - *u2) * t;
    }
    true
}

/// First and one-past-last pixel whose centre lies in `[lo, hi)`, clamped
/// to `0..limit`.
#[inline(always)]
pub(super) fn pixel_span(lo: f32, hi: f32, limit: usize) -> (usize, usize) {
    let first = (lo - 0.5).ceil().max(0.0);
    let last = (hi - 0.5).ceil().min(limit as f32);
    if first < last {
        (first as usize, last as usize)
    } else {
        (0, 0)
    }
}

impl Software {
    /// Camera space → screen column.
    #[inline(always)]
    pub(super) fn project_x(&self, p: Vec2) -> f32 {
        self.half_w + p.x / p.y * self.height_f
    }

    /// Elevation (cells above the floor) at camera depth `depth` → screen row.
    #[inline(always)]
    pub(super) fn project_y(&self, elevation: f32, depth: f32) -> f32 {
        self.half_h - (elevation - self.camera.eye()) / depth * self.height_f
    }
}
