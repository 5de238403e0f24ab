use crate::renderer::{Rgba, VOID, software::Software};

/// Scale the RGB channels of `px` by `brightness / 255`, keeping the top byte.
#[inline(always)]
pub fn shade_pixel(px: Rgba, brightness: u32) -> Rgba {
    let b = brightness.min(255);
    let r = ((px >> 16) & 0xFF) * b / 255;
    let g = ((px >> 8) & 0xFF) * b / 255;
    let bl = (px & 0xFF) * b / 255;
    (px & 0xFF00_0000) | (r << 16) | (g << 8) | bl
}

impl Software {
    /// Distance falloff over the whole frame: `brightness = K / depth`.
    ///
    /// Pixels with depth 0 were never written (or sit on the horizon) and
    /// are forced to black.
    pub(super) fn apply_distance_shading(&mut self) {
        let k = self.config.shade_constant;
        for (px, &d) in self.surface.pixels_mut().iter_mut().zip(&self.depth) {
            if !(d > 0.0) || !d.is_finite() {
                *px = VOID;
                continue;
            }
            let brightness = (k / d).clamp(0.0, 255.0) as u32;
            *px = shade_pixel(*px, brightness);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        renderer::{Billboard, RenderConfig, Renderer},
        world::{CameraState, TextureBank},
    };
    use glam::vec3;

    #[test]
    fn shade_pixel_scales_channels() {
        assert_eq!(shade_pixel(0x00_FF8040, 255), 0x00_FF8040);
        assert_eq!(shade_pixel(0x00_FF8040, 0), 0);
        assert_eq!(shade_pixel(0xAA_FF0000, 51), 0xAA_330000);
        assert_eq!(shade_pixel(0x00_FFFFFF, 1000), 0x00_FFFFFF);
    }

    #[test]
    fn unwritten_pixels_go_black() {
        let bank = TextureBank::default_with_checker();
        let mut sw = Software::new(RenderConfig::default().with_size(8, 8), &bank).unwrap();
        sw.begin_frame(&CameraState::default());
        sw.surface.fill(0x00_FFFFFF); // colour without depth

        sw.shade();
        assert!(sw.surface().pixels().iter().all(|&p| p == VOID));
    }

    #[test]
    fn brightness_falls_with_depth() {
        let bank = TextureBank::default_with_checker();
        let mut sw = Software::new(RenderConfig::default().with_size(64, 48), &bank).unwrap();
        sw.begin_frame(&CameraState::new(0.0, 0.0, 0.0));
        let white = vec![0x00_FFFFFF; 64 * 64];
        // near: depth 16 → 5000/16 clamps to 255
        sw.draw_billboard(&Billboard::new(vec3(-0.5, 0.5, 1.0), &white, 64, 64));
        // far: depth 160 → 31
        sw.draw_billboard(&Billboard::new(vec3(0.5, 0.5, 10.0), &white, 64, 64));
        sw.shade();

        let near = sw.surface().pixel(56, 24).unwrap();
        let far_x = (32.0 - 0.5 / 10.0 * 48.0) as usize;
        let far = sw.surface().pixel(far_x, 24).unwrap();
        assert_eq!(near, 0x00_FFFFFF);
        assert_eq!(far, shade_pixel(0x00_FFFFFF, 31));
        assert!(sw.depth().iter().all(|d| d.is_finite()));
    }
}
