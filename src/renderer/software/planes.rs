use crate::{
    renderer::{CEILING_HEIGHT, FLOOR_HEIGHT, VOID, software::Software},
    world::{DEPTH_UNITS_PER_CELL, Texture, TextureBank},
};

impl Software {
    /// Floor below the horizon, ceiling above it.
    ///
    /// Every screen row of a flat plane sits at one constant depth, so each
    /// row needs a single divide; texels are then stepped affinely across
    /// the row.
    pub(super) fn cast_flats(&mut self, bank: &TextureBank) {
        let floor = bank.texture_or_missing(self.config.floor_texture);
        let ceiling = bank.texture_or_missing(self.config.ceiling_texture);

        for y in 0..self.height {
            let ratio = (y as f32 - self.half_h) / self.height_f;
            if ratio > 0.0 {
                self.flat_row(y, (FLOOR_HEIGHT + self.camera.lift()) / ratio, floor);
            } else if ratio < 0.0 {
                self.flat_row(y, (CEILING_HEIGHT - self.camera.lift()) / -ratio, ceiling);
            } else {
                // horizon: the plane is infinitely far, nothing to sample
                self.void_row(y, 0.0);
            }
        }
    }

    /// Fill row `y` with a plane at forward depth `z` (depth units).
    fn flat_row(&mut self, y: usize, z: f32, tex: &Texture) {
        // eye above the ceiling / below the floor
        if !(z > 0.0) {
            self.void_row(y, 0.0);
            return;
        }
        if z > self.config.max_depth {
            self.void_row(y, z);
            return;
        }

        // world position (cells) under the centre of the leftmost pixel and
        // the step per pixel, both scaled to texels
        let cam = self.camera;
        let size = tex.size() as f32;
        let z_cells = z / DEPTH_UNITS_PER_CELL;
        let lateral0 = (0.5 - self.half_w) / self.height_f * z_cells;
        let start = cam.to_world(lateral0, z_cells) * size;
        let step = cam.right() * (z_cells / self.height_f * size);

        let row = y * self.width;
        let pixels = &mut self.surface.pixels_mut()[row..row + self.width];
        let depth = &mut self.depth[row..row + self.width];

        let mut p = start;
        for (px, d) in pixels.iter_mut().zip(depth.iter_mut()) {
            *px = tex.sample(p.x.floor() as i32, p.y.floor() as i32);
            *d = z;
            p += step;
        }
    }

    fn void_row(&mut self, y: usize, z: f32) {
        let row = y * self.width;
        self.surface.pixels_mut()[row..row + self.width].fill(VOID);
        self.depth[row..row + self.width].fill(z);
    }
}

#[cfg(test)]
mod tests {
    use crate::{
        renderer::{RenderConfig, Renderer, Software, VOID},
        world::{CameraState, DEPTH_UNITS_PER_CELL, Texture, TextureBank},
    };

    const W: usize = 40;
    const H: usize = 30;

    fn setup() -> (Software, TextureBank) {
        let mut bank = TextureBank::default_with_checker();
        let floor = bank.insert("FLOOR", Texture::solid(64, 0x00_00FF00)).unwrap();
        let ceil = bank.insert("CEIL", Texture::solid(64, 0x00_0000FF)).unwrap();
        let cfg = RenderConfig::default()
            .with_size(W, H)
            .with_flats(floor, ceil);
        (Software::new(cfg, &bank).unwrap(), bank)
    }

    #[test]
    fn floor_below_ceiling_above() {
        let (mut sw, bank) = setup();
        sw.begin_frame(&CameraState::new(2.5, 2.5, 0.3));
        sw.draw_floor_and_ceiling(&bank);

        let s = sw.surface();
        assert_eq!(s.pixel(5, H - 1), Some(0x00_00FF00));
        assert_eq!(s.pixel(5, 0), Some(0x00_0000FF));
    }

    #[test]
    fn horizon_row_is_void_and_finite() {
        let (mut sw, bank) = setup();
        sw.begin_frame(&CameraState::new(2.5, 2.5, 0.0));
        sw.draw_floor_and_ceiling(&bank);

        let horizon = H / 2;
        for x in 0..W {
            assert_eq!(sw.surface().pixel(x, horizon), Some(VOID));
            assert_eq!(sw.depth()[horizon * W + x], 0.0);
        }
        assert!(sw.depth().iter().all(|d| d.is_finite()));
    }

    #[test]
    fn depth_shrinks_toward_screen_edge() {
        let (mut sw, bank) = setup();
        sw.begin_frame(&CameraState::new(2.5, 2.5, 0.0));
        sw.draw_floor_and_ceiling(&bank);

        let d = |y: usize| sw.depth()[y * W];
        // floor: farther near the horizon
        assert!(d(H / 2 + 2) > d(H / 2 + 5));
        assert!(d(H / 2 + 5) > d(H - 1));
        // ceiling mirrors it
        assert!(d(H / 2 - 2) > d(0));
        // bottom row: ratio = 14/30, z = 8 / ratio
        assert!((d(H - 1) - 8.0 * 30.0 / 14.0).abs() < 1e-3);
    }

    #[test]
    fn rows_past_max_depth_are_void() {
        let (mut sw, bank) = setup();
        sw.begin_frame(&CameraState::new(2.5, 2.5, 0.0));
        sw.draw_floor_and_ceiling(&bank);

        // first floor row: ratio = 1/30, z = 240 > 200
        let y = H / 2 + 1;
        assert_eq!(sw.surface().pixel(3, y), Some(VOID));
        assert!((sw.depth()[y * W + 3] - 240.0).abs() < 1e-3);
    }

    #[test]
    fn bob_shifts_floor_depth() {
        let (mut sw, bank) = setup();
        let mut cam = CameraState::new(2.5, 2.5, 0.0);
        sw.begin_frame(&cam);
        sw.draw_floor_and_ceiling(&bank);
        let still = sw.depth()[(H - 1) * W];

        cam.walking = true;
        cam.bob_phase = 9.0; // sin(1.5) ≈ 1
        sw.begin_frame(&cam);
        sw.draw_floor_and_ceiling(&bank);
        let walking = sw.depth()[(H - 1) * W];

        assert!(walking > still);
        let expected = (8.0 + cam.bob()) * 30.0 / 14.0;
        assert!((walking - expected).abs() < 1e-3);
    }

    #[test]
    fn floor_texel_follows_world_position() {
        // left half of the texture red, right half white
        let mut pixels = vec![0x00_FFFFFF; 64 * 64];
        for y in 0..64 {
            for x in 0..32 {
                pixels[y * 64 + x] = 0x00_FF0000;
            }
        }
        let mut bank = TextureBank::default_with_checker();
        let floor = bank.insert("HALF", Texture::new(64, pixels).unwrap()).unwrap();
        let cfg = RenderConfig::default()
            .with_size(W, H)
            .with_flats(floor, floor);
        let mut sw = Software::new(cfg, &bank).unwrap();

        // bottom-centre pixel sits just ahead of the camera: its world x is
        // the camera's, so the fractional cell position picks the half
        let y = H - 1;
        let z_cells = 8.0 * 30.0 / 14.0 / DEPTH_UNITS_PER_CELL;
        assert!(z_cells < 1.5);

        sw.begin_frame(&CameraState::new(3.25, 1.0, 0.0));
        sw.draw_floor_and_ceiling(&bank);
        assert_eq!(sw.surface().pixel(W / 2, y), Some(0x00_FF0000));

        sw.begin_frame(&CameraState::new(3.75, 1.0, 0.0));
        sw.draw_floor_and_ceiling(&bank);
        assert_eq!(sw.surface().pixel(W / 2, y), Some(0x00_FFFFFF));
    }

    #[test]
    fn flats_sample_pixel_centres() {
        // same half/half texture; two columns straddle the camera's x
        let mut pixels = vec![0x00_FFFFFF; 64 * 64];
        for y in 0..64 {
            for x in 0..32 {
                pixels[y * 64 + x] = 0x00_FF0000;
            }
        }
        let mut bank = TextureBank::default_with_checker();
        let floor = bank.insert("HALF", Texture::new(64, pixels).unwrap()).unwrap();
        let cfg = RenderConfig::default().with_size(2, H).with_flats(floor, floor);
        let mut sw = Software::new(cfg, &bank).unwrap();

        // facing +z the right hand is -x: column 0's centre lies at
        // x > 0 (texel 0, red), column 1's at x < 0 (texel 63, white)
        sw.begin_frame(&CameraState::new(0.0, 0.0, 0.0));
        sw.draw_floor_and_ceiling(&bank);
        assert_eq!(sw.surface().pixel(0, H - 1), Some(0x00_FF0000));
        assert_eq!(sw.surface().pixel(1, H - 1), Some(0x00_FFFFFF));
    }
}
