use crate::renderer::Rgba;

/// Fixed-size colour buffer in row-major `0x00RRGGBB`.
///
/// Surfaces never share storage; the only cross-surface operation is
/// [`Surface::blit`].
#[derive(Clone, Debug, PartialEq)]
pub struct Surface {
    width: usize,
    height: usize,
    pixels: Vec<Rgba>,
}

impl Surface {
    /// Black surface of `width × height`.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![0; width * height],
        }
    }

    /// Wrap existing pixels. Returns `None` if the length does not match.
    pub fn from_pixels(width: usize, height: usize, pixels: Vec<Rgba>) -> Option<Self> {
        (pixels.len() == width * height).then_some(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    #[inline]
    pub fn pixels_mut(&mut self) -> &mut [Rgba] {
        &mut self.pixels
    }

    pub fn fill(&mut self, colour: Rgba) {
        self.pixels.fill(colour);
    }

    /// Colour at `(x, y)`, or `None` off the surface.
    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgba> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, colour: Rgba) {
        if x < self.width && y < self.height {
            self.pixels[y * self.width + x] = colour;
        }
    }

    /// Copy all of `src` so its top-left lands on `(x_off, y_off)`.
    /// Pixels that fall outside this surface are dropped.
    pub fn blit(&mut self, src: &Surface, x_off: i32, y_off: i32) {
        // clip the source rectangle once, then copy row slices
        let x0 = (-(x_off as i64)).clamp(0, src.width as i64) as usize;
        let y0 = (-(y_off as i64)).clamp(0, src.height as i64) as usize;
        let x1 = (self.width as i64 - x_off as i64).clamp(0, src.width as i64) as usize;
        let y1 = (self.height as i64 - y_off as i64).clamp(0, src.height as i64) as usize;
        if x0 >= x1 || y0 >= y1 {
            return;
        }

        for sy in y0..y1 {
            let dy = (sy as i64 + y_off as i64) as usize;
            let dx = (x0 as i64 + x_off as i64) as usize;
            let src_row = &src.pixels[sy * src.width + x0..sy * src.width + x1];
            let dst_start = dy * self.width + dx;
            self.pixels[dst_start..dst_start + src_row.len()].copy_from_slice(src_row);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(w: usize, h: usize) -> Surface {
        Surface::from_pixels(w, h, (1..=(w * h) as Rgba).collect()).unwrap()
    }

    #[test]
    fn blit_inside() {
        let mut dst = Surface::new(4, 4);
        dst.blit(&numbered(2, 2), 1, 1);
        assert_eq!(dst.pixel(1, 1), Some(1));
        assert_eq!(dst.pixel(2, 1), Some(2));
        assert_eq!(dst.pixel(1, 2), Some(3));
        assert_eq!(dst.pixel(2, 2), Some(4));
        assert_eq!(dst.pixels().iter().filter(|&&p| p != 0).count(), 4);
    }

    #[test]
    fn blit_clips_every_edge() {
        let src = numbered(3, 3);

        let mut dst = Surface::new(4, 4);
        dst.blit(&src, -1, -2);
        // only the bottom row's two right pixels survive: (1,2)->(0,0), (2,2)->(1,0)
        assert_eq!(dst.pixel(0, 0), Some(8));
        assert_eq!(dst.pixel(1, 0), Some(9));
        assert_eq!(dst.pixels().iter().filter(|&&p| p != 0).count(), 2);

        let mut dst = Surface::new(4, 4);
        dst.blit(&src, 3, 3);
        assert_eq!(dst.pixel(3, 3), Some(1));
        assert_eq!(dst.pixels().iter().filter(|&&p| p != 0).count(), 1);
    }

    #[test]
    fn blit_fully_outside_is_noop() {
        let mut dst = Surface::new(4, 4);
        for (x, y) in [(4, 0), (0, 4), (-3, 0), (0, -3), (i32::MIN, i32::MAX)] {
            dst.blit(&numbered(3, 3), x, y);
        }
        assert!(dst.pixels().iter().all(|&p| p == 0));
    }

    #[test]
    fn from_pixels_checks_len() {
        assert!(Surface::from_pixels(2, 2, vec![0; 3]).is_none());
    }
}
