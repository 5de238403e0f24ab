use bitflags::bitflags;

use crate::world::{NO_TEXTURE, TextureId};

/// Output resolution used when nothing else is asked for.
pub const DEFAULT_WIDTH: usize = 320;
pub const DEFAULT_HEIGHT: usize = 200;

/// Eye-to-floor (and eye-to-ceiling) distance at rest, in depth units.
pub const FLOOR_HEIGHT: f32 = 8.0;
pub const CEILING_HEIGHT: f32 = 8.0;

bitflags! {
    /// Stages run by [`RendererExt::draw_frame`](super::RendererExt::draw_frame).
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Passes: u8 {
        const FLOOR   = 0x01;
        const WALLS   = 0x02;
        const SPRITES = 0x04;
        const SHADE   = 0x08;
    }
}

impl Default for Passes {
    fn default() -> Self {
        Passes::all()
    }
}

/// Tunables fixed at renderer construction.
#[derive(Clone, Debug, PartialEq)]
pub struct RenderConfig {
    pub width: usize,
    pub height: usize,

    /// Camera-space depth (cells) below which geometry is clipped.
    pub near_clip: f32,
    /// Half side of the square, in cells, around the camera that walls and
    /// billboards must fall into.
    pub render_radius: i32,
    /// Depth (depth units) past which casters write void instead of texels.
    pub max_depth: f32,
    /// `K` in `brightness = K / depth`.
    pub shade_constant: f32,

    pub floor_texture: TextureId,
    pub ceiling_texture: TextureId,

    pub passes: Passes,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            near_clip: 0.125,
            render_radius: 13,
            max_depth: 200.0,
            shade_constant: 5000.0,
            floor_texture: NO_TEXTURE,
            ceiling_texture: NO_TEXTURE,
            passes: Passes::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_flats(mut self, floor: TextureId, ceiling: TextureId) -> Self {
        self.floor_texture = floor;
        self.ceiling_texture = ceiling;
        self
    }
}
