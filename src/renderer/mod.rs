//! Rendering abstraction layer.
//!
//! *The rest of the game never touches the frame buffer directly.* Each
//! tic it hands a [`CameraState`], a [`LevelGrid`] and a list of
//! [`Billboard`]s to a type that implements [`Renderer`], then receives the
//! finished [`Surface`].
//!
//! A frame always runs the same stages:
//!
//! ```text
//! begin_frame → floor/ceiling → walls → billboards → shade → end_frame
//! ```
//!
//! Sprites need no sorting: every stage depth-tests against one shared
//! depth buffer. [`RendererExt`] wraps the sequence in a single call.

use glam::Vec3;
use thiserror::Error;

use crate::world::{CameraState, LevelGrid, TextureBank, TextureError, TextureId};

mod config;
pub mod software;
mod surface;

pub use config::{
    CEILING_HEIGHT, DEFAULT_HEIGHT, DEFAULT_WIDTH, FLOOR_HEIGHT, Passes, RenderConfig,
};
pub use software::{FrameStats, Software};
pub use surface::Surface;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

/// Colour written where nothing is visible.
pub const VOID: Rgba = 0x00_000000;

/// Sprite texels with this RGB are skipped.
pub const TRANSPARENT: Rgba = 0x00_FF00FF;

/// `true` if `px` is the sprite transparency key (alpha byte ignored).
#[inline(always)]
pub fn is_transparent(px: Rgba) -> bool {
    px & 0x00_FFFFFF == TRANSPARENT
}

/// Construction-time failures. Nothing inside a frame returns an error.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("output resolution {width}x{height} is empty")]
    BadResolution { width: usize, height: usize },

    /// A flat or grid face references an id the bank does not hold.
    #[error("texture id {0} is not registered")]
    MissingTexture(TextureId),

    #[error(transparent)]
    Texture(#[from] TextureError),
}

/// One camera-facing sprite for the current frame.
#[derive(Clone, Copy, Debug)]
pub struct Billboard<'a> {
    /// `x` = column, `z` = row, `y` = elevation of the sprite centre (cells).
    pub pos: Vec3,
    /// Extra lift added to `pos.y` (hover/bounce animations), in cells.
    pub y_offset: f32,
    /// Row-major source texels, `width * height` long.
    pub pixels: &'a [Rgba],
    pub width: usize,
    pub height: usize,
}

impl<'a> Billboard<'a> {
    pub fn new(pos: Vec3, pixels: &'a [Rgba], width: usize, height: usize) -> Self {
        Self {
            pos,
            y_offset: 0.0,
            pixels,
            width,
            height,
        }
    }

    pub fn with_offset(mut self, y_offset: f32) -> Self {
        self.y_offset = y_offset;
        self
    }
}

/// A renderer that owns its colour and depth buffers for the whole frame.
///
/// `end_frame` hands the finished surface to a user-supplied closure.
/// Software callers typically forward it to their window manager.
pub trait Renderer {
    /// Stages [`RendererExt::draw_frame`] runs.
    fn passes(&self) -> Passes;

    /// Clear colour/depth scratch and freeze `camera` for this frame.
    fn begin_frame(&mut self, camera: &CameraState);

    /// Fill every row with floor or ceiling texels.
    fn draw_floor_and_ceiling(&mut self, bank: &TextureBank);

    /// Rasterise every solid/empty boundary within render range.
    fn draw_walls<G: LevelGrid>(&mut self, grid: &G, bank: &TextureBank);

    /// Depth-tested sprite quad.
    fn draw_billboard(&mut self, billboard: &Billboard<'_>);

    /// Apply distance falloff to the colour buffer.
    fn shade(&mut self);

    /// Finish the frame and **loan** the finished surface to `submit`.
    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&Surface);
}

/// Convenience blanket-impl running the full stage sequence.
pub trait RendererExt: Renderer {
    fn draw_frame<G, F>(
        &mut self,
        camera: &CameraState,
        grid: &G,
        billboards: &[Billboard<'_>],
        bank: &TextureBank,
        submit: F,
    ) where
        G: LevelGrid,
        F: FnOnce(&Surface),
    {
        let passes = self.passes();
        self.begin_frame(camera);
        if passes.contains(Passes::FLOOR) {
            self.draw_floor_and_ceiling(bank);
        }
        if passes.contains(Passes::WALLS) {
            self.draw_walls(grid, bank);
        }
        if passes.contains(Passes::SPRITES) {
            for b in billboards {
                self.draw_billboard(b);
            }
        }
        if passes.contains(Passes::SHADE) {
            self.shade();
        }
        self.end_frame(submit);
    }

    /// Render a frame and blit it onto `screen` at `(x, y)`.
    #[allow(clippy::too_many_arguments)]
    fn render_into<G: LevelGrid>(
        &mut self,
        camera: &CameraState,
        grid: &G,
        billboards: &[Billboard<'_>],
        bank: &TextureBank,
        screen: &mut Surface,
        x: i32,
        y: i32,
    ) {
        self.draw_frame(camera, grid, billboards, bank, |frame| {
            screen.blit(frame, x, y)
        });
    }
}
impl<T: Renderer + ?Sized> RendererExt for T {}
