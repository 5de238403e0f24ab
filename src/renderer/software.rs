//! ---------------------------------------------------------------------------
//! Software (CPU) grid renderer
//!
//! * Fills a [`Surface`] in **0x00RRGGBB** format plus a per-pixel depth
//!   buffer.
//! * Grid walls come in no particular order, so occlusion is resolved with
//!   depth buffers rather than front-to-back submission: one inverse-depth
//!   entry per column for walls, one depth entry per pixel for everything.
//! * All buffers are sized once in [`Software::new`] and reused.
//! ---------------------------------------------------------------------------

use std::ops::RangeInclusive;

use log::{debug, trace, warn};

use crate::{
    renderer::{Billboard, Passes, RenderConfig, RenderError, Renderer, Surface, VOID},
    world::{BlockGrid, CameraState, LevelGrid, TextureBank},
};

mod planes;
mod projection;
mod shade;
mod sprites;
mod walls;

pub use shade::shade_pixel;

/*───────────────────────────────────────────────────────────────────────*/
/*                              Backend                                 */
/*───────────────────────────────────────────────────────────────────────*/

/// Smallest accepted near-clip distance (cells); keeps projections finite.
const MIN_NEAR_CLIP: f32 = 1.0e-3;

/// What the last frame did. Skipped faces are not errors: they are simply
/// retried next frame with a new camera.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub faces_drawn: u32,
    /// Entirely behind the near plane, or back-facing/degenerate on screen.
    pub faces_clipped: u32,
    pub sprites_drawn: u32,
    /// Outside render range or behind the near plane.
    pub sprites_culled: u32,
}

/// Grid raycaster with a shared depth buffer.
pub struct Software {
    config: RenderConfig,
    surface: Surface,
    /// Forward depth in depth units per pixel; 0 = nothing drawn.
    depth: Vec<f32>,
    /// Inverse depth (1 / cells) of the nearest wall per column.
    wall_depth: Vec<f32>,
    camera: CameraState,
    stats: FrameStats,

    width: usize,
    height: usize,
    width_f: f32,
    height_f: f32,
    half_w: f32,
    half_h: f32,
}

impl Software {
    /// Allocate buffers for `config`'s resolution.
    ///
    /// Fails if the resolution is empty or a flat texture is not in `bank`.
    pub fn new(mut config: RenderConfig, bank: &TextureBank) -> Result<Self, RenderError> {
        let (w, h) = (config.width, config.height);
        if w == 0 || h == 0 {
            return Err(RenderError::BadResolution {
                width: w,
                height: h,
            });
        }
        for id in [config.floor_texture, config.ceiling_texture] {
            if !bank.contains(id) {
                return Err(RenderError::MissingTexture(id));
            }
        }
        if !(config.near_clip >= MIN_NEAR_CLIP) {
            warn!(
                "near clip {} too small, using {MIN_NEAR_CLIP}",
                config.near_clip
            );
            config.near_clip = MIN_NEAR_CLIP;
        }
        debug!(
            "software renderer {w}x{h}, near {} radius {} max depth {}",
            config.near_clip, config.render_radius, config.max_depth
        );

        let width_f = w as f32;
        let height_f = h as f32;
        Ok(Self {
            config,
            surface: Surface::new(w, h),
            depth: vec![0.0; w * h],
            wall_depth: vec![0.0; w],
            camera: CameraState::default(),
            stats: FrameStats::default(),
            width: w,
            height: h,
            width_f,
            height_f,
            half_w: width_f * 0.5,
            half_h: height_f * 0.5,
        })
    }

    /// Reject a level whose faces reference textures `bank` does not hold.
    pub fn validate_grid(grid: &BlockGrid, bank: &TextureBank) -> Result<(), RenderError> {
        match grid.texture_ids().find(|&id| !bank.contains(id)) {
            Some(id) => Err(RenderError::MissingTexture(id)),
            None => Ok(()),
        }
    }

    /// Cells the wall caster visits along one axis around camera coordinate
    /// `c`. Each is paired with its successor, so the low side starts one
    /// cell early. Billboards are culled against the same cells.
    fn range_cells(&self, c: f32) -> RangeInclusive<i32> {
        let r = self.config.render_radius;
        // saturates far off the map
        let cell = c.floor() as i32;
        cell.saturating_sub(r).saturating_sub(1)..=cell.saturating_add(r)
    }

    #[inline]
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    pub fn set_passes(&mut self, passes: Passes) {
        self.config.passes = passes;
    }

    /// Colour buffer of the frame in progress (or the last finished one).
    #[inline]
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Per-pixel forward depth in depth units; 0 where nothing was drawn.
    #[inline]
    pub fn depth(&self) -> &[f32] {
        &self.depth
    }

    /// Per-column inverse depth of the nearest wall; 0 where none.
    #[inline]
    pub fn wall_depth(&self) -> &[f32] {
        &self.wall_depth
    }

    #[inline]
    pub fn stats(&self) -> FrameStats {
        self.stats
    }
}

/*──────────────────────── Renderer trait impl ────────────────────────*/
impl Renderer for Software {
    fn passes(&self) -> Passes {
        self.config.passes
    }

    fn begin_frame(&mut self, camera: &CameraState) {
        self.camera = *camera;
        self.stats = FrameStats::default();

        self.surface.fill(VOID);
        // 0 = "nothing drawn / infinitely far"
        self.depth.fill(0.0);
        self.wall_depth.fill(0.0);
    }

    fn draw_floor_and_ceiling(&mut self, bank: &TextureBank) {
        self.cast_flats(bank);
    }

    fn draw_walls<G: LevelGrid>(&mut self, grid: &G, bank: &TextureBank) {
        self.cast_walls(grid, bank);
    }

    fn draw_billboard(&mut self, billboard: &Billboard<'_>) {
        if self.cast_billboard(billboard) {
            self.stats.sprites_drawn += 1;
        } else {
            self.stats.sprites_culled += 1;
        }
    }

    fn shade(&mut self) {
        self.apply_distance_shading();
    }

    fn end_frame<F>(&mut self, submit: F)
    where
        F: FnOnce(&Surface),
    {
        trace!("frame stats: {:?}", self.stats);
        submit(&self.surface);
    }
}

/*──────────────────────────────── Tests ───────────────────────────────*/
