// Format-agnostic repository of textures handed over by the asset side.
// The renderer and world logic interact through `TextureId` only.

use std::collections::HashMap;

use crate::renderer::Rgba;

/// Runtime handle for a texture in this bank.
///
/// *Guaranteed* to remain stable for the lifetime of the bank.
pub type TextureId = u16;

/// `TextureId` whose pixels are the checkerboard fallback.
/// Always = 0 because `TextureBank::new()` inserts it first.
pub const NO_TEXTURE: TextureId = 0;

/// Side length of the stock textures (walls, flats).
pub const TEXTURE_SIZE: usize = 64;

/// Square texture in row-major `0x00RRGGBB`.
///
/// The side length is always a power of two so texel addresses wrap with a
/// mask instead of a modulo.
#[derive(Clone, Debug, PartialEq)]
pub struct Texture {
    size: usize,
    pixels: Vec<Rgba>,
}

/// Convenience checkerboard (magenta/black), the classic "missing" look.
impl Default for Texture {
    fn default() -> Self {
        Texture::checker(TEXTURE_SIZE, 0x00_FF00FF, 0x00_000000, 8)
    }
}

/// Things that can go wrong when building textures or using the bank.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TextureError {
    /// Side length cannot be wrapped with a mask.
    #[error("texture size {0} is not a power of two")]
    NotPowerOfTwo(usize),

    /// Pixel vector does not hold `size * size` entries.
    #[error("texture expects {expected} pixels, got {got}")]
    SizeMismatch { expected: usize, got: usize },

    /// Every bank texture is `TEXTURE_SIZE` on a side.
    #[error("texture is {got}x{got}, the bank holds {expected}x{expected}")]
    WrongSize { expected: usize, got: usize },

    /// Attempted to insert a second texture with an existing name.
    #[error("texture name `{0}` already present in bank")]
    Duplicate(String),

    /// Requested ID is outside `0 .. bank.len()`.
    #[error("texture id {0} out of range")]
    BadId(TextureId),
}

impl Texture {
    /// Wrap `pixels` (row-major, `size * size`) into a texture.
    pub fn new(size: usize, pixels: Vec<Rgba>) -> Result<Self, TextureError> {
        if !size.is_power_of_two() {
            return Err(TextureError::NotPowerOfTwo(size));
        }
        if pixels.len() != size * size {
            return Err(TextureError::SizeMismatch {
                expected: size * size,
                got: pixels.len(),
            });
        }
        Ok(Self { size, pixels })
    }

    /// Single-colour texture.
    pub fn solid(size: usize, colour: Rgba) -> Self {
        let size = size.next_power_of_two();
        Self {
            size,
            pixels: vec![colour; size * size],
        }
    }

    /// Two-colour checkerboard with square cells of `cell` texels.
    pub fn checker(size: usize, a: Rgba, b: Rgba, cell: usize) -> Self {
        let size = size.next_power_of_two();
        let cell = cell.max(1);
        let mut pixels = vec![0; size * size];
        for y in 0..size {
            for x in 0..size {
                pixels[y * size + x] = if ((x / cell) ^ (y / cell)) & 1 == 0 { a } else { b };
            }
        }
        Self { size, pixels }
    }

    /// Running-bond brick pattern: `brick` coloured bricks, `mortar` joints.
    pub fn bricks(size: usize, brick: Rgba, mortar: Rgba) -> Self {
        let size = size.next_power_of_two();
        let course = (size / 8).max(2);
        let length = course * 2;
        let mut pixels = vec![brick; size * size];
        for y in 0..size {
            let row = y / course;
            let shift = if row & 1 == 0 { 0 } else { length / 2 };
            for x in 0..size {
                let joint = y % course == 0 || (x + shift) % length == 0;
                if joint {
                    pixels[y * size + x] = mortar;
                }
            }
        }
        Self { size, pixels }
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Mask a texel coordinate into `0 .. size`. Negative coordinates wrap
    /// too since the mask works on the two's complement bits.
    #[inline(always)]
    pub fn wrap(&self, coord: i32) -> usize {
        (coord & (self.size as i32 - 1)) as usize
    }

    /// Sample with wrap-around addressing on both axes.
    #[inline(always)]
    pub fn sample(&self, u: i32, v: i32) -> Rgba {
        self.pixels[self.wrap(v) * self.size + self.wrap(u)]
    }
}

/// A format-agnostic cache of textures.
///
/// * Does **not** know about image files; that's the loader's job.
/// * Stores exactly one copy of every name.
/// * ID **0** is always the "missing" checkerboard.
///
/// **Thread-safety:** access `TextureBank` from a single thread or wrap it
/// in `RwLock`.
pub struct TextureBank {
    by_name: HashMap<String, TextureId>,
    data: Vec<Texture>,
}

impl Default for TextureBank {
    fn default() -> Self {
        Self::default_with_checker()
    }
}

impl TextureBank {
    // ---------------------------------------------------------------------
    // Constructors
    // ---------------------------------------------------------------------

    /// Create an empty bank with a mandatory *missing* texture used as
    /// fallback. The texture is inserted under the fixed name `"MISSING"`
    /// and obtains the handle **0**.
    pub fn new(missing_tex: Texture) -> Self {
        let mut by_name = HashMap::new();
        by_name.insert("MISSING".into(), NO_TEXTURE);
        Self {
            by_name,
            data: vec![missing_tex],
        }
    }

    pub fn default_with_checker() -> Self {
        Self::new(Texture::default())
    }

    // ---------------------------------------------------------------------
    // Query helpers
    // ---------------------------------------------------------------------

    /// Number of textures stored (including the "missing" one).
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.len() == 1
    } // only checker

    /// Obtain the id for a *loaded* texture by name.
    pub fn id(&self, name: &str) -> Option<TextureId> {
        self.by_name.get(name).copied()
    }

    pub fn contains(&self, id: TextureId) -> bool {
        (id as usize) < self.data.len()
    }

    /// Borrow a texture by id, with bounds-checking.
    pub fn texture(&self, id: TextureId) -> Result<&Texture, TextureError> {
        self.data.get(id as usize).ok_or(TextureError::BadId(id))
    }

    /// Fallback-safe query used inside a frame: unknown ids resolve to the
    /// checkerboard.
    #[inline]
    pub fn texture_or_missing(&self, id: TextureId) -> &Texture {
        self.data
            .get(id as usize)
            .unwrap_or(&self.data[NO_TEXTURE as usize])
    }

    // ---------------------------------------------------------------------
    // Mutations
    // ---------------------------------------------------------------------

    /// Insert a texture under `name`.
    ///
    /// * Returns the newly assigned `TextureId`.
    /// * Fails if the name already exists (`Duplicate`) or the texture is
    ///   not `TEXTURE_SIZE` on a side (`WrongSize`).
    pub fn insert<S: Into<String>>(
        &mut self,
        name: S,
        tex: Texture,
    ) -> Result<TextureId, TextureError> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(TextureError::Duplicate(name));
        }
        if tex.size != TEXTURE_SIZE {
            return Err(TextureError::WrongSize {
                expected: TEXTURE_SIZE,
                got: tex.size,
            });
        }
        let id = self.data.len() as TextureId;
        log::debug!("texture `{name}` -> id {id} ({0}x{0})", tex.size);
        self.data.push(tex);
        self.by_name.insert(name, id);
        Ok(id)
    }
}

/*======================================================================*/
/*                               Tests                                  */
/*======================================================================*/
