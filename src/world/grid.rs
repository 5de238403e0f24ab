//! Read-only view of the block map the wall caster walks.
//!
//! Out-of-range coordinates never fail: they resolve to
//! [`Block::BOUNDARY`], a solid block, so the caster needs no edge cases.

use thiserror::Error;

use crate::world::texture::{NO_TEXTURE, TextureId};

/// Face orientation on the ground plane. `North` faces `-z` (row - 1),
/// `East` faces `+x` (column + 1).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];

    #[inline]
    fn index(self) -> usize {
        self as usize
    }
}

/// One cell of the map.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Block {
    pub solid: bool,
    /// Face textures indexed by [`Direction`].
    pub faces: [TextureId; 4],
}

impl Block {
    pub const EMPTY: Block = Block {
        solid: false,
        faces: [NO_TEXTURE; 4],
    };

    /// What every out-of-range query sees.
    pub const BOUNDARY: Block = Block {
        solid: true,
        faces: [NO_TEXTURE; 4],
    };

    /// Solid block with the same texture on all four faces.
    pub const fn wall(tex: TextureId) -> Self {
        Block {
            solid: true,
            faces: [tex; 4],
        }
    }

    #[inline]
    pub fn face(&self, dir: Direction) -> TextureId {
        self.faces[dir.index()]
    }
}

/// What the renderer needs to know about a level.
pub trait LevelGrid {
    fn is_solid(&self, col: i32, row: i32) -> bool;

    /// Texture of the face of `(col, row)` that points toward `dir`.
    fn texture_for(&self, col: i32, row: i32, dir: Direction) -> TextureId;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GridError {
    #[error("level map is empty")]
    Empty,

    #[error("row {row} has {got} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("unknown map glyph `{0}`")]
    UnknownGlyph(char),
}

/// Dense row-major block map.
#[derive(Clone, Debug)]
pub struct BlockGrid {
    width: usize,
    height: usize,
    blocks: Vec<Block>,
    boundary: Block,
}

impl BlockGrid {
    /// All-empty map of `width × height` cells.
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            blocks: vec![Block::EMPTY; width * height],
            boundary: Block::BOUNDARY,
        }
    }

    /// Parse a text map, one line per row.
    ///
    /// * `.` or space: empty cell
    /// * `#`: solid, `walls[0]` on every face
    /// * `1`‥`9`: solid, `walls[n]` on every face (clamped to the palette)
    ///
    /// Blank leading/trailing lines are ignored.
    pub fn from_ascii(map: &str, walls: &[TextureId]) -> Result<Self, GridError> {
        let rows: Vec<&str> = map
            .lines()
            .map(str::trim_end)
            .skip_while(|l| l.is_empty())
            .collect();
        let rows = match rows.iter().rposition(|l| !l.is_empty()) {
            Some(last) => &rows[..=last],
            None => return Err(GridError::Empty),
        };

        let width = rows[0].chars().count();
        let mut grid = Self::new(width, rows.len());
        let pick = |n: usize| -> TextureId {
            walls
                .get(n.min(walls.len().saturating_sub(1)))
                .copied()
                .unwrap_or(NO_TEXTURE)
        };

        for (row, line) in rows.iter().enumerate() {
            let got = line.chars().count();
            if got != width {
                return Err(GridError::Ragged {
                    row,
                    expected: width,
                    got,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                let block = match ch {
                    '.' | ' ' => Block::EMPTY,
                    '#' => Block::wall(pick(0)),
                    '1'..='9' => Block::wall(pick(ch as usize - '0' as usize)),
                    other => return Err(GridError::UnknownGlyph(other)),
                };
                grid.blocks[row * width + col] = block;
            }
        }
        Ok(grid)
    }

    /// Use `tex` on every face of the out-of-range boundary.
    pub fn with_boundary_texture(mut self, tex: TextureId) -> Self {
        self.boundary = Block::wall(tex);
        self
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
    fn index(&self, col: i32, row: i32) -> Option<usize> {
        if col < 0 || row < 0 || col as usize >= self.width || row as usize >= self.height {
            None
        } else {
            Some(row as usize * self.width + col as usize)
        }
    }

    /// Block at `(col, row)`; the boundary block outside the map.
    #[inline]
    pub fn get(&self, col: i32, row: i32) -> &Block {
        match self.index(col, row) {
            Some(i) => &self.blocks[i],
            None => &self.boundary,
        }
    }

    /// Overwrite a cell. Returns `false` if the coordinate is off the map.
    pub fn set(&mut self, col: i32, row: i32, block: Block) -> bool {
        match self.index(col, row) {
            Some(i) => {
                self.blocks[i] = block;
                true
            }
            None => false,
        }
    }

    /// Every texture a face in this map (boundary included) may request.
    pub fn texture_ids(&self) -> impl Iterator<Item = TextureId> + '_ {
        self.blocks
            .iter()
            .chain(std::iter::once(&self.boundary))
            .filter(|b| b.solid)
            .flat_map(|b| b.faces)
    }
}

impl LevelGrid for BlockGrid {
    #[inline]
    fn is_solid(&self, col: i32, row: i32) -> bool {
        self.get(col, row).solid
    }

    #[inline]
    fn texture_for(&self, col: i32, row: i32, dir: Direction) -> TextureId {
        self.get(col, row).face(dir)
    }
}
