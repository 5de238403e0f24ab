mod camera;
mod grid;
mod texture;

pub use camera::{CameraState, DEPTH_UNITS_PER_CELL};

pub use grid::{Block, BlockGrid, Direction, GridError, LevelGrid};

pub use texture::{NO_TEXTURE, TEXTURE_SIZE, Texture, TextureBank, TextureError, TextureId};
