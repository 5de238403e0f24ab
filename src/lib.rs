//! Grid raycaster: a block map, a camera and a handful of sprites in, one
//! shaded frame out.
//!
//! * [`world`] holds what the game side owns: camera pose, block grid,
//!   texture bank.
//! * [`renderer`] turns that into pixels on the CPU.

pub mod renderer;
pub mod world;
