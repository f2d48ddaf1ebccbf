//! World data: block types, block faces, and the fixed-size block grid.

pub mod block;
pub mod grid;

pub use block::{texture_index, BlockFace, BlockType};
pub use grid::{BlockGrid, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};
