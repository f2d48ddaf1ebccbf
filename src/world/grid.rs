//! The fixed-size block grid holding the entire renderable world.
//!
//! One grid of `GRID_WIDTH × GRID_HEIGHT × GRID_DEPTH` block codes is
//! generated at startup and never mutated afterwards. Storage is a flat
//! owned slice indexed by `x·H·D + y·D + z`; that mapping is the contract
//! between the generator writing codes and the mesher reading them, and it
//! must not change independently on either side.

use super::block::{BlockCode, BlockType};

/// Grid extent along X.
pub const GRID_WIDTH: usize = 16;
/// Grid extent along Y. The terrain surface is the `y == 0` plane; larger
/// `y` is deeper underground (TOP faces −Y).
pub const GRID_HEIGHT: usize = 256;
/// Grid extent along Z.
pub const GRID_DEPTH: usize = 16;

/// Number of dirt layers directly beneath the grass surface.
const DIRT_BAND_END: usize = 5;

/// A dense volumetric grid of block codes.
pub struct BlockGrid {
    cells: Box<[BlockCode]>,
}

impl BlockGrid {
    /// Generates the world with the fixed startup rule: grass at the
    /// surface plane, a shallow dirt band beneath it, stone below that.
    /// Every cell is solid.
    pub fn generate() -> Self {
        Self::from_fn(|_, y, _| {
            if y == 0 {
                BlockType::Grass
            } else if y < DIRT_BAND_END {
                BlockType::Dirt
            } else {
                BlockType::Stone
            }
        })
    }

    /// Builds a grid by evaluating `f` at every cell coordinate.
    ///
    /// Used by [`generate`](Self::generate) and by tests that need grids
    /// with known shapes.
    pub fn from_fn<F>(f: F) -> Self
    where
        F: Fn(usize, usize, usize) -> BlockType,
    {
        let mut cells = vec![BlockType::Air as BlockCode; GRID_WIDTH * GRID_HEIGHT * GRID_DEPTH];
        for x in 0..GRID_WIDTH {
            for y in 0..GRID_HEIGHT {
                for z in 0..GRID_DEPTH {
                    cells[linear_index(x, y, z)] = f(x, y, z) as BlockCode;
                }
            }
        }
        Self {
            cells: cells.into_boxed_slice(),
        }
    }

    /// Reads the block at the given coordinates.
    ///
    /// Returns `None` when any coordinate is outside the grid. This is the
    /// only read path; there is no unchecked access.
    pub fn block_at(&self, x: i32, y: i32, z: i32) -> Option<BlockType> {
        if x < 0
            || x >= GRID_WIDTH as i32
            || y < 0
            || y >= GRID_HEIGHT as i32
            || z < 0
            || z >= GRID_DEPTH as i32
        {
            return None;
        }
        let code = self.cells[linear_index(x as usize, y as usize, z as usize)];
        Some(BlockType::from_code(code))
    }

    /// Whether the cell at the given coordinates holds a solid block.
    /// Out-of-bounds coordinates count as non-solid (open world edges).
    pub fn is_solid(&self, x: i32, y: i32, z: i32) -> bool {
        self.block_at(x, y, z).is_some_and(BlockType::is_solid)
    }
}

/// The linear-index mapping shared by the generator and the mesher.
fn linear_index(x: usize, y: usize, z: usize) -> usize {
    x * GRID_HEIGHT * GRID_DEPTH + y * GRID_DEPTH + z
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn linear_index_matches_row_major_layout() {
        assert_eq!(linear_index(0, 0, 0), 0);
        assert_eq!(linear_index(0, 0, 1), 1);
        assert_eq!(linear_index(0, 1, 0), GRID_DEPTH);
        assert_eq!(linear_index(1, 0, 0), GRID_HEIGHT * GRID_DEPTH);
        assert_eq!(
            linear_index(GRID_WIDTH - 1, GRID_HEIGHT - 1, GRID_DEPTH - 1),
            GRID_WIDTH * GRID_HEIGHT * GRID_DEPTH - 1
        );
    }

    #[test]
    fn out_of_bounds_reads_return_none() {
        let grid = BlockGrid::generate();
        assert_eq!(grid.block_at(-1, 0, 0), None);
        assert_eq!(grid.block_at(0, -1, 0), None);
        assert_eq!(grid.block_at(0, 0, -1), None);
        assert_eq!(grid.block_at(GRID_WIDTH as i32, 0, 0), None);
        assert_eq!(grid.block_at(0, GRID_HEIGHT as i32, 0), None);
        assert_eq!(grid.block_at(0, 0, GRID_DEPTH as i32), None);
        assert!(!grid.is_solid(-1, 0, 0));
    }

    #[test]
    fn generated_terrain_is_banded_by_depth() {
        let grid = BlockGrid::generate();
        assert_eq!(grid.block_at(3, 0, 7), Some(BlockType::Grass));
        assert_eq!(grid.block_at(3, 1, 7), Some(BlockType::Dirt));
        assert_eq!(grid.block_at(3, 4, 7), Some(BlockType::Dirt));
        assert_eq!(grid.block_at(3, 5, 7), Some(BlockType::Stone));
        assert_eq!(
            grid.block_at(3, GRID_HEIGHT as i32 - 1, 7),
            Some(BlockType::Stone)
        );
    }

    #[test]
    fn from_fn_places_blocks_where_asked() {
        let grid = BlockGrid::from_fn(|x, y, z| {
            if (x, y, z) == (5, 6, 7) {
                BlockType::Stone
            } else {
                BlockType::Air
            }
        });
        assert_eq!(grid.block_at(5, 6, 7), Some(BlockType::Stone));
        assert_eq!(grid.block_at(5, 6, 8), Some(BlockType::Air));
        assert!(grid.is_solid(5, 6, 7));
        assert!(!grid.is_solid(6, 6, 7));
    }
}
