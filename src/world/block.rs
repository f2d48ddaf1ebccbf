//! Block types and block faces.
//!
//! A block is stored in the grid as a single `u8` type code; [`BlockType`]
//! is the decoded view of that code. [`BlockFace`] enumerates the six faces
//! of a cube together with the neighbor offset used for visibility testing.
//!
//! Note the vertical convention: this renderer's TOP is the
//! coordinate-decreasing-Y direction. The terrain surface sits at `y == 0`
//! and the stack grows downward in +Y.

use num_derive::FromPrimitive;

/// The underlying integer type block codes are stored as in the grid.
pub type BlockCode = u8;

/// Texture-atlas cell returned for any (type, face) pair without an
/// assigned texture. Still yields valid UVs, just visibly wrong ones.
pub const UNMAPPED_TEXTURE_INDEX: u8 = 99;

/// Every kind of block a grid cell can hold.
///
/// `Air` carries no geometry; the mesher skips it entirely and treats it as
/// transparent when testing neighbor occupancy.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, FromPrimitive)]
#[repr(u8)]
pub enum BlockType {
    /// Empty space. Never meshed.
    Air = 0,
    /// Surface block of the generated terrain.
    Grass,
    /// Shallow sub-surface filler.
    Dirt,
    /// Everything below the dirt band.
    Stone,
}

impl BlockType {
    /// Decodes a stored block code.
    ///
    /// # Panics
    /// Panics if `code` does not correspond to a known block type; the grid
    /// is the only writer of codes, so an unknown value is a logic error.
    pub fn from_code(code: BlockCode) -> Self {
        let decoded: Option<Self> = num::FromPrimitive::from_u8(code);
        decoded.unwrap()
    }

    /// Whether this block occupies its cell for face-visibility purposes.
    pub fn is_solid(self) -> bool {
        self != BlockType::Air
    }
}

/// The six faces of a block, each with a canonical neighbor offset.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum BlockFace {
    /// Faces −Z.
    Front,
    /// Faces +Z.
    Back,
    /// Faces −X.
    Left,
    /// Faces +X.
    Right,
    /// Faces −Y (up, in this renderer's convention).
    Top,
    /// Faces +Y.
    Bottom,
}

impl BlockFace {
    /// All faces, in the order the mesher emits them.
    pub const ALL: [BlockFace; 6] = [
        BlockFace::Front,
        BlockFace::Back,
        BlockFace::Left,
        BlockFace::Right,
        BlockFace::Top,
        BlockFace::Bottom,
    ];

    /// Offset of the neighboring cell this face looks out onto.
    pub fn neighbor_offset(self) -> (i32, i32, i32) {
        match self {
            BlockFace::Front => (0, 0, -1),
            BlockFace::Back => (0, 0, 1),
            BlockFace::Left => (-1, 0, 0),
            BlockFace::Right => (1, 0, 0),
            BlockFace::Top => (0, -1, 0),
            BlockFace::Bottom => (0, 1, 0),
        }
    }
}

/// Resolves the texture-atlas cell for one face of one block type.
///
/// This is a data table, not logic: grass gets a dedicated top and bottom
/// cell with a shared side cell, and every other combination falls through
/// to [`UNMAPPED_TEXTURE_INDEX`].
pub fn texture_index(block: BlockType, face: BlockFace) -> u8 {
    match block {
        BlockType::Grass => match face {
            BlockFace::Top => 0,
            BlockFace::Bottom => 2,
            _ => 1,
        },
        _ => UNMAPPED_TEXTURE_INDEX,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_codes_round_trip() {
        for block in [
            BlockType::Air,
            BlockType::Grass,
            BlockType::Dirt,
            BlockType::Stone,
        ] {
            assert_eq!(BlockType::from_code(block as BlockCode), block);
        }
    }

    #[test]
    fn grass_has_dedicated_top_and_bottom_cells() {
        assert_eq!(texture_index(BlockType::Grass, BlockFace::Top), 0);
        assert_eq!(texture_index(BlockType::Grass, BlockFace::Bottom), 2);
        for face in [
            BlockFace::Front,
            BlockFace::Back,
            BlockFace::Left,
            BlockFace::Right,
        ] {
            assert_eq!(texture_index(BlockType::Grass, face), 1);
        }
    }

    #[test]
    fn unmapped_combinations_get_the_sentinel_cell() {
        for face in BlockFace::ALL {
            assert_eq!(
                texture_index(BlockType::Dirt, face),
                UNMAPPED_TEXTURE_INDEX
            );
            assert_eq!(
                texture_index(BlockType::Stone, face),
                UNMAPPED_TEXTURE_INDEX
            );
        }
    }

    #[test]
    fn opposite_faces_have_opposite_offsets() {
        let pairs = [
            (BlockFace::Front, BlockFace::Back),
            (BlockFace::Left, BlockFace::Right),
            (BlockFace::Top, BlockFace::Bottom),
        ];
        for (a, b) in pairs {
            let (ax, ay, az) = a.neighbor_offset();
            let (bx, by, bz) = b.neighbor_offset();
            assert_eq!((ax + bx, ay + by, az + bz), (0, 0, 0));
        }
    }
}
