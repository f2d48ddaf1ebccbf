//! Face-culled chunk meshing.
//!
//! [`generate_mesh`] converts the block grid into a triangle mesh containing
//! only the faces a viewer could ever see: a face is emitted when the
//! neighboring cell is air or lies outside the grid. Cells at the world
//! edge therefore always emit their outward faces — the single-chunk world
//! has no neighboring chunks to cull against.
//!
//! The output is deterministic: the cell loop runs x-major, then y, then z,
//! and faces are emitted in the fixed order front, back, left, right, top,
//! bottom, so repeated runs over the same grid produce bit-identical
//! buffers.

use crate::world::{texture_index, BlockFace, BlockGrid, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

use super::vertex::Vertex;

/// Number of atlas cells per row.
const ATLAS_COLUMNS: u8 = 10;
/// UV extent of one atlas cell along each axis.
const ATLAS_CELL_UV: f32 = 0.1;

/// Index pattern for one quad: two triangles over local vertices 0..3.
const QUAD_INDICES: [u16; 6] = [0, 1, 2, 2, 3, 0];

/// CPU-side mesh: vertices plus 16-bit indices, grouped in quads of
/// 4 vertices / 6 indices per visible face.
#[derive(Debug, Default)]
pub struct MeshData {
    /// Vertex sequence, four per emitted quad.
    pub vertices: Vec<Vertex>,
    /// Index sequence, six per emitted quad.
    pub indices: Vec<u16>,
}

impl MeshData {
    /// Number of quads in the mesh.
    pub fn quad_count(&self) -> usize {
        self.indices.len() / QUAD_INDICES.len()
    }
}

/// One corner of a face template: cell-relative position offset and
/// cell-relative UV offset (either 0 or one cell width per axis).
struct FaceCorner {
    offset: [f32; 3],
    uv: [f32; 2],
}

/// Geometry template for one face: four corners in emission order plus the
/// face's color vector.
struct FaceTemplate {
    corners: [FaceCorner; 4],
    color: [f32; 3],
}

const C: f32 = ATLAS_CELL_UV;

/// Per-face corner tables. Corner order and UV assignment are part of the
/// mesh contract and must not be reordered; winding is identical across all
/// six faces, which the pipeline tolerates by disabling backface culling.
fn face_template(face: BlockFace) -> &'static FaceTemplate {
    match face {
        BlockFace::Front => &FaceTemplate {
            corners: [
                FaceCorner { offset: [0.0, 1.0, 0.0], uv: [0.0, C] },
                FaceCorner { offset: [0.0, 0.0, 0.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [1.0, 0.0, 0.0], uv: [C, 0.0] },
                FaceCorner { offset: [1.0, 1.0, 0.0], uv: [C, C] },
            ],
            color: [0.0, 1.0, 0.0],
        },
        BlockFace::Back => &FaceTemplate {
            corners: [
                FaceCorner { offset: [1.0, 1.0, 1.0], uv: [0.0, C] },
                FaceCorner { offset: [1.0, 0.0, 1.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [0.0, 0.0, 1.0], uv: [C, 0.0] },
                FaceCorner { offset: [0.0, 1.0, 1.0], uv: [C, C] },
            ],
            color: [0.0, 1.0, 0.0],
        },
        BlockFace::Left => &FaceTemplate {
            corners: [
                FaceCorner { offset: [0.0, 0.0, 1.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [0.0, 0.0, 0.0], uv: [C, 0.0] },
                FaceCorner { offset: [0.0, 1.0, 0.0], uv: [C, C] },
                FaceCorner { offset: [0.0, 1.0, 1.0], uv: [0.0, C] },
            ],
            color: [1.0, 0.0, 0.0],
        },
        BlockFace::Right => &FaceTemplate {
            corners: [
                FaceCorner { offset: [1.0, 0.0, 1.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [1.0, 0.0, 0.0], uv: [C, 0.0] },
                FaceCorner { offset: [1.0, 1.0, 0.0], uv: [C, C] },
                FaceCorner { offset: [1.0, 1.0, 1.0], uv: [0.0, C] },
            ],
            color: [1.0, 0.0, 0.0],
        },
        BlockFace::Top => &FaceTemplate {
            corners: [
                FaceCorner { offset: [0.0, 0.0, 0.0], uv: [0.0, C] },
                FaceCorner { offset: [0.0, 0.0, 1.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [1.0, 0.0, 1.0], uv: [C, 0.0] },
                FaceCorner { offset: [1.0, 0.0, 0.0], uv: [C, C] },
            ],
            color: [0.0, 1.0, 0.0],
        },
        BlockFace::Bottom => &FaceTemplate {
            corners: [
                FaceCorner { offset: [0.0, 1.0, 0.0], uv: [0.0, C] },
                FaceCorner { offset: [0.0, 1.0, 1.0], uv: [0.0, 0.0] },
                FaceCorner { offset: [1.0, 1.0, 1.0], uv: [C, 0.0] },
                FaceCorner { offset: [1.0, 1.0, 0.0], uv: [C, C] },
            ],
            color: [0.0, 1.0, 0.0],
        },
    }
}

/// UV origin of the given atlas cell in the 10-column atlas layout.
pub fn atlas_uv_origin(index: u8) -> [f32; 2] {
    [
        (index % ATLAS_COLUMNS) as f32 * ATLAS_CELL_UV,
        (index / ATLAS_COLUMNS) as f32 * ATLAS_CELL_UV,
    ]
}

/// Whether the given face of the cell at (x, y, z) should be emitted.
///
/// A face is visible when the neighbor behind it is air or outside the
/// grid; out-of-bounds neighbors are open world edges, never assumed solid.
fn face_visible(grid: &BlockGrid, x: i32, y: i32, z: i32, face: BlockFace) -> bool {
    let (dx, dy, dz) = face.neighbor_offset();
    !grid.is_solid(x + dx, y + dy, z + dz)
}

/// Generates the full mesh for a grid.
///
/// Pure function of the grid contents: every non-air cell contributes one
/// quad per visible face, 4 vertices and 6 indices each. Any grid change
/// requires calling this again; there is no partial remesh.
///
/// Complexity is O(W·H·D) cell visits with six constant-time face tests
/// per solid cell; output size is proportional to the visible-face count.
pub fn generate_mesh(grid: &BlockGrid) -> MeshData {
    let mut mesh = MeshData::default();
    let mut index_base: u32 = 0;

    for x in 0..GRID_WIDTH as i32 {
        for y in 0..GRID_HEIGHT as i32 {
            for z in 0..GRID_DEPTH as i32 {
                let block = match grid.block_at(x, y, z) {
                    Some(block) if block.is_solid() => block,
                    _ => continue,
                };

                for face in BlockFace::ALL {
                    if !face_visible(grid, x, y, z, face) {
                        continue;
                    }

                    let template = face_template(face);
                    let [u0, v0] = atlas_uv_origin(texture_index(block, face));

                    for corner in &template.corners {
                        mesh.vertices.push(Vertex {
                            position: [
                                x as f32 + corner.offset[0],
                                y as f32 + corner.offset[1],
                                z as f32 + corner.offset[2],
                            ],
                            color: template.color,
                            uv: [u0 + corner.uv[0], v0 + corner.uv[1]],
                        });
                    }
                    for local in QUAD_INDICES {
                        mesh.indices.push((index_base + local as u32) as u16);
                    }
                    index_base += 4;
                }
            }
        }
    }

    mesh
}
