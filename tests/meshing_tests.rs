//! End-to-end tests for mesh generation over whole grids.

use monochunk::mesh::{atlas_uv_origin, generate_mesh};
use monochunk::world::{BlockGrid, BlockType, GRID_DEPTH, GRID_HEIGHT, GRID_WIDTH};

fn single_block_grid(block: BlockType) -> BlockGrid {
    BlockGrid::from_fn(|x, y, z| {
        if (x, y, z) == (0, 0, 0) {
            block
        } else {
            BlockType::Air
        }
    })
}

#[test]
fn lone_block_emits_all_six_faces() {
    let mesh = generate_mesh(&single_block_grid(BlockType::Stone));
    assert_eq!(mesh.quad_count(), 6);
    assert_eq!(mesh.vertices.len(), 24);
    assert_eq!(mesh.indices.len(), 36);
}

#[test]
fn empty_grid_emits_nothing() {
    let mesh = generate_mesh(&BlockGrid::from_fn(|_, _, _| BlockType::Air));
    assert!(mesh.vertices.is_empty());
    assert!(mesh.indices.is_empty());
}

#[test]
fn touching_faces_between_solid_neighbors_are_culled() {
    // Two blocks stacked along Y share a face pair; those two quads drop
    // out and ten remain.
    let grid = BlockGrid::from_fn(|x, y, z| {
        if x == 0 && z == 0 && (y == 0 || y == 1) {
            BlockType::Stone
        } else {
            BlockType::Air
        }
    });
    let mesh = generate_mesh(&grid);
    assert_eq!(mesh.quad_count(), 10);
}

#[test]
fn culling_ignores_block_type_differences() {
    // A solid neighbor culls the shared face even when the types differ.
    let grid = BlockGrid::from_fn(|x, y, z| {
        if x == 0 && z == 0 && y == 0 {
            BlockType::Grass
        } else if x == 0 && z == 0 && y == 1 {
            BlockType::Dirt
        } else {
            BlockType::Air
        }
    });
    let mesh = generate_mesh(&grid);
    assert_eq!(mesh.quad_count(), 10);
}

#[test]
fn full_grid_meshes_only_its_outer_shell() {
    // Interior faces all cull; what remains is the box surface of the
    // 16 x 256 x 16 grid.
    let grid = BlockGrid::from_fn(|_, _, _| BlockType::Stone);
    let mesh = generate_mesh(&grid);

    let x_sides = 2 * GRID_HEIGHT * GRID_DEPTH;
    let y_sides = 2 * GRID_WIDTH * GRID_DEPTH;
    let z_sides = 2 * GRID_WIDTH * GRID_HEIGHT;
    assert_eq!(mesh.quad_count(), x_sides + y_sides + z_sides);
}

#[test]
fn generated_terrain_exposes_grass_on_top() {
    let mesh = generate_mesh(&BlockGrid::generate());

    // The terrain fills the whole grid, so the shell counts hold here too.
    let expected =
        2 * GRID_HEIGHT * GRID_DEPTH + 2 * GRID_WIDTH * GRID_DEPTH + 2 * GRID_WIDTH * GRID_HEIGHT;
    assert_eq!(mesh.quad_count(), expected);

    // Every quad on the y == 0 plane is a grass top, textured from atlas
    // cell 0.
    let grass_origin = atlas_uv_origin(0);
    for quad in mesh.vertices.chunks_exact(4) {
        if quad.iter().all(|v| v.position[1] == 0.0) {
            for vertex in quad {
                assert!(vertex.uv[0] >= grass_origin[0] && vertex.uv[0] <= grass_origin[0] + 0.1);
                assert!(vertex.uv[1] >= grass_origin[1] && vertex.uv[1] <= grass_origin[1] + 0.1);
            }
        }
    }
}

#[test]
fn meshing_is_deterministic() {
    let grid = BlockGrid::generate();
    let first = generate_mesh(&grid);
    let second = generate_mesh(&grid);

    let first_bytes: &[u8] = bytemuck::cast_slice(&first.vertices);
    let second_bytes: &[u8] = bytemuck::cast_slice(&second.vertices);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(first.indices, second.indices);
}

#[test]
fn indices_follow_the_two_triangle_quad_pattern() {
    let mesh = generate_mesh(&single_block_grid(BlockType::Dirt));
    for (quad, indices) in mesh.indices.chunks_exact(6).enumerate() {
        let base = (quad * 4) as u16;
        assert_eq!(
            indices,
            [base, base + 1, base + 2, base + 2, base + 3, base]
        );
    }
}

#[test]
fn atlas_origins_follow_the_row_major_cell_formula() {
    // Cell i sits at column i mod 10, row i div 10, in 0.1-UV steps. The
    // axes must not swap: column feeds U, row feeds V.
    for index in 0..100u8 {
        let expected = [(index % 10) as f32 * 0.1, (index / 10) as f32 * 0.1];
        assert_eq!(atlas_uv_origin(index), expected, "cell {index}");
    }
}

#[test]
fn side_faces_sample_the_grass_side_cell() {
    let mesh = generate_mesh(&single_block_grid(BlockType::Grass));

    // Faces are emitted front, back, left, right, top, bottom, so the
    // first quad is the front face. Grass sides use atlas cell 1, one
    // column over in the first row: U spans 0.1..0.2, V spans 0.0..0.1,
    // with the corner order fixed by the face template.
    let front: Vec<[f32; 2]> = mesh.vertices[0..4].iter().map(|v| v.uv).collect();
    assert_eq!(
        front,
        vec![[0.1, 0.1], [0.1, 0.0], [0.2, 0.0], [0.2, 0.1]]
    );
}
