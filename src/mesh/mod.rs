//! Mesh generation and GPU upload.
//!
//! The mesher walks the block grid once and emits a quad for every visible
//! block face; the result is uploaded into a pair of GPU buffers drawn by
//! the frame scheduler every frame.

pub mod gpu;
pub mod mesher;
pub mod vertex;

pub use gpu::ChunkMesh;
pub use mesher::{atlas_uv_origin, generate_mesh, MeshData};
pub use vertex::Vertex;
