//! Vertex format for chunk rendering.
//!
//! The layout must match the vertex inputs of `assets/shaders/chunk.wgsl`
//! exactly: position at location 0, color at location 1, texture
//! coordinates at location 2.

/// One vertex of the chunk mesh.
///
/// The `color` field is a face-normal-like vector the original renderer
/// reused loosely as a color channel; it is carried through the pipeline
/// for parity even though the fragment stage only samples the atlas.
///
/// # Memory Layout
/// - Position: [f32; 3] (12 bytes)
/// - Color: [f32; 3] (12 bytes)
/// - Texture Coordinates: [f32; 2] (8 bytes)
///
/// Total size: 32 bytes
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// Position in world space.
    pub position: [f32; 3],
    /// Per-face color vector: (0, 1, 0) for most faces, (1, 0, 0) for
    /// left/right faces.
    pub color: [f32; 3],
    /// UV coordinates into the texture atlas.
    pub uv: [f32; 2],
}

impl Vertex {
    /// Returns the vertex buffer layout description for the render pipeline.
    pub fn desc<'a>() -> wgpu::VertexBufferLayout<'a> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
            ],
        }
    }
}
