//! # Vertex Data Structures
//!
//! GPU vertex format shared by the mesh library and the lit pipeline. The
//! layout matches the `pnc.` chunk of a mesh blob byte for byte, so vertices
//! are uploaded straight from the decoded records.

/// A 3D vertex with position, normal and RGBA8 colour.
///
/// # Memory Layout
///
/// `#[repr(C)]`, 28 bytes, no padding:
///
/// - `position`: `[x, y, z]`, offset 0
/// - `normal`: `[nx, ny, nz]`, offset 12
/// - `colour`: `[r, g, b, a]`, offset 24, normalised to `[0, 1]` in the shader
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex3D {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub colour: [u8; 4],
}

impl Vertex3D {
    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// - Attribute 0: Position (Float32x3)
    /// - Attribute 1: Normal (Float32x3)
    /// - Attribute 2: Colour (Unorm8x4)
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex3D>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 6]>() as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Unorm8x4,
                },
            ],
        }
    }
}
