//! Per-object uniform slots
//!
//! Each object drawn by the scene gets its own uniform buffer and bind group,
//! keyed by draw-list position. Slots are created on first use and reused
//! every frame after; the scene only ever grows.

use cgmath::{Matrix3, Matrix4};

use crate::{
    gfx::scene::DrawCommand,
    wgpu_utils::{
        binding_types::{single_uniform_bind_group, single_uniform_layout},
        uniform_buffer::UniformBuffer,
    },
};

/// MUST match `ObjectUniforms` in `lit.wgsl`
///
/// WGSL pads each `mat3x3` column to 16 bytes.
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ObjectUniform {
    pub mvp: [[f32; 4]; 4],
    pub itmv: [[f32; 4]; 3],
}

impl ObjectUniform {
    pub fn new(mvp: Matrix4<f32>, itmv: Matrix3<f32>) -> Self {
        Self {
            mvp: mvp.into(),
            itmv: [
                itmv.x.extend(0.0).into(),
                itmv.y.extend(0.0).into(),
                itmv.z.extend(0.0).into(),
            ],
        }
    }
}

impl From<&DrawCommand> for ObjectUniform {
    fn from(draw: &DrawCommand) -> Self {
        Self::new(draw.mvp, draw.itmv)
    }
}

struct ObjectSlot {
    ubo: UniformBuffer<ObjectUniform>,
    bind_group: wgpu::BindGroup,
}

pub struct ObjectBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    slots: Vec<ObjectSlot>,
}

impl ObjectBindings {
    pub fn new(device: &wgpu::Device) -> Self {
        Self {
            bind_group_layout: single_uniform_layout(
                device,
                wgpu::ShaderStages::VERTEX,
                "Object Bind Group Layout",
            ),
            slots: Vec::new(),
        }
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    /// Makes sure there are at least `count` slots
    pub fn reserve(&mut self, device: &wgpu::Device, count: usize) {
        while self.slots.len() < count {
            let ubo = UniformBuffer::new(device);
            let bind_group = single_uniform_bind_group(
                device,
                &self.bind_group_layout,
                ubo.binding_resource(),
                &format!("Object Bind Group {}", self.slots.len()),
            );
            self.slots.push(ObjectSlot { ubo, bind_group });
        }
    }

    /// Uploads one draw's matrices into slot `index`
    ///
    /// The slot must have been created by [`reserve`](Self::reserve).
    pub fn write(&mut self, queue: &wgpu::Queue, index: usize, draw: &DrawCommand) {
        if let Some(slot) = self.slots.get_mut(index) {
            slot.ubo.update_content(queue, ObjectUniform::from(draw));
        }
    }

    pub fn bind_group(&self, index: usize) -> Option<&wgpu::BindGroup> {
        self.slots.get(index).map(|slot| &slot.bind_group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmath::SquareMatrix;

    #[test]
    fn test_uniform_matches_wgsl_layout() {
        // mat4x4 (64) + mat3x3 with padded columns (48)
        assert_eq!(std::mem::size_of::<ObjectUniform>(), 112);
    }

    #[test]
    fn test_normal_matrix_columns_padded() {
        let itmv = Matrix3::from_cols(
            cgmath::Vector3::new(1.0, 2.0, 3.0),
            cgmath::Vector3::new(4.0, 5.0, 6.0),
            cgmath::Vector3::new(7.0, 8.0, 9.0),
        );
        let uniform = ObjectUniform::new(Matrix4::identity(), itmv);

        assert_eq!(uniform.itmv[1], [4.0, 5.0, 6.0, 0.0]);
        assert_eq!(uniform.mvp[3], [0.0, 0.0, 0.0, 1.0]);
    }
}
