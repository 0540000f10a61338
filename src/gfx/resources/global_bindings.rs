//! Global uniform bindings shared by every draw
//!
//! Bound to group 0 of the lit pipeline. Only lighting lives here; camera
//! matrices are folded into each object's MVP.

use cgmath::{InnerSpace, Vector3};

use crate::config::DEFAULT_LIGHT;
use crate::wgpu_utils::{
    binding_types::{single_uniform_bind_group, single_uniform_layout},
    uniform_buffer::UniformBuffer,
};

/// MUST match the `Light` struct in `lit.wgsl` (vec3 padded to 16 bytes)
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct LightUniform {
    pub to_light: [f32; 3],
    _padding: f32,
}

impl LightUniform {
    /// Direction towards the light; normalised here
    pub fn new(to_light: Vector3<f32>) -> Self {
        Self {
            to_light: to_light.normalize().into(),
            _padding: 0.0,
        }
    }
}

impl Default for LightUniform {
    fn default() -> Self {
        Self::new(Vector3::from(DEFAULT_LIGHT))
    }
}

pub type GlobalUBO = UniformBuffer<LightUniform>;

/// Bind group layout, bind group and buffer for [`LightUniform`]
pub struct GlobalBindings {
    bind_group_layout: wgpu::BindGroupLayout,
    bind_group: wgpu::BindGroup,
    ubo: GlobalUBO,
}

impl GlobalBindings {
    pub fn new(device: &wgpu::Device, light: LightUniform) -> Self {
        let bind_group_layout =
            single_uniform_layout(device, wgpu::ShaderStages::FRAGMENT, "Globals Bind Group");
        let ubo = GlobalUBO::new_with_data(device, &light);
        let bind_group = single_uniform_bind_group(
            device,
            &bind_group_layout,
            ubo.binding_resource(),
            "Global Bind Group",
        );

        GlobalBindings {
            bind_group_layout,
            bind_group,
            ubo,
        }
    }

    pub fn set_light(&mut self, queue: &wgpu::Queue, light: LightUniform) {
        self.ubo.update_content(queue, light);
    }

    pub fn bind_group_layout(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout
    }

    pub fn bind_group(&self) -> &wgpu::BindGroup {
        &self.bind_group
    }
}
