//! WGPU-based rendering engine
//!
//! Owns the surface, device and every GPU resource the scene viewer needs:
//! one vertex buffer holding the whole mesh library, a depth buffer, the
//! global light uniform and one uniform slot per scene object.

use std::sync::Arc;
use wgpu::{util::DeviceExt, Device};

use crate::{
    assets::MeshLibrary,
    error::InitError,
    gfx::{
        resources::{GlobalBindings, LightUniform, ObjectBindings, TextureResource},
        scene::{object::LIT_PIPELINE, scene::Scene},
    },
};

use super::pipeline_manager::{PipelineConfig, PipelineManager};

const LIT_SHADER: &str = include_str!("lit.wgsl");

const CLEAR_COLOUR: wgpu::Color = wgpu::Color {
    r: 0.5,
    g: 0.5,
    b: 0.5,
    a: 1.0,
};

/// Core rendering engine managing GPU resources and draw calls
pub struct RenderEngine {
    surface: wgpu::Surface<'static>,
    device: Arc<wgpu::Device>,
    queue: Arc<wgpu::Queue>,
    config: wgpu::SurfaceConfiguration,
    depth_texture: TextureResource,
    pipeline_manager: PipelineManager,
    global_bindings: GlobalBindings,
    object_bindings: ObjectBindings,
    vertex_buffer: Option<wgpu::Buffer>,
}

impl RenderEngine {
    /// Creates a new render engine for the given window
    ///
    /// # Errors
    /// [`InitError`] if no surface, adapter or device can be obtained, the
    /// surface reports no formats, or the lit shader fails to build.
    pub async fn new(
        window: impl Into<wgpu::SurfaceTarget<'static>>,
        width: u32,
        height: u32,
        present_mode: wgpu::PresentMode,
    ) -> Result<RenderEngine, InitError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::all(),
            ..Default::default()
        });
        let surface = instance.create_surface(window)?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await?;
        log::info!("Using adapter: {}", adapter.get_info().name);

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("WGPU Device"),
                required_features: wgpu::Features::default(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;

        let surface_capabilities = surface.get_capabilities(&adapter);
        let format = surface_capabilities
            .formats
            .iter()
            .copied()
            .find(|f| !f.is_srgb())
            .or_else(|| surface_capabilities.formats.first().copied())
            .ok_or(InitError::NoSurfaceFormat)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: width.max(1),
            height: height.max(1),
            present_mode,
            alpha_mode: surface_capabilities
                .alpha_modes
                .first()
                .copied()
                .unwrap_or(wgpu::CompositeAlphaMode::Auto),
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture =
            TextureResource::create_depth_texture(&device, &config, "depth_texture");

        let global_bindings = GlobalBindings::new(&device, LightUniform::default());
        let object_bindings = ObjectBindings::new(&device);

        let device_handle: Arc<Device> = device.into();
        let queue_handle: Arc<wgpu::Queue> = queue.into();
        let mut pipeline_manager = PipelineManager::new(device_handle.clone());

        pipeline_manager.load_shader("lit", LIT_SHADER)?;
        pipeline_manager.register_pipeline(
            LIT_PIPELINE,
            PipelineConfig::default()
                .with_label("LIT")
                .with_shader("lit")
                .with_depth_format(TextureResource::DEPTH_FORMAT)
                .with_bind_group_layouts(vec![
                    global_bindings.bind_group_layout().clone(),
                    object_bindings.bind_group_layout().clone(),
                ])
                .with_color_targets(vec![Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })]),
        );
        pipeline_manager.create_all_pipelines()?;

        Ok(RenderEngine {
            surface,
            device: device_handle,
            queue: queue_handle,
            config,
            depth_texture,
            pipeline_manager,
            global_bindings,
            object_bindings,
            vertex_buffer: None,
        })
    }

    /// Uploads the shared vertex array every [`Drawable`] indexes into
    ///
    /// [`Drawable`]: crate::gfx::scene::Drawable
    pub fn upload_mesh_library(&mut self, library: &MeshLibrary) {
        let vertices = library.vertices();
        if vertices.is_empty() {
            log::warn!("Mesh library has no vertices; nothing will be drawn");
            self.vertex_buffer = None;
            return;
        }

        self.vertex_buffer = Some(self.device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some("Mesh Library Vertex Buffer"),
                contents: bytemuck::cast_slice(vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        log::debug!("Uploaded {} vertices", vertices.len());
    }

    /// Draws every scene object in insertion order and presents
    ///
    /// # Errors
    /// The [`wgpu::SurfaceError`] from acquiring the frame; the caller
    /// decides whether to reconfigure or give up.
    pub fn render_frame(&mut self, scene: &Scene) -> Result<(), wgpu::SurfaceError> {
        let draws = scene.draw_list();

        self.object_bindings.reserve(&self.device, draws.len());
        for (index, draw) in draws.iter().enumerate() {
            self.object_bindings.write(&self.queue, index, draw);
        }

        let surface_texture = self.surface.get_current_texture()?;
        let surface_texture_view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Main Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &surface_texture_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(CLEAR_COLOUR),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture.view,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            if let Some(vertex_buffer) = &self.vertex_buffer {
                render_pass.set_vertex_buffer(0, vertex_buffer.slice(..));
                render_pass.set_bind_group(0, self.global_bindings.bind_group(), &[]);

                for (index, draw) in draws.iter().enumerate() {
                    let (Some(pipeline), Some(bind_group)) = (
                        self.pipeline_manager.get_pipeline(draw.pipeline),
                        self.object_bindings.bind_group(index),
                    ) else {
                        continue;
                    };

                    render_pass.set_pipeline(pipeline);
                    render_pass.set_bind_group(1, bind_group, &[]);
                    render_pass.draw(draw.drawable.range(), 0..1);
                }
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        surface_texture.present();
        Ok(())
    }

    /// Resizes the surface and recreates the depth buffer
    ///
    /// A zero-sized (minimised) window is ignored.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }

        self.config.width = width;
        self.config.height = height;
        self.reconfigure();
    }

    /// Reconfigures the surface at its current size, after it was lost or
    /// became outdated
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
        self.depth_texture =
            TextureResource::create_depth_texture(&self.device, &self.config, "depth_texture");
        log::debug!(
            "Surface configured at {}x{}",
            self.config.width,
            self.config.height
        );
    }

    pub fn set_light(&mut self, light: LightUniform) {
        self.global_bindings.set_light(&self.queue, light);
    }
}
