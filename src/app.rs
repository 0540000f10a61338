use std::{sync::Arc, time::Instant};
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes, WindowId},
};

use crate::{
    assets::MeshLibrary,
    config::Config,
    error::InitError,
    gfx::{resources::LightUniform, scene::Scene, RenderEngine},
    input::InputState,
    simulation::{FrameClock, Simulation, SimulationStatus},
};

/// Window, event loop and frame pacing around one [`Simulation`]
///
/// Each frame runs input snapshot -> exit check -> update -> render ->
/// present, all on the event loop thread.
pub struct RobopopApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    config: Config,
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    library: MeshLibrary,
    scene: Scene,
    simulation: Box<dyn Simulation>,
    input: InputState,
    clock: FrameClock,
    error: Option<InitError>,
}

impl RobopopApp {
    /// Creates the event loop; the window and GPU come up on first resume
    pub fn new(
        config: Config,
        library: MeshLibrary,
        scene: Scene,
        simulation: Box<dyn Simulation>,
    ) -> Result<Self, InitError> {
        let event_loop = EventLoop::new()?;
        let input = InputState::new(PhysicalSize::new(config.width, config.height));

        Ok(Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                config,
                window: None,
                render_engine: None,
                library,
                scene,
                simulation,
                input,
                clock: FrameClock::new(),
                error: None,
            },
        })
    }

    /// Runs until the simulation finishes or the user quits
    ///
    /// # Errors
    /// Any [`InitError`] raised while bringing up the window or GPU.
    pub fn run(mut self) -> Result<(), InitError> {
        let Some(event_loop) = self.event_loop.take() else {
            return Ok(());
        };
        event_loop.set_control_flow(ControlFlow::Poll);

        log::info!("Running '{}'", self.app_state.simulation.name());
        event_loop.run_app(&mut self.app_state)?;

        match self.app_state.error.take() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

impl AppState {
    fn fail(&mut self, event_loop: &ActiveEventLoop, error: InitError) {
        log::error!("Initialization failed: {}", error);
        self.error = Some(error);
        event_loop.exit();
    }

    fn frame(&mut self, event_loop: &ActiveEventLoop) {
        let input = self.input.snapshot();
        if input.quit {
            log::info!("Exiting");
            event_loop.exit();
            return;
        }

        let frame = self.clock.tick(Instant::now());
        if self.simulation.update(&frame, &input, &mut self.scene) == SimulationStatus::Finished {
            self.input.request_quit();
        }

        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match render_engine.render_frame(&self.scene) {
            Ok(()) => {}
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                log::warn!("Surface lost or outdated, reconfiguring");
                render_engine.reconfigure();
            }
            Err(wgpu::SurfaceError::Timeout) => {
                log::warn!("Surface timed out, skipping frame");
            }
            Err(e) => {
                log::error!("Render error: {e:?}, exiting");
                event_loop.exit();
            }
        }
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attributes = WindowAttributes::default()
            .with_title(self.config.title.clone())
            .with_inner_size(PhysicalSize::new(self.config.width, self.config.height));
        let window = match event_loop.create_window(attributes) {
            Ok(window) => Arc::new(window),
            Err(e) => return self.fail(event_loop, e.into()),
        };
        self.window = Some(window.clone());

        let size = window.inner_size();
        let renderer = pollster::block_on(RenderEngine::new(
            window,
            size.width,
            size.height,
            self.config.present_mode(),
        ));
        let mut renderer = match renderer {
            Ok(renderer) => renderer,
            Err(e) => return self.fail(event_loop, e),
        };

        renderer.upload_mesh_library(&self.library);
        renderer.set_light(LightUniform::new(self.config.light_direction()));
        self.scene.camera.resize_projection(size.width, size.height);
        self.input.resized(size);
        self.render_engine = Some(renderer);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        self.input.handle_window_event(&event);

        match event {
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene.camera.resize_projection(width, height);
                if let Some(render_engine) = self.render_engine.as_mut() {
                    render_engine.resize(width, height);
                }
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                self.frame(event_loop);
            }
            _ => (),
        }
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
