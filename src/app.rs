use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::config::{Config, WINDOW_HEIGHT, WINDOW_TITLE, WINDOW_WIDTH};
use crate::gpu::{CellLayout, GpuContext, QuadBuffers, QuadInstance, RenderPipeline};
use crate::pacing::{FramePacer, RateCounter};
use crate::simulation::Grid;

/// Window and GPU resources, created once the event loop is running
struct Graphics {
    window: Arc<Window>,
    gpu: GpuContext,
    buffers: QuadBuffers,
    pipeline: RenderPipeline,
}

/// Application state
pub struct App {
    config: Config,
    grid: Grid,
    layout: CellLayout,
    graphics: Option<Graphics>,
    pacer: FramePacer,
    rate_counter: RateCounter,
    generation: u64,
    startup_error: Option<anyhow::Error>,
}

impl App {
    pub fn new(config: Config, grid: Grid) -> Self {
        let layout = CellLayout::new(grid.rows(), grid.cols());
        let pacer = FramePacer::new(config.fps);

        Self {
            config,
            grid,
            layout,
            graphics: None,
            pacer,
            rate_counter: RateCounter::new(Instant::now()),
            generation: 0,
            startup_error: None,
        }
    }

    /// Consume the app once the event loop has returned
    pub fn finish(self) -> anyhow::Result<()> {
        match self.startup_error {
            Some(error) => Err(error),
            None => {
                log::info!("Stopped after {} generations", self.generation);
                Ok(())
            }
        }
    }

    fn init_graphics(&self, event_loop: &ActiveEventLoop) -> anyhow::Result<Graphics> {
        // Create window
        let window_attrs = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(winit::dpi::LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT))
            .with_resizable(false);

        let window = Arc::new(
            event_loop
                .create_window(window_attrs)
                .context("Failed to create window")?,
        );

        // Initialize GPU
        log::info!("Creating GPU context...");
        let gpu = pollster::block_on(GpuContext::new(window.clone()))
            .context("Failed to initialize graphics context")?;

        log::info!("Creating buffers for {} cells...", self.layout.cell_count());
        let buffers = QuadBuffers::new(&gpu.device, self.layout.cell_count());

        log::info!("Creating render pipeline...");
        let pipeline = RenderPipeline::new(&gpu.device, gpu.format())?;

        Ok(Graphics {
            window,
            gpu,
            buffers,
            pipeline,
        })
    }

    /// One generation followed by one draw.
    ///
    /// Redraws that arrive before the pacer allows a new generation (expose,
    /// scale changes) only repaint the current grid.
    fn frame(&mut self) {
        let started = Instant::now();
        let advanced = self.pacer.try_begin(started);

        if advanced {
            self.grid.advance();
            self.generation += 1;
        }

        let instances = self.layout.draw_list(&self.grid);
        if let Some(graphics) = &self.graphics {
            graphics.render(&instances);
        }

        if !advanced {
            return;
        }

        if let Some(rate) = self.rate_counter.tick(Instant::now()) {
            log::debug!(
                "Generation {} - {:.1} gen/s - {} alive",
                self.generation,
                rate,
                instances.len()
            );
        }

        let elapsed = started.elapsed();
        log::trace!(
            "Frame took {:?}, waiting {:?}",
            elapsed,
            self.pacer.remaining(elapsed)
        );
    }
}

impl Graphics {
    fn render(&self, instances: &[QuadInstance]) {
        // Get surface texture
        let output = match self.gpu.surface.get_current_texture() {
            Ok(texture) => texture,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.gpu.reconfigure();
                return;
            }
            Err(e) => {
                log::error!("Surface error: {:?}", e);
                return;
            }
        };

        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("frame-encoder"),
            });

        let instance_count = self.buffers.upload(&self.gpu.queue, instances);
        self.pipeline
            .draw(&mut encoder, &view, &self.buffers, instance_count);

        self.window.pre_present_notify();
        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        output.present();
    }
}

impl ApplicationHandler for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.graphics.is_some() {
            return;
        }

        log::info!(
            "Starting {}x{} grid at {} gen/s ({:?} per frame, pattern '{}', edges {:?})",
            self.grid.cols(),
            self.grid.rows(),
            self.config.fps,
            self.pacer.budget(),
            self.config.pattern,
            self.grid.edge_wrap()
        );

        match self.init_graphics(event_loop) {
            Ok(graphics) => {
                log::info!("Initialization complete!");
                graphics.window.request_redraw();
                self.graphics = Some(graphics);
            }
            Err(error) => {
                log::error!("Startup failed: {:#}", error);
                self.startup_error = Some(error);
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _window_id: WindowId,
        event: WindowEvent,
    ) {
        match event {
            WindowEvent::CloseRequested => {
                log::info!("Close requested, exiting...");
                event_loop.exit();
            }
            WindowEvent::KeyboardInput { event, .. } => {
                if event.state.is_pressed()
                    && event.physical_key == PhysicalKey::Code(KeyCode::Escape)
                {
                    log::info!("Escape pressed, exiting...");
                    event_loop.exit();
                }
            }
            WindowEvent::Resized(new_size) => {
                if let Some(graphics) = &mut self.graphics {
                    log::info!("Surface resized to {}x{}", new_size.width, new_size.height);
                    graphics.gpu.resize(new_size);
                }
            }
            WindowEvent::RedrawRequested => self.frame(),
            _ => {}
        }
    }

    fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
        let Some(graphics) = &self.graphics else {
            return;
        };

        if self.pacer.is_due(Instant::now()) {
            graphics.window.request_redraw();
            event_loop.set_control_flow(ControlFlow::Wait);
        } else if let Some(deadline) = self.pacer.next_frame_at() {
            event_loop.set_control_flow(ControlFlow::WaitUntil(deadline));
        }
    }
}
