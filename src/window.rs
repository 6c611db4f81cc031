//! The backdrop window: event loop wiring for the particle field.
//!
//! One window, one redraw-driven update loop. Resizes reconfigure the
//! surface immediately but rebuild the particle population only after the
//! debounce settles, through a fresh [`RestartableLoop`] generation so a
//! stale loop can never keep stepping the field.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec2;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::keyboard::KeyCode;
use winit::window::{Window, WindowId};

use crate::error::BackdropError;
use crate::field::{FieldParams, ParticleField};
use crate::gpu::{self, GpuContext, LinkPipeline, ParticlePipeline};
use crate::input::Input;
use crate::theme::{ThemeController, ThemeStore};
use crate::time::{Debounce, LoopToken, RestartableLoop, Time};
use crate::visuals::Palette;

const APP_NAME: &str = "backdrop";
const RESIZE_DEBOUNCE: Duration = Duration::from_millis(250);
/// Link buffer capacity as a multiple of the particle cap.
const LINK_FANOUT: u32 = 8;

/// Run the particle backdrop until the window closes.
pub fn run(store: Box<dyn ThemeStore>) -> Result<(), BackdropError> {
    let event_loop = EventLoop::new()?;
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut app = BackdropApp::new(store, FieldParams::default());
    event_loop.run_app(&mut app)?;
    Ok(())
}

/// The winit application for the particle backdrop.
pub struct BackdropApp {
    params: FieldParams,
    store: Option<Box<dyn ThemeStore>>,
    theme: Option<ThemeController>,
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    particles: Option<ParticlePipeline>,
    links: Option<LinkPipeline>,
    field: Option<ParticleField>,
    input: Input,
    resize_debounce: Debounce,
    frame_loop: RestartableLoop,
    loop_token: Option<LoopToken>,
    pending_resize: Option<winit::dpi::PhysicalSize<u32>>,
    time: Time,
}

impl BackdropApp {
    pub fn new(store: Box<dyn ThemeStore>, params: FieldParams) -> Self {
        Self {
            params,
            store: Some(store),
            theme: None,
            window: None,
            gpu: None,
            particles: None,
            links: None,
            field: None,
            input: Input::new(),
            resize_debounce: Debounce::new(RESIZE_DEBOUNCE),
            frame_loop: RestartableLoop::new(),
            loop_token: None,
            pending_resize: None,
            time: Time::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(field), Some(particles), Some(links), Some(theme)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.field.as_mut(),
            self.particles.as_mut(),
            self.links.as_mut(),
            self.theme.as_mut(),
        ) else {
            return;
        };

        if self.input.key_pressed(KeyCode::KeyT) {
            match theme.toggle() {
                Ok(_) => window.set_title(&theme.window_title(APP_NAME)),
                Err(e) => log::warn!("could not persist theme: {}", e),
            }
        }

        // A settled resize rebuilds the population under a new loop
        // generation; anything still holding the old token goes dead.
        if self.resize_debounce.ready() {
            if let Some(size) = self.pending_resize.take() {
                self.loop_token = Some(self.frame_loop.start());
                field.resize(size.width as f32, size.height as f32);
            }
        }

        let live = self
            .loop_token
            .is_some_and(|token| self.frame_loop.is_current(token));
        if live {
            field.step(self.input.pointer());
        }

        self.time.update();
        if self.time.frame() % 600 == 0 {
            log::debug!(
                "frame {} fps {:.1} particles {}",
                self.time.frame(),
                self.time.fps(),
                field.particles().len()
            );
        }

        let palette = Palette::for_theme(theme.current());
        let (width, height) = gpu.surface_size();
        let resolution = Vec2::new(width, height);

        let positions: Vec<Vec2> = field.particles().iter().map(|p| p.position).collect();
        particles.upload(&gpu.queue, &positions);
        particles.set_globals(
            &gpu.queue,
            resolution,
            palette.particle,
            field.params().particle_radius,
        );
        links.upload(&gpu.queue, &field.links());
        links.set_globals(&gpu.queue, resolution, palette.link);

        match gpu.acquire_frame() {
            Ok((output, view)) => {
                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Backdrop Encoder"),
                    });
                {
                    let mut pass = gpu::clear_pass(
                        &mut encoder,
                        &view,
                        None,
                        gpu::clear_color(palette.background),
                    );
                    links.draw(&mut pass);
                    particles.draw(&mut pass);
                }
                gpu.queue.submit(std::iter::once(encoder.finish()));
                output.present();
            }
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                let size = winit::dpi::PhysicalSize {
                    width: gpu.config.width,
                    height: gpu.config.height,
                };
                gpu.resize(size);
            }
            Err(wgpu::SurfaceError::OutOfMemory) => {
                log::error!("out of GPU memory, exiting");
                event_loop.exit();
            }
            Err(e) => log::warn!("surface error: {:?}", e),
        }

        self.input.begin_frame();
        window.request_redraw();
    }
}

impl ApplicationHandler for BackdropApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title(APP_NAME)
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let Some(store) = self.store.take() else {
            return;
        };
        // The OS preference is consulted once, here; later OS theme
        // changes do not override an explicit choice.
        let os_prefers_dark = window
            .theme()
            .map(|t| t == winit::window::Theme::Dark)
            .unwrap_or(false);
        let theme = ThemeController::new(store, os_prefers_dark);
        window.set_title(&theme.window_title(APP_NAME));

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let capacity = self.params.max_particles as u32;
        let particles = ParticlePipeline::new(&gpu.device, gpu.config.format, capacity);
        let links = LinkPipeline::new(&gpu.device, gpu.config.format, capacity * LINK_FANOUT);

        let (width, height) = gpu.surface_size();
        let field = ParticleField::new(width, height, self.params.clone());

        self.loop_token = Some(self.frame_loop.start());
        self.theme = Some(theme);
        self.gpu = Some(gpu);
        self.particles = Some(particles);
        self.links = Some(links);
        self.field = Some(field);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
                self.pending_resize = Some(physical_size);
                self.resize_debounce.trigger();
            }
            WindowEvent::ThemeChanged(theme) => {
                log::debug!("OS theme changed to {:?}, keeping current setting", theme);
            }
            WindowEvent::RedrawRequested => {
                self.redraw(event_loop);
            }
            other => {
                self.input.handle_event(&other);
            }
        }
    }
}
