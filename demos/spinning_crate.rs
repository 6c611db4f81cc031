//! A cube wrapped in a crate texture, tumbling on two axes.
//!
//! Run with: `cargo run --example spinning_crate [texture.png]`
//!
//! Without an argument the demo looks for `assets/crate.png` and falls back
//! to a procedural checkerboard if nothing loads.

use std::sync::Arc;

use backdrop::gpu::{self, GpuContext, GpuMesh, Mesh, MeshPipeline, ModelBinding, TextureBinding};
use backdrop::scene::{self, SpinningCrate};
use backdrop::textures::TextureConfig;
use backdrop::Vec3;
use winit::application::ApplicationHandler;
use winit::event::WindowEvent;
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.02,
    g: 0.02,
    b: 0.05,
    a: 1.0,
};

fn crate_texture() -> TextureConfig {
    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "assets/crate.png".to_string());
    match TextureConfig::load(&path) {
        Ok(texture) => texture,
        Err(e) => {
            log::warn!("could not load {}: {}; using checkerboard", path, e);
            TextureConfig::checkerboard(64, 8, [168, 112, 58, 255], [96, 60, 28, 255])
        }
    }
}

struct Demo {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pipeline: Option<MeshPipeline>,
    mesh: Option<GpuMesh>,
    model: Option<ModelBinding>,
    texture: Option<TextureBinding>,
    state: SpinningCrate,
}

impl Demo {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            pipeline: None,
            mesh: None,
            model: None,
            texture: None,
            state: SpinningCrate::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(pipeline), Some(mesh), Some(model), Some(texture)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.pipeline.as_ref(),
            self.mesh.as_ref(),
            self.model.as_ref(),
            self.texture.as_ref(),
        ) else {
            return;
        };

        self.state.advance();
        model.update(&gpu.queue, self.state.model(), false);

        let view_proj = scene::projection(gpu.aspect()) * SpinningCrate::view();
        pipeline.set_globals(&gpu.queue, view_proj, Vec3::new(5.0, 5.0, 5.0), 0.4);

        match gpu.acquire_frame() {
            Ok((output, view)) => {
                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Crate Encoder"),
                    });
                {
                    let mut pass =
                        gpu::clear_pass(&mut encoder, &view, Some(gpu.depth_view()), CLEAR);
                    pipeline.draw(&mut pass, mesh, model, texture);
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

        window.request_redraw();
    }
}

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Spinning crate")
            .with_inner_size(winit::dpi::LogicalSize::new(960, 720));
        let window = match event_loop.create_window(attrs) {
            Ok(window) => Arc::new(window),
            Err(e) => {
                log::error!("could not create window: {}", e);
                event_loop.exit();
                return;
            }
        };

        let gpu = match pollster::block_on(GpuContext::new(window.clone())) {
            Ok(gpu) => gpu,
            Err(e) => {
                log::error!("GPU initialization failed: {}", e);
                event_loop.exit();
                return;
            }
        };

        let pipeline = MeshPipeline::new(&gpu.device, gpu.config.format);
        let mesh = GpuMesh::upload(&gpu.device, &Mesh::cube());
        let model = pipeline.create_model(&gpu.device);
        let texture = pipeline.create_texture(&gpu.device, &gpu.queue, &crate_texture());

        self.pipeline = Some(pipeline);
        self.mesh = Some(mesh);
        self.model = Some(model);
        self.texture = Some(texture);
        self.gpu = Some(gpu);

        window.request_redraw();
        self.window = Some(window);
    }

    fn window_event(&mut self, event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::Resized(physical_size) => {
                if let Some(gpu) = &mut self.gpu {
                    gpu.resize(physical_size);
                }
            }
            WindowEvent::RedrawRequested => self.redraw(event_loop),
            _ => {}
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            eprintln!("spinning_crate: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut demo = Demo::new();
    if let Err(e) = event_loop.run_app(&mut demo) {
        eprintln!("spinning_crate: {}", e);
        std::process::exit(1);
    }
}
