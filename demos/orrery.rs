//! Sun, earth, and moon on nested spinning mounts.
//!
//! Run with: `cargo run --example orrery [sun.jpg earth.jpg moon.jpg]`
//!
//! Drag with the left mouse button to spin the whole system. Missing
//! textures fall back to flat colors so the demo runs without assets.

use std::sync::Arc;

use backdrop::gpu::{self, GpuContext, GpuMesh, Mesh, MeshPipeline, ModelBinding, TextureBinding};
use backdrop::input::Input;
use backdrop::scene::{self, Orrery};
use backdrop::textures::TextureConfig;
use backdrop::{Mat4, Vec3};
use winit::application::ApplicationHandler;
use winit::event::{MouseButton, WindowEvent};
use winit::event_loop::{ActiveEventLoop, ControlFlow, EventLoop};
use winit::window::{Window, WindowId};

const CLEAR: wgpu::Color = wgpu::Color {
    r: 0.01,
    g: 0.01,
    b: 0.03,
    a: 1.0,
};

fn body_texture(arg: usize, default_path: &str, fallback: [u8; 4]) -> TextureConfig {
    let path = std::env::args()
        .nth(arg)
        .unwrap_or_else(|| default_path.to_string());
    match TextureConfig::load(&path) {
        Ok(texture) => texture,
        Err(e) => {
            log::warn!("could not load {}: {}; using flat color", path, e);
            TextureConfig::solid(fallback)
        }
    }
}

struct Body {
    mesh: GpuMesh,
    model: ModelBinding,
    texture: TextureBinding,
    radius: f32,
    lit: bool,
}

impl Body {
    fn update(&self, queue: &wgpu::Queue, transform: Mat4) {
        let model = transform * Mat4::from_scale(Vec3::splat(self.radius));
        self.model.update(queue, model, self.lit);
    }
}

struct Demo {
    window: Option<Arc<Window>>,
    gpu: Option<GpuContext>,
    pipeline: Option<MeshPipeline>,
    bodies: Option<[Body; 3]>,
    state: Orrery,
    input: Input,
}

impl Demo {
    fn new() -> Self {
        Self {
            window: None,
            gpu: None,
            pipeline: None,
            bodies: None,
            state: Orrery::new(),
            input: Input::new(),
        }
    }

    fn redraw(&mut self, event_loop: &ActiveEventLoop) {
        let (Some(window), Some(gpu), Some(pipeline), Some(bodies)) = (
            self.window.as_ref(),
            self.gpu.as_mut(),
            self.pipeline.as_ref(),
            self.bodies.as_ref(),
        ) else {
            return;
        };

        if self.input.mouse_held(MouseButton::Left) {
            self.state.drag(self.input.pointer_delta());
        }
        self.state.advance();

        let transforms = self.state.body_transforms();
        let [sun, earth, moon] = bodies;
        sun.update(&gpu.queue, transforms.sun);
        earth.update(&gpu.queue, transforms.earth);
        moon.update(&gpu.queue, transforms.moon);

        let view_proj = scene::projection(gpu.aspect()) * Orrery::view();
        pipeline.set_globals(&gpu.queue, view_proj, Vec3::new(5.0, 5.0, 5.0), 0.4);

        match gpu.acquire_frame() {
            Ok((output, view)) => {
                let mut encoder = gpu
                    .device
                    .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                        label: Some("Orrery Encoder"),
                    });
                {
                    let mut pass =
                        gpu::clear_pass(&mut encoder, &view, Some(gpu.depth_view()), CLEAR);
                    for body in bodies {
                        pipeline.draw(&mut pass, &body.mesh, &body.model, &body.texture);
                    }
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

impl ApplicationHandler for Demo {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let attrs = Window::default_attributes()
            .with_title("Orrery")
            .with_inner_size(winit::dpi::LogicalSize::new(1280, 720));
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
        let sphere = Mesh::uv_sphere(32, 32);

        let specs = [
            // Body, default asset, fallback color, radius, lit.
            ("assets/sun.jpg", [255, 190, 60, 255], scene::SUN_RADIUS, false),
            ("assets/earth.jpg", [60, 110, 220, 255], scene::EARTH_RADIUS, true),
            ("assets/moon.jpg", [150, 150, 150, 255], scene::MOON_RADIUS, true),
        ];
        let mut arg = 0;
        let bodies = specs.map(|(path, fallback, radius, lit)| {
            arg += 1;
            Body {
                mesh: GpuMesh::upload(&gpu.device, &sphere),
                model: pipeline.create_model(&gpu.device),
                texture: pipeline.create_texture(
                    &gpu.device,
                    &gpu.queue,
                    &body_texture(arg, path, fallback),
                ),
                radius,
                lit,
            }
        });

        self.pipeline = Some(pipeline);
        self.bodies = Some(bodies);
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
            other => self.input.handle_event(&other),
        }
    }
}

fn main() {
    env_logger::init();

    let event_loop = match EventLoop::new() {
        Ok(event_loop) => event_loop,
        Err(e) => {
            eprintln!("orrery: {}", e);
            std::process::exit(1);
        }
    };
    event_loop.set_control_flow(ControlFlow::Poll);

    let mut demo = Demo::new();
    if let Err(e) = event_loop.run_app(&mut demo) {
        eprintln!("orrery: {}", e);
        std::process::exit(1);
    }
}
