//! Line rendering for the proximity links between particles.
//!
//! Segment endpoints are built on the CPU each frame (the population is
//! small by construction) and drawn as a line list with one translucent
//! color for the whole batch.

use glam::{Vec2, Vec4};
use wgpu::util::DeviceExt;

const SHADER_SOURCE: &str = r#"
struct Globals {
    resolution: vec2<f32>,
    _pad: vec2<f32>,
    color: vec4<f32>,
};

@group(0) @binding(0)
var<uniform> globals: Globals;

@vertex
fn vs_main(@location(0) position: vec2<f32>) -> @builtin(position) vec4<f32> {
    let ndc = vec2<f32>(
        position.x / globals.resolution.x * 2.0 - 1.0,
        1.0 - position.y / globals.resolution.y * 2.0,
    );
    return vec4<f32>(ndc, 0.0, 1.0);
}

@fragment
fn fs_main() -> @location(0) vec4<f32> {
    return globals.color;
}
"#;

#[repr(C)]
#[derive(Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
struct Globals {
    resolution: [f32; 2],
    _pad: [f32; 2],
    color: [f32; 4],
}

/// Pipeline and buffers for the connecting lines.
pub struct LinkPipeline {
    pipeline: wgpu::RenderPipeline,
    globals_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    vertex_buffer: wgpu::Buffer,
    capacity_segments: u32,
    vertex_count: u32,
}

impl LinkPipeline {
    /// Build the pipeline with room for `capacity_segments` line segments.
    pub fn new(device: &wgpu::Device, format: wgpu::TextureFormat, capacity_segments: u32) -> Self {
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Link Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER_SOURCE.into()),
        });

        let globals_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Link Globals"),
            contents: bytemuck::bytes_of(&Globals {
                resolution: [1.0, 1.0],
                _pad: [0.0; 2],
                color: [1.0, 1.0, 1.0, 0.2],
            }),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Link Bind Group Layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX_FRAGMENT,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Link Bind Group"),
            layout: &bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: globals_buffer.as_entire_binding(),
            }],
        });

        let vertex_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Link Vertex Buffer"),
            size: u64::from(capacity_segments) * 2 * std::mem::size_of::<Vec2>() as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Link Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Link Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vec2>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x2,
                    }],
                }],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        Self {
            pipeline,
            globals_buffer,
            bind_group,
            vertex_buffer,
            capacity_segments,
            vertex_count: 0,
        }
    }

    /// Stream this frame's segments. Segments beyond the buffer capacity
    /// are dropped.
    pub fn upload(&mut self, queue: &wgpu::Queue, segments: &[[Vec2; 2]]) {
        let kept = segments.len().min(self.capacity_segments as usize);
        if kept < segments.len() {
            log::warn!("link upload truncated from {} to {}", segments.len(), kept);
        }
        queue.write_buffer(
            &self.vertex_buffer,
            0,
            bytemuck::cast_slice(&segments[..kept]),
        );
        self.vertex_count = (kept * 2) as u32;
    }

    /// Update resolution and line color (alpha included).
    pub fn set_globals(&self, queue: &wgpu::Queue, resolution: Vec2, color: Vec4) {
        let globals = Globals {
            resolution: resolution.to_array(),
            _pad: [0.0; 2],
            color: color.to_array(),
        };
        queue.write_buffer(&self.globals_buffer, 0, bytemuck::bytes_of(&globals));
    }

    pub fn draw(&self, pass: &mut wgpu::RenderPass<'_>) {
        if self.vertex_count == 0 {
            return;
        }
        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..self.vertex_count, 0..1);
    }
}

#[cfg(test)]
mod tests {
    #[test]
    fn shader_is_valid_wgsl() {
        naga::front::wgsl::parse_str(super::SHADER_SOURCE).expect("link shader parses");
    }
}
