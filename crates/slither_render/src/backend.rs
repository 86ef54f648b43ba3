//! wgpu quad renderer
//!
//! Every draw call becomes one colored quad in arena coordinates. Quads are
//! batched on the CPU and flushed in a single draw per frame. Texture
//! sampling is not implemented: textured calls draw their destination area
//! in the tint color.

use crate::error::RenderError;
use crate::renderer::Renderer;
use slither_core::collision::Rect;
use slither_core::color::Color;
use slither_core::components::TextureId;
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{info, warn};
use winit::window::Window;

const SHADER: &str = r#"
struct VertexOutput {
    @builtin(position) clip: vec4<f32>,
    @location(0) color: vec4<f32>,
};

@vertex
fn vs_main(@location(0) position: vec2<f32>, @location(1) color: vec4<f32>) -> VertexOutput {
    var out: VertexOutput;
    out.clip = vec4<f32>(position, 0.0, 1.0);
    out.color = color;
    return out;
}

@fragment
fn fs_main(in: VertexOutput) -> @location(0) vec4<f32> {
    return in.color;
}
"#;

const INITIAL_QUADS: usize = 256;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

/// CPU-side quad batch in normalized device coordinates.
#[derive(Debug, Clone)]
pub struct QuadBatch {
    arena: (f32, f32),
    vertices: Vec<Vertex>,
    texture_sizes: HashMap<TextureId, (f32, f32)>,
    warned: HashSet<TextureId>,
}

impl QuadBatch {
    /// Batch mapping an `arena_width` x `arena_height` area onto the viewport.
    pub fn new(arena_width: f32, arena_height: f32) -> Self {
        Self {
            arena: (arena_width, arena_height),
            vertices: Vec::with_capacity(INITIAL_QUADS * 6),
            texture_sizes: HashMap::new(),
            warned: HashSet::new(),
        }
    }

    /// Size used when `texture` is drawn whole with `draw_sprite`.
    pub fn register_texture_size(&mut self, texture: TextureId, width: f32, height: f32) {
        self.texture_sizes.insert(texture, (width, height));
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
    }

    pub fn push_quad(&mut self, rect: Rect, color: Color) {
        let (w, h) = self.arena;
        let to_ndc = |x: f32, y: f32| [x / w * 2.0 - 1.0, 1.0 - y / h * 2.0];
        let color = color.to_f32_array();

        let top_left = to_ndc(rect.left(), rect.top());
        let top_right = to_ndc(rect.right(), rect.top());
        let bottom_left = to_ndc(rect.left(), rect.bottom());
        let bottom_right = to_ndc(rect.right(), rect.bottom());

        for position in [top_left, bottom_left, bottom_right, top_left, bottom_right, top_right] {
            self.vertices.push(Vertex { position, color });
        }
    }
}

impl Renderer for QuadBatch {
    fn draw_rect(&mut self, rect: Rect, color: Color) {
        self.push_quad(rect, color);
    }

    fn draw_sprite(&mut self, texture: TextureId, x: f32, y: f32, color: Color) {
        match self.texture_sizes.get(&texture).copied() {
            Some((width, height)) => self.push_quad(Rect::new(x, y, width, height), color),
            None => {
                if self.warned.insert(texture) {
                    warn!(?texture, "no size registered for texture, sprite skipped");
                }
            }
        }
    }

    fn draw_textured_region(
        &mut self,
        _texture: TextureId,
        _source: Rect,
        dest: Rect,
        color: Color,
    ) {
        self.push_quad(dest, color);
    }
}

/// Owns the wgpu surface and pipeline and presents one [`QuadBatch`] per frame.
pub struct QuadRenderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
}

impl QuadRenderer {
    pub async fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let size = window.inner_size();

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
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
            .await
            .ok_or(RenderError::NoAdapter)?;
        let info = adapter.get_info();
        info!(adapter = %info.name, backend = ?info.backend, "using adapter");

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("slither device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: wgpu::MemoryHints::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|format| !format.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or(RenderError::NoSurfaceFormat)?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format,
            width: size.width.max(1),
            height: size.height.max(1),
            present_mode: wgpu::PresentMode::Fifo,
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Quad Shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Quad Pipeline Layout"),
            bind_group_layouts: &[],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Quad Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4],
                }],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                unclipped_depth: false,
                conservative: false,
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState {
                count: 1,
                mask: !0,
                alpha_to_coverage_enabled: false,
            },
            multiview: None,
            cache: None,
        });

        let vertex_capacity = INITIAL_QUADS * 6;
        let vertex_buffer = Self::create_vertex_buffer(&device, vertex_capacity);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            vertex_buffer,
            vertex_capacity,
        })
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.config.width = width;
        self.config.height = height;
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload `batch`, draw it over a `clear` background and present.
    ///
    /// A lost or outdated surface is reconfigured and the frame dropped.
    pub fn present(&mut self, batch: &QuadBatch, clear: Color) -> Result<(), RenderError> {
        let vertices = batch.vertices();
        if vertices.len() > self.vertex_capacity {
            self.vertex_capacity = vertices.len().next_power_of_two();
            self.vertex_buffer = Self::create_vertex_buffer(&self.device, self.vertex_capacity);
        }
        if !vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(vertices));
        }

        let output = match self.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Quad Encoder"),
            });

        {
            let [r, g, b, a] = clear.to_f32_array();
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Quad Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: r as f64,
                            g: g as f64,
                            b: b as f64,
                            a: a as f64,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
            render_pass.draw(0..(vertices.len() as u32), 0..1);
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }

    fn create_vertex_buffer(device: &wgpu::Device, vertices: usize) -> wgpu::Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Quad Vertex Buffer"),
            size: (std::mem::size_of::<Vertex>() * vertices) as u64,
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_maps_arena_corners_to_ndc() {
        let mut batch = QuadBatch::new(600.0, 600.0);
        batch.draw_rect(Rect::new(0.0, 0.0, 600.0, 600.0), Color::WHITE);

        let vertices = batch.vertices();
        assert_eq!(vertices.len(), 6);
        assert_eq!(vertices[0].position, [-1.0, 1.0]);
        assert_eq!(vertices[2].position, [1.0, -1.0]);
        assert_eq!(vertices[5].position, [1.0, 1.0]);
        assert_eq!(vertices[0].color, [1.0; 4]);
    }

    #[test]
    fn sprite_needs_registered_size() {
        let mut batch = QuadBatch::new(100.0, 100.0);
        batch.draw_sprite(TextureId(1), 0.0, 0.0, Color::WHITE);
        assert!(batch.vertices().is_empty());

        batch.register_texture_size(TextureId(1), 10.0, 10.0);
        batch.draw_sprite(TextureId(1), 0.0, 0.0, Color::WHITE);
        assert_eq!(batch.vertices().len(), 6);
    }

    #[test]
    fn textured_region_fills_destination() {
        let mut batch = QuadBatch::new(100.0, 100.0);
        batch.draw_textured_region(
            TextureId(0),
            Rect::new(0.0, 0.0, 16.0, 16.0),
            Rect::new(50.0, 50.0, 50.0, 50.0),
            Color::WHITE,
        );
        assert_eq!(batch.vertices()[0].position, [0.0, 0.0]);
        batch.clear();
        assert!(batch.vertices().is_empty());
    }
}
