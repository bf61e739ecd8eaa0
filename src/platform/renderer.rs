//=========================================================================
// Renderer
//
// Draws the per-frame display list as alpha-blended solid quads.
//
// Pipeline:
// ```text
//   DisplayList ──build_vertices()──> Vec<Vertex> ──write_buffer──> GPU
//        (logical px)                   (2 triangles / quad)
//
//   Vertex shader: logical px → NDC using the viewport uniform
//   Fragment shader: vertex colour, straight alpha blending
// ```
//
// Notes:
// The surface prefers a non-sRGB format so configured colours reach the
// screen unchanged and blend the way they are written in the config.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::sync::Arc;

use bytemuck::{Pod, Zeroable};
use log::{debug, info, trace, warn};
use thiserror::Error;
use wgpu::util::DeviceExt;
use winit::{dpi::PhysicalSize, window::Window};

//=== Internal Dependencies ===============================================

use crate::core::scene::{DisplayList, DrawQuad};

//=== RenderError =========================================================

/// GPU initialization and frame errors.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create rendering surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),

    #[error("no compatible GPU adapter found")]
    NoAdapter,

    #[error("failed to request GPU device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),

    #[error("surface is not supported by the selected adapter")]
    UnsupportedSurface,

    #[error("surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),
}

//=== Vertex ==============================================================

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub(crate) struct Vertex {
    pub(crate) position: [f32; 2],
    pub(crate) color: [f32; 4],
}

impl Vertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
struct ViewportUniform {
    size: [f32; 2],
    padding: [f32; 2],
}

impl ViewportUniform {
    fn new(physical: PhysicalSize<u32>, scale_factor: f64) -> Self {
        let logical = physical.to_logical::<f32>(scale_factor);
        Self {
            size: [logical.width.max(1.0), logical.height.max(1.0)],
            padding: [0.0; 2],
        }
    }
}

pub(crate) const VERTICES_PER_QUAD: usize = 6;

//=== Vertex Generation ===================================================

/// Expands each quad into two triangles, in display-list order.
///
/// `out` is cleared first and reused across frames.
pub(crate) fn build_vertices(list: &DisplayList, out: &mut Vec<Vertex>) {
    out.clear();
    out.reserve(list.len() * VERTICES_PER_QUAD);

    for quad in list.quads() {
        push_quad(quad, out);
    }
}

fn push_quad(quad: &DrawQuad, out: &mut Vec<Vertex>) {
    let left = quad.bounds.origin.x;
    let top = quad.bounds.origin.y;
    let right = quad.bounds.right();
    let bottom = quad.bounds.bottom();
    let color = quad.rgba;

    let corner = |x: f32, y: f32| Vertex { position: [x, y], color };

    out.extend_from_slice(&[
        corner(left, top),
        corner(left, bottom),
        corner(right, top),
        corner(right, top),
        corner(left, bottom),
        corner(right, bottom),
    ]);
}

//=== Renderer ============================================================

pub(crate) struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    pipeline: wgpu::RenderPipeline,
    clear_color: wgpu::Color,

    viewport_buffer: wgpu::Buffer,
    viewport_bind_group: wgpu::BindGroup,

    vertex_buffer: wgpu::Buffer,
    vertex_capacity: usize,
    vertices: Vec<Vertex>,
}

impl Renderer {
    //--- Construction -----------------------------------------------------

    /// Creates the GPU context for `window`. Blocks on adapter and device
    /// requests.
    pub(crate) fn new(window: Arc<Window>) -> Result<Self, RenderError> {
        let physical = window.inner_size();
        let scale_factor = window.scale_factor();

        let instance = wgpu::Instance::default();
        let surface = instance.create_surface(window)?;

        let adapter = pollster::block_on(instance.request_adapter(&wgpu::RequestAdapterOptions {
            power_preference: wgpu::PowerPreference::HighPerformance,
            force_fallback_adapter: false,
            compatible_surface: Some(&surface),
        }))
        .ok_or(RenderError::NoAdapter)?;

        info!(target: "renderer", "Using adapter: {}", adapter.get_info().name);

        let (device, queue) =
            pollster::block_on(adapter.request_device(&wgpu::DeviceDescriptor::default(), None))?;

        let mut config = surface
            .get_default_config(&adapter, physical.width.max(1), physical.height.max(1))
            .ok_or(RenderError::UnsupportedSurface)?;

        let capabilities = surface.get_capabilities(&adapter);
        if let Some(format) = capabilities.formats.iter().copied().find(|f| !f.is_srgb()) {
            config.format = format;
        }
        surface.configure(&device, &config);

        debug!(
            target: "renderer",
            "Surface configured: {}x{} {:?}",
            config.width,
            config.height,
            config.format
        );

        //--- Viewport uniform ---------------------------------------------
        let viewport_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("viewport uniform"),
            contents: bytemuck::bytes_of(&ViewportUniform::new(physical, scale_factor)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });

        let viewport_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("viewport layout"),
            entries: &[wgpu::BindGroupLayoutEntry {
                binding: 0,
                visibility: wgpu::ShaderStages::VERTEX,
                ty: wgpu::BindingType::Buffer {
                    ty: wgpu::BufferBindingType::Uniform,
                    has_dynamic_offset: false,
                    min_binding_size: None,
                },
                count: None,
            }],
        });

        let viewport_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("viewport bind group"),
            layout: &viewport_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: viewport_buffer.as_entire_binding(),
            }],
        });

        //--- Pipeline -----------------------------------------------------
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("quad shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("quad pipeline layout"),
            bind_group_layouts: &[&viewport_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("quad pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: config.format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        //--- Vertex storage -----------------------------------------------
        const INITIAL_QUADS: usize = 8;
        let vertex_capacity = INITIAL_QUADS * VERTICES_PER_QUAD;
        let vertex_buffer = create_vertex_buffer(&device, vertex_capacity);

        info!(target: "renderer", "Renderer initialized");

        Ok(Self {
            surface,
            device,
            queue,
            config,
            pipeline,
            clear_color: wgpu::Color::BLACK,
            viewport_buffer,
            viewport_bind_group,
            vertex_buffer,
            vertex_capacity,
            vertices: Vec::with_capacity(vertex_capacity),
        })
    }

    //--- Surface Management -----------------------------------------------

    /// Reconfigures the surface and the logical viewport. Zero-sized
    /// windows (minimized) keep the previous configuration.
    pub(crate) fn resize(&mut self, physical: PhysicalSize<u32>, scale_factor: f64) {
        if physical.width == 0 || physical.height == 0 {
            trace!(target: "renderer", "Ignoring zero-sized resize");
            return;
        }

        self.config.width = physical.width;
        self.config.height = physical.height;
        self.surface.configure(&self.device, &self.config);

        self.queue.write_buffer(
            &self.viewport_buffer,
            0,
            bytemuck::bytes_of(&ViewportUniform::new(physical, scale_factor)),
        );

        debug!(target: "renderer", "Surface resized to {}x{}", physical.width, physical.height);
    }

    //--- Frame ------------------------------------------------------------

    /// Draws one frame. Lost or outdated surfaces are reconfigured and the
    /// frame is skipped; other surface errors are returned.
    pub(crate) fn render(&mut self, list: &DisplayList) -> Result<(), RenderError> {
        let frame = match self.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                debug!(target: "renderer", "Surface lost or outdated, reconfiguring");
                self.surface.configure(&self.device, &self.config);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => {
                warn!(target: "renderer", "Surface timeout, skipping frame");
                return Ok(());
            }
            Err(e) => return Err(RenderError::Surface(e)),
        };

        build_vertices(list, &mut self.vertices);
        self.ensure_vertex_capacity(self.vertices.len());

        if !self.vertices.is_empty() {
            self.queue
                .write_buffer(&self.vertex_buffer, 0, bytemuck::cast_slice(&self.vertices));
        }

        let view = frame.texture.create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self.device.create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("frame encoder"),
        });

        {
            let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("quad pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(self.clear_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if !self.vertices.is_empty() {
                pass.set_pipeline(&self.pipeline);
                pass.set_bind_group(0, &self.viewport_bind_group, &[]);
                pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
                pass.draw(0..self.vertices.len() as u32, 0..1);
            }
        }

        self.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        Ok(())
    }

    //--- Internal Helpers -------------------------------------------------

    fn ensure_vertex_capacity(&mut self, required: usize) {
        if required <= self.vertex_capacity {
            return;
        }

        let capacity = required.next_power_of_two();
        debug!(target: "renderer", "Growing vertex buffer {} -> {}", self.vertex_capacity, capacity);

        self.vertex_buffer = create_vertex_buffer(&self.device, capacity);
        self.vertex_capacity = capacity;
    }
}

fn create_vertex_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
    device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("quad vertices"),
        size: (capacity * std::mem::size_of::<Vertex>()) as wgpu::BufferAddress,
        usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        mapped_at_creation: false,
    })
}

//=========================================================================
// Unit Tests
//=========================================================================
