use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use bytemuck::{bytes_of, cast_slice, Pod, Zeroable};
use glam::Mat4;
use log::error;
use wgpu::util::DeviceExt;
use winit::dpi::PhysicalSize;
use winit::window::{Window, WindowId};

use crate::fit::{self, ContentSize, FitError, FittedRect, Viewport};
use crate::noise::NoiseImage;

/// Depth range used for the full-viewport orthographic projection,
/// matching the range set on every resize.
const DEPTH_NEAR: f32 = -100.0;
const DEPTH_FAR: f32 = 100.0;

/// GPU renderer backed by wgpu that draws the noise image as a single
/// aspect-fitted textured quad.
pub struct Renderer {
    window: Arc<Window>,
    surface: wgpu::Surface,
    device: wgpu::Device,
    queue: wgpu::Queue,
    config: wgpu::SurfaceConfiguration,
    size: PhysicalSize<u32>,
    pipeline: wgpu::RenderPipeline,
    vertex_buffer: wgpu::Buffer,
    projection_buffer: wgpu::Buffer,
    projection_bind_group: wgpu::BindGroup,
    texture: wgpu::Texture,
    texture_bind_group: wgpu::BindGroup,
    content: ContentSize,
    fitted: FittedRect,
}

impl Renderer {
    /// Initializes the GPU renderer for the provided window. The image
    /// fixes both the texture dimensions and the aspect ratio to keep.
    pub async fn new(window: Arc<Window>, image: &NoiseImage) -> Result<Self> {
        let size = window.inner_size();
        if size.width == 0 || size.height == 0 {
            return Err(anyhow!("window has zero area"));
        }

        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });
        let surface = unsafe { instance.create_surface(window.as_ref()) }?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .context("failed to acquire GPU adapter")?;

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("tv-static-device"),
                    features: wgpu::Features::empty(),
                    limits: wgpu::Limits::default(),
                },
                None,
            )
            .await
            .context("failed to create GPU device")?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|format| format.is_srgb())
            .copied()
            .unwrap_or(surface_caps.formats[0]);

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: size.width,
            height: size.height,
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|mode| {
                    matches!(
                        mode,
                        wgpu::PresentMode::Mailbox | wgpu::PresentMode::Immediate
                    )
                })
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
        };
        surface.configure(&device, &config);

        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("tv-static-shader"),
            source: wgpu::ShaderSource::Wgsl(SHADER.into()),
        });

        let projection_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("projection-bind-layout"),
                entries: &[wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: Some(
                            std::num::NonZeroU64::new(
                                std::mem::size_of::<ProjectionUniform>() as u64
                            )
                            .unwrap(),
                        ),
                    },
                    count: None,
                }],
            });

        let texture_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("signal-bind-layout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("tv-static-pipeline-layout"),
            bind_group_layouts: &[&projection_layout, &texture_layout],
            push_constant_ranges: &[],
        });

        let content = image.content_size();
        let viewport = Viewport::new(size.width, size.height);
        let fitted = fit::fit(viewport, content).context("initial viewport fit failed")?;
        let projection = full_viewport_projection(viewport)?;

        let vertex_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("quad-vertices"),
            contents: cast_slice(&quad_vertices(&fitted)),
            usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
        });
        let projection_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("projection-uniform"),
            contents: bytes_of(&ProjectionUniform::from(projection)),
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
        });
        let projection_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("projection-bind-group"),
            layout: &projection_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: projection_buffer.as_entire_binding(),
            }],
        });

        let texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("signal-texture"),
            size: wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let texture_view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        // Nearest-neighbor keeps the noise blocky instead of smearing it.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });
        let texture_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("signal-bind-group"),
            layout: &texture_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&texture_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::Sampler(&sampler),
                },
            ],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("tv-static-pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: "vs_main",
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: (4 * std::mem::size_of::<f32>()) as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &[
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: 0,
                            shader_location: 0,
                        },
                        wgpu::VertexAttribute {
                            format: wgpu::VertexFormat::Float32x2,
                            offset: (2 * std::mem::size_of::<f32>()) as u64,
                            shader_location: 1,
                        },
                    ],
                }],
            },
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleStrip,
                strip_index_format: None,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                polygon_mode: wgpu::PolygonMode::Fill,
                ..Default::default()
            },
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            multiview: None,
        });

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
            size,
            pipeline,
            vertex_buffer,
            projection_buffer,
            projection_bind_group,
            texture,
            texture_bind_group,
            content,
            fitted,
        })
    }

    /// Returns the identifier of the window owned by the renderer.
    pub fn window_id(&self) -> WindowId {
        self.window.id()
    }

    /// Exposes the inner window for event handling.
    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Last rectangle the quad was fitted into.
    pub fn fitted_rect(&self) -> FittedRect {
        self.fitted
    }

    /// Current surface size in physical pixels.
    pub fn size(&self) -> PhysicalSize<u32> {
        self.size
    }

    /// Resizes the surface and refits the quad to the new viewport.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width == 0 || new_size.height == 0 {
            return;
        }
        self.size = new_size;
        self.config.width = new_size.width;
        self.config.height = new_size.height;
        self.surface.configure(&self.device, &self.config);
        if let Err(err) = self.refit() {
            error!("failed to refit quad after resize: {err}");
        }
    }

    /// Recomputes the fitted rectangle and projection for the current
    /// surface size and rewrites the quad vertices in place.
    fn refit(&mut self) -> Result<(), FitError> {
        let viewport = Viewport::new(self.config.width, self.config.height);
        let rect = fit::fit(viewport, self.content)?;
        let projection = full_viewport_projection(viewport)?;
        self.fitted = rect;
        self.queue
            .write_buffer(&self.vertex_buffer, 0, cast_slice(&quad_vertices(&rect)));
        self.queue.write_buffer(
            &self.projection_buffer,
            0,
            bytes_of(&ProjectionUniform::from(projection)),
        );
        Ok(())
    }

    /// Uploads the current noise frame and draws the quad.
    pub fn render(&mut self, image: &NoiseImage) -> Result<(), wgpu::SurfaceError> {
        let pixels = image.to_rgba8();
        self.queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &pixels,
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * image.width()),
                rows_per_image: Some(image.height()),
            },
            wgpu::Extent3d {
                width: image.width(),
                height: image.height(),
                depth_or_array_layers: 1,
            },
        );

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("tv-static-encoder"),
            });

        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("main-pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: &view,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(wgpu::Color::WHITE),
                    store: true,
                },
            })],
            depth_stencil_attachment: None,
        });

        pass.set_pipeline(&self.pipeline);
        pass.set_bind_group(0, &self.projection_bind_group, &[]);
        pass.set_bind_group(1, &self.texture_bind_group, &[]);
        pass.set_vertex_buffer(0, self.vertex_buffer.slice(..));
        pass.draw(0..4, 0..1);

        drop(pass); // explicit to satisfy lifetimes on some backends
        self.queue.submit(std::iter::once(encoder.finish()));
        output.present();
        Ok(())
    }
}

/// Projection covering the whole viewport in pixel coordinates, so the
/// quad vertices can be specified directly in pixels.
fn full_viewport_projection(viewport: Viewport) -> Result<Mat4, FitError> {
    fit::ortho(
        0.0,
        viewport.width as f32,
        0.0,
        viewport.height as f32,
        DEPTH_NEAR,
        DEPTH_FAR,
    )
}

/// Interleaved position/texcoord data for a 4-vertex triangle strip.
fn quad_vertices(rect: &FittedRect) -> [f32; 16] {
    const TEXCOORDS: [[f32; 2]; 4] = [[0.0, 1.0], [1.0, 1.0], [0.0, 0.0], [1.0, 0.0]];
    let corners = rect.corners();
    let mut data = [0.0; 16];
    for (i, (corner, texcoord)) in corners.iter().zip(TEXCOORDS.iter()).enumerate() {
        data[i * 4] = corner[0];
        data[i * 4 + 1] = corner[1];
        data[i * 4 + 2] = texcoord[0];
        data[i * 4 + 3] = texcoord[1];
    }
    data
}

#[repr(C)]
#[derive(Clone, Copy, Pod, Zeroable)]
struct ProjectionUniform {
    matrix: [[f32; 4]; 4],
}

impl From<Mat4> for ProjectionUniform {
    fn from(matrix: Mat4) -> Self {
        Self {
            matrix: matrix.to_cols_array_2d(),
        }
    }
}

const SHADER: &str = r#"
struct Projection {
    matrix: mat4x4<f32>,
}

@group(0) @binding(0)
var<uniform> projection: Projection;

@group(1) @binding(0)
var t_signal: texture_2d<f32>;
@group(1) @binding(1)
var s_signal: sampler;

struct VertexInput {
    @location(0) position: vec2<f32>,
    @location(1) texcoord: vec2<f32>,
}

struct VertexOutput {
    @builtin(position) position: vec4<f32>,
    @location(0) texcoord: vec2<f32>,
}

@vertex
fn vs_main(input: VertexInput) -> VertexOutput {
    var out: VertexOutput;
    out.texcoord = input.texcoord;
    out.position = projection.matrix * vec4<f32>(input.position, 0.0, 1.0);
    return out;
}

@fragment
fn fs_main(input: VertexOutput) -> @location(0) vec4<f32> {
    let color = textureSample(t_signal, s_signal, input.texcoord);
    return vec4<f32>(color.rgb, 1.0);
}
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quad_vertices_interleave_positions_and_texcoords() {
        let rect = FittedRect {
            x: 80.0,
            y: 0.0,
            width: 640.0,
            height: 480.0,
        };
        let data = quad_vertices(&rect);
        // Bottom-left corner samples the last texture row.
        assert_eq!(&data[0..4], &[80.0, 0.0, 0.0, 1.0]);
        assert_eq!(&data[4..8], &[720.0, 0.0, 1.0, 1.0]);
        assert_eq!(&data[8..12], &[80.0, 480.0, 0.0, 0.0]);
        assert_eq!(&data[12..16], &[720.0, 480.0, 1.0, 0.0]);
    }

    #[test]
    fn projection_uniform_is_column_major() {
        let projection = full_viewport_projection(Viewport::new(100, 100)).unwrap();
        let uniform = ProjectionUniform::from(projection);
        assert_eq!(uniform.matrix[0][0], 2.0 / 100.0);
        assert_eq!(uniform.matrix[3][3], 1.0);
    }

    #[test]
    fn full_viewport_projection_rejects_zero_area() {
        assert!(full_viewport_projection(Viewport::new(0, 100)).is_err());
    }
}
