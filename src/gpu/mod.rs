//! wgpu display collaborator.
//!
//! [`Renderer`] owns the device, surface and the single particle buffer. The
//! buffer is both the vertex buffer for drawing (one instanced quad per
//! particle) and the storage buffer the GPU displacement pass writes into.
//!
//! Per frame, in order:
//! 1. [`Renderer::upload_particles`] writes the CPU positions if the set is dirty.
//! 2. [`Renderer::render`] records the optional compute pass, then the draw,
//!    in one command encoder, so the displacement write finishes before the
//!    vertex fetch reads it.

#[cfg(feature = "egui")]
mod egui_integration;
pub mod shaders;

use std::sync::Arc;

use bytemuck::Zeroable;
use glam::Vec2;
use wgpu::util::DeviceExt;
use winit::window::Window;

use crate::camera::OrbitCamera;
use crate::config::BlendMode;
use crate::error::GpuError;
use crate::particles::ParticleSet;
use crate::texture::SpriteTexture;

#[cfg(feature = "egui")]
pub use egui_integration::{EguiFrameOutput as Overlay, EguiIntegration};
/// Panel overlay output; uninhabited when the `egui` feature is off.
#[cfg(not(feature = "egui"))]
pub enum Overlay {}
use shaders::{GpuPoint, Uniforms};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

/// Draw settings the panel can change at runtime.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderSettings {
    pub particle_size: f32,
    pub size_attenuation: bool,
    pub blend_mode: BlendMode,
    pub depth_write: bool,
}

impl RenderSettings {
    fn pipeline_key(&self) -> (BlendMode, bool) {
        (self.blend_mode, self.depth_write)
    }
}

pub struct Renderer {
    surface: wgpu::Surface<'static>,
    device: wgpu::Device,
    queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    render_shader: wgpu::ShaderModule,
    render_pipeline_layout: wgpu::PipelineLayout,
    render_pipeline: wgpu::RenderPipeline,
    pipeline_key: (BlendMode, bool),
    compute_pipeline: wgpu::ComputePipeline,
    particle_buffer: wgpu::Buffer,
    uniform_buffer: wgpu::Buffer,
    uniform_bind_group: wgpu::BindGroup,
    sprite_bind_group: wgpu::BindGroup,
    compute_bind_group: wgpu::BindGroup,
    depth_texture: wgpu::TextureView,
    num_particles: u32,
    /// Reused packing buffer for uploads.
    staging: Vec<GpuPoint>,
    pixel_ratio: f32,
    pub settings: RenderSettings,
    #[cfg(feature = "egui")]
    pub egui: EguiIntegration,
}

impl Renderer {
    /// Create the GPU context for `window` and upload the initial particles.
    ///
    /// `surface_size` is the pixel size the surface should use, already
    /// limited by the configured maximum pixel ratio.
    pub async fn new(
        window: Arc<Window>,
        surface_size: (u32, u32),
        pixel_ratio: f32,
        particles: &mut ParticleSet,
        sprite: &SpriteTexture,
        settings: RenderSettings,
    ) -> Result<Self, GpuError> {
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::PRIMARY,
            ..Default::default()
        });

        let surface = instance.create_surface(window.clone())?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(GpuError::NoAdapter)?;

        let info = adapter.get_info();
        log::info!("using adapter {} ({:?})", info.name, info.backend);

        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    label: Some("Device"),
                    required_features: wgpu::Features::empty(),
                    required_limits: wgpu::Limits::default(),
                    memory_hints: Default::default(),
                },
                None,
            )
            .await?;

        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first())
            .copied()
            .ok_or(GpuError::UnsupportedSurface)?;

        let config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: surface_size.0.max(1),
            height: surface_size.1.max(1),
            present_mode: wgpu::PresentMode::AutoVsync,
            alpha_mode: surface_caps.alpha_modes[0],
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &config);

        let depth_texture = create_depth_texture(&device, &config);

        // Storage bindings cannot be empty; an empty set still gets one slot.
        let num_particles = particles.len() as u32;
        let mut staging = Vec::with_capacity(particles.len().max(1));
        pack_points(particles, &mut staging);
        if staging.is_empty() {
            staging.push(GpuPoint::zeroed());
        }
        particles.take_dirty();

        let particle_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("Particle Buffer"),
            contents: bytemuck::cast_slice(&staging),
            usage: wgpu::BufferUsages::VERTEX
                | wgpu::BufferUsages::STORAGE
                | wgpu::BufferUsages::COPY_DST,
        });

        let uniform_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Uniform Buffer"),
            size: std::mem::size_of::<Uniforms>() as wgpu::BufferAddress,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let uniform_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Uniform Bind Group Layout"),
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

        let uniform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Uniform Bind Group"),
            layout: &uniform_bind_group_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: uniform_buffer.as_entire_binding(),
            }],
        });

        let (sprite_bind_group_layout, sprite_bind_group) =
            create_sprite_binding(&device, &queue, sprite);

        let compute_bind_group_layout =
            device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                label: Some("Compute Bind Group Layout"),
                entries: &[
                    wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Storage { read_only: false },
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                    wgpu::BindGroupLayoutEntry {
                        binding: 1,
                        visibility: wgpu::ShaderStages::COMPUTE,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    },
                ],
            });

        let compute_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Compute Bind Group"),
            layout: &compute_bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: particle_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: uniform_buffer.as_entire_binding(),
                },
            ],
        });

        let render_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Point Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::render_shader().into()),
        });

        let render_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Render Pipeline Layout"),
            bind_group_layouts: &[&uniform_bind_group_layout, &sprite_bind_group_layout],
            push_constant_ranges: &[],
        });

        let render_pipeline = create_render_pipeline(
            &device,
            &render_pipeline_layout,
            &render_shader,
            config.format,
            settings,
        );

        let compute_shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Displacement Shader"),
            source: wgpu::ShaderSource::Wgsl(shaders::compute_shader().into()),
        });

        let compute_pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Compute Pipeline Layout"),
            bind_group_layouts: &[&compute_bind_group_layout],
            push_constant_ranges: &[],
        });

        let compute_pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("Displacement Pipeline"),
            layout: Some(&compute_pipeline_layout),
            module: &compute_shader,
            entry_point: Some("main"),
            compilation_options: Default::default(),
            cache: None,
        });

        #[cfg(feature = "egui")]
        let egui = EguiIntegration::new(&device, config.format, &window);

        Ok(Self {
            surface,
            device,
            queue,
            config,
            render_shader,
            render_pipeline_layout,
            render_pipeline,
            pipeline_key: settings.pipeline_key(),
            compute_pipeline,
            particle_buffer,
            uniform_buffer,
            uniform_bind_group,
            sprite_bind_group,
            compute_bind_group,
            depth_texture,
            num_particles,
            staging,
            pixel_ratio,
            settings,
            #[cfg(feature = "egui")]
            egui,
        })
    }

    pub fn resize(&mut self, surface_size: (u32, u32), pixel_ratio: f32) {
        let (width, height) = surface_size;
        if width > 0 && height > 0 {
            log::debug!("resizing surface to {width}x{height} (pixel ratio {pixel_ratio:.2})");
            self.config.width = width;
            self.config.height = height;
            self.pixel_ratio = pixel_ratio;
            self.surface.configure(&self.device, &self.config);
            self.depth_texture = create_depth_texture(&self.device, &self.config);
        }
    }

    /// Re-apply the current surface configuration, e.g. after the surface was lost.
    pub fn reconfigure(&mut self) {
        self.surface.configure(&self.device, &self.config);
    }

    /// Upload CPU positions if they changed since the last upload.
    ///
    /// Returns whether a write was issued.
    pub fn upload_particles(&mut self, particles: &mut ParticleSet) -> bool {
        if !particles.take_dirty() || particles.is_empty() {
            return false;
        }
        pack_points(particles, &mut self.staging);
        self.queue
            .write_buffer(&self.particle_buffer, 0, bytemuck::cast_slice(&self.staging));
        true
    }

    fn write_uniforms(&self, camera: &OrbitCamera, time: f32) {
        let aspect = self.config.width as f32 / self.config.height as f32;
        let proj = camera.projection_matrix(aspect);
        let view_proj = proj * camera.view_matrix();
        let proj_scale = Vec2::new(proj.x_axis.x, proj.y_axis.y);

        let uniforms = Uniforms {
            view_proj: view_proj.to_cols_array_2d(),
            proj_scale: proj_scale.to_array(),
            viewport: [self.config.width as f32, self.config.height as f32],
            time,
            particle_size: self.settings.particle_size,
            size_attenuation: self.settings.size_attenuation as u32,
            pixel_ratio: self.pixel_ratio,
        };

        self.queue
            .write_buffer(&self.uniform_buffer, 0, bytemuck::bytes_of(&uniforms));
    }

    fn refresh_pipeline(&mut self) {
        let key = self.settings.pipeline_key();
        if key != self.pipeline_key {
            log::debug!("rebuilding render pipeline for {:?}", key);
            self.render_pipeline = create_render_pipeline(
                &self.device,
                &self.render_pipeline_layout,
                &self.render_shader,
                self.config.format,
                self.settings,
            );
            self.pipeline_key = key;
        }
    }

    /// Record and submit one frame.
    ///
    /// With `gpu_displace` set, the wave is computed on the GPU buffer for
    /// `time` before drawing.
    pub fn render(
        &mut self,
        camera: &OrbitCamera,
        time: f32,
        gpu_displace: bool,
        overlay: Option<Overlay>,
    ) -> Result<(), wgpu::SurfaceError> {
        self.refresh_pipeline();
        self.write_uniforms(camera, time);

        let output = self.surface.get_current_texture()?;
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if gpu_displace && self.num_particles > 0 {
            let mut compute_pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor {
                label: Some("Displacement Pass"),
                timestamp_writes: None,
            });
            compute_pass.set_pipeline(&self.compute_pipeline);
            compute_pass.set_bind_group(0, &self.compute_bind_group, &[]);
            compute_pass.dispatch_workgroups(shaders::workgroup_count(self.num_particles), 1, 1);
        }

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Particle Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                    view: &self.depth_texture,
                    depth_ops: Some(wgpu::Operations {
                        load: wgpu::LoadOp::Clear(1.0),
                        store: wgpu::StoreOp::Store,
                    }),
                    stencil_ops: None,
                }),
                timestamp_writes: None,
                occlusion_query_set: None,
            });

            if self.num_particles > 0 {
                render_pass.set_pipeline(&self.render_pipeline);
                render_pass.set_bind_group(0, &self.uniform_bind_group, &[]);
                render_pass.set_bind_group(1, &self.sprite_bind_group, &[]);
                render_pass.set_vertex_buffer(0, self.particle_buffer.slice(..));
                render_pass.draw(0..6, 0..self.num_particles);
            }
        }

        #[cfg(feature = "egui")]
        let mut extra_commands = Vec::new();
        #[cfg(feature = "egui")]
        if let Some(overlay) = &overlay {
            let screen = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [self.config.width, self.config.height],
                pixels_per_point: overlay_pixels_per_point(
                    overlay.pixels_per_point,
                    overlay.window_scale,
                    self.pixel_ratio,
                ),
            };
            extra_commands =
                self.egui
                    .prepare(&self.device, &self.queue, &mut encoder, overlay, &screen);

            let render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Panel Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Load,
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });
            self.egui
                .renderer()
                .render(&mut render_pass.forget_lifetime(), &overlay.paint_jobs, &screen);
        }

        #[cfg(feature = "egui")]
        self.queue
            .submit(extra_commands.into_iter().chain(std::iter::once(encoder.finish())));
        #[cfg(not(feature = "egui"))]
        {
            let _ = overlay;
            self.queue.submit(std::iter::once(encoder.finish()));
        }

        output.present();

        #[cfg(feature = "egui")]
        if let Some(overlay) = &overlay {
            self.egui.cleanup(overlay);
        }

        Ok(())
    }
}

/// Pack positions and colours into the interleaved GPU layout.
fn pack_points(particles: &ParticleSet, out: &mut Vec<GpuPoint>) {
    out.clear();
    out.extend(
        particles
            .positions()
            .iter()
            .zip(particles.colors())
            .map(|(&p, &c)| GpuPoint::new(p, c)),
    );
}

fn create_render_pipeline(
    device: &wgpu::Device,
    layout: &wgpu::PipelineLayout,
    shader: &wgpu::ShaderModule,
    format: wgpu::TextureFormat,
    settings: RenderSettings,
) -> wgpu::RenderPipeline {
    device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
        label: Some("Point Pipeline"),
        layout: Some(layout),
        vertex: wgpu::VertexState {
            module: shader,
            entry_point: Some("vs_main"),
            buffers: &[wgpu::VertexBufferLayout {
                array_stride: std::mem::size_of::<GpuPoint>() as wgpu::BufferAddress,
                step_mode: wgpu::VertexStepMode::Instance,
                attributes: &[
                    wgpu::VertexAttribute {
                        offset: 0,
                        shader_location: 0,
                        format: wgpu::VertexFormat::Float32x3,
                    },
                    wgpu::VertexAttribute {
                        offset: GpuPoint::COLOR_OFFSET,
                        shader_location: 1,
                        format: wgpu::VertexFormat::Float32x3,
                    },
                ],
            }],
            compilation_options: Default::default(),
        },
        fragment: Some(wgpu::FragmentState {
            module: shader,
            entry_point: Some("fs_main"),
            targets: &[Some(wgpu::ColorTargetState {
                format,
                blend: Some(settings.blend_mode.to_wgpu()),
                write_mask: wgpu::ColorWrites::ALL,
            })],
            compilation_options: Default::default(),
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
        depth_stencil: Some(wgpu::DepthStencilState {
            format: DEPTH_FORMAT,
            depth_write_enabled: settings.depth_write,
            depth_compare: wgpu::CompareFunction::Less,
            stencil: wgpu::StencilState::default(),
            bias: wgpu::DepthBiasState::default(),
        }),
        multisample: wgpu::MultisampleState::default(),
        multiview: None,
        cache: None,
    })
}

fn create_sprite_binding(
    device: &wgpu::Device,
    queue: &wgpu::Queue,
    sprite: &SpriteTexture,
) -> (wgpu::BindGroupLayout, wgpu::BindGroup) {
    let texture = device.create_texture_with_data(
        queue,
        &wgpu::TextureDescriptor {
            label: Some("Sprite Texture"),
            size: wgpu::Extent3d {
                width: sprite.width,
                height: sprite.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            // Linear: the green channel is read as alpha, not as a colour.
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        },
        wgpu::util::TextureDataOrder::LayerMajor,
        &sprite.data,
    );
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

    let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
        label: Some("Sprite Sampler"),
        address_mode_u: wgpu::AddressMode::ClampToEdge,
        address_mode_v: wgpu::AddressMode::ClampToEdge,
        address_mode_w: wgpu::AddressMode::ClampToEdge,
        mag_filter: wgpu::FilterMode::Linear,
        min_filter: wgpu::FilterMode::Linear,
        mipmap_filter: wgpu::FilterMode::Nearest,
        ..Default::default()
    });

    let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some("Sprite Bind Group Layout"),
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

    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Sprite Bind Group"),
        layout: &layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(&sampler),
            },
        ],
    });

    (layout, bind_group)
}

fn create_depth_texture(
    device: &wgpu::Device,
    config: &wgpu::SurfaceConfiguration,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: config.width,
            height: config.height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}

/// Surface pixels per egui point.
///
/// egui lays out in points against the window's own scale factor, but the
/// surface may be smaller than the window when the pixel ratio is capped.
/// Rescale so the panel covers the same logical area it would on an
/// uncapped surface.
#[cfg_attr(not(feature = "egui"), allow(dead_code))]
pub(crate) fn overlay_pixels_per_point(egui_ppp: f32, window_scale: f32, pixel_ratio: f32) -> f32 {
    if window_scale <= 0.0 {
        return egui_ppp;
    }
    egui_ppp * pixel_ratio / window_scale
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_overlay_scale_follows_capped_surface() {
        // 3x display capped to 2x: the surface is 2/3 of the window.
        assert_eq!(overlay_pixels_per_point(3.0, 3.0, 2.0), 2.0);
        // egui zoom on top of the window scale carries through.
        assert_eq!(overlay_pixels_per_point(4.5, 3.0, 2.0), 3.0);
        // Uncapped surfaces keep egui's value.
        assert_eq!(overlay_pixels_per_point(1.25, 1.25, 1.25), 1.25);
    }

    #[test]
    fn test_pack_points_interleaves_position_and_color() {
        let set = ParticleSet::from_parts(
            vec![Vec3::new(1.0, 2.0, 3.0), Vec3::new(-1.0, 0.0, 4.0)],
            vec![Vec3::new(0.1, 0.2, 0.3), Vec3::ONE],
        );
        let mut out = vec![GpuPoint::zeroed(); 5];
        pack_points(&set, &mut out);

        assert_eq!(out.len(), 2);
        assert_eq!(out[0].position, [1.0, 2.0, 3.0]);
        assert_eq!(out[0].color, [0.1, 0.2, 0.3]);
        assert_eq!(out[1], GpuPoint::new(Vec3::new(-1.0, 0.0, 4.0), Vec3::ONE));
    }

    #[test]
    fn test_color_offset_matches_struct() {
        let point = GpuPoint::new(Vec3::ZERO, Vec3::new(7.0, 8.0, 9.0));
        let bytes = bytemuck::bytes_of(&point);
        let offset = GpuPoint::COLOR_OFFSET as usize;
        let color: [f32; 3] = bytemuck::pod_read_unaligned(&bytes[offset..offset + 12]);
        assert_eq!(color, [7.0, 8.0, 9.0]);
    }
}
