//! Textured mesh renderer.
//!
//! One pass with a depth buffer. Each mesh gets a slot holding its vertex and
//! index buffers, a uniform (MVP plus UV transform) and a bind group over a
//! GPU copy of its texture. The copy and the sampler are rebuilt only when the
//! texture's version moves; the UV transform is uploaded every frame.

mod wrap;

use bytemuck::{Pod, Zeroable};
use wgpu::util::DeviceExt;

use crate::render::ctx::load_attachment;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene3d::{Mesh, MeshVertex, PerspectiveCamera};
use crate::texture::{Texture, TextureImage};

const DEPTH_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Depth32Float;

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct MeshUniform {
    mvp: [[f32; 4]; 4],
    /// mat3x3 columns, each padded to 16 bytes.
    uv_transform: [[f32; 4]; 3],
}

struct DepthTarget {
    view: wgpu::TextureView,
    size: (u32, u32),
}

struct MeshSlot {
    vbo: wgpu::Buffer,
    ibo: wgpu::Buffer,
    index_count: u32,
    vertex_count: usize,
    uniform: wgpu::Buffer,
    bound_version: Option<u64>,
    bind_group: Option<wgpu::BindGroup>,
}

#[derive(Default)]
pub struct MeshRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    bind_group_layout: Option<wgpu::BindGroupLayout>,
    depth: Option<DepthTarget>,
    slots: Vec<MeshSlot>,
}

impl MeshRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draws `meshes` as seen from `camera`, over whatever is already in the
    /// color target.
    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        camera: &PerspectiveCamera,
        meshes: &[Mesh],
    ) {
        self.ensure_pipeline(ctx);
        self.ensure_depth(ctx);

        let view_proj = camera.view_projection();
        self.slots.truncate(meshes.len());
        for (i, mesh) in meshes.iter().enumerate() {
            self.ensure_slot(ctx, i, mesh);
            let texture = mesh.texture.borrow();
            self.refresh_binding(ctx, i, &texture);

            let uv = texture.transform.uv_matrix().as_mat3();
            let uniform = MeshUniform {
                mvp: (view_proj * mesh.transform.matrix()).to_cols_array_2d(),
                uv_transform: [
                    uv.x_axis.extend(0.0).to_array(),
                    uv.y_axis.extend(0.0).to_array(),
                    uv.z_axis.extend(0.0).to_array(),
                ],
            };
            ctx.queue.write_buffer(&self.slots[i].uniform, 0, bytemuck::bytes_of(&uniform));
        }

        let (Some(pipeline), Some(depth)) = (self.pipeline.as_ref(), self.depth.as_ref()) else {
            return;
        };

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("texcube mesh pass"),
            color_attachments: &[Some(load_attachment(target.color_view))],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &depth.view,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_pipeline(pipeline);

        for slot in &self.slots {
            let Some(bind_group) = slot.bind_group.as_ref() else { continue };
            rpass.set_bind_group(0, bind_group, &[]);
            rpass.set_vertex_buffer(0, slot.vbo.slice(..));
            rpass.set_index_buffer(slot.ibo.slice(..), wgpu::IndexFormat::Uint16);
            rpass.draw_indexed(0..slot.index_count, 0, 0..1);
        }
    }

    fn ensure_slot(&mut self, ctx: &RenderCtx<'_>, index: usize, mesh: &Mesh) {
        let geometry = &mesh.geometry;
        if let Some(slot) = self.slots.get(index) {
            if slot.vertex_count == geometry.vertices.len()
                && slot.index_count as usize == geometry.indices.len()
            {
                return;
            }
        }

        let slot = MeshSlot {
            vbo: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("texcube mesh vbo"),
                contents: bytemuck::cast_slice(&geometry.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            }),
            ibo: ctx.device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("texcube mesh ibo"),
                contents: bytemuck::cast_slice(&geometry.indices),
                usage: wgpu::BufferUsages::INDEX,
            }),
            index_count: geometry.indices.len() as u32,
            vertex_count: geometry.vertices.len(),
            uniform: ctx.device.create_buffer(&wgpu::BufferDescriptor {
                label: Some("texcube mesh ubo"),
                size: std::mem::size_of::<MeshUniform>() as u64,
                usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                mapped_at_creation: false,
            }),
            bound_version: None,
            bind_group: None,
        };

        if index < self.slots.len() {
            self.slots[index] = slot;
        } else {
            self.slots.push(slot);
        }
    }

    /// Re-uploads the texture and rebuilds the sampler if the texture's version
    /// differs from the one this slot last bound.
    fn refresh_binding(&mut self, ctx: &RenderCtx<'_>, index: usize, texture: &Texture) {
        let Some(bgl) = self.bind_group_layout.as_ref() else { return };
        let slot = &mut self.slots[index];
        let version = texture.version();
        if slot.bound_version == Some(version) && slot.bind_group.is_some() {
            return;
        }

        let max_dimension = ctx.device.limits().max_texture_dimension_2d;
        let placeholder;
        let image = match uploadable_image(texture.image(), max_dimension, version) {
            Some(img) => img,
            None => {
                placeholder = TextureImage::solid(1, 1, [255, 255, 255, 255]);
                &placeholder
            }
        };

        let size = wgpu::Extent3d {
            width: image.width,
            height: image.height,
            depth_or_array_layers: 1,
        };
        let gpu_texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texcube mesh texture"),
            size,
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        ctx.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &gpu_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &image.pixels,
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(image.bytes_per_row()),
                rows_per_image: Some(image.height),
            },
            size,
        );
        let view = gpu_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let t = &texture.transform;
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texcube mesh sampler"),
            address_mode_u: wrap::address_mode_logged('S', t.wrap_s, version),
            address_mode_v: wrap::address_mode_logged('T', t.wrap_t, version),
            address_mode_w: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });

        slot.bind_group = Some(ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texcube mesh bind group"),
            layout: bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: slot.uniform.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        }));
        slot.bound_version = Some(version);
        log::debug!(
            "mesh {index}: bound texture v{version} ({}x{})",
            image.width,
            image.height
        );
    }

    fn ensure_depth(&mut self, ctx: &RenderCtx<'_>) {
        let size = (ctx.target_size.0.max(1), ctx.target_size.1.max(1));
        if self.depth.as_ref().is_some_and(|d| d.size == size) {
            return;
        }

        let texture = ctx.device.create_texture(&wgpu::TextureDescriptor {
            label: Some("texcube depth"),
            size: wgpu::Extent3d {
                width: size.0,
                height: size.1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: DEPTH_FORMAT,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            view_formats: &[],
        });
        self.depth = Some(DepthTarget {
            view: texture.create_view(&wgpu::TextureViewDescriptor::default()),
            size,
        });
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let shader = ctx.device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("texcube mesh shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("shaders/mesh.wgsl").into()),
        });

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texcube mesh bgl"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::VERTEX,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: wgpu::BufferSize::new(std::mem::size_of::<MeshUniform>() as u64),
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Float { filterable: true },
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 2,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Filtering),
                    count: None,
                },
            ],
        });

        let layout = ctx.device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("texcube mesh pipeline layout"),
            bind_group_layouts: &[&bgl],
            immediate_size: 0,
        });

        const VERTEX_ATTRS: [wgpu::VertexAttribute; 2] =
            wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

        let pipeline = ctx.device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("texcube mesh pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                compilation_options: Default::default(),
                buffers: &[wgpu::VertexBufferLayout {
                    array_stride: std::mem::size_of::<MeshVertex>() as u64,
                    step_mode: wgpu::VertexStepMode::Vertex,
                    attributes: &VERTEX_ATTRS,
                }],
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                compilation_options: Default::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: ctx.surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: DEPTH_FORMAT,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::Less,
                stencil: Default::default(),
                bias: Default::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.bind_group_layout = Some(bgl);
        // Bind groups reference the old layout.
        for slot in &mut self.slots {
            slot.bound_version = None;
            slot.bind_group = None;
        }
    }
}

/// The image to upload, or `None` when the placeholder should be bound
/// instead: no image yet, or one the device cannot hold.
fn uploadable_image(image: Option<&TextureImage>, max_dimension: u32, version: u64) -> Option<&TextureImage> {
    let image = image?;
    if image.fits_within(max_dimension) {
        return Some(image);
    }
    log::warn!(
        "texture v{version}: {}x{} exceeds the device limit of {max_dimension}; keeping the placeholder",
        image.width,
        image.height
    );
    None
}
