use std::collections::HashMap;

use bytemuck::{Pod, Zeroable};
use fontdue::layout::{CoordinateSystem, GlyphRasterConfig, Layout};

use crate::coords::Vec2;
use crate::render::ctx::load_attachment;
use crate::render::{RenderCtx, RenderTarget};
use crate::scene::{DrawCmd, DrawList};
use crate::text::layout_line;
use crate::text::FontSystem;

use super::common::{
    overlay_pipeline, viewport_layout_entry, InstanceBuffer, Quad, ViewportUniform,
    QUAD_INDEX_COUNT,
};

const LABEL: &str = "texcube text";
const ATLAS_SIZE: u32 = 1024;
const GLYPH_GAP: u32 = 1;

/// Shelf packer for the glyph atlas: fills rows left to right, opening a new
/// row when the current one runs out of width.
#[derive(Debug)]
struct ShelfPacker {
    size: u32,
    cursor_x: u32,
    cursor_y: u32,
    row_height: u32,
}

impl ShelfPacker {
    fn new(size: u32) -> Self {
        Self {
            size,
            cursor_x: GLYPH_GAP,
            cursor_y: GLYPH_GAP,
            row_height: 0,
        }
    }

    /// Reserves a `w` x `h` slot and returns its top-left, or `None` when the
    /// atlas is full.
    fn place(&mut self, w: u32, h: u32) -> Option<(u32, u32)> {
        if w + 2 * GLYPH_GAP > self.size {
            return None;
        }
        if self.cursor_x + w + GLYPH_GAP > self.size {
            self.cursor_y += self.row_height + GLYPH_GAP;
            self.cursor_x = GLYPH_GAP;
            self.row_height = 0;
        }
        if self.cursor_y + h + GLYPH_GAP > self.size {
            return None;
        }
        let slot = (self.cursor_x, self.cursor_y);
        self.cursor_x += w + GLYPH_GAP;
        self.row_height = self.row_height.max(h);
        Some(slot)
    }
}

#[derive(Debug, Copy, Clone)]
struct AtlasSlot {
    uv_min: [f32; 2],
    uv_max: [f32; 2],
}

struct Atlas {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    viewport_ubo: wgpu::Buffer,
}

/// Text runs from `DrawCmd::Text`.
///
/// Glyphs are rasterized with fontdue at physical pixel size on first use and
/// cached in a single-channel atlas for the renderer's lifetime.
pub struct TextRenderer {
    pipeline_format: Option<wgpu::TextureFormat>,
    pipeline: Option<wgpu::RenderPipeline>,
    atlas: Option<Atlas>,
    packer: ShelfPacker,
    slots: HashMap<GlyphRasterConfig, Option<AtlasSlot>>,
    warned_full: bool,
    quad: Option<Quad>,
    instances: InstanceBuffer,
    scratch: Vec<GlyphInstance>,
    layout: Layout<()>,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            pipeline_format: None,
            pipeline: None,
            atlas: None,
            packer: ShelfPacker::new(ATLAS_SIZE),
            slots: HashMap::new(),
            warned_full: false,
            quad: None,
            instances: InstanceBuffer::default(),
            scratch: Vec::new(),
            layout: Layout::new(CoordinateSystem::PositiveYDown),
        }
    }
}

impl TextRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn render(
        &mut self,
        ctx: &RenderCtx<'_>,
        target: &mut RenderTarget<'_>,
        draw_list: &mut DrawList,
        fonts: &FontSystem,
    ) {
        if !draw_list.items().iter().any(|it| matches!(it.cmd, DrawCmd::Text(_))) {
            return;
        }

        self.ensure_pipeline(ctx);
        let scale = ctx.scale_factor.max(0.01);
        self.scratch.clear();

        for item in draw_list.iter_in_paint_order() {
            let DrawCmd::Text(cmd) = &item.cmd else { continue };
            let Some(font) = fonts.get(cmd.font) else {
                log::warn!("text run with unknown {:?} skipped", cmd.font);
                continue;
            };

            let color = [cmd.color.r, cmd.color.g, cmd.color.b, cmd.color.a];
            let glyphs: Vec<_> = layout_line(&mut self.layout, font, &cmd.text, cmd.size * scale, cmd.origin * scale)
                .iter()
                .filter(|g| g.char_data.rasterize() && g.width > 0 && g.height > 0)
                .map(|g| (g.key, Vec2::new(g.x, g.y), Vec2::new(g.width as f32, g.height as f32)))
                .collect();

            for (key, pos, size) in glyphs {
                let Some(slot) = self.slot_for(ctx, font, key) else { continue };
                let min = pos * (1.0 / scale);
                let max = (pos + size) * (1.0 / scale);
                self.scratch.push(GlyphInstance {
                    dst_min: [min.x, min.y],
                    dst_max: [max.x, max.y],
                    uv_min: slot.uv_min,
                    uv_max: slot.uv_max,
                    color,
                });
            }
        }

        if self.scratch.is_empty() {
            return;
        }
        if self.quad.is_none() {
            self.quad = Some(Quad::new(ctx.device, LABEL));
        }
        self.instances.upload(ctx, LABEL, &self.scratch);

        let (Some(pipeline), Some(atlas), Some(quad), Some(instance_vbo)) = (
            self.pipeline.as_ref(),
            self.atlas.as_ref(),
            self.quad.as_ref(),
            self.instances.buffer(),
        ) else {
            return;
        };
        ctx.queue
            .write_buffer(&atlas.viewport_ubo, 0, bytemuck::bytes_of(&ViewportUniform::from_ctx(ctx)));

        let mut rpass = target.encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("texcube text pass"),
            color_attachments: &[Some(load_attachment(target.color_view))],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });
        rpass.set_pipeline(pipeline);
        rpass.set_bind_group(0, &atlas.bind_group, &[]);
        rpass.set_vertex_buffer(0, quad.vbo.slice(..));
        rpass.set_vertex_buffer(1, instance_vbo.slice(..));
        rpass.set_index_buffer(quad.ibo.slice(..), wgpu::IndexFormat::Uint16);
        rpass.draw_indexed(0..QUAD_INDEX_COUNT, 0, 0..self.scratch.len() as u32);
    }

    /// Atlas slot for `key`, rasterizing and uploading the glyph the first
    /// time it is seen. Glyphs that do not fit are remembered as `None`.
    fn slot_for(&mut self, ctx: &RenderCtx<'_>, font: &fontdue::Font, key: GlyphRasterConfig) -> Option<AtlasSlot> {
        if let Some(slot) = self.slots.get(&key) {
            return *slot;
        }

        let (metrics, bitmap) = font.rasterize_config(key);
        let (w, h) = (metrics.width as u32, metrics.height as u32);
        let placed = if w == 0 || h == 0 { None } else { self.packer.place(w, h) };

        let slot = match (placed, self.atlas.as_ref()) {
            (Some((x, y)), Some(atlas)) => {
                ctx.queue.write_texture(
                    wgpu::TexelCopyTextureInfo {
                        texture: &atlas.texture,
                        mip_level: 0,
                        origin: wgpu::Origin3d { x, y, z: 0 },
                        aspect: wgpu::TextureAspect::All,
                    },
                    &bitmap,
                    wgpu::TexelCopyBufferLayout {
                        offset: 0,
                        bytes_per_row: Some(w),
                        rows_per_image: Some(h),
                    },
                    wgpu::Extent3d { width: w, height: h, depth_or_array_layers: 1 },
                );
                let s = ATLAS_SIZE as f32;
                Some(AtlasSlot {
                    uv_min: [x as f32 / s, y as f32 / s],
                    uv_max: [(x + w) as f32 / s, (y + h) as f32 / s],
                })
            }
            _ => {
                if w > 0 && h > 0 && !self.warned_full {
                    log::warn!("glyph atlas ({ATLAS_SIZE}x{ATLAS_SIZE}) is full; some glyphs will be missing");
                    self.warned_full = true;
                }
                None
            }
        };

        self.slots.insert(key, slot);
        slot
    }

    fn ensure_pipeline(&mut self, ctx: &RenderCtx<'_>) {
        if self.pipeline_format == Some(ctx.surface_format) && self.pipeline.is_some() {
            return;
        }

        let bgl = ctx.device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("texcube text bgl"),
            entries: &[
                viewport_layout_entry(),
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

        let pipeline = overlay_pipeline(
            ctx,
            LABEL,
            include_str!("shaders/text.wgsl"),
            &bgl,
            GlyphInstance::layout(),
        );

        // The atlas survives a format change; only the bind group layout is new.
        let texture = match self.atlas.take() {
            Some(atlas) => atlas.texture,
            None => ctx.device.create_texture(&wgpu::TextureDescriptor {
                label: Some("texcube glyph atlas"),
                size: wgpu::Extent3d {
                    width: ATLAS_SIZE,
                    height: ATLAS_SIZE,
                    depth_or_array_layers: 1,
                },
                mip_level_count: 1,
                sample_count: 1,
                dimension: wgpu::TextureDimension::D2,
                format: wgpu::TextureFormat::R8Unorm,
                usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
                view_formats: &[],
            }),
        };
        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
        let sampler = ctx.device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("texcube glyph sampler"),
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            mipmap_filter: wgpu::MipmapFilterMode::Nearest,
            ..Default::default()
        });
        let viewport_ubo = ctx.device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("texcube text viewport ubo"),
            size: ViewportUniform::SIZE,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let bind_group = ctx.device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("texcube text bind group"),
            layout: &bgl,
            entries: &[
                wgpu::BindGroupEntry { binding: 0, resource: viewport_ubo.as_entire_binding() },
                wgpu::BindGroupEntry { binding: 1, resource: wgpu::BindingResource::TextureView(&view) },
                wgpu::BindGroupEntry { binding: 2, resource: wgpu::BindingResource::Sampler(&sampler) },
            ],
        });

        self.pipeline_format = Some(ctx.surface_format);
        self.pipeline = Some(pipeline);
        self.atlas = Some(Atlas {
            texture,
            bind_group,
            viewport_ubo,
        });
    }
}

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable)]
struct GlyphInstance {
    dst_min: [f32; 2],
    dst_max: [f32; 2],
    uv_min: [f32; 2],
    uv_max: [f32; 2],
    color: [f32; 4],
}

impl GlyphInstance {
    const ATTRS: [wgpu::VertexAttribute; 5] = wgpu::vertex_attr_array![
        1 => Float32x2,
        2 => Float32x2,
        3 => Float32x2,
        4 => Float32x2,
        5 => Float32x4
    ];

    fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<GlyphInstance>() as u64,
            step_mode: wgpu::VertexStepMode::Instance,
            attributes: &Self::ATTRS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packer_fills_rows_then_wraps() {
        let mut p = ShelfPacker::new(32);
        assert_eq!(p.place(10, 4), Some((1, 1)));
        assert_eq!(p.place(10, 6), Some((12, 1)));
        // 23 + 10 + 1 > 32: next row, below the tallest glyph so far.
        assert_eq!(p.place(10, 2), Some((1, 8)));
    }

    #[test]
    fn packer_reports_full() {
        let mut p = ShelfPacker::new(16);
        assert!(p.place(14, 14).is_some());
        assert_eq!(p.place(14, 14), None);
    }

    #[test]
    fn packer_rejects_oversized_glyph() {
        let mut p = ShelfPacker::new(16);
        assert_eq!(p.place(20, 2), None);
    }
}
