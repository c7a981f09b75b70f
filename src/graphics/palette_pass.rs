//! Render pass mapping the grayscale scene to the palette.

use std::borrow::Cow;

use glamour::{Rect, Size2};
use miette::{Result, WrapErr};

use crate::{
    palette::{Palette, PALETTE_SLOTS},
    surface::Surface,
};

use super::gpu::Frame;

/// Scene texture, the palette lookup row and the pipeline combining them.
pub(crate) struct PalettePassState {
    /// Composed grayscale frame uploaded every render.
    scene_texture: wgpu::Texture,
    /// Size of the scene texture.
    scene_size: Size2<u32>,
    /// Lookup row with the palette colors.
    palette_texture: wgpu::Texture,
    /// Binds the palette row at slot 0 and the scene at slot 1.
    bind_group: wgpu::BindGroup,
    /// Fullscreen triangle pipeline running the palette shader.
    render_pipeline: wgpu::RenderPipeline,
}

impl PalettePassState {
    /// Upload the palette and compile the shader.
    ///
    /// # Errors
    ///
    /// - When the shader fails to compile or the pipeline is invalid.
    pub(crate) async fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        target_format: wgpu::TextureFormat,
        scene_size: Size2<u32>,
        palette: &Palette,
        shader: &'static str,
    ) -> Result<Self> {
        // Catch shader compilation errors instead of panicking in the uncaptured error handler
        device.push_error_scope(wgpu::ErrorFilter::Validation);

        // Raw grayscale values, the shader reads the shade from the red channel
        let scene_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Scene Texture"),
            size: wgpu::Extent3d {
                width: scene_size.width,
                height: scene_size.height,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8Unorm,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let scene_view = scene_texture.create_view(&wgpu::TextureViewDescriptor::default());

        // Match the surface encoding so the colors are written out exactly
        let palette_format = if target_format.is_srgb() {
            wgpu::TextureFormat::Rgba8UnormSrgb
        } else {
            wgpu::TextureFormat::Rgba8Unorm
        };
        let palette_texture = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Palette Texture"),
            size: wgpu::Extent3d {
                width: PALETTE_SLOTS as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: palette_format,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });
        let palette_view = palette_texture.create_view(&wgpu::TextureViewDescriptor::default());

        let texture_entry = |binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Texture {
                sample_type: wgpu::TextureSampleType::Float { filterable: false },
                view_dimension: wgpu::TextureViewDimension::D2,
                multisampled: false,
            },
            count: None,
        };

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Palette Bind Group Layout"),
            entries: &[texture_entry(0), texture_entry(1)],
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Palette Bind Group"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: wgpu::BindingResource::TextureView(&palette_view),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: wgpu::BindingResource::TextureView(&scene_view),
                },
            ],
        });

        let render_pipeline_layout =
            device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
                label: Some("Palette Render Pipeline Layout"),
                bind_group_layouts: &[&bind_group_layout],
                push_constant_ranges: &[],
            });

        // Load the shaders
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Palette Shader"),
            source: wgpu::ShaderSource::Wgsl(Cow::Borrowed(shader)),
        });

        let render_pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Palette Render Pipeline"),
            layout: Some(&render_pipeline_layout),
            vertex: wgpu::VertexState {
                buffers: &[],
                module: &shader,
                entry_point: "vs_main",
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: "fs_main",
                targets: &[Some(wgpu::ColorTargetState {
                    format: target_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: wgpu::PipelineCompilationOptions::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
        });

        if let Some(err) = device.pop_error_scope().await {
            return Err(miette::miette!("{err}")).wrap_err("Error creating palette shader pipeline");
        }

        let state = Self {
            scene_texture,
            scene_size,
            palette_texture,
            bind_group,
            render_pipeline,
        };
        state.upload_palette(queue, palette);

        Ok(state)
    }

    /// Replace the colors of the lookup row.
    pub(crate) fn upload_palette(&self, queue: &wgpu::Queue, palette: &Palette) {
        let row = palette.to_lookup_row();

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.palette_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(&row),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(PALETTE_SLOTS as u32 * 4),
                rows_per_image: Some(1),
            },
            wgpu::Extent3d {
                width: PALETTE_SLOTS as u32,
                height: 1,
                depth_or_array_layers: 1,
            },
        );
    }

    /// Copy the composed frame to the GPU.
    ///
    /// # Errors
    ///
    /// - When the frame size doesn't match the scene texture.
    pub(crate) fn upload_scene(&self, queue: &wgpu::Queue, scene: &Surface) -> Result<()> {
        profiling::scope!("Upload scene");

        if scene.width() != self.scene_size.width as usize
            || scene.height() != self.scene_size.height as usize
        {
            miette::bail!(
                "Frame of {}x{} doesn't fit the {}x{} scene texture",
                scene.width(),
                scene.height(),
                self.scene_size.width,
                self.scene_size.height
            );
        }

        queue.write_texture(
            wgpu::ImageCopyTexture {
                texture: &self.scene_texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            bytemuck::cast_slice(scene.pixels()),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(self.scene_size.width * 4),
                rows_per_image: Some(self.scene_size.height),
            },
            wgpu::Extent3d {
                width: self.scene_size.width,
                height: self.scene_size.height,
                depth_or_array_layers: 1,
            },
        );

        Ok(())
    }

    /// Render the palette mapped scene into the letterbox of the frame surface.
    pub(crate) fn render(&self, frame: &mut Frame, letterbox: Rect, viewport_color: wgpu::Color) {
        let mut render_pass = frame
            .encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Palette Render Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &frame.surface_view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(viewport_color),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            });

        render_pass.set_pipeline(&self.render_pipeline);

        // Only draw in the calculated letterbox to get nice integer scaling
        let Rect { origin, size } = letterbox;
        render_pass.set_viewport(origin.x, origin.y, size.width, size.height, 0.0, 1.0);

        render_pass.set_bind_group(0, &self.bind_group, &[]);

        // Draw the fullscreen triangle defined in the vertex shader
        render_pass.draw(0..3, 0..1);
    }
}
