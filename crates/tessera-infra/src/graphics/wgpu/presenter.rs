// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Presents the software canvas through WGPU.
//!
//! Each frame the canvas is uploaded to a texture of the same size, then a
//! single triangle samples that texture over the letterbox rectangle of the
//! window. Everything outside the letterbox is cleared to black.

use super::context::WgpuGraphicsContext;
use crate::platform::WinitWindow;
use anyhow::{anyhow, Result};
use tessera_core::renderer::{Canvas, Renderer, ViewportLayout};

const CANVAS_FORMAT: wgpu::TextureFormat = wgpu::TextureFormat::Rgba8UnormSrgb;

/// The texture the canvas is uploaded to, with the bind group that samples it.
struct CanvasTexture {
    texture: wgpu::Texture,
    bind_group: wgpu::BindGroup,
    width: u32,
    height: u32,
}

/// A [`Renderer`] that draws the canvas into a window with WGPU.
pub struct WgpuCanvasRenderer {
    gpu: WgpuGraphicsContext,
    pipeline: wgpu::RenderPipeline,
    bind_group_layout: wgpu::BindGroupLayout,
    sampler: wgpu::Sampler,
    canvas_texture: CanvasTexture,
    canvas: Canvas,
    layout: ViewportLayout,
}

impl WgpuCanvasRenderer {
    /// Creates the presenter for `window`, with an initial layout for its
    /// current size.
    pub fn new(window: &WinitWindow) -> Result<Self> {
        let gpu = WgpuGraphicsContext::new(window)?;
        let (width, height) = window.inner_size();
        let layout = ViewportLayout::new(width, height, 1.0, true);

        let device = &gpu.device;
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("Canvas Blit Shader"),
            source: wgpu::ShaderSource::Wgsl(include_str!("blit.wgsl").into()),
        });

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Canvas Bind Group Layout"),
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
            label: Some("Canvas Blit Pipeline Layout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Canvas Blit Pipeline"),
            layout: Some(&pipeline_layout),
            vertex: wgpu::VertexState {
                module: &shader,
                entry_point: Some("vs_main"),
                buffers: &[],
                compilation_options: Default::default(),
            },
            fragment: Some(wgpu::FragmentState {
                module: &shader,
                entry_point: Some("fs_main"),
                targets: &[Some(wgpu::ColorTargetState {
                    format: gpu.surface_config.format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
                compilation_options: Default::default(),
            }),
            primitive: wgpu::PrimitiveState::default(),
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview: None,
            cache: None,
        });

        // Nearest filtering keeps pixel art crisp at any window size.
        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Canvas Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Nearest,
            min_filter: wgpu::FilterMode::Nearest,
            ..Default::default()
        });

        let canvas_texture = create_canvas_texture(
            device,
            &bind_group_layout,
            &sampler,
            layout.canvas_width,
            layout.canvas_height,
        );

        log::info!(
            "Canvas presenter ready on \"{}\" ({:?}).",
            gpu.adapter_name,
            gpu.adapter_backend
        );

        Ok(Self {
            gpu,
            pipeline,
            bind_group_layout,
            sampler,
            canvas_texture,
            canvas: Canvas::new(layout.canvas_width, layout.canvas_height),
            layout,
        })
    }

    fn upload_canvas(&mut self) {
        let (width, height) = (self.canvas.width(), self.canvas.height());
        if (self.canvas_texture.width, self.canvas_texture.height) != (width, height) {
            self.canvas_texture = create_canvas_texture(
                &self.gpu.device,
                &self.bind_group_layout,
                &self.sampler,
                width,
                height,
            );
        }

        self.gpu.queue.write_texture(
            wgpu::TexelCopyTextureInfo {
                texture: &self.canvas_texture.texture,
                mip_level: 0,
                origin: wgpu::Origin3d::ZERO,
                aspect: wgpu::TextureAspect::All,
            },
            &self.canvas.to_rgba_bytes(),
            wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(4 * width),
                rows_per_image: Some(height),
            },
            wgpu::Extent3d {
                width,
                height,
                depth_or_array_layers: 1,
            },
        );
    }
}

fn create_canvas_texture(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    sampler: &wgpu::Sampler,
    width: u32,
    height: u32,
) -> CanvasTexture {
    log::debug!("Creating {width}x{height} canvas texture.");
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Canvas Texture"),
        size: wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: CANVAS_FORMAT,
        usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
        view_formats: &[],
    });
    let view = texture.create_view(&wgpu::TextureViewDescriptor::default());
    let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
        label: Some("Canvas Bind Group"),
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: wgpu::BindingResource::TextureView(&view),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: wgpu::BindingResource::Sampler(sampler),
            },
        ],
    });

    CanvasTexture {
        texture,
        bind_group,
        width,
        height,
    }
}

impl Renderer for WgpuCanvasRenderer {
    fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    fn canvas_mut(&mut self) -> &mut Canvas {
        &mut self.canvas
    }

    fn layout(&self) -> &ViewportLayout {
        &self.layout
    }

    fn resize(&mut self, layout: ViewportLayout) {
        self.gpu.resize(layout.window_width, layout.window_height);
        self.canvas.resize(layout.canvas_width, layout.canvas_height);
        self.layout = layout;
    }

    fn present(&mut self) -> Result<()> {
        let frame = match self.gpu.surface.get_current_texture() {
            Ok(frame) => frame,
            Err(e @ (wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated)) => {
                log::warn!("Swapchain surface lost or outdated ({e:?}); reconfiguring.");
                self.gpu.reconfigure();
                return Ok(());
            }
            Err(e @ wgpu::SurfaceError::Timeout) => {
                log::warn!("Swapchain timeout acquiring frame ({e:?}); skipping it.");
                return Ok(());
            }
            Err(e) => return Err(anyhow!("Failed to acquire a swapchain frame: {e:?}")),
        };

        self.upload_canvas();

        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());
        let mut encoder = self
            .gpu
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Canvas Present Encoder"),
            });

        {
            let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Canvas Present Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view: &view,
                    depth_slice: None,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color::BLACK),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                occlusion_query_set: None,
                timestamp_writes: None,
            });

            let (surface_width, surface_height) = self.gpu.size();
            let letterbox = self.layout.letterbox;
            let x = (letterbox.x.max(0) as u32).min(surface_width - 1);
            let y = (letterbox.y.max(0) as u32).min(surface_height - 1);
            let width = letterbox.width.min(surface_width - x).max(1);
            let height = letterbox.height.min(surface_height - y).max(1);

            render_pass.set_viewport(
                x as f32,
                y as f32,
                width as f32,
                height as f32,
                0.0,
                1.0,
            );
            render_pass.set_pipeline(&self.pipeline);
            render_pass.set_bind_group(0, &self.canvas_texture.bind_group, &[]);
            render_pass.draw(0..3, 0..1);
        }

        self.gpu.queue.submit(std::iter::once(encoder.finish()));
        frame.present();
        log::trace!("Canvas frame presented.");
        Ok(())
    }
}
