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

//! The WGPU device and surface behind the canvas presenter.

use crate::platform::WinitWindow;
use anyhow::{anyhow, Result};
use wgpu::{Instance, InstanceDescriptor, Surface};

/// Holds the core WGPU state objects required for presenting to a window.
#[derive(Debug)]
pub struct WgpuGraphicsContext {
    pub surface: Surface<'static>,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub surface_config: wgpu::SurfaceConfiguration,
    pub adapter_name: String,
    pub adapter_backend: wgpu::Backend,
}

impl WgpuGraphicsContext {
    /// Initializes the graphics context for the given window, blocking until
    /// the adapter and device are ready.
    pub fn new(window: &WinitWindow) -> Result<Self> {
        pollster::block_on(Self::initialize_async(window))
    }

    async fn initialize_async(window: &WinitWindow) -> Result<Self> {
        let (width, height) = window.inner_size();
        log::debug!("Window size for initial graphics setup: {width}x{height}");

        // --- 1. Create Instance and Surface ---
        let instance = Instance::new(&InstanceDescriptor::default());
        let surface: Surface<'static> = instance.create_surface(window.handle())?;
        log::debug!("WGPU surface created for the window.");

        // --- 2. Pick an Adapter that can present to the surface ---
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| anyhow!("Failed to find a suitable graphics adapter: {e}"))?;
        let adapter_info = adapter.get_info();
        log::info!(
            "Using graphics adapter: \"{}\" (Backend: {:?}, Device: {:?})",
            adapter_info.name,
            adapter_info.backend,
            adapter_info.device_type
        );

        // --- 3. Create Logical Device and Command Queue ---
        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("Tessera Logical Device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::default(),
                memory_hints: wgpu::MemoryHints::default(),
                trace: wgpu::Trace::Off,
            })
            .await?;
        log::info!("Logical device and command queue created.");

        device.on_uncaptured_error(Box::new(|e| {
            log::error!("WGPU Uncaptured Error: {e:?}");
        }));

        // --- 4. Configure Surface ---
        let surface_caps = surface.get_capabilities(&adapter);
        let surface_format = surface_caps
            .formats
            .iter()
            .copied()
            .find(|f| f.is_srgb())
            .or_else(|| surface_caps.formats.first().copied())
            .ok_or_else(|| anyhow!("The surface reports no supported texture format"))?;
        let alpha_mode = surface_caps
            .alpha_modes
            .first()
            .copied()
            .unwrap_or(wgpu::CompositeAlphaMode::Auto);

        let surface_config = wgpu::SurfaceConfiguration {
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
            format: surface_format,
            width: width.max(1),
            height: height.max(1),
            // Pacing is done by the frame scheduler, not by vsync blocking.
            present_mode: surface_caps
                .present_modes
                .iter()
                .copied()
                .find(|m| *m == wgpu::PresentMode::Mailbox)
                .unwrap_or(wgpu::PresentMode::Fifo),
            alpha_mode,
            view_formats: vec![],
            desired_maximum_frame_latency: 2,
        };
        surface.configure(&device, &surface_config);
        log::info!("Surface configured: {surface_format:?}, {width}x{height}");

        Ok(Self {
            surface,
            device,
            queue,
            surface_config,
            adapter_name: adapter_info.name,
            adapter_backend: adapter_info.backend,
        })
    }

    /// Reconfigures the surface for a new window size. Zero sizes are ignored.
    pub fn resize(&mut self, new_width: u32, new_height: u32) {
        if new_width == 0 || new_height == 0 {
            log::warn!("Ignoring surface resize to zero dimensions: {new_width}x{new_height}");
            return;
        }
        if (new_width, new_height) == self.size() {
            return;
        }
        log::debug!("Resizing surface configuration to {new_width}x{new_height}");
        self.surface_config.width = new_width;
        self.surface_config.height = new_height;
        self.reconfigure();
    }

    /// Applies the current surface configuration again, e.g. after the
    /// swapchain was lost.
    pub fn reconfigure(&self) {
        self.surface.configure(&self.device, &self.surface_config);
    }

    /// The size of the swapchain surface.
    pub fn size(&self) -> (u32, u32) {
        (self.surface_config.width, self.surface_config.height)
    }
}
