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

//! A `winit`-based window for the desktop.

use std::sync::Arc;
use winit::{
    dpi::LogicalSize,
    error::OsError,
    event_loop::ActiveEventLoop,
    window::{Fullscreen, Window},
};

/// A shared handle to the application window.
///
/// Cloning is cheap; the presenter keeps one clone for its surface and the
/// event source keeps another.
#[derive(Debug, Clone)]
pub struct WinitWindow {
    inner: Arc<Window>,
}

impl WinitWindow {
    /// The physical dimensions (width, height) of the window's inner area.
    pub fn inner_size(&self) -> (u32, u32) {
        let size = self.inner.inner_size();
        (size.width, size.height)
    }

    /// The display's scale factor.
    pub fn scale_factor(&self) -> f64 {
        self.inner.scale_factor()
    }

    /// The underlying `winit` window, shared.
    pub fn handle(&self) -> Arc<Window> {
        self.inner.clone()
    }
}

/// A builder for creating [`WinitWindow`] instances.
#[derive(Debug, Clone)]
pub struct WinitWindowBuilder {
    title: String,
    width: u32,
    height: u32,
    fullscreen: bool,
}

impl WinitWindowBuilder {
    /// Creates a builder with default settings.
    pub fn new() -> Self {
        Self {
            title: "Tessera".to_string(),
            width: 1280,
            height: 720,
            fullscreen: false,
        }
    }

    /// Sets the title of the window to be built.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the initial inner dimensions of the window to be built.
    pub fn with_dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Opens the window borderless-fullscreen on the current monitor.
    pub fn with_fullscreen(mut self, fullscreen: bool) -> Self {
        self.fullscreen = fullscreen;
        self
    }

    /// Builds the window on the given event loop.
    ///
    /// The OS cursor is hidden: panels draw their own.
    ///
    /// # Errors
    /// Returns an `OsError` if the underlying `winit` window creation fails.
    pub fn build(&self, event_loop: &ActiveEventLoop) -> Result<WinitWindow, OsError> {
        log::info!(
            "Building window '{}' ({}x{}, fullscreen: {})",
            self.title,
            self.width,
            self.height,
            self.fullscreen
        );

        let mut attributes = Window::default_attributes()
            .with_title(self.title.clone())
            .with_inner_size(LogicalSize::new(self.width, self.height))
            .with_visible(true);
        if self.fullscreen {
            attributes = attributes.with_fullscreen(Some(Fullscreen::Borderless(None)));
        }

        let window = event_loop.create_window(attributes)?;
        window.set_cursor_visible(false);

        log::info!("Winit window created successfully (id: {:?}).", window.id());
        Ok(WinitWindow {
            inner: Arc::new(window),
        })
    }
}

impl Default for WinitWindowBuilder {
    fn default() -> Self {
        Self::new()
    }
}
