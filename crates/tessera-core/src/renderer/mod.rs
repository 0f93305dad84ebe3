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

//! Software drawing surface shared by the runtime and every panel.
//!
//! Panels draw into a [`Canvas`]; a [`Renderer`] backend owns the canvas and is
//! responsible for getting its pixels on screen. How that happens (GPU upload,
//! terminal, nothing at all in tests) is invisible to panels.

pub mod canvas;
pub mod cursor;
pub mod texture;
pub mod viewport;

pub use canvas::{Canvas, Color, Rect};
pub use cursor::CursorAlignment;
pub use texture::Texture;
pub use viewport::ViewportLayout;

use anyhow::Result;

/// The contract for a presentation backend.
pub trait Renderer {
    /// The frame being composed.
    fn canvas(&self) -> &Canvas;

    /// Mutable access to the frame being composed.
    fn canvas_mut(&mut self) -> &mut Canvas;

    /// The viewport parameters derived from the last resize.
    fn layout(&self) -> &ViewportLayout;

    /// Applies new viewport parameters. The canvas is resized to
    /// `layout.canvas_width` x `layout.canvas_height`.
    fn resize(&mut self, layout: ViewportLayout);

    /// Shows the composed frame.
    fn present(&mut self) -> Result<()>;
}
