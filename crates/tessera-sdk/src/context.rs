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

//! Process-wide subsystems shared by the runtime and every panel.

use tessera_core::audio::AudioManager;
use tessera_core::config::Options;
use tessera_core::input::InputState;
use tessera_core::panel::{PanelContext, Stager};
use tessera_core::renderer::{Renderer, ViewportLayout};
use tessera_core::telemetry::FpsCounter;

/// The one place process-wide state lives.
///
/// Built once at startup and passed by reference to whoever needs it. Panels
/// never see the `Context` itself; they get a [`PanelContext`] that borrows
/// the parts they may touch.
pub struct Context {
    /// Current options, flushed to disk on clean exit.
    pub options: Options,
    /// Keyboard and mouse state, fed by the event dispatcher.
    pub input: InputState,
    /// Audio backend.
    pub audio: Box<dyn AudioManager>,
    /// Presentation backend owning the frame canvas.
    pub renderer: Box<dyn Renderer>,
    /// Frame-time statistics.
    pub fps: FpsCounter,
}

impl Context {
    /// Bundles the subsystems. The renderer is immediately laid out for its
    /// current window size using `options`.
    pub fn new(
        options: Options,
        audio: Box<dyn AudioManager>,
        renderer: Box<dyn Renderer>,
    ) -> Self {
        let mut context = Self {
            options,
            input: InputState::new(),
            audio,
            renderer,
            fps: FpsCounter::new(),
        };
        let layout = context.renderer.layout();
        let (width, height) = (layout.window_width, layout.window_height);
        context.resize_viewport(width, height);
        context
    }

    /// Recomputes the derived rendering parameters for a new window size.
    pub fn resize_viewport(&mut self, width: u32, height: u32) -> ViewportLayout {
        let graphics = &self.options.graphics;
        let layout = ViewportLayout::new(
            width,
            height,
            graphics.resolution_scale,
            graphics.modern_interface,
        );
        log::debug!(
            "Viewport laid out: window {}x{}, canvas {}x{}, letterbox {:?}",
            layout.window_width,
            layout.window_height,
            layout.canvas_width,
            layout.canvas_height,
            layout.letterbox
        );
        self.renderer.resize(layout);
        layout
    }

    /// Borrows the panel-facing subsystems for one callback.
    pub fn panel_context<'a>(&'a mut self, stager: Stager<'a>) -> PanelContext<'a> {
        PanelContext::new(
            stager,
            &mut self.options,
            &self.input,
            self.audio.as_mut(),
            &self.fps,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::HeadlessRenderer;
    use tessera_core::audio::SilentAudio;

    #[test]
    fn new_context_lays_out_the_renderer_from_options() {
        let mut options = Options::default();
        options.graphics.modern_interface = false;
        options.graphics.resolution_scale = 0.5;

        let context = Context::new(
            options,
            Box::new(SilentAudio::new()),
            Box::new(HeadlessRenderer::new(1600, 900)),
        );

        let layout = context.renderer.layout();
        assert_eq!(layout.letterbox.width, 1200);
        assert_eq!(layout.letterbox.height, 900);
        assert_eq!(context.renderer.canvas().width(), 600);
        assert_eq!(context.renderer.canvas().height(), 450);
    }
}
