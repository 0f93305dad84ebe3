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

//! The contract every panel (screen, view, modal, overlay) implements.

mod transitions;

pub use transitions::{Stager, Transitions};

use crate::audio::AudioManager;
use crate::config::Options;
use crate::event::InputEvent;
use crate::input::InputState;
use crate::renderer::{Canvas, CursorAlignment, Texture};
use crate::telemetry::FpsCounter;
use anyhow::Result;

/// An owned panel, as held by the panel stack.
pub type PanelBox = Box<dyn Panel>;

/// One screen of the application.
///
/// The runtime holds panels only as trait objects and never inspects their
/// concrete type. A panel may request stack changes from `handle_event` and
/// `tick` through its [`PanelContext`]; those requests are applied after the
/// callback returns, never while it runs.
pub trait Panel {
    /// Reacts to one input event that was not intercepted by the runtime.
    fn handle_event(&mut self, event: &InputEvent, ctx: &mut PanelContext<'_>) -> Result<()>;

    /// Advances the panel by `dt` seconds.
    fn tick(&mut self, dt: f64, ctx: &mut PanelContext<'_>) -> Result<()>;

    /// Draws the panel's main content.
    fn render(&self, canvas: &mut Canvas) -> Result<()>;

    /// Draws content that is only visible while this panel is on top, such as
    /// tooltips. Never called on panels covered by a sub-panel.
    fn render_secondary(&self, _canvas: &mut Canvas) -> Result<()> {
        Ok(())
    }

    /// Called on every panel in the stack, covered or not, when the window is resized.
    fn resize(&mut self, _width: u32, _height: u32) {}

    /// Called with `true` when a sub-panel is pushed over this panel, and with
    /// `false` when this panel becomes the active one again.
    fn on_pause_changed(&mut self, _paused: bool) {}

    /// The cursor to draw while this panel is active. `None` draws no cursor.
    fn current_cursor(&self) -> Option<(&Texture, CursorAlignment)> {
        None
    }

    /// A human-readable name used in log messages.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }
}

/// Everything a panel may touch from inside `handle_event` and `tick`.
pub struct PanelContext<'a> {
    stager: Stager<'a>,
    /// Current options. Changes are persisted when the program exits cleanly.
    pub options: &'a mut Options,
    /// Snapshot of the input devices.
    pub input: &'a InputState,
    /// The audio backend.
    pub audio: &'a mut dyn AudioManager,
    /// Frame-time statistics.
    pub fps: &'a FpsCounter,
}

impl<'a> PanelContext<'a> {
    /// Bundles the subsystems handed to a panel callback.
    pub fn new(
        stager: Stager<'a>,
        options: &'a mut Options,
        input: &'a InputState,
        audio: &'a mut dyn AudioManager,
        fps: &'a FpsCounter,
    ) -> Self {
        Self {
            stager,
            options,
            input,
            audio,
            fps,
        }
    }

    /// Requests that the base panel be replaced.
    pub fn set_panel(&mut self, panel: PanelBox) {
        self.stager.set_panel(panel);
    }

    /// Requests that a sub-panel be pushed on top of the stack.
    pub fn push_sub_panel(&mut self, panel: PanelBox) {
        self.stager.push_sub_panel(panel);
    }

    /// Requests that the top sub-panel be removed.
    ///
    /// # Panics
    ///
    /// Panics if a pop is already pending, or if there is no sub-panel to pop.
    pub fn pop_sub_panel(&mut self) {
        self.stager.pop_sub_panel();
    }

    /// Number of sub-panels currently on the stack (pending requests excluded).
    pub fn sub_panel_count(&self) -> usize {
        self.stager.sub_panel_count()
    }
}
