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

//! The frame loop.

use crate::context::Context;
use crate::dispatch::EventDispatcher;
use crate::frame::FrameScheduler;
use crate::phase::{FatalError, Phase};
use crate::screenshot::ScreenshotWriter;
use crate::stack::PanelStack;
use anyhow::{Context as _, Result};
use std::path::PathBuf;
use tessera_core::config::OptionsStore;
use tessera_core::event::EventSource;
use tessera_core::panel::PanelBox;
use tessera_core::renderer::Color;

/// Drives a [`PanelStack`] frame after frame until an exit is requested or a
/// phase fails.
pub struct Engine {
    context: Context,
    events: Box<dyn EventSource>,
    stack: PanelStack,
    dispatcher: EventDispatcher,
    scheduler: FrameScheduler,
    options_store: Option<Box<dyn OptionsStore>>,
    running: bool,
    frame_count: u64,
}

impl Engine {
    /// Creates an engine whose base panel is `default_panel`.
    ///
    /// Screenshots are written to `screenshot_dir`. The default panel
    /// immediately receives the current window size.
    pub fn new(
        context: Context,
        events: Box<dyn EventSource>,
        mut default_panel: PanelBox,
        screenshot_dir: impl Into<PathBuf>,
    ) -> Self {
        let layout = *context.renderer.layout();
        default_panel.resize(layout.window_width, layout.window_height);

        let screenshots = ScreenshotWriter::new(screenshot_dir);
        log::info!(
            "Engine created: base panel '{}', screenshots in '{}'.",
            default_panel.name(),
            screenshots.directory().display()
        );

        Self {
            context,
            events,
            stack: PanelStack::new(default_panel),
            dispatcher: EventDispatcher::new(screenshots),
            scheduler: FrameScheduler::new(),
            options_store: None,
            running: true,
            frame_count: 0,
        }
    }

    /// Replaces the frame scheduler, e.g. with one driven by a manual clock.
    pub fn with_scheduler(mut self, scheduler: FrameScheduler) -> Self {
        self.scheduler = scheduler;
        self
    }

    /// Sets where the options are flushed when the loop ends normally.
    pub fn with_options_store(mut self, store: Box<dyn OptionsStore>) -> Self {
        self.options_store = Some(store);
        self
    }

    /// Whether the loop will run another frame.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// The process-wide subsystems.
    pub fn context(&self) -> &Context {
        &self.context
    }

    /// Mutable access to the process-wide subsystems.
    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    /// The panel stack.
    pub fn stack(&self) -> &PanelStack {
        &self.stack
    }

    /// Number of frames completed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Runs frames until an exit is requested, then flushes the options.
    ///
    /// A fatal error ends the loop at once and is returned as is; the options
    /// are not flushed in that case.
    pub fn run(&mut self) -> Result<(), FatalError> {
        log::info!("Entering the main loop.");
        while self.running {
            self.run_frame()?;
        }
        log::info!("Main loop ended after {} frames.", self.frame_count);
        self.flush_options();
        Ok(())
    }

    /// Runs one frame: pace, sample, dispatch and tick, render.
    pub fn run_frame(&mut self) -> Result<(), FatalError> {
        let graphics = &self.context.options.graphics;
        let dt = self
            .scheduler
            .next_delta(graphics.target_fps, graphics.min_fps);

        self.context.input.update();
        self.context.audio.update();
        self.context.fps.update_frame_time(dt);

        let summary = Phase::HandleEvents.guard(|| {
            self.dispatcher
                .dispatch(self.events.as_mut(), &mut self.context, &mut self.stack)
        })?;
        if summary.exit_requested {
            self.running = false;
        }

        Phase::Tick.guard(|| self.tick(dt))?;
        Phase::Render.guard(|| self.render())?;

        self.frame_count += 1;
        Ok(())
    }

    fn tick(&mut self, dt: f64) -> Result<()> {
        let context = &mut self.context;
        self.stack.with_active(|panel, stager| {
            panel
                .tick(dt, &mut context.panel_context(stager))
                .with_context(|| format!("panel '{}' failed to tick", panel.name()))
        })?;
        self.stack.apply_deferred_transitions();
        Ok(())
    }

    fn render(&mut self) -> Result<()> {
        let cursor_position = self
            .context
            .renderer
            .layout()
            .window_to_canvas(self.context.input.mouse_position());
        let cursor_scale = self.context.options.graphics.cursor_scale;

        let canvas = self.context.renderer.canvas_mut();
        canvas.clear(Color::BLACK);
        self.stack.render(canvas)?;
        if let Some((texture, alignment)) = self.stack.active_cursor() {
            canvas.draw_cursor(texture, alignment, cursor_position, cursor_scale);
        }

        self.context
            .renderer
            .present()
            .context("failed to present the frame")
    }

    fn flush_options(&self) {
        let Some(store) = &self.options_store else {
            return;
        };
        match store.save(&self.context.options) {
            Ok(()) => log::info!("Options saved."),
            Err(err) => log::error!("Failed to save options: {err:#}"),
        }
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        log::debug!(
            "Engine dropped with {} sub-panel(s) still on the stack.",
            self.stack.sub_panel_count()
        );
    }
}
