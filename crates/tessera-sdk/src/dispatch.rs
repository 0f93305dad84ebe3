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

//! Per-frame event dispatch.
//!
//! Every queued platform event is drained once per frame. A few events are
//! handled by the runtime itself; the rest go to the active panel only.

use crate::context::Context;
use crate::screenshot::ScreenshotWriter;
use crate::stack::PanelStack;
use anyhow::{Context as _, Result};
use tessera_core::event::{EventSource, InputEvent, PlatformEvent};

/// How the runtime treats one platform event, in order of priority.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EventClass<'a> {
    /// The user or the OS asked the program to end.
    Exit,
    /// The window changed size.
    Resize {
        /// New width in physical pixels.
        width: u32,
        /// New height in physical pixels.
        height: u32,
    },
    /// The screenshot hot-key was pressed.
    Screenshot,
    /// Anything else, forwarded verbatim to the active panel.
    Other(&'a InputEvent),
}

/// Sorts `event` into the class that decides who handles it.
pub fn classify<'a>(event: &'a PlatformEvent, screenshot_key: &str) -> EventClass<'a> {
    match event {
        PlatformEvent::Quit => EventClass::Exit,
        PlatformEvent::Resized { width, height } => EventClass::Resize {
            width: *width,
            height: *height,
        },
        PlatformEvent::Input(input) if input.is_key_pressed(screenshot_key) => {
            EventClass::Screenshot
        }
        PlatformEvent::Input(input) => EventClass::Other(input),
    }
}

/// What happened during one dispatch.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Number of events drained.
    pub events: usize,
    /// Whether an exit event was seen.
    pub exit_requested: bool,
}

/// Drains platform events and routes them.
pub struct EventDispatcher {
    screenshots: ScreenshotWriter,
}

impl EventDispatcher {
    /// A dispatcher that saves screenshots with `screenshots`.
    pub fn new(screenshots: ScreenshotWriter) -> Self {
        Self { screenshots }
    }

    /// The screenshot writer in use.
    pub fn screenshots(&self) -> &ScreenshotWriter {
        &self.screenshots
    }

    /// Drains every event currently queued in `source`.
    ///
    /// Staged stack transitions are applied after each event, so an event
    /// that pushes a panel redirects the events after it to that panel.
    /// Errors come from panel event handlers, the event source or a failed
    /// screenshot write.
    pub fn dispatch(
        &mut self,
        source: &mut dyn EventSource,
        context: &mut Context,
        stack: &mut PanelStack,
    ) -> Result<DispatchSummary> {
        source.pump().context("failed to pump platform events")?;

        let mut summary = DispatchSummary::default();
        while let Some(event) = source.poll_event() {
            summary.events += 1;
            context.input.observe(&event);

            match classify(&event, &context.options.input.screenshot_key) {
                EventClass::Exit => {
                    log::info!("Exit requested; finishing the current frame.");
                    summary.exit_requested = true;
                }
                EventClass::Resize { width, height } => {
                    log::info!("Window resized to {width}x{height}.");
                    context.resize_viewport(width, height);
                    stack.resize_all(width, height);
                }
                EventClass::Screenshot => {
                    self.screenshots
                        .save(context.renderer.canvas())
                        .context("failed to save screenshot")?;
                }
                EventClass::Other(input) => {
                    stack.with_active(|panel, stager| {
                        panel
                            .handle_event(input, &mut context.panel_context(stager))
                            .with_context(|| {
                                format!("panel '{}' failed to handle {input:?}", panel.name())
                            })
                    })?;
                }
            }

            stack.apply_deferred_transitions();
        }

        if summary.events > 0 {
            log::trace!("Dispatched {} event(s).", summary.events);
        }
        Ok(summary)
    }
}
