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

//! Window-less stand-ins for the platform backends.
//!
//! These make it possible to run the engine in tests and in headless tools:
//! events come from a script, frames are composed but never shown, and time
//! only moves when told to.

use crate::frame::Clock;
use anyhow::Result;
use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::{Duration, Instant};
use tessera_core::event::{EventSource, PlatformEvent};
use tessera_core::renderer::{Canvas, Renderer, ViewportLayout};

/// A renderer that composes frames into memory and counts presents.
pub struct HeadlessRenderer {
    canvas: Canvas,
    layout: ViewportLayout,
    presented: Rc<Cell<u64>>,
}

impl HeadlessRenderer {
    /// A renderer for a `width` x `height` window using the modern layout.
    pub fn new(width: u32, height: u32) -> Self {
        Self::with_layout(ViewportLayout::new(width, height, 1.0, true))
    }

    /// A renderer with an explicit starting layout.
    pub fn with_layout(layout: ViewportLayout) -> Self {
        Self {
            canvas: Canvas::new(layout.canvas_width, layout.canvas_height),
            layout,
            presented: Rc::new(Cell::new(0)),
        }
    }

    /// A shared counter of presented frames that stays readable after the
    /// renderer has been moved into the engine.
    pub fn presented_counter(&self) -> Rc<Cell<u64>> {
        self.presented.clone()
    }
}

impl Renderer for HeadlessRenderer {
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
        self.canvas.resize(layout.canvas_width, layout.canvas_height);
        self.layout = layout;
    }

    fn present(&mut self) -> Result<()> {
        self.presented.set(self.presented.get() + 1);
        Ok(())
    }
}

/// An event source that replays one scripted batch of events per frame.
#[derive(Debug, Default)]
pub struct ScriptedEventSource {
    frames: VecDeque<Vec<PlatformEvent>>,
    queue: VecDeque<PlatformEvent>,
}

impl ScriptedEventSource {
    /// A source delivering `frames[n]` during frame `n`, then nothing.
    pub fn new(frames: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            frames: frames.into(),
            queue: VecDeque::new(),
        }
    }

    /// Appends a batch for a later frame.
    pub fn push_frame(&mut self, events: Vec<PlatformEvent>) {
        self.frames.push_back(events);
    }
}

impl EventSource for ScriptedEventSource {
    fn pump(&mut self) -> Result<()> {
        if let Some(batch) = self.frames.pop_front() {
            self.queue.extend(batch);
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.queue.pop_front()
    }
}

#[derive(Debug)]
struct ManualClockState {
    origin: Instant,
    offset: Cell<Duration>,
    slept: Cell<Duration>,
}

/// A clock that only advances when told to, or when slept on.
///
/// Clones share the same time line, so a test can keep one handle while the
/// scheduler owns another.
#[derive(Debug, Clone)]
pub struct ManualClock {
    state: Rc<ManualClockState>,
}

impl ManualClock {
    /// A clock frozen at the current instant.
    pub fn new() -> Self {
        Self {
            state: Rc::new(ManualClockState {
                origin: Instant::now(),
                offset: Cell::new(Duration::ZERO),
                slept: Cell::new(Duration::ZERO),
            }),
        }
    }

    /// Moves time forward, as if the process had been busy.
    pub fn advance(&self, duration: Duration) {
        self.state.offset.set(self.state.offset.get() + duration);
    }

    /// Total time spent in [`Clock::sleep`].
    pub fn total_slept(&self) -> Duration {
        self.state.slept.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.state.origin + self.state.offset.get()
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
        self.state.slept.set(self.state.slept.get() + duration);
    }
}
