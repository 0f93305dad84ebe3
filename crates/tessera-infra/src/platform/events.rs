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

//! Translation from `winit` window events to platform events, and the event
//! source that pumps the `winit` event loop once per frame.

use super::window::{WinitWindow, WinitWindowBuilder};
use anyhow::{anyhow, Context, Result};
use std::collections::VecDeque;
use std::time::Duration;
use tessera_core::event::{EventSource, InputEvent, MouseButton, PlatformEvent};
use winit::application::ApplicationHandler;
use winit::error::OsError;
use winit::event::{ElementState, MouseButton as WinitMouseButton, MouseScrollDelta, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::platform::pump_events::{EventLoopExtPumpEvents, PumpStatus};
use winit::window::WindowId;

/// How many times the loop is pumped while waiting for the window to appear.
const WINDOW_CREATION_ATTEMPTS: usize = 100;

/// Translates a `winit` window event into a [`PlatformEvent`].
///
/// Returns `None` for events the runtime has no use for (focus changes,
/// redraw requests, key repeats, zero scroll deltas).
pub fn translate_window_event(event: &WindowEvent) -> Option<PlatformEvent> {
    match event {
        WindowEvent::CloseRequested => Some(PlatformEvent::Quit),
        WindowEvent::Resized(size) => Some(PlatformEvent::Resized {
            width: size.width,
            height: size.height,
        }),
        _ => translate_input(event).map(PlatformEvent::Input),
    }
}

fn translate_input(event: &WindowEvent) -> Option<InputEvent> {
    match event {
        WindowEvent::KeyboardInput {
            event: key_event, ..
        } => {
            let PhysicalKey::Code(keycode) = key_event.physical_key else {
                return None;
            };
            let key_code = map_keycode_to_string(keycode);
            match key_event.state {
                ElementState::Pressed if !key_event.repeat => {
                    Some(InputEvent::KeyPressed { key_code })
                }
                ElementState::Released => Some(InputEvent::KeyReleased { key_code }),
                _ => None,
            }
        }
        WindowEvent::CursorMoved { position, .. } => Some(InputEvent::MouseMoved {
            x: position.x as f32,
            y: position.y as f32,
        }),
        WindowEvent::MouseInput { state, button, .. } => {
            let button = map_mouse_button(*button);
            match state {
                ElementState::Pressed => Some(InputEvent::MouseButtonPressed { button }),
                ElementState::Released => Some(InputEvent::MouseButtonReleased { button }),
            }
        }
        WindowEvent::MouseWheel { delta, .. } => {
            let (dx, dy): (f32, f32) = match delta {
                MouseScrollDelta::LineDelta(x, y) => (*x, *y),
                MouseScrollDelta::PixelDelta(pos) => (pos.x as f32, pos.y as f32),
            };
            (dx != 0.0 || dy != 0.0).then_some(InputEvent::MouseWheelScrolled {
                delta_x: dx,
                delta_y: dy,
            })
        }
        _ => None,
    }
}

fn map_keycode_to_string(keycode: KeyCode) -> String {
    format!("{keycode:?}")
}

fn map_mouse_button(button: WinitMouseButton) -> MouseButton {
    match button {
        WinitMouseButton::Left => MouseButton::Left,
        WinitMouseButton::Right => MouseButton::Right,
        WinitMouseButton::Middle => MouseButton::Middle,
        WinitMouseButton::Back => MouseButton::Back,
        WinitMouseButton::Forward => MouseButton::Forward,
        WinitMouseButton::Other(id) => MouseButton::Other(id),
    }
}

/// Receives callbacks from the `winit` loop and queues what the runtime needs.
struct WindowHandler {
    builder: WinitWindowBuilder,
    window: Option<WinitWindow>,
    creation_error: Option<OsError>,
    queue: VecDeque<PlatformEvent>,
}

impl ApplicationHandler for WindowHandler {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }
        match self.builder.build(event_loop) {
            Ok(window) => self.window = Some(window),
            Err(err) => self.creation_error = Some(err),
        }
    }

    fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
        if let Some(event) = translate_window_event(&event) {
            self.queue.push_back(event);
        }
    }
}

/// An [`EventSource`] backed by a `winit` event loop that is pumped, never run.
///
/// Pumping keeps the frame loop in charge: each call to [`EventSource::pump`]
/// collects whatever the OS has queued and returns immediately.
pub struct WinitEventSource {
    event_loop: EventLoop<()>,
    handler: WindowHandler,
}

impl WinitEventSource {
    /// Creates the event loop and opens the window described by `builder`.
    pub fn new(builder: WinitWindowBuilder) -> Result<Self> {
        let event_loop = EventLoop::new().context("failed to create the event loop")?;
        let mut source = Self {
            event_loop,
            handler: WindowHandler {
                builder,
                window: None,
                creation_error: None,
                queue: VecDeque::new(),
            },
        };

        for _ in 0..WINDOW_CREATION_ATTEMPTS {
            if let Some(err) = source.handler.creation_error.take() {
                return Err(err).context("failed to create the window");
            }
            if source.handler.window.is_some() {
                return Ok(source);
            }
            if let PumpStatus::Exit(code) = source.pump_once() {
                return Err(anyhow!(
                    "event loop exited with code {code} before the window was created"
                ));
            }
        }
        Err(anyhow!("the window was not created by the platform"))
    }

    /// The application window.
    pub fn window(&self) -> Option<&WinitWindow> {
        self.handler.window.as_ref()
    }

    fn pump_once(&mut self) -> PumpStatus {
        self.event_loop
            .pump_app_events(Some(Duration::ZERO), &mut self.handler)
    }
}

impl EventSource for WinitEventSource {
    fn pump(&mut self) -> Result<()> {
        if let PumpStatus::Exit(code) = self.pump_once() {
            log::info!("Event loop exited with code {code}.");
            self.handler.queue.push_back(PlatformEvent::Quit);
        }
        Ok(())
    }

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        self.handler.queue.pop_front()
    }
}
