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

//! Per-frame snapshot of the user's input devices.

use crate::event::{InputEvent, MouseButton, PlatformEvent};
use std::collections::HashSet;

/// Tracks the mouse position and which keys and buttons are held down.
///
/// The state is fed from the same event stream the panels see. [`InputState::update`]
/// is called once per frame, before events are dispatched, so that
/// [`InputState::mouse_delta`] reports the motion accumulated during the frame.
#[derive(Debug, Default, Clone)]
pub struct InputState {
    mouse_position: (f32, f32),
    previous_mouse_position: (f32, f32),
    keys_down: HashSet<String>,
    buttons_down: HashSet<MouseButton>,
}

impl InputState {
    /// Creates an empty input state with the mouse at the window origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new frame: the current mouse position becomes the reference
    /// point for the next delta.
    pub fn update(&mut self) {
        self.previous_mouse_position = self.mouse_position;
    }

    /// Records the effect of one platform event.
    pub fn observe(&mut self, event: &PlatformEvent) {
        let PlatformEvent::Input(input) = event else {
            return;
        };

        match input {
            InputEvent::KeyPressed { key_code } => {
                self.keys_down.insert(key_code.clone());
            }
            InputEvent::KeyReleased { key_code } => {
                self.keys_down.remove(key_code);
            }
            InputEvent::MouseButtonPressed { button } => {
                self.buttons_down.insert(*button);
            }
            InputEvent::MouseButtonReleased { button } => {
                self.buttons_down.remove(button);
            }
            InputEvent::MouseMoved { x, y } => {
                self.mouse_position = (*x, *y);
            }
            InputEvent::MouseWheelScrolled { .. } => {}
        }
    }

    /// The last known mouse position, in window coordinates.
    pub fn mouse_position(&self) -> (f32, f32) {
        self.mouse_position
    }

    /// Mouse motion since the last call to [`InputState::update`].
    pub fn mouse_delta(&self) -> (f32, f32) {
        (
            self.mouse_position.0 - self.previous_mouse_position.0,
            self.mouse_position.1 - self.previous_mouse_position.1,
        )
    }

    /// Returns `true` while the given key is held down.
    pub fn key_is_down(&self, key_code: &str) -> bool {
        self.keys_down.contains(key_code)
    }

    /// Returns `true` while the given mouse button is held down.
    pub fn button_is_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }
}
