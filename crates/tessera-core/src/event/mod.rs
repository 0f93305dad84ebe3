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

//! Backend-agnostic platform events and the source that produces them.
//!
//! A windowing backend translates whatever its native event format is into
//! [`PlatformEvent`]s and queues them. The runtime drains that queue once per
//! frame through the [`EventSource`] trait.

use anyhow::Result;

/// An event produced by the host platform, before any panel sees it.
#[derive(Debug, Clone, PartialEq)]
pub enum PlatformEvent {
    /// The user or the operating system asked the application to close.
    Quit,
    /// The drawable area of the window changed size.
    Resized {
        /// The new width in physical pixels.
        width: u32,
        /// The new height in physical pixels.
        height: u32,
    },
    /// A user input action.
    Input(InputEvent),
}

/// An engine-internal representation of a user input event.
///
/// This enum is backend-agnostic and represents the high-level input actions
/// that panels interpret for themselves.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A keyboard key was pressed.
    KeyPressed {
        /// A string representation of the physical key code (e.g. `"KeyA"`).
        key_code: String,
    },
    /// A keyboard key was released.
    KeyReleased {
        /// A string representation of the physical key code.
        key_code: String,
    },
    /// A mouse button was pressed.
    MouseButtonPressed {
        /// The mouse button that was pressed.
        button: MouseButton,
    },
    /// A mouse button was released.
    MouseButtonReleased {
        /// The mouse button that was released.
        button: MouseButton,
    },
    /// The mouse cursor moved, in window coordinates.
    MouseMoved {
        /// The new x-coordinate of the cursor.
        x: f32,
        /// The new y-coordinate of the cursor.
        y: f32,
    },
    /// The mouse wheel was scrolled.
    MouseWheelScrolled {
        /// The horizontal scroll delta.
        delta_x: f32,
        /// The vertical scroll delta.
        delta_y: f32,
    },
}

impl InputEvent {
    /// Returns `true` if this is a key press of the given key code.
    pub fn is_key_pressed(&self, key: &str) -> bool {
        matches!(self, InputEvent::KeyPressed { key_code } if key_code == key)
    }
}

/// An engine-internal representation of a mouse button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    /// The left mouse button.
    Left,
    /// The right mouse button.
    Right,
    /// The middle mouse button.
    Middle,
    /// The back mouse button (typically on the side).
    Back,
    /// The forward mouse button (typically on the side).
    Forward,
    /// Another mouse button, identified by a numeric code.
    Other(u16),
}

/// A queue of platform events, drained by the runtime once per frame.
pub trait EventSource {
    /// Gives the backend a chance to collect pending native events into its queue.
    ///
    /// Called once per frame, immediately before the queue is drained. It must
    /// not block.
    fn pump(&mut self) -> Result<()> {
        Ok(())
    }

    /// Removes and returns the next queued event, or `None` when the queue is empty.
    fn poll_event(&mut self) -> Option<PlatformEvent>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_press_matches_only_its_own_code() {
        let event = InputEvent::KeyPressed {
            key_code: "Escape".to_string(),
        };
        assert!(event.is_key_pressed("Escape"));
        assert!(!event.is_key_pressed("Enter"));

        let release = InputEvent::KeyReleased {
            key_code: "Escape".to_string(),
        };
        assert!(!release.is_key_pressed("Escape"));
    }
}
