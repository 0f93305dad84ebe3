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

//! User-facing options consumed by the runtime.
//!
//! The core only reads these values. Where they come from, and where they go
//! when the program exits, is decided by an [`OptionsStore`] implementation.

use anyhow::Result;
use serde::{Deserialize, Serialize};

/// Lowest target frame rate accepted after sanitizing.
pub const MIN_TARGET_FPS: u32 = 1;
/// Smallest accepted resolution scale.
pub const MIN_RESOLUTION_SCALE: f64 = 0.1;
/// Largest accepted resolution scale.
pub const MAX_RESOLUTION_SCALE: f64 = 4.0;
/// Smallest accepted cursor scale.
pub const MIN_CURSOR_SCALE: f64 = 0.1;
/// Largest accepted cursor scale.
pub const MAX_CURSOR_SCALE: f64 = 8.0;

/// All options, grouped by section.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Window, pacing and viewport settings.
    pub graphics: GraphicsOptions,
    /// Volume and mixing settings.
    pub audio: AudioOptions,
    /// Key bindings the runtime itself reacts to.
    pub input: InputOptions,
}

/// Window, pacing and viewport settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GraphicsOptions {
    /// Initial window width.
    pub screen_width: u32,
    /// Initial window height.
    pub screen_height: u32,
    /// Whether the window starts fullscreen.
    pub fullscreen: bool,
    /// Frames per second the scheduler paces towards.
    pub target_fps: u32,
    /// Lowest frame rate the simulation is allowed to see; bounds the delta.
    pub min_fps: u32,
    /// Scale applied to the cursor texture.
    pub cursor_scale: f64,
    /// Ratio between the canvas size and the window size.
    pub resolution_scale: f64,
    /// `true` fills the whole window; `false` letterboxes to 4:3.
    pub modern_interface: bool,
}

impl Default for GraphicsOptions {
    fn default() -> Self {
        Self {
            screen_width: 1280,
            screen_height: 720,
            fullscreen: false,
            target_fps: 60,
            min_fps: 15,
            cursor_scale: 2.0,
            resolution_scale: 1.0,
            modern_interface: false,
        }
    }
}

/// Volume and mixing settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AudioOptions {
    /// Music volume in `[0, 1]`.
    pub music_volume: f64,
    /// Sound effect volume in `[0, 1]`.
    pub sound_volume: f64,
    /// Number of simultaneous sound channels.
    pub sound_channels: u32,
}

impl Default for AudioOptions {
    fn default() -> Self {
        Self {
            music_volume: 0.8,
            sound_volume: 0.8,
            sound_channels: 16,
        }
    }
}

/// Key bindings the runtime itself reacts to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Key code that captures a screenshot (e.g. `"PrintScreen"`, `"F12"`).
    pub screenshot_key: String,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            screenshot_key: "PrintScreen".to_string(),
        }
    }
}

impl Options {
    /// File name of the shipped defaults.
    pub const DEFAULT_FILENAME: &'static str = "options-default.ron";
    /// File name of the user's persisted options.
    pub const CHANGES_FILENAME: &'static str = "options-changes.ron";

    /// Clamps every value into the range the runtime can work with.
    ///
    /// A zero frame rate would make the pacing period undefined, and
    /// non-finite scales would poison the viewport math.
    pub fn sanitized(mut self) -> Self {
        let graphics = &mut self.graphics;
        graphics.target_fps = graphics.target_fps.max(MIN_TARGET_FPS);
        graphics.min_fps = graphics.min_fps.max(MIN_TARGET_FPS);
        graphics.screen_width = graphics.screen_width.max(1);
        graphics.screen_height = graphics.screen_height.max(1);
        graphics.resolution_scale = clamp_finite(
            graphics.resolution_scale,
            MIN_RESOLUTION_SCALE,
            MAX_RESOLUTION_SCALE,
            1.0,
        );
        graphics.cursor_scale =
            clamp_finite(graphics.cursor_scale, MIN_CURSOR_SCALE, MAX_CURSOR_SCALE, 1.0);

        let audio = &mut self.audio;
        audio.music_volume = clamp_finite(audio.music_volume, 0.0, 1.0, 1.0);
        audio.sound_volume = clamp_finite(audio.sound_volume, 0.0, 1.0, 1.0);

        self
    }
}

fn clamp_finite(value: f64, min: f64, max: f64, fallback: f64) -> f64 {
    if value.is_finite() {
        value.clamp(min, max)
    } else {
        fallback
    }
}

/// Persists options when the runtime shuts down cleanly.
pub trait OptionsStore {
    /// Writes the given options to persistent storage.
    fn save(&self, options: &Options) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_rejects_zero_frame_rates() {
        let mut options = Options::default();
        options.graphics.target_fps = 0;
        options.graphics.min_fps = 0;

        let options = options.sanitized();
        assert_eq!(options.graphics.target_fps, 1);
        assert_eq!(options.graphics.min_fps, 1);
    }

    #[test]
    fn sanitize_clamps_scales() {
        let mut options = Options::default();
        options.graphics.resolution_scale = 50.0;
        options.graphics.cursor_scale = f64::NAN;
        options.audio.music_volume = -3.0;

        let options = options.sanitized();
        assert_eq!(options.graphics.resolution_scale, MAX_RESOLUTION_SCALE);
        assert_eq!(options.graphics.cursor_scale, 1.0);
        assert_eq!(options.audio.music_volume, 0.0);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let parsed: Options = ron::from_str("(graphics: (target_fps: 30))")
            .expect("Partial options should parse");
        assert_eq!(parsed.graphics.target_fps, 30);
        assert_eq!(parsed.graphics.min_fps, GraphicsOptions::default().min_fps);
        assert_eq!(parsed.input, InputOptions::default());
    }
}
