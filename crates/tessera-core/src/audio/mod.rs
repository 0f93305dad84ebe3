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

//! Defines the abstract `AudioManager` trait.
//!
//! Mixing, decoding and device handling are the backend's business. The
//! runtime only needs to start music and to give the backend one bookkeeping
//! slot per frame.

/// The contract between the runtime and an audio backend.
pub trait AudioManager {
    /// Starts playing the named music track, replacing any current track.
    fn play_music(&mut self, name: &str);

    /// Stops the current music track, if any.
    fn stop_music(&mut self);

    /// Per-frame bookkeeping, such as reclaiming channels of finished sounds.
    fn update(&mut self);

    /// The track currently playing, if any.
    fn current_music(&self) -> Option<&str>;
}

/// An audio backend that produces no sound.
///
/// It keeps track of what *would* be playing, which is enough for headless runs
/// and tests.
#[derive(Debug, Default)]
pub struct SilentAudio {
    music: Option<String>,
    updates: u64,
}

impl SilentAudio {
    /// Creates a silent backend with nothing playing.
    pub fn new() -> Self {
        Self::default()
    }

    /// How many times [`AudioManager::update`] has been called.
    pub fn update_count(&self) -> u64 {
        self.updates
    }
}

impl AudioManager for SilentAudio {
    fn play_music(&mut self, name: &str) {
        log::debug!("SilentAudio: play_music('{name}')");
        self.music = Some(name.to_string());
    }

    fn stop_music(&mut self) {
        self.music = None;
    }

    fn update(&mut self) {
        self.updates += 1;
    }

    fn current_music(&self) -> Option<&str> {
        self.music.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn silent_audio_tracks_music_and_updates() {
        let mut audio = SilentAudio::new();
        assert_eq!(audio.current_music(), None);

        audio.play_music("intro");
        audio.update();
        audio.update();
        assert_eq!(audio.current_music(), Some("intro"));
        assert_eq!(audio.update_count(), 2);

        audio.stop_music();
        assert_eq!(audio.current_music(), None);
    }
}
