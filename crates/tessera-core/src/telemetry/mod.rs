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

//! Frame-time statistics.

/// Number of recent frames averaged by [`FpsCounter`].
pub const FPS_SAMPLE_COUNT: usize = 8;

/// Keeps a short ring of recent frame deltas and reports their average.
#[derive(Debug, Clone, Default)]
pub struct FpsCounter {
    frame_times: [f64; FPS_SAMPLE_COUNT],
    next: usize,
    len: usize,
}

impl FpsCounter {
    /// Creates a counter with no samples.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records the delta of the frame that just started, in seconds.
    pub fn update_frame_time(&mut self, dt: f64) {
        self.frame_times[self.next] = dt;
        self.next = (self.next + 1) % FPS_SAMPLE_COUNT;
        self.len = (self.len + 1).min(FPS_SAMPLE_COUNT);
    }

    /// Average delta over the recorded samples, or `0.0` with no samples.
    pub fn average_frame_time(&self) -> f64 {
        if self.len == 0 {
            return 0.0;
        }
        self.frame_times[..self.len].iter().sum::<f64>() / self.len as f64
    }

    /// Average frames per second, or `0.0` when it cannot be computed.
    pub fn average_fps(&self) -> f64 {
        let average = self.average_frame_time();
        if average > 0.0 {
            1.0 / average
        } else {
            0.0
        }
    }

    /// Number of samples currently held.
    pub fn sample_count(&self) -> usize {
        self.len
    }
}
