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

//! Frame pacing.

use std::time::{Duration, Instant};

const MICROS_PER_SECOND: u64 = 1_000_000;

/// A source of time the scheduler can read and wait on.
pub trait Clock {
    /// The current instant.
    fn now(&self) -> Instant;

    /// Blocks for roughly `duration`.
    fn sleep(&mut self, duration: Duration);
}

/// Wall-clock time and a real thread sleep.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Produces one time delta per frame.
///
/// If the previous frame finished early, the scheduler sleeps until the
/// target frame period has elapsed. The delta it returns is capped at
/// `1 / min_fps` seconds, so a stalled process (debugger, OS hiccup) makes the
/// simulation look slow for one frame instead of jumping ahead.
pub struct FrameScheduler {
    clock: Box<dyn Clock>,
    last_frame: Instant,
}

impl FrameScheduler {
    /// A scheduler driven by the system clock.
    pub fn new() -> Self {
        Self::with_clock(Box::new(SystemClock))
    }

    /// A scheduler driven by the given clock. The first frame is measured from now.
    pub fn with_clock(clock: Box<dyn Clock>) -> Self {
        let last_frame = clock.now();
        Self { clock, last_frame }
    }

    /// Waits out the rest of the frame budget and returns the delta in seconds.
    ///
    /// `target_fps` must be nonzero; zero is treated as one.
    pub fn next_delta(&mut self, target_fps: u32, min_fps: u32) -> f64 {
        let min_frame_time =
            Duration::from_micros(MICROS_PER_SECOND / u64::from(target_fps.max(1)));

        let mut now = self.clock.now();
        let mut frame_time = now.saturating_duration_since(self.last_frame);
        if frame_time < min_frame_time {
            self.clock.sleep(min_frame_time - frame_time);
            now = self.clock.now();
            frame_time = now.saturating_duration_since(self.last_frame);
        }
        self.last_frame = now;

        let dt = clamp_frame_time(frame_time, min_fps);
        log::trace!("Frame paced: {frame_time:?} measured, dt = {dt:.6}s");
        dt
    }
}

impl Default for FrameScheduler {
    fn default() -> Self {
        Self::new()
    }
}

/// Converts a measured frame time to seconds, capped at `1 / min_fps`.
///
/// Works in whole microseconds, like the pacing itself.
pub fn clamp_frame_time(frame_time: Duration, min_fps: u32) -> f64 {
    let max_frame_us = u128::from(MICROS_PER_SECOND / u64::from(min_fps.max(1)));
    let frame_us = frame_time.as_micros().min(max_frame_us);
    frame_us as f64 / MICROS_PER_SECOND as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::ManualClock;

    #[test]
    fn stall_is_clamped_to_min_fps_period() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::with_clock(Box::new(clock.clone()));

        clock.advance(Duration::from_secs(5));
        let dt = scheduler.next_delta(60, 20);
        assert_eq!(dt, 0.05);
    }

    #[test]
    fn fast_frames_sleep_until_target_period() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::with_clock(Box::new(clock.clone()));

        clock.advance(Duration::from_millis(2));
        let dt = scheduler.next_delta(50, 10);

        assert_eq!(dt, 0.02);
        assert_eq!(clock.total_slept(), Duration::from_millis(18));
    }

    #[test]
    fn slow_frames_do_not_sleep() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::with_clock(Box::new(clock.clone()));

        clock.advance(Duration::from_millis(40));
        let dt = scheduler.next_delta(50, 10);

        assert_eq!(dt, 0.04);
        assert_eq!(clock.total_slept(), Duration::ZERO);
    }

    #[test]
    fn each_frame_is_measured_from_the_previous_boundary() {
        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::with_clock(Box::new(clock.clone()));

        clock.advance(Duration::from_millis(30));
        scheduler.next_delta(10, 1);
        clock.advance(Duration::from_millis(120));
        let dt = scheduler.next_delta(10, 1);

        assert_eq!(dt, 0.12);
    }

    #[test]
    fn clamp_stays_within_bounds() {
        for millis in [0u64, 1, 16, 49, 50, 51, 1_000, 60_000] {
            let dt = clamp_frame_time(Duration::from_millis(millis), 20);
            assert!((0.0..=0.05).contains(&dt), "dt {dt} out of range for {millis} ms");
        }
    }

    #[test]
    fn zero_fps_values_do_not_divide_by_zero() {
        assert_eq!(clamp_frame_time(Duration::from_secs(3), 0), 1.0);

        let clock = ManualClock::new();
        let mut scheduler = FrameScheduler::with_clock(Box::new(clock.clone()));
        let dt = scheduler.next_delta(0, 0);
        assert_eq!(dt, 1.0);
    }
}
