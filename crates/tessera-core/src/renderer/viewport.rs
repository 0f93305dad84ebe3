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

//! Rendering parameters derived from the window size and the viewport options.

use super::canvas::Rect;

/// Aspect ratio of the classic (letterboxed) layout.
pub const CLASSIC_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Where the canvas is shown inside the window, and how large it is.
///
/// Recomputed on every resize. With the modern interface the canvas covers the
/// whole window; otherwise it is letterboxed to [`CLASSIC_ASPECT_RATIO`] and
/// centered. In both cases the canvas resolution is the letterbox size times
/// the resolution scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportLayout {
    /// Window width in physical pixels.
    pub window_width: u32,
    /// Window height in physical pixels.
    pub window_height: u32,
    /// Canvas width in pixels.
    pub canvas_width: u32,
    /// Canvas height in pixels.
    pub canvas_height: u32,
    /// Region of the window the canvas is stretched over.
    pub letterbox: Rect,
    /// Resolution scale the layout was computed with.
    pub resolution_scale: f64,
    /// Whether the modern (full-window) layout is in use.
    pub modern_interface: bool,
}

impl ViewportLayout {
    /// Computes the layout for a window size. Zero dimensions are raised to one.
    pub fn new(
        window_width: u32,
        window_height: u32,
        resolution_scale: f64,
        modern_interface: bool,
    ) -> Self {
        let window_width = window_width.max(1);
        let window_height = window_height.max(1);

        let letterbox = if modern_interface {
            Rect::new(0, 0, window_width, window_height)
        } else {
            classic_letterbox(window_width, window_height)
        };

        let scale = if resolution_scale.is_finite() && resolution_scale > 0.0 {
            resolution_scale
        } else {
            1.0
        };
        let canvas_width = ((letterbox.width as f64 * scale).round() as u32).max(1);
        let canvas_height = ((letterbox.height as f64 * scale).round() as u32).max(1);

        Self {
            window_width,
            window_height,
            canvas_width,
            canvas_height,
            letterbox,
            resolution_scale: scale,
            modern_interface,
        }
    }

    /// Maps a point in window coordinates to canvas coordinates.
    ///
    /// Points outside the letterbox map outside the canvas.
    pub fn window_to_canvas(&self, position: (f32, f32)) -> (i32, i32) {
        let local_x = position.0 as f64 - self.letterbox.x as f64;
        let local_y = position.1 as f64 - self.letterbox.y as f64;
        let x = local_x * self.canvas_width as f64 / self.letterbox.width as f64;
        let y = local_y * self.canvas_height as f64 / self.letterbox.height as f64;
        (x.floor() as i32, y.floor() as i32)
    }
}

fn classic_letterbox(window_width: u32, window_height: u32) -> Rect {
    let window_aspect = window_width as f64 / window_height as f64;
    if window_aspect > CLASSIC_ASPECT_RATIO {
        // Pillarbox: full height, bars on the sides.
        let width = ((window_height as f64 * CLASSIC_ASPECT_RATIO).round() as u32).max(1);
        let x = ((window_width - width) / 2) as i32;
        Rect::new(x, 0, width, window_height)
    } else {
        let height = ((window_width as f64 / CLASSIC_ASPECT_RATIO).round() as u32)
            .clamp(1, window_height);
        let y = ((window_height - height) / 2) as i32;
        Rect::new(0, y, window_width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modern_layout_covers_the_window() {
        let layout = ViewportLayout::new(1920, 1080, 0.5, true);
        assert_eq!(layout.letterbox, Rect::new(0, 0, 1920, 1080));
        assert_eq!((layout.canvas_width, layout.canvas_height), (960, 540));
    }

    #[test]
    fn classic_layout_pillarboxes_wide_windows() {
        let layout = ViewportLayout::new(1920, 1080, 1.0, false);
        assert_eq!(layout.letterbox, Rect::new(240, 0, 1440, 1080));
        assert_eq!((layout.canvas_width, layout.canvas_height), (1440, 1080));
    }

    #[test]
    fn classic_layout_letterboxes_tall_windows() {
        let layout = ViewportLayout::new(800, 1000, 1.0, false);
        assert_eq!(layout.letterbox, Rect::new(0, 200, 800, 600));
    }

    #[test]
    fn window_points_map_into_canvas_space() {
        let layout = ViewportLayout::new(1920, 1080, 0.5, false);
        // Letterbox starts at x = 240 and the canvas is half its size.
        assert_eq!(layout.window_to_canvas((240.0, 0.0)), (0, 0));
        assert_eq!(layout.window_to_canvas((1040.0, 540.0)), (400, 270));
        assert!(layout.window_to_canvas((10.0, 10.0)).0 < 0);
    }

    #[test]
    fn degenerate_sizes_do_not_panic() {
        let layout = ViewportLayout::new(0, 0, f64::NAN, false);
        assert!(layout.canvas_width >= 1 && layout.canvas_height >= 1);
    }
}
