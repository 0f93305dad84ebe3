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

//! Immutable images that panels blit onto a canvas.

use super::canvas::Color;

/// An immutable RGBA image owned by whoever created it (usually a panel).
#[derive(Debug, Clone, PartialEq)]
pub struct Texture {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Texture {
    /// Wraps a row-major pixel buffer.
    ///
    /// Returns `None` if a dimension is zero or the buffer length does not match.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Color>) -> Option<Self> {
        if width == 0 || height == 0 || pixels.len() != (width * height) as usize {
            return None;
        }
        Some(Self {
            width,
            height,
            pixels,
        })
    }

    /// A texture of one solid color. Zero dimensions are raised to one.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![color; (width * height) as usize],
        }
    }

    /// Width in texels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in texels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The texel at `(x, y)`. Coordinates must be in range.
    pub fn texel(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_pixels_checks_length() {
        assert!(Texture::from_pixels(2, 2, vec![Color::BLACK; 3]).is_none());
        assert!(Texture::from_pixels(0, 2, Vec::new()).is_none());
        assert!(Texture::from_pixels(2, 2, vec![Color::BLACK; 4]).is_some());
    }
}
