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

//! The RGBA canvas panels draw into, with colors and rectangles.

use super::cursor::CursorAlignment;
use super::texture::Texture;

/// An 8-bit-per-channel RGBA color in sRGB space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel; `0` is fully transparent.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    /// Opaque white.
    pub const WHITE: Color = Color::rgb(255, 255, 255);
    /// Fully transparent.
    pub const TRANSPARENT: Color = Color::rgba(0, 0, 0, 0);

    /// Creates an opaque color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Creates a color with an explicit alpha.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }
}

/// An axis-aligned rectangle in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    /// Left edge.
    pub x: i32,
    /// Top edge.
    pub y: i32,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Rect {
    /// Creates a rectangle.
    pub const fn new(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Returns `true` if the point lies inside the rectangle.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x
            && y >= self.y
            && (x as i64) < self.x as i64 + self.width as i64
            && (y as i64) < self.y as i64 + self.height as i64
    }
}

/// A CPU-side framebuffer.
#[derive(Debug, Clone)]
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<Color>,
}

impl Canvas {
    /// Creates a canvas cleared to black. Zero dimensions are raised to one.
    pub fn new(width: u32, height: u32) -> Self {
        let width = width.max(1);
        let height = height.max(1);
        Self {
            width,
            height,
            pixels: vec![Color::BLACK; (width * height) as usize],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Reallocates the canvas for a new size. Contents are cleared to black.
    pub fn resize(&mut self, width: u32, height: u32) {
        *self = Canvas::new(width, height);
    }

    /// Fills the whole canvas.
    pub fn clear(&mut self, color: Color) {
        self.pixels.fill(color);
    }

    /// The color at `(x, y)`, or `None` outside the canvas.
    pub fn pixel(&self, x: i32, y: i32) -> Option<Color> {
        self.index(x, y).map(|i| self.pixels[i])
    }

    /// Writes one pixel; writes outside the canvas are ignored.
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Color) {
        if let Some(i) = self.index(x, y) {
            self.pixels[i] = color;
        }
    }

    /// Fills a rectangle, clipped to the canvas.
    pub fn fill_rect(&mut self, rect: Rect, color: Color) {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = (rect.x as i64 + rect.width as i64).min(self.width as i64) as i32;
        let y1 = (rect.y as i64 + rect.height as i64).min(self.height as i64) as i32;
        for y in y0..y1 {
            let row = (y as u32 * self.width) as usize;
            for x in x0..x1 {
                self.pixels[row + x as usize] = color;
            }
        }
    }

    /// Copies a texture at its native size. Fully transparent texels are skipped.
    pub fn blit(&mut self, texture: &Texture, x: i32, y: i32) {
        self.blit_scaled(texture, x, y, 1.0);
    }

    /// Copies a texture with nearest-neighbour scaling. Fully transparent
    /// texels are skipped.
    pub fn blit_scaled(&mut self, texture: &Texture, x: i32, y: i32, scale: f64) {
        if !(scale.is_finite() && scale > 0.0) {
            return;
        }
        let width = scaled_extent(texture.width(), scale);
        let height = scaled_extent(texture.height(), scale);
        for dy in 0..height {
            let src_y = ((dy as f64 / scale) as u32).min(texture.height() - 1);
            for dx in 0..width {
                let src_x = ((dx as f64 / scale) as u32).min(texture.width() - 1);
                let texel = texture.texel(src_x, src_y);
                if texel.a == 0 {
                    continue;
                }
                self.set_pixel(x + dx as i32, y + dy as i32, texel);
            }
        }
    }

    /// Draws a cursor texture anchored at `position` according to `alignment`.
    pub fn draw_cursor(
        &mut self,
        texture: &Texture,
        alignment: CursorAlignment,
        position: (i32, i32),
        scale: f64,
    ) {
        let width = scaled_extent(texture.width(), scale);
        let height = scaled_extent(texture.height(), scale);
        let (offset_x, offset_y) = alignment.offset(width, height);
        self.blit_scaled(
            texture,
            position.0 + offset_x,
            position.1 + offset_y,
            scale,
        );
    }

    /// The pixels as a tightly packed RGBA byte buffer, row by row.
    pub fn to_rgba_bytes(&self) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|c| [c.r, c.g, c.b, c.a])
            .collect()
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            None
        } else {
            Some((y as u32 * self.width + x as u32) as usize)
        }
    }
}

fn scaled_extent(extent: u32, scale: f64) -> u32 {
    ((extent as f64 * scale).round() as u32).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::rgb(255, 0, 0);

    #[test]
    fn zero_sized_canvas_is_raised_to_one_pixel() {
        let canvas = Canvas::new(0, 0);
        assert_eq!((canvas.width(), canvas.height()), (1, 1));
    }

    #[test]
    fn fill_rect_is_clipped() {
        let mut canvas = Canvas::new(4, 4);
        canvas.fill_rect(Rect::new(-2, 2, 10, 10), RED);

        assert_eq!(canvas.pixel(0, 1), Some(Color::BLACK));
        assert_eq!(canvas.pixel(0, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(4, 3), None);
    }

    #[test]
    fn blit_skips_transparent_texels() {
        let texture = Texture::from_pixels(2, 1, vec![RED, Color::TRANSPARENT])
            .expect("Pixel count matches dimensions");
        let mut canvas = Canvas::new(3, 1);
        canvas.clear(Color::WHITE);
        canvas.blit(&texture, 1, 0);

        assert_eq!(canvas.pixel(0, 0), Some(Color::WHITE));
        assert_eq!(canvas.pixel(1, 0), Some(RED));
        assert_eq!(canvas.pixel(2, 0), Some(Color::WHITE));
    }

    #[test]
    fn blit_scaled_doubles_each_texel() {
        let texture = Texture::filled(1, 1, RED);
        let mut canvas = Canvas::new(4, 4);
        canvas.blit_scaled(&texture, 1, 1, 2.0);

        assert_eq!(canvas.pixel(0, 0), Some(Color::BLACK));
        assert_eq!(canvas.pixel(1, 1), Some(RED));
        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(Color::BLACK));
    }

    #[test]
    fn cursor_alignment_moves_the_texture() {
        let texture = Texture::filled(2, 2, RED);
        let mut canvas = Canvas::new(8, 8);
        canvas.draw_cursor(&texture, CursorAlignment::BottomRight, (4, 4), 1.0);

        assert_eq!(canvas.pixel(2, 2), Some(RED));
        assert_eq!(canvas.pixel(3, 3), Some(RED));
        assert_eq!(canvas.pixel(4, 4), Some(Color::BLACK));
    }

    #[test]
    fn rgba_bytes_are_row_major() {
        let mut canvas = Canvas::new(2, 1);
        canvas.set_pixel(1, 0, Color::rgba(1, 2, 3, 4));
        assert_eq!(canvas.to_rgba_bytes(), vec![0, 0, 0, 255, 1, 2, 3, 4]);
    }
}
